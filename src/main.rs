#![allow(clippy::doc_markdown)]

mod cli;
mod holiday;
mod prelude;
mod quantity;
mod sensor;
mod setup;
mod tables;
mod tariff;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, BurrowCommand, Command, WatchArgs},
    prelude::*,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Price(args) => args.run()?,
        Command::Validate(args) => args.run()?,
        Command::Timeline(args) => args.run()?,
        Command::Watch(args) => WatchArgs::run(*args).await?,
        Command::Burrow(args) => match args.command {
            BurrowCommand::Holidays(args) => args.run()?,
        },
    }

    info!("done!");
    Ok(())
}
