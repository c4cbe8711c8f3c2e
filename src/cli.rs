mod burrow;
mod config;
mod price;
mod timeline;
mod validate;
mod watch;

use clap::{Parser, Subcommand};

pub use self::{
    burrow::{BurrowArgs, BurrowCommand},
    price::PriceArgs,
    timeline::TimelineArgs,
    validate::ValidateArgs,
    watch::WatchArgs,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Evaluate the tariff once and print the current price.
    #[clap(name = "price")]
    Price(Box<PriceArgs>),

    /// Validate the tariff configuration.
    #[clap(name = "validate")]
    Validate(Box<ValidateArgs>),

    /// Print the day split into intervals of constant price.
    #[clap(name = "timeline")]
    Timeline(Box<TimelineArgs>),

    /// Poll the price periodically, picking up configuration changes.
    #[clap(name = "watch")]
    Watch(Box<WatchArgs>),

    /// Development tools.
    #[clap(name = "burrow")]
    Burrow(Box<BurrowArgs>),
}
