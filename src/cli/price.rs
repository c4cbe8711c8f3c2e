use chrono::{Local, NaiveDateTime};
use clap::Parser;

use crate::{cli::config::ConfigArgs, prelude::*, tables::build_state_table};

#[derive(Parser)]
pub struct PriceArgs {
    #[clap(flatten)]
    config: ConfigArgs,

    /// Local time to evaluate at, for example: `2024-07-04T16:00:00`. Defaults to now.
    #[clap(long)]
    at: Option<NaiveDateTime>,

    /// Print the sensor state as JSON.
    #[clap(long)]
    json: bool,
}

impl PriceArgs {
    #[instrument(skip_all)]
    pub fn run(&self) -> Result {
        let sensor = self.config.load_sensor()?;
        let now = self.at.unwrap_or_else(|| Local::now().naive_local());
        let state = sensor.state_at(now);
        info!(%now, price = %state.state, period = %state.attributes.period, "evaluated");
        if self.json {
            println!("{}", serde_json::to_string_pretty(&state)?);
        } else {
            println!("{}", build_state_table(&state));
        }
        Ok(())
    }
}
