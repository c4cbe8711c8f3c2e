use chrono::{Local, NaiveDate};
use clap::Parser;

use crate::{
    cli::config::ConfigArgs,
    holiday::UsFederalHolidays,
    prelude::*,
    tables::build_timeline_table,
};

#[derive(Parser)]
pub struct TimelineArgs {
    #[clap(flatten)]
    config: ConfigArgs,

    /// Date to split, for example: `2024-07-04`. Defaults to today.
    #[clap(long)]
    date: Option<NaiveDate>,
}

impl TimelineArgs {
    #[instrument(skip_all)]
    pub fn run(&self) -> Result {
        let (_, tariff) = self.config.load_tariff()?;
        let date = self.date.unwrap_or_else(|| Local::now().date_naive());
        let segments = tariff.timeline(date, &UsFederalHolidays);
        ensure!(!segments.is_empty(), "no segments on {date}");
        info!(%date, len = segments.len(), "built the timeline");
        println!("{}", build_timeline_table(&segments));
        Ok(())
    }
}
