use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};

use crate::{holiday::UsFederalHolidays, prelude::*, tables::build_holidays_table};

#[derive(Parser)]
pub struct BurrowArgs {
    #[command(subcommand)]
    pub command: BurrowCommand,
}

#[derive(Subcommand)]
pub enum BurrowCommand {
    /// List the US federal holidays of the year.
    Holidays(BurrowHolidaysArgs),
}

#[derive(Parser)]
pub struct BurrowHolidaysArgs {
    /// Defaults to the current year.
    #[clap(long)]
    year: Option<i32>,
}

impl BurrowHolidaysArgs {
    #[instrument(skip_all)]
    pub fn run(&self) -> Result {
        let year = self.year.unwrap_or_else(|| Local::now().year());
        let holidays = UsFederalHolidays::on_year(year);
        info!(year, len = holidays.len(), "gotcha");
        println!("{}", build_holidays_table(&holidays));
        Ok(())
    }
}
