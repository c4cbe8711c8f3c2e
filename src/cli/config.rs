use std::{fs, path::PathBuf};

use clap::Parser;

use crate::{
    holiday::UsFederalHolidays,
    prelude::*,
    sensor::TariffSensor,
    setup::TariffEntry,
    tariff::Tariff,
};

#[derive(Parser)]
pub struct ConfigArgs {
    /// Tariff configuration file in TOML.
    #[clap(long = "config", env = "TARIFF_CONFIG", default_value = "tariff.toml")]
    pub path: PathBuf,
}

impl ConfigArgs {
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<TariffEntry> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read `{}`", self.path.display()))?;
        toml::from_str(&text).with_context(|| format!("failed to parse `{}`", self.path.display()))
    }

    /// Load the configuration, apply the options, and validate the result.
    pub fn load_tariff(&self) -> Result<(String, Tariff)> {
        let setup = self.load()?.merged();
        let tariff = Tariff::try_from(&setup).context("invalid tariff setup")?;
        debug!(name = %setup.name, strategy = %tariff.strategy(), "loaded the tariff");
        Ok((setup.name, tariff))
    }

    pub fn load_sensor(&self) -> Result<TariffSensor<UsFederalHolidays>> {
        let (name, tariff) = self.load_tariff()?;
        Ok(TariffSensor::new(name, tariff, UsFederalHolidays))
    }
}
