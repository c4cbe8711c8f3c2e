use clap::Parser;

use crate::{
    cli::config::ConfigArgs,
    prelude::*,
    setup::validate,
    tables::build_tariff_table,
    tariff::Tariff,
};

#[derive(Parser)]
pub struct ValidateArgs {
    #[clap(flatten)]
    config: ConfigArgs,
}

impl ValidateArgs {
    #[instrument(skip_all)]
    pub fn run(&self) -> Result {
        let entry = self.config.load()?;
        if !validate(&entry.data).is_empty() {
            warn!("the initial setup alone is invalid, relying on the options");
        }

        let setup = entry.merged();
        if let Some(error) = validate(&setup).base() {
            bail!("invalid tariff setup: {error}");
        }

        let tariff = Tariff::try_from(&setup)?;
        info!(name = %setup.name, "valid");
        println!("{}", build_tariff_table(&setup.name, &tariff));
        Ok(())
    }
}
