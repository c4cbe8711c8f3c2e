use std::time::Duration;

use clap::Parser;
use tokio::{
    signal,
    time::{MissedTickBehavior, interval},
};

use crate::{
    cli::config::ConfigArgs,
    holiday::HolidayCalendar,
    prelude::*,
    sensor::{Poll, TariffSensor},
};

#[derive(Parser)]
pub struct WatchArgs {
    #[clap(flatten)]
    config: ConfigArgs,

    #[clap(long, env = "POLLING_INTERVAL", default_value = "1min")]
    polling_interval: humantime::Duration,

    /// Print each sensor state as a JSON line.
    #[clap(long)]
    json: bool,
}

impl WatchArgs {
    pub async fn run(self) -> Result {
        let sensor = self.config.load_sensor()?;
        info!(name = sensor.name(), unique_id = sensor.unique_id(), "watching…");

        let polling_interval: Duration = self.polling_interval.into();
        let mut interval = interval(polling_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut watcher = Watcher { config: self.config, sensor, json: self.json };
        loop {
            tokio::select! {
                _ = interval.tick() => {}
                result = signal::ctrl_c() => {
                    result?;
                    info!("interrupted");
                    return Ok(());
                }
            }
            watcher.reload();
            watcher.poll()?;
        }
    }
}

struct Watcher<H> {
    config: ConfigArgs,
    sensor: TariffSensor<H>,
    json: bool,
}

impl<H: HolidayCalendar> Watcher<H> {
    /// Pick up the configuration changes, keeping the current tariff if the new one is invalid.
    fn reload(&mut self) {
        match self.config.load_tariff() {
            Ok((_, tariff)) => {
                self.sensor.reconfigure(tariff);
            }
            Err(error) => {
                let strategy = self.sensor.tariff().strategy();
                warn!(%strategy, "keeping the current tariff: {error:#}");
            }
        }
    }

    fn poll(&self) -> Result {
        let state = self.sensor.poll();
        info!(price = %state.state, period = %state.attributes.period, "polled");
        if self.json {
            println!("{}", serde_json::to_string(&state)?);
        }
        Ok(())
    }
}
