use chrono::{Local, NaiveDateTime};
use serde::Serialize;

use crate::{
    holiday::HolidayCalendar,
    prelude::*,
    quantity::price::KilowattHourPrice,
    tariff::{
        Tariff,
        evaluation::{Attributes, Evaluation},
    },
};

/// Something a host polls once per update cycle.
pub trait Poll {
    fn poll(&self) -> SensorState<'_>;
}

/// Current price as exposed to a home-automation host.
#[derive(Debug, Serialize)]
pub struct SensorState<'a> {
    pub unique_id: &'a str,
    pub name: &'a str,
    pub state: KilowattHourPrice,
    pub unit_of_measurement: &'static str,
    pub icon: &'static str,
    pub device_class: &'static str,
    pub state_class: &'static str,
    pub attributes: Attributes,
}

pub struct TariffSensor<H> {
    name: String,
    unique_id: String,
    tariff: Tariff,
    holidays: H,
}

impl<H: HolidayCalendar> TariffSensor<H> {
    pub fn new(name: impl Into<String>, tariff: Tariff, holidays: H) -> Self {
        let name = name.into();
        let unique_id = format!("energy_tariff_{}", name.to_lowercase().replace(' ', "_"));
        Self { name, unique_id, tariff, holidays }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    #[must_use]
    pub const fn tariff(&self) -> &Tariff {
        &self.tariff
    }

    /// Replace the tariff as a whole.
    ///
    /// Returns `true` if the tariff has actually changed.
    pub fn reconfigure(&mut self, tariff: Tariff) -> bool {
        if tariff == self.tariff {
            return false;
        }
        info!(name = %self.name, strategy = %tariff.strategy(), "reconfigured");
        self.tariff = tariff;
        true
    }

    #[must_use]
    pub fn evaluate_at(&self, now: NaiveDateTime) -> Evaluation {
        self.tariff.evaluate(now, &self.holidays)
    }

    #[must_use]
    pub fn state_at(&self, now: NaiveDateTime) -> SensorState<'_> {
        let evaluation = self.evaluate_at(now);
        SensorState {
            unique_id: &self.unique_id,
            name: &self.name,
            state: evaluation.price,
            unit_of_measurement: KilowattHourPrice::UNIT,
            icon: "mdi:cash",
            device_class: "monetary",
            state_class: "measurement",
            attributes: evaluation.attributes,
        }
    }
}

impl<H: HolidayCalendar> Poll for TariffSensor<H> {
    fn poll(&self) -> SensorState<'_> {
        self.state_at(Local::now().naive_local())
    }
}
