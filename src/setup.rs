use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
};

use chrono::NaiveTime;
use enumset::EnumSet;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    quantity::price::KilowattHourPrice,
    tariff::{
        PriceTable,
        SeasonalPrices,
        Strategy,
        Tariff,
        TimeOfUse,
        season::Month,
        window::PeakWindow,
    },
};

/// Tariff setup as entered by the user, not yet validated.
///
/// Missing fields fall back to a 3–7 PM weekday peak.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TariffSetup {
    pub name: String,
    pub strategy: Strategy,
    pub price_fixed: f64,
    pub peak_start: String,
    pub peak_end: String,
    pub price_summer_peak: f64,
    pub price_summer_offpeak: f64,
    pub price_winter_peak: f64,
    pub price_winter_offpeak: f64,
    pub summer_months: Vec<u32>,
    pub weekends_offpeak: bool,
    pub holidays_offpeak: bool,
}

impl Default for TariffSetup {
    fn default() -> Self {
        Self {
            name: "My Energy Rate".to_owned(),
            strategy: Strategy::TimeOfUse,
            price_fixed: 0.15,
            peak_start: "15:00".to_owned(),
            peak_end: "19:00".to_owned(),
            price_summer_peak: 0.2339,
            price_summer_offpeak: 0.1764,
            price_winter_peak: 0.1912,
            price_winter_offpeak: 0.1764,
            summer_months: vec![6, 7, 8, 9],
            weekends_offpeak: true,
            holidays_offpeak: true,
        }
    }
}

/// Reconfiguration input: every field present here overrides the setup.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct TariffOptions {
    pub name: Option<String>,
    pub strategy: Option<Strategy>,
    pub price_fixed: Option<f64>,
    pub peak_start: Option<String>,
    pub peak_end: Option<String>,
    pub price_summer_peak: Option<f64>,
    pub price_summer_offpeak: Option<f64>,
    pub price_winter_peak: Option<f64>,
    pub price_winter_offpeak: Option<f64>,
    pub summer_months: Option<Vec<u32>>,
    pub weekends_offpeak: Option<bool>,
    pub holidays_offpeak: Option<bool>,
}

macro_rules! override_fields {
    ($setup:ident, $options:ident, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $options.$field {
                $setup.$field = value;
            }
        )+
    };
}

impl TariffOptions {
    #[must_use]
    pub fn apply(self, mut setup: TariffSetup) -> TariffSetup {
        let options = self;
        override_fields!(
            setup,
            options,
            name,
            strategy,
            price_fixed,
            peak_start,
            peak_end,
            price_summer_peak,
            price_summer_offpeak,
            price_winter_peak,
            price_winter_offpeak,
            summer_months,
            weekends_offpeak,
            holidays_offpeak,
        );
        setup
    }
}

/// Stored configuration entry: the initial setup and the later reconfiguration.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct TariffEntry {
    #[serde(flatten)]
    pub data: TariffSetup,

    #[serde(default)]
    pub options: TariffOptions,
}

impl TariffEntry {
    /// Setup with the options applied on top.
    #[must_use]
    pub fn merged(&self) -> TariffSetup {
        self.options.clone().apply(self.data.clone())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, thiserror::Error)]
pub enum ValidationError {
    #[error("peak start and end must be `HH:MM` 24-hour times")]
    InvalidTimeFormat,

    #[error("peak start and end must differ")]
    SameStartEnd,

    #[error("prices must not be negative")]
    NegativePrice,

    #[error("summer months must be numbered 1 to 12")]
    InvalidMonth,
}

/// Validation errors by form slot, empty when the setup is valid.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ValidationErrors(BTreeMap<&'static str, ValidationError>);

impl ValidationErrors {
    /// Form-level slot, not tied to any particular field.
    pub const BASE: &'static str = "base";

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, slot: &str) -> Option<ValidationError> {
        self.0.get(slot).copied()
    }

    #[must_use]
    pub fn base(&self) -> Option<ValidationError> {
        self.get(Self::BASE)
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(BTreeMap::from([(Self::BASE, error)]))
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().map(|(slot, error)| format!("{slot}: {error}")).join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate the setup. The same rules apply to the initial setup and to reconfiguration.
#[must_use]
pub fn validate(setup: &TariffSetup) -> ValidationErrors {
    build(setup).err().map(ValidationErrors::from).unwrap_or_default()
}

impl TryFrom<&TariffSetup> for Tariff {
    type Error = ValidationErrors;

    fn try_from(setup: &TariffSetup) -> Result<Self, Self::Error> {
        build(setup).map_err(ValidationErrors::from)
    }
}

/// Build the tariff, stopping at the first violated rule.
fn build(setup: &TariffSetup) -> Result<Tariff, ValidationError> {
    match setup.strategy {
        Strategy::Fixed => Ok(Tariff::Fixed(parse_price(setup.price_fixed)?)),
        Strategy::TimeOfUse => {
            let start = parse_time(&setup.peak_start)?;
            let end = parse_time(&setup.peak_end)?;
            if start == end {
                return Err(ValidationError::SameStartEnd);
            }
            let prices = PriceTable {
                summer: SeasonalPrices::new(
                    parse_price(setup.price_summer_peak)?,
                    parse_price(setup.price_summer_offpeak)?,
                ),
                winter: SeasonalPrices::new(
                    parse_price(setup.price_winter_peak)?,
                    parse_price(setup.price_winter_offpeak)?,
                ),
            };
            let summer_months = setup
                .summer_months
                .iter()
                .map(|number| Month::from_number(*number).ok_or(ValidationError::InvalidMonth))
                .collect::<Result<EnumSet<_>, _>>()?;
            Ok(Tariff::TimeOfUse(
                TimeOfUse::builder()
                    .peak_window(PeakWindow::new(start, end))
                    .prices(prices)
                    .summer_months(summer_months)
                    .weekends_off_peak(setup.weekends_offpeak)
                    .holidays_off_peak(setup.holidays_offpeak)
                    .build(),
            ))
        }
    }
}

fn parse_time(text: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(text, "%H:%M").map_err(|_| ValidationError::InvalidTimeFormat)
}

fn parse_price(value: f64) -> Result<KilowattHourPrice, ValidationError> {
    let price = KilowattHourPrice(value);
    if price.is_valid() { Ok(price) } else { Err(ValidationError::NegativePrice) }
}
