pub mod evaluation;
pub mod season;
pub mod timeline;
pub mod window;

use std::fmt::{Display, Formatter};

use bon::Builder;
use enumset::EnumSet;
use serde::{Deserialize, Serialize};

use crate::{
    quantity::price::KilowattHourPrice,
    tariff::{
        season::{Month, Season},
        window::PeakWindow,
    },
};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Flat rate, regardless of time.
    Fixed,

    /// Peak and off-peak prices per season.
    #[default]
    TimeOfUse,
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed => write!(f, "Fixed rate"),
            Self::TimeOfUse => write!(f, "Time of use"),
        }
    }
}

/// Validated tariff configuration.
///
/// Built by the setup validator and replaced as a whole on reconfiguration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Tariff {
    Fixed(KilowattHourPrice),
    TimeOfUse(TimeOfUse),
}

impl Tariff {
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        match self {
            Self::Fixed(_) => Strategy::Fixed,
            Self::TimeOfUse(_) => Strategy::TimeOfUse,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Builder)]
pub struct TimeOfUse {
    pub peak_window: PeakWindow,
    pub prices: PriceTable,
    pub summer_months: EnumSet<Month>,

    /// Saturdays and Sundays are off-peak all day.
    #[builder(default)]
    pub weekends_off_peak: bool,

    /// Holidays are off-peak all day.
    #[builder(default)]
    pub holidays_off_peak: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PriceTable {
    pub summer: SeasonalPrices,
    pub winter: SeasonalPrices,
}

impl PriceTable {
    #[must_use]
    pub const fn get(&self, season: Season, is_peak: bool) -> KilowattHourPrice {
        let prices = match season {
            Season::Summer => &self.summer,
            Season::Winter => &self.winter,
        };
        if is_peak { prices.peak } else { prices.off_peak }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SeasonalPrices {
    pub peak: KilowattHourPrice,
    pub off_peak: KilowattHourPrice,
}

impl SeasonalPrices {
    pub const fn new(peak: KilowattHourPrice, off_peak: KilowattHourPrice) -> Self {
        Self { peak, off_peak }
    }
}
