use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter},
};

use ordered_float::OrderedFloat;
use serde::Serialize;

/// Price of one kilowatt-hour in the configured currency.
#[repr(transparent)]
#[derive(Clone, Copy, Serialize, derive_more::From)]
pub struct KilowattHourPrice(pub f64);

impl KilowattHourPrice {
    pub const UNIT: &'static str = "USD/kWh";

    /// Negative and `NaN` prices are not valid tariff prices.
    #[must_use]
    pub fn is_valid(self) -> bool {
        !self.0.is_nan() && self.0 >= 0.0
    }
}

impl Display for KilowattHourPrice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4} {}", self.0, Self::UNIT)
    }
}

impl Debug for KilowattHourPrice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}{}", self.0, Self::UNIT)
    }
}

impl PartialEq for KilowattHourPrice {
    fn eq(&self, other: &Self) -> bool {
        OrderedFloat(self.0).eq(&OrderedFloat(other.0))
    }
}

impl Eq for KilowattHourPrice {}

impl PartialOrd for KilowattHourPrice {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KilowattHourPrice {
    fn cmp(&self, other: &Self) -> Ordering {
        OrderedFloat(self.0).cmp(&OrderedFloat(other.0))
    }
}
