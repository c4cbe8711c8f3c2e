use std::fmt::{Display, Formatter};

use chrono::{Datelike, NaiveDate};
use enumset::EnumSet;
use serde::Serialize;

#[derive(Debug, Ord, PartialOrd, Hash, enumset::EnumSetType)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    const ALL: [Self; 12] = [
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
    ];

    /// Month by its 1-based number.
    #[must_use]
    pub fn from_number(number: u32) -> Option<Self> {
        Self::ALL.get(usize::try_from(number.checked_sub(1)?).ok()?).copied()
    }

    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self::ALL[date.month0() as usize]
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Summer,
    Winter,
}

impl Season {
    #[must_use]
    pub fn of(date: NaiveDate, summer_months: EnumSet<Month>) -> Self {
        if summer_months.contains(Month::of(date)) { Self::Summer } else { Self::Winter }
    }
}

impl Display for Season {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Summer => write!(f, "Summer"),
            Self::Winter => write!(f, "Winter"),
        }
    }
}
