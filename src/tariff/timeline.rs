use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use itertools::Itertools;

use crate::{
    holiday::HolidayCalendar,
    tariff::{Tariff, evaluation::Evaluation},
};

/// Interval of constant price.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Segment {
    /// Inclusive.
    pub start: NaiveDateTime,

    /// Exclusive.
    pub end: NaiveDateTime,

    pub evaluation: Evaluation,
}

impl Tariff {
    /// Split the day into intervals of constant price.
    #[must_use]
    pub fn timeline(&self, date: NaiveDate, holidays: &impl HolidayCalendar) -> Vec<Segment> {
        let Some(next_midnight) = date.checked_add_days(Days::new(1)) else {
            return Vec::new();
        };
        let boundaries = match self {
            Self::Fixed(_) => vec![NaiveTime::MIN],
            Self::TimeOfUse(time_of_use) => {
                vec![NaiveTime::MIN, time_of_use.peak_window.start, time_of_use.peak_window.end]
            }
        };
        boundaries
            .into_iter()
            .sorted()
            .dedup()
            .map(|time| date.and_time(time))
            .chain([next_midnight.and_time(NaiveTime::MIN)])
            .tuple_windows()
            .map(|(start, end)| Segment { start, end, evaluation: self.evaluate(start, holidays) })
            .coalesce(|lhs, rhs| {
                if lhs.evaluation == rhs.evaluation {
                    Ok(Segment { end: rhs.end, ..lhs })
                } else {
                    Err((lhs, rhs))
                }
            })
            .collect()
    }
}
