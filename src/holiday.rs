use std::collections::BTreeSet;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use itertools::Itertools;

/// Answers whether a calendar date is a holiday.
pub trait HolidayCalendar {
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

impl HolidayCalendar for BTreeSet<NaiveDate> {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.contains(&date)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: &'static str,

    /// The holiday is shifted to this date because the actual one falls on a weekend.
    pub is_observed: bool,
}

/// United States federal holidays, computed from the rules rather than a table.
///
/// Before 1971, Washington's Birthday, Memorial Day, and Columbus Day fall on their fixed dates.
/// Columbus Day starts in 1937, Veterans (Armistice) Day in 1938, Juneteenth in 2021.
#[derive(Copy, Clone, Debug, Default)]
pub struct UsFederalHolidays;

impl UsFederalHolidays {
    /// Holidays, including the observed days, that belong to the specified year's calendar.
    ///
    /// New Year's Day observed on December 31 is listed under the year it is observed in.
    #[must_use]
    pub fn on_year(year: i32) -> Vec<Holiday> {
        Self::iter_year(year).sorted_by_key(|holiday| holiday.date).collect()
    }

    /// Unordered holidays of the year.
    fn iter_year(year: i32) -> impl Iterator<Item = Holiday> {
        let is_uniform_monday = year >= 1971;

        let fixed = [
            (1, 1, "New Year's Day", true),
            (6, 19, "Juneteenth National Independence Day", year >= 2021),
            (7, 4, "Independence Day", true),
            (11, 11, "Veterans Day", year >= 1938 && !(1971..=1977).contains(&year)),
            (12, 25, "Christmas Day", true),
        ];
        let fixed = fixed
            .into_iter()
            .filter(|(_, _, _, is_active)| *is_active)
            .filter_map(move |(month, day, name, _)| {
                NaiveDate::from_ymd_opt(year, month, day)
                    .map(|date| Holiday { date, name, is_observed: false })
            })
            .flat_map(|holiday| {
                let observed = observed_on(holiday.date)
                    .map(|date| Holiday { date, is_observed: true, ..holiday });
                [Some(holiday), observed].into_iter().flatten()
            });

        let floating = [
            (
                "Martin Luther King Jr. Day",
                nth_weekday(year, 1, Weekday::Mon, 3).filter(|_| year >= 1986),
            ),
            (
                "Washington's Birthday",
                if is_uniform_monday {
                    nth_weekday(year, 2, Weekday::Mon, 3)
                } else {
                    NaiveDate::from_ymd_opt(year, 2, 22)
                },
            ),
            (
                "Memorial Day",
                if is_uniform_monday {
                    last_weekday(year, 5, Weekday::Mon)
                } else {
                    NaiveDate::from_ymd_opt(year, 5, 30)
                },
            ),
            ("Labor Day", nth_weekday(year, 9, Weekday::Mon, 1).filter(|_| year >= 1894)),
            (
                "Columbus Day",
                if is_uniform_monday {
                    nth_weekday(year, 10, Weekday::Mon, 2)
                } else {
                    NaiveDate::from_ymd_opt(year, 10, 12).filter(|_| year >= 1937)
                },
            ),
            (
                "Veterans Day",
                nth_weekday(year, 10, Weekday::Mon, 4).filter(|_| (1971..=1977).contains(&year)),
            ),
            (
                "Thanksgiving",
                if year >= 1942 {
                    nth_weekday(year, 11, Weekday::Thu, 4)
                } else {
                    last_weekday(year, 11, Weekday::Thu)
                },
            ),
        ];
        let floating = floating.into_iter().filter_map(|(name, date)| {
            date.map(|date| Holiday { date, name, is_observed: false })
        });

        // Next year's New Year's Day may be observed on this year's December 31.
        let next_new_year = NaiveDate::from_ymd_opt(year + 1, 1, 1)
            .and_then(observed_on)
            .map(|date| Holiday { date, name: "New Year's Day", is_observed: true });

        fixed
            .chain(floating)
            .chain(next_new_year)
            .filter(move |holiday| holiday.date.year() == year)
    }
}

impl HolidayCalendar for UsFederalHolidays {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        Self::iter_year(date.year()).any(|holiday| holiday.date == date)
    }
}

/// Weekday a fixed-date holiday is observed on, if it falls on a weekend.
fn observed_on(date: NaiveDate) -> Option<NaiveDate> {
    match date.weekday() {
        Weekday::Sat => date.checked_sub_days(Days::new(1)),
        Weekday::Sun => date.checked_add_days(Days::new(1)),
        _ => None,
    }
}

fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u8) -> Option<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, weekday, n)
}

fn last_weekday(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    nth_weekday(year, month, weekday, 5).or_else(|| nth_weekday(year, month, weekday, 4))
}
