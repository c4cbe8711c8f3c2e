use std::fmt::{Display, Formatter};

use chrono::{Datelike, NaiveDateTime, Weekday};
use comfy_table::Color;
use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::{
    holiday::HolidayCalendar,
    prelude::*,
    quantity::price::KilowattHourPrice,
    tariff::{Tariff, TimeOfUse, season::Season},
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Peak,
    OffPeak,
    Fixed,

    /// The peak window could not be classified, the off-peak price applies.
    Error,
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Peak => write!(f, "Peak"),
            Self::OffPeak => write!(f, "Off-peak"),
            Self::Fixed => write!(f, "Fixed"),
            Self::Error => write!(f, "Error"),
        }
    }
}

impl Period {
    pub const fn color(self) -> Color {
        match self {
            Self::Peak => Color::Red,
            Self::OffPeak => Color::Green,
            Self::Fixed => Color::Reset,
            Self::Error => Color::DarkYellow,
        }
    }
}

/// Why the price applies.
#[skip_serializing_none]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Attributes {
    pub period: Period,
    pub season: Option<Season>,
    pub is_holiday: Option<bool>,
    pub is_weekend: Option<bool>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Evaluation {
    pub price: KilowattHourPrice,
    pub attributes: Attributes,
}

impl Tariff {
    /// Price at the specified local wall-clock time.
    #[must_use]
    pub fn evaluate(&self, now: NaiveDateTime, holidays: &impl HolidayCalendar) -> Evaluation {
        match self {
            Self::Fixed(price) => Evaluation {
                price: *price,
                attributes: Attributes {
                    period: Period::Fixed,
                    season: None,
                    is_holiday: None,
                    is_weekend: None,
                },
            },
            Self::TimeOfUse(time_of_use) => time_of_use.evaluate(now, holidays),
        }
    }
}

impl TimeOfUse {
    #[must_use]
    pub fn evaluate(&self, now: NaiveDateTime, holidays: &impl HolidayCalendar) -> Evaluation {
        let is_weekend = matches!(now.weekday(), Weekday::Sat | Weekday::Sun);
        let is_holiday = holidays.is_holiday(now.date());

        // Weekend override goes first, the holiday one only applies if it did not.
        let period = if (self.weekends_off_peak && is_weekend)
            || (self.holidays_off_peak && is_holiday)
        {
            Period::OffPeak
        } else {
            match self.peak_window.contains(now.time()) {
                Some(true) => Period::Peak,
                Some(false) => Period::OffPeak,
                None => {
                    let window = self.peak_window;
                    error!(?window, "empty peak window, falling back to off-peak");
                    Period::Error
                }
            }
        };

        let season = Season::of(now.date(), self.summer_months);
        Evaluation {
            price: self.prices.get(season, period == Period::Peak),
            attributes: Attributes {
                period,
                season: Some(season),
                is_holiday: Some(is_holiday),
                is_weekend: Some(is_weekend),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::{NaiveDate, NaiveTime};
    use enumset::enum_set;

    use super::*;
    use crate::{
        holiday::UsFederalHolidays,
        tariff::{PriceTable, SeasonalPrices, season::Month, window::PeakWindow},
    };

    const SUMMER_PEAK: KilowattHourPrice = KilowattHourPrice(0.2339);
    const SUMMER_OFF_PEAK: KilowattHourPrice = KilowattHourPrice(0.1764);
    const WINTER_PEAK: KilowattHourPrice = KilowattHourPrice(0.1912);
    const WINTER_OFF_PEAK: KilowattHourPrice = KilowattHourPrice(0.1650);

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    fn window(start_hour: u32, end_hour: u32) -> PeakWindow {
        PeakWindow::new(
            NaiveTime::from_hms_opt(start_hour, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(end_hour, 0, 0).unwrap(),
        )
    }

    fn time_of_use(peak_window: PeakWindow) -> TimeOfUse {
        TimeOfUse::builder()
            .peak_window(peak_window)
            .prices(PriceTable {
                summer: SeasonalPrices::new(SUMMER_PEAK, SUMMER_OFF_PEAK),
                winter: SeasonalPrices::new(WINTER_PEAK, WINTER_OFF_PEAK),
            })
            .summer_months(enum_set!(Month::June | Month::July | Month::August | Month::September))
            .weekends_off_peak(true)
            .holidays_off_peak(true)
            .build()
    }

    fn no_holidays() -> BTreeSet<NaiveDate> {
        BTreeSet::new()
    }

    #[test]
    fn test_fixed_ignores_time() {
        let tariff = Tariff::Fixed(KilowattHourPrice(0.15));
        for now in [at(2024, 7, 4, 16, 0, 0), at(2024, 1, 6, 3, 0, 0), at(2025, 12, 31, 23, 59, 59)]
        {
            let evaluation = tariff.evaluate(now, &UsFederalHolidays);
            assert_eq!(evaluation.price, KilowattHourPrice(0.15));
            assert_eq!(evaluation.attributes.period, Period::Fixed);
            assert_eq!(evaluation.attributes.season, None);
            assert_eq!(evaluation.attributes.is_holiday, None);
            assert_eq!(evaluation.attributes.is_weekend, None);
        }
    }

    #[test]
    fn test_window_boundaries() {
        // Tuesday in July.
        let tariff = Tariff::TimeOfUse(time_of_use(window(15, 19)));
        let holidays = no_holidays();
        let period = |hour, minute, second| {
            tariff.evaluate(at(2024, 7, 9, hour, minute, second), &holidays).attributes.period
        };
        assert_eq!(period(14, 59, 59), Period::OffPeak);
        assert_eq!(period(15, 0, 0), Period::Peak);
        assert_eq!(period(18, 59, 59), Period::Peak);
        assert_eq!(period(19, 0, 0), Period::OffPeak);
    }

    #[test]
    fn test_midnight_crossing() {
        let tariff = Tariff::TimeOfUse(time_of_use(window(22, 6)));
        let holidays = no_holidays();
        let evaluate =
            |day, hour, minute| tariff.evaluate(at(2024, 7, day, hour, minute, 0), &holidays);

        let late = evaluate(9, 23, 30);
        assert_eq!(late.attributes.period, Period::Peak);
        assert_eq!(late.price, SUMMER_PEAK);

        assert_eq!(evaluate(10, 5, 30).attributes.period, Period::Peak);
        assert_eq!(evaluate(10, 10, 0).attributes.period, Period::OffPeak);
        assert_eq!(evaluate(10, 10, 0).price, SUMMER_OFF_PEAK);
    }

    #[test]
    fn test_weekend_override() {
        let tariff = Tariff::TimeOfUse(time_of_use(window(15, 19)));

        // Saturday.
        let evaluation = tariff.evaluate(at(2024, 7, 13, 16, 0, 0), &no_holidays());
        assert_eq!(evaluation.attributes.period, Period::OffPeak);
        assert_eq!(evaluation.attributes.is_weekend, Some(true));
        assert_eq!(evaluation.attributes.is_holiday, Some(false));
        assert_eq!(evaluation.price, SUMMER_OFF_PEAK);
    }

    #[test]
    fn test_weekend_without_override() {
        let mut time_of_use = time_of_use(window(15, 19));
        time_of_use.weekends_off_peak = false;
        let tariff = Tariff::TimeOfUse(time_of_use);

        // Sunday.
        let evaluation = tariff.evaluate(at(2024, 7, 14, 16, 0, 0), &no_holidays());
        assert_eq!(evaluation.attributes.period, Period::Peak);
        assert_eq!(evaluation.attributes.is_weekend, Some(true));
    }

    #[test]
    fn test_holiday_override() {
        let tariff = Tariff::TimeOfUse(time_of_use(window(15, 19)));

        // Independence Day 2024 is a Thursday.
        let evaluation = tariff.evaluate(at(2024, 7, 4, 16, 0, 0), &UsFederalHolidays);
        assert_eq!(evaluation.attributes.period, Period::OffPeak);
        assert_eq!(evaluation.attributes.is_holiday, Some(true));
        assert_eq!(evaluation.attributes.is_weekend, Some(false));
        assert_eq!(evaluation.price, SUMMER_OFF_PEAK);
    }

    #[test]
    fn test_holiday_without_override() {
        let mut time_of_use = time_of_use(window(15, 19));
        time_of_use.holidays_off_peak = false;
        let tariff = Tariff::TimeOfUse(time_of_use);

        let evaluation = tariff.evaluate(at(2024, 7, 4, 16, 0, 0), &UsFederalHolidays);
        assert_eq!(evaluation.attributes.period, Period::Peak);
        assert_eq!(evaluation.attributes.is_holiday, Some(true));
    }

    #[test]
    fn test_weekend_holiday_reports_both() {
        let tariff = Tariff::TimeOfUse(time_of_use(window(15, 19)));

        // Christmas 2022 is a Sunday.
        let evaluation = tariff.evaluate(at(2022, 12, 25, 16, 0, 0), &UsFederalHolidays);
        assert_eq!(evaluation.attributes.period, Period::OffPeak);
        assert_eq!(evaluation.attributes.is_weekend, Some(true));
        assert_eq!(evaluation.attributes.is_holiday, Some(true));
        assert_eq!(evaluation.price, WINTER_OFF_PEAK);
    }

    #[test]
    fn test_weekend_holiday_either_override() {
        // Christmas 2022 is a Sunday.
        let now = at(2022, 12, 25, 16, 0, 0);
        for (weekends_off_peak, holidays_off_peak, expected) in [
            (true, false, Period::OffPeak),
            (false, true, Period::OffPeak),
            (false, false, Period::Peak),
        ] {
            let mut time_of_use = time_of_use(window(15, 19));
            time_of_use.weekends_off_peak = weekends_off_peak;
            time_of_use.holidays_off_peak = holidays_off_peak;
            let evaluation = Tariff::TimeOfUse(time_of_use).evaluate(now, &UsFederalHolidays);
            assert_eq!(evaluation.attributes.period, expected);
            assert_eq!(evaluation.attributes.is_weekend, Some(true));
            assert_eq!(evaluation.attributes.is_holiday, Some(true));
        }
    }

    #[test]
    fn test_season_selection() {
        let tariff = Tariff::TimeOfUse(time_of_use(window(15, 19)));
        let holidays = no_holidays();

        let july = tariff.evaluate(at(2024, 7, 1, 10, 0, 0), &holidays);
        assert_eq!(july.attributes.season, Some(Season::Summer));
        assert_eq!(july.price, SUMMER_OFF_PEAK);

        let january = tariff.evaluate(at(2024, 1, 1, 10, 0, 0), &holidays);
        assert_eq!(january.attributes.season, Some(Season::Winter));
        assert_eq!(january.price, WINTER_OFF_PEAK);

        let january_peak = tariff.evaluate(at(2024, 1, 2, 16, 0, 0), &holidays);
        assert_eq!(january_peak.price, WINTER_PEAK);
    }

    #[test]
    fn test_empty_window_falls_back_to_error() {
        let tariff = Tariff::TimeOfUse(time_of_use(window(15, 15)));
        let evaluation = tariff.evaluate(at(2024, 7, 9, 15, 0, 0), &no_holidays());
        assert_eq!(evaluation.attributes.period, Period::Error);
        assert_eq!(evaluation.price, SUMMER_OFF_PEAK);
    }

    #[test]
    fn test_empty_window_is_not_reached_on_override() {
        let tariff = Tariff::TimeOfUse(time_of_use(window(15, 15)));
        let evaluation = tariff.evaluate(at(2024, 7, 13, 15, 0, 0), &no_holidays());
        assert_eq!(evaluation.attributes.period, Period::OffPeak);
    }

    #[test]
    fn test_idempotence() {
        let tariff = Tariff::TimeOfUse(time_of_use(window(22, 6)));
        let now = at(2024, 11, 28, 23, 0, 0);
        let first = tariff.evaluate(now, &UsFederalHolidays);
        for _ in 0..10 {
            assert_eq!(tariff.evaluate(now, &UsFederalHolidays), first);
        }
    }

    #[test]
    fn test_serialized_attributes() {
        let fixed = Tariff::Fixed(KilowattHourPrice(0.15))
            .evaluate(at(2024, 7, 9, 16, 0, 0), &no_holidays())
            .attributes;
        assert_eq!(serde_json::to_value(fixed).unwrap(), serde_json::json!({"period": "fixed"}));

        let time_of_use = Tariff::TimeOfUse(time_of_use(window(15, 19)))
            .evaluate(at(2024, 7, 9, 16, 0, 0), &no_holidays())
            .attributes;
        assert_eq!(
            serde_json::to_value(time_of_use).unwrap(),
            serde_json::json!({
                "period": "peak",
                "season": "summer",
                "is_holiday": false,
                "is_weekend": false,
            }),
        );
    }
}
