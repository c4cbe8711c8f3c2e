use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use enumset::EnumSet;
use itertools::Itertools;

use crate::{
    holiday::Holiday,
    sensor::SensorState,
    tariff::{Tariff, season::Month, timeline::Segment},
};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

fn flag(value: Option<bool>) -> Cell {
    match value {
        Some(true) => Cell::new("yes").fg(Color::Green),
        Some(false) => Cell::new("no").add_attribute(Attribute::Dim),
        None => Cell::new("–").add_attribute(Attribute::Dim),
    }
}

pub fn build_state_table(state: &SensorState<'_>) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Sensor", "Price", "Period", "Season", "Holiday", "Weekend"]);
    table.add_row(vec![
        Cell::new(state.name),
        Cell::new(state.state).set_alignment(CellAlignment::Right),
        Cell::new(state.attributes.period).fg(state.attributes.period.color()),
        state.attributes.season.map_or_else(
            || Cell::new("–").add_attribute(Attribute::Dim),
            Cell::new,
        ),
        flag(state.attributes.is_holiday),
        flag(state.attributes.is_weekend),
    ]);
    table
}

pub fn build_timeline_table(segments: &[Segment]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Date", "Start", "End", "Price", "Period", "Season"]);
    for segment in segments {
        let attributes = segment.evaluation.attributes;
        table.add_row(vec![
            Cell::new(segment.start.format("%b %d")).add_attribute(Attribute::Dim),
            Cell::new(segment.start.format("%H:%M")),
            Cell::new(segment.end.format("%H:%M")).add_attribute(Attribute::Dim),
            Cell::new(segment.evaluation.price)
                .set_alignment(CellAlignment::Right)
                .fg(attributes.period.color()),
            Cell::new(attributes.period).fg(attributes.period.color()),
            attributes
                .season
                .map_or_else(|| Cell::new("–").add_attribute(Attribute::Dim), Cell::new),
        ]);
    }
    table
}

pub fn build_tariff_table(name: &str, tariff: &Tariff) -> Table {
    let mut table = new_table();
    table.set_header(vec![Cell::new(name), Cell::new(tariff.strategy())]);
    match tariff {
        Tariff::Fixed(price) => {
            table.add_row(vec![Cell::new("Price"), Cell::new(price)]);
        }
        Tariff::TimeOfUse(time_of_use) => {
            let peak_window = if time_of_use.peak_window.crosses_midnight() {
                format!("{} (overnight)", time_of_use.peak_window)
            } else {
                time_of_use.peak_window.to_string()
            };
            table.add_row(vec![Cell::new("Peak window"), Cell::new(peak_window)]);
            table.add_row(vec![
                Cell::new("Summer months"),
                Cell::new(format_months(time_of_use.summer_months)),
            ]);
            table.add_row(vec![
                Cell::new("Summer peak"),
                Cell::new(time_of_use.prices.summer.peak),
            ]);
            table.add_row(vec![
                Cell::new("Summer off-peak"),
                Cell::new(time_of_use.prices.summer.off_peak),
            ]);
            table.add_row(vec![
                Cell::new("Winter peak"),
                Cell::new(time_of_use.prices.winter.peak),
            ]);
            table.add_row(vec![
                Cell::new("Winter off-peak"),
                Cell::new(time_of_use.prices.winter.off_peak),
            ]);
            table.add_row(vec![
                Cell::new("Weekends off-peak"),
                flag(Some(time_of_use.weekends_off_peak)),
            ]);
            table.add_row(vec![
                Cell::new("Holidays off-peak"),
                flag(Some(time_of_use.holidays_off_peak)),
            ]);
        }
    }
    table
}

pub fn build_holidays_table(holidays: &[Holiday]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Date", "Day", "Holiday"]);
    for holiday in holidays {
        table.add_row(vec![
            Cell::new(holiday.date.format("%Y-%m-%d")),
            Cell::new(holiday.date.format("%a")).add_attribute(Attribute::Dim),
            if holiday.is_observed {
                Cell::new(format!("{} (observed)", holiday.name)).add_attribute(Attribute::Dim)
            } else {
                Cell::new(holiday.name)
            },
        ]);
    }
    table
}

fn format_months(months: EnumSet<Month>) -> String {
    if months.is_empty() {
        return "none".to_owned();
    }
    months.iter().map(|month| format!("{month:?}")).join(", ")
}
