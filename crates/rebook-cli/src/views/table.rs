use chrono::{Datelike, NaiveDate};
use comfy_table::{Attribute, Cell, Color, Row, Table};
use rebook_core::form::DateList;
use rebook_core::models::Frequency;

pub fn display_dates(list: &DateList) {
    if list.is_empty() {
        println!("No occurrences.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Weekday", "Interval"]);

    for (i, item) in list.items.iter().enumerate() {
        let mut row = Row::new();
        row.add_cell(Cell::new(i + 1));

        // Labels always start with the DD.MM.YYYY start date.
        let weekday = item
            .label
            .get(..10)
            .and_then(|d| NaiveDate::parse_from_str(d, "%d.%m.%Y").ok())
            .map(|d| d.weekday().to_string())
            .unwrap_or_default();
        let weekday_cell = if matches!(weekday.as_str(), "Sat" | "Sun") {
            Cell::new(weekday).fg(Color::Yellow)
        } else {
            Cell::new(weekday)
        };
        row.add_cell(weekday_cell);

        let interval_cell = if item.label.matches('.').count() > 2 {
            // Spans more than one day
            Cell::new(&item.label).fg(Color::Cyan)
        } else {
            Cell::new(&item.label)
        };
        row.add_cell(interval_cell);
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_frequencies(frequencies: &[Frequency]) {
    let mut table = Table::new();
    table.set_header(vec!["Frequency", "Engine unit", "Interval"]);

    for frequency in frequencies {
        let mut row = Row::new();
        row.add_cell(Cell::new(frequency.as_str()).add_attribute(Attribute::Bold));
        row.add_cell(Cell::new(frequency.engine_unit().as_rrule()));
        row.add_cell(Cell::new(frequency.interval()));
        table.add_row(row);
    }

    println!("{table}");
}
