//! Plain-text rendering of the month grid and event details.

use chrono::{Datelike, NaiveDate};
use shared::Event;
use std::fmt::Write;

use crate::grid::{CalendarDay, MonthCursor};

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const CELL_WIDTH: usize = 5;

/// One grid cell: `[16]` marks today, `(28)` a day outside the month, `*` a day with events.
fn cell(day: &CalendarDay) -> String {
    let number = day.date.day();
    let body = if day.is_today {
        format!("[{:>2}]", number)
    } else if !day.is_current_month {
        format!("({:>2})", number)
    } else {
        format!(" {:>2} ", number)
    };
    let marker = if day.events.is_empty() { ' ' } else { '*' };
    format!("{}{}", body, marker)
}

/// The month header, weekday row and one line per week.
pub fn month_grid(cursor: MonthCursor, days: &[CalendarDay]) -> String {
    let width = WEEKDAYS.len() * CELL_WIDTH;
    let mut out = String::new();

    let _ = writeln!(out, "{:^width$}", cursor.label(), width = width);
    let header: String = WEEKDAYS
        .iter()
        .map(|name| format!(" {:<width$}", name, width = CELL_WIDTH - 1))
        .collect();
    let _ = writeln!(out, "{}", header.trim_end());

    for week in days.chunks(7) {
        let line: String = week.iter().map(cell).collect();
        let _ = writeln!(out, "{}", line.trim_end());
    }

    out
}

/// Events per day in grid order, at most two per day followed by `+N more`.
pub fn day_listing(days: &[CalendarDay]) -> String {
    let mut out = String::new();

    for day in days.iter().filter(|day| !day.events.is_empty()) {
        let _ = writeln!(out, "{}", day.date.format("%a %b %e"));
        for event in day.visible_events() {
            let _ = writeln!(out, "  • {}", summary(event));
        }
        if day.hidden_count() > 0 {
            let _ = writeln!(out, "  +{} more", day.hidden_count());
        }
    }

    if out.is_empty() {
        out.push_str("No events this month.\n");
    }
    out
}

fn summary(event: &Event) -> String {
    let mut line = event.title.clone();
    if !event.time.is_empty() {
        let _ = write!(line, " ({})", event.time);
    }
    if let Some(id) = &event.id {
        let _ = write!(line, " [{}]", id);
    }
    line
}

/// Long form date, e.g. `Friday, October 16, 2026`. Unparseable dates are shown as stored.
pub fn long_date(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%A, %B %-d, %Y").to_string())
        .unwrap_or_else(|_| date.to_string())
}

/// Everything known about one event.
pub fn event_details(event: &Event) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", event.title);
    let _ = writeln!(out, "  Date:        {}", long_date(&event.date));
    let _ = writeln!(out, "  Time:        {}", event.time);
    let _ = writeln!(out, "  Location:    {}", event.location);
    let _ = writeln!(out, "  Description: {}", event.description);
    if let Some(link) = event.link() {
        let _ = writeln!(out, "  Link:        {}", link);
    }
    if let Some(id) = &event.id {
        let _ = writeln!(out, "  ID:          {}", id);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::calendar_days;

    fn event(title: &str, date: &str) -> Event {
        Event {
            id: Some(format!("event_{}", title)),
            title: title.to_string(),
            description: "Quarterly planning".to_string(),
            date: date.to_string(),
            time: "1:05 PM - 2:30 PM".to_string(),
            location: "Room 4".to_string(),
            link: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_month_grid_layout() {
        let cursor = MonthCursor::new(2026, 10);
        let events = vec![event("planning", "2026-10-05")];
        let days = calendar_days(cursor, &events, today());
        let text = month_grid(cursor, &days);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0].trim(), "October 2026");
        assert_eq!(lines[1], " Sun  Mon  Tue  Wed  Thu  Fri  Sat");
        assert_eq!(lines.len(), 2 + 5);
        assert!(lines[2].starts_with("(27) (28) (29) (30)   1"));
        assert!(lines[3].contains("  5 *"));
        assert!(lines[4].contains("[16]"));
    }

    #[test]
    fn test_listing_collapses_overflow() {
        let cursor = MonthCursor::new(2026, 10);
        let events = vec![
            event("one", "2026-10-02"),
            event("two", "2026-10-02"),
            event("three", "2026-10-02"),
        ];
        let days = calendar_days(cursor, &events, today());
        let text = day_listing(&days);

        assert!(text.starts_with("Fri Oct  2\n"));
        assert!(text.contains("  • one (1:05 PM - 2:30 PM) [event_one]\n"));
        assert!(text.contains("  • two"));
        assert!(!text.contains("three"));
        assert!(text.contains("  +1 more\n"));
    }

    #[test]
    fn test_listing_for_empty_month() {
        let days = calendar_days(MonthCursor::new(2026, 10), &[], today());
        assert_eq!(day_listing(&days), "No events this month.\n");
    }

    #[test]
    fn test_long_date() {
        assert_eq!(long_date("2026-10-16"), "Friday, October 16, 2026");
        assert_eq!(long_date("2026-10-05"), "Monday, October 5, 2026");
        assert_eq!(long_date("next week"), "next week");
    }

    #[test]
    fn test_details_include_link_only_when_present() {
        let mut planning = event("planning", "2026-10-16");
        assert!(!event_details(&planning).contains("Link:"));

        planning.link = "https://example.com/planning".to_string();
        let text = event_details(&planning);
        assert!(text.contains("  Link:        https://example.com/planning\n"));
        assert!(text.contains("  Date:        Friday, October 16, 2026\n"));
    }
}
