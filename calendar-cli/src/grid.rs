//! Month grid projection.
//!
//! A grid covers whole weeks: from the Sunday on or before the first of the month
//! to the Saturday on or after the last day. Each cell holds the events whose
//! `date` string equals the cell's `YYYY-MM-DD` date.

use chrono::{Datelike, Days, Months, NaiveDate};
use shared::Event;

/// Events shown per cell before collapsing the rest into `+N more`.
pub const MAX_VISIBLE_EVENTS: usize = 2;

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September", "October",
    "November", "December",
];

/// The month being displayed. Navigation is unbounded in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    year: i32,
    /// Zero-based month, 0 = January
    month0: u32,
}

impl MonthCursor {
    /// Cursor for `month` (1 to 12) of `year`. Out-of-range months wrap into neighbouring years.
    pub fn new(year: i32, month: u32) -> Self {
        Self::from_index(i64::from(year) * 12 + i64::from(month) - 1)
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    fn index(&self) -> i64 {
        self.year as i64 * 12 + self.month0 as i64
    }

    /// Months past the `i32` year range stick at January of `i32::MIN`
    /// or December of `i32::MAX`.
    fn from_index(index: i64) -> Self {
        let first = i64::from(i32::MIN) * 12;
        let last = i64::from(i32::MAX) * 12 + 11;
        let index = index.clamp(first, last);
        Self {
            year: i32::try_from(index.div_euclid(12)).unwrap_or(i32::MAX),
            month0: index.rem_euclid(12) as u32,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// One-based month number.
    pub fn month(&self) -> u32 {
        self.month0 + 1
    }

    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Self {
        Self::from_index(self.index() - 1)
    }

    /// `None` when the year is beyond what the calendar can represent.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month(), 1)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.first_day()?.checked_add_months(Months::new(1))?.pred_opt()
    }

    /// Header label, e.g. `October 2026`.
    pub fn label(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.month0 as usize], self.year)
    }
}

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay<'a> {
    pub date: NaiveDate,
    pub events: Vec<&'a Event>,
    pub is_current_month: bool,
    pub is_today: bool,
}

impl<'a> CalendarDay<'a> {
    /// The events drawn inside the cell, in list order.
    pub fn visible_events(&self) -> &[&'a Event] {
        &self.events[..self.events.len().min(MAX_VISIBLE_EVENTS)]
    }

    /// How many events were left out of the cell.
    pub fn hidden_count(&self) -> usize {
        self.events.len().saturating_sub(MAX_VISIBLE_EVENTS)
    }
}

/// Format used to match cells against `Event::date`.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Build the day cells for `cursor`. Empty when the month is outside the representable range.
pub fn calendar_days<'a>(cursor: MonthCursor, events: &'a [Event], today: NaiveDate) -> Vec<CalendarDay<'a>> {
    let Some((start, end)) = grid_bounds(cursor) else {
        return Vec::new();
    };

    start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| {
            let key = date_key(date);
            CalendarDay {
                date,
                events: events.iter().filter(|event| event.date == key).collect(),
                is_current_month: date.month() == cursor.month() && date.year() == cursor.year(),
                is_today: date == today,
            }
        })
        .collect()
}

fn grid_bounds(cursor: MonthCursor) -> Option<(NaiveDate, NaiveDate)> {
    let first = cursor.first_day()?;
    let last = cursor.last_day()?;

    let lead = first.weekday().num_days_from_sunday() as u64;
    let trail = 6 - last.weekday().num_days_from_sunday() as u64;

    Some((
        first.checked_sub_days(Days::new(lead))?,
        last.checked_add_days(Days::new(trail))?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn event(title: &str, date: &str) -> Event {
        Event {
            id: Some(format!("event_{}", title)),
            title: title.to_string(),
            description: String::new(),
            date: date.to_string(),
            time: "1:05 PM - 2:30 PM".to_string(),
            location: "Hall".to_string(),
            link: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_grid_spans_whole_weeks_for_every_month() {
        let today = ymd(2026, 10, 16);
        let mut cursor = MonthCursor::new(2023, 1);
        for _ in 0..60 {
            let days = calendar_days(cursor, &[], today);
            assert_eq!(days.len() % 7, 0, "{}", cursor.label());
            assert_eq!(days.first().unwrap().date.weekday(), Weekday::Sun);
            assert_eq!(days.last().unwrap().date.weekday(), Weekday::Sat);
            assert!(days.iter().any(|d| d.date == cursor.first_day().unwrap()));
            assert!(days.iter().any(|d| d.date == cursor.last_day().unwrap()));
            cursor = cursor.next();
        }
    }

    #[test]
    fn test_october_2026_layout() {
        // October 1st 2026 is a Thursday, the 31st a Saturday.
        let days = calendar_days(MonthCursor::new(2026, 10), &[], ymd(2026, 10, 16));
        assert_eq!(days.len(), 35);
        assert_eq!(days[0].date, ymd(2026, 9, 27));
        assert!(!days[0].is_current_month);
        assert_eq!(days[34].date, ymd(2026, 10, 31));
        assert_eq!(days.iter().filter(|d| d.is_today).count(), 1);
        assert_eq!(days.iter().find(|d| d.is_today).unwrap().date, ymd(2026, 10, 16));
    }

    #[test]
    fn test_february_starting_on_sunday_fits_four_weeks() {
        let days = calendar_days(MonthCursor::new(2015, 2), &[], ymd(2026, 10, 16));
        assert_eq!(days.len(), 28);
        assert!(days.iter().all(|d| d.is_current_month));
    }

    #[test]
    fn test_events_match_date_string_exactly() {
        let events = vec![
            event("a", "2026-10-16"),
            event("b", "2026-10-16T10:00:00Z"),
            event("c", "2026-9-27"),
            event("d", "2026-09-27"),
        ];
        let days = calendar_days(MonthCursor::new(2026, 10), &events, ymd(2026, 10, 16));

        for day in &days {
            let key = date_key(day.date);
            let expected: Vec<&Event> = events.iter().filter(|e| e.date == key).collect();
            assert_eq!(day.events, expected);
        }

        let titles = |date: NaiveDate| -> Vec<String> {
            days.iter()
                .find(|d| d.date == date)
                .unwrap()
                .events
                .iter()
                .map(|e| e.title.clone())
                .collect()
        };
        assert_eq!(titles(ymd(2026, 10, 16)), vec!["a"]);
        assert_eq!(titles(ymd(2026, 9, 27)), vec!["d"]);
    }

    #[test]
    fn test_overflow_shows_first_two_in_list_order() {
        let events = vec![
            event("first", "2026-10-02"),
            event("second", "2026-10-02"),
            event("third", "2026-10-02"),
            event("fourth", "2026-10-02"),
        ];
        let days = calendar_days(MonthCursor::new(2026, 10), &events, ymd(2026, 10, 16));
        let day = days.iter().find(|d| d.date == ymd(2026, 10, 2)).unwrap();

        let visible: Vec<&str> = day.visible_events().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(visible, vec!["first", "second"]);
        assert_eq!(day.hidden_count(), 2);
    }

    #[test]
    fn test_navigation_wraps_years() {
        let cursor = MonthCursor::new(2026, 12);
        assert_eq!(cursor.next(), MonthCursor::new(2027, 1));
        assert_eq!(MonthCursor::new(2027, 1).prev(), cursor);
        assert_eq!(MonthCursor::new(2026, 13), MonthCursor::new(2027, 1));
        assert_eq!(MonthCursor::new(2026, 0), MonthCursor::new(2025, 12));
        assert_eq!(cursor.label(), "December 2026");
    }

    #[test]
    fn test_navigation_stops_at_year_limits() {
        let last = MonthCursor::new(i32::MAX, 12);
        assert_eq!(last.next(), last);
        assert_eq!(last.next().year(), i32::MAX);
        assert_eq!(last.prev(), MonthCursor::new(i32::MAX, 11));

        let first = MonthCursor::new(i32::MIN, 1);
        assert_eq!(first.prev(), first);
        assert_eq!(first.prev().month(), 1);
    }

    #[test]
    fn test_unrepresentable_month_yields_empty_grid() {
        let cursor = MonthCursor::new(i32::MAX, 12);
        assert!(calendar_days(cursor, &[], ymd(2026, 10, 16)).is_empty());
    }
}
