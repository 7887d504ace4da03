use chrono::{Datelike, NaiveDate, NaiveDateTime, Utc};

/// Current wall-clock time as a naive UTC timestamp.
pub fn now_naive() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Returns `[start, end)` of the calendar month containing `at`.
pub fn month_bounds(at: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let start = first_of_month(at.year(), at.month());
    let end = if at.month() == 12 {
        first_of_month(at.year() + 1, 1)
    } else {
        first_of_month(at.year(), at.month() + 1)
    };
    (start, end)
}

/// Returns `[start, end)` of the calendar month preceding the one containing `at`.
pub fn previous_month_bounds(at: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let (current_start, _) = month_bounds(at);
    let start = if at.month() == 1 {
        first_of_month(at.year() - 1, 12)
    } else {
        first_of_month(at.year(), at.month() - 1)
    };
    (start, current_start)
}

fn first_of_month(year: i32, month: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}
