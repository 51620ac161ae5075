//! Day-bucket boundaries for the Today and Upcoming views.
//!
//! "Today" means the service host's local calendar day, expressed as UTC
//! instants so comparisons against the store's RFC 3339 timestamps are
//! exact: a task is due today when `start_of_today <= due_date <
//! start_of_tomorrow`.

use chrono::{Days, Local, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::types::Timestamp;

/// The half-open `[start_of_today, start_of_tomorrow)` window for the
/// current local day.
pub fn today_bounds() -> (Timestamp, Timestamp) {
    let today = Local::now().date_naive();
    (start_of_day(today), start_of_day(next_day(today)))
}

/// Start of the current local day as a UTC instant.
pub fn start_of_today() -> Timestamp {
    start_of_day(Local::now().date_naive())
}

/// Local midnight of `date` converted to UTC.
pub fn start_of_day(date: NaiveDate) -> Timestamp {
    let midnight = date.and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&midnight) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        // DST fold: two valid instants, take the earlier one.
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        // DST gap: midnight does not exist locally, fall back to UTC midnight.
        LocalResult::None => Utc.from_utc_datetime(&midnight),
    }
}

fn next_day(date: NaiveDate) -> NaiveDate {
    // NaiveDate::MAX is ~262143 CE; adding one day never fails in practice.
    date.checked_add_days(Days::new(1)).unwrap_or(date)
}
