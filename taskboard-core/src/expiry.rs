use chrono::{Local, NaiveDateTime};

use crate::types::{parse_day, Item};

/// True when the item's end day, taken at midnight, lies before `now`.
/// The unset sentinel and malformed days are never expired.
pub fn is_expired_at(item: &Item, now: NaiveDateTime) -> bool {
    parse_day(&item.end_day)
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|deadline| deadline < now)
        .unwrap_or(false)
}

/// [`is_expired_at`] against the local clock.
pub fn is_expired(item: &Item) -> bool {
    is_expired_at(item, Local::now().naive_local())
}
