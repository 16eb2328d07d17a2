use chrono::NaiveDateTime;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Listing label for a filing time relative to `now`
///
/// Whole days elapsed are floored: under a day reads "Today, 2:30 PM",
/// under two days "Yesterday, 9:20 AM", anything else (including times in
/// the future) "Feb 3, 2024".
pub fn format_created_at(created: NaiveDateTime, now: NaiveDateTime) -> String {
    let days = (now - created).num_milliseconds().div_euclid(MILLIS_PER_DAY);
    match days {
        0 => format!("Today, {}", created.format("%-I:%M %p")),
        1 => format!("Yesterday, {}", created.format("%-I:%M %p")),
        _ => created.format("%b %-d, %Y").to_string(),
    }
}
