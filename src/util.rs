use chrono::{DateTime, Local};

/// Success percentage rounded to the nearest whole percent.
/// Zero attempts count as 0%.
pub fn success_percent(success: u32, fail: u32) -> i64 {
    let total = success + fail;
    if total == 0 {
        return 0;
    }
    (100.0 * success as f64 / total as f64).round() as i64
}

/// Truncated whole-day difference `a - b`.
pub fn days_between(a: DateTime<Local>, b: DateTime<Local>) -> i64 {
    a.signed_duration_since(b).num_days()
}
