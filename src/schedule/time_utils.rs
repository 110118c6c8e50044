use once_cell::sync::Lazy;
use regex::Regex;

use super::tokens::normalize_day;
use super::types::Day;

static TIME_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|\D)(\d{1,2}):(\d{2})\s*[-–]\s*(\d{1,2}):(\d{2})(?:\D|$)")
        .expect("time range pattern is valid")
});

static DAY_DELIMITERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[/,;&]+").expect("day delimiter pattern is valid"));

/// Converts an hour and minute pair to fractional hours, rejecting out-of-range values
fn to_fractional_hours(hours: &str, minutes: &str) -> Option<f64> {
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours >= 24 || minutes >= 60 {
        return None;
    }
    Some(hours as f64 + minutes as f64 / 60.0)
}

/// Parses a "HH:MM - HH:MM" range (e.g., "10:30 - 11:50", "9:00-10:00") into fractional hours.
/// Returns None unless the range is well formed and start is strictly before end.
pub fn parse_time(time_text: &str) -> Option<(f64, f64)> {
    let caps = TIME_RANGE.captures(time_text)?;
    let start = to_fractional_hours(&caps[1], &caps[2])?;
    let end = to_fractional_hours(&caps[3], &caps[4])?;
    if start < end {
        Some((start, end))
    } else {
        None
    }
}

/// Splits a day string such as "Mon/Wed" or "T,Th" into normalized days.
/// A day named twice ("Mon/Monday") is kept once, in first-seen order.
pub fn parse_days(day_text: &str) -> Vec<Day> {
    let mut days = Vec::new();
    for day in DAY_DELIMITERS
        .split(day_text)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(normalize_day)
    {
        if !days.contains(&day) {
            days.push(day);
        }
    }
    days
}

/// Formats fractional hours back to a time string (HH:MM)
pub fn hours_to_time_string(hours: f64) -> String {
    let total_minutes = (hours * 60.0).round() as u32;
    format!("{:02}:{:02}", (total_minutes / 60) % 24, total_minutes % 60)
}
