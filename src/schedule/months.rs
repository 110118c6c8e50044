//! Month-range calculation for duration bars. Months are indexed relative to
//! the academic year (September = 0 ... August = 11) so fall sorts before winter.
//! A term that stays inside one academic year never straddles New Year:
//! December and January fall in separate segments, so November to April draws
//! as two bars. A term that wraps past August already draws as two bars and is
//! not split again.

use chrono::Month;

use super::types::{MonthSegment, TermDuration};

pub const MONTHS_IN_YEAR: usize = 12;

/// Academic index of January, where a new calendar year begins
const NEW_YEAR_INDEX: usize = 4;

/// Academic-year index of a month (Sep = 0, Jan = 4, Aug = 11)
pub fn academic_index(month: Month) -> usize {
    (month.number_from_month() as usize + 3) % MONTHS_IN_YEAR
}

/// Inverse of [`academic_index`]
pub fn month_at(index: usize) -> Month {
    let calendar = ((index % MONTHS_IN_YEAR) + 8) % MONTHS_IN_YEAR;
    Month::try_from(calendar as u8 + 1).unwrap_or(Month::September)
}

/// Marks the months covered by a duration, wrapping past August when start comes after end
pub fn active_months(duration: &TermDuration) -> [bool; MONTHS_IN_YEAR] {
    let start = academic_index(duration.start);
    let end = academic_index(duration.end);
    let mut active = [false; MONTHS_IN_YEAR];

    if start <= end {
        active[start..=end].iter_mut().for_each(|m| *m = true);
    } else {
        active[start..].iter_mut().for_each(|m| *m = true);
        active[..=end].iter_mut().for_each(|m| *m = true);
    }
    active
}

/// Collapses active months into contiguous runs, scanning Sep..Aug.
/// With `split_at_new_year` a run is also closed between December and January.
pub fn collapse_segments(active: &[bool; MONTHS_IN_YEAR], split_at_new_year: bool) -> Vec<MonthSegment> {
    let mut segments = Vec::new();
    let mut run_start: Option<usize> = None;

    for (index, &is_active) in active.iter().enumerate() {
        if split_at_new_year && index == NEW_YEAR_INDEX {
            if let Some(start) = run_start.take() {
                segments.push(MonthSegment { start, length: index - start });
            }
        }
        match (is_active, run_start) {
            (true, None) => run_start = Some(index),
            (false, Some(start)) => {
                segments.push(MonthSegment { start, length: index - start });
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        segments.push(MonthSegment { start, length: MONTHS_IN_YEAR - start });
    }

    segments
}

/// Display segments for a term duration, at most two
pub fn month_segments(duration: &TermDuration) -> Vec<MonthSegment> {
    let wraps = academic_index(duration.start) > academic_index(duration.end);
    collapse_segments(&active_months(duration), !wraps)
}
