use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use chrono::{Month, Weekday};
use serde::{Deserialize, Serialize};

/// One selected course component (lecture, lab, tutorial, ...) as stored in the working set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedComponent {
    pub id: String,
    pub course_code: String,
    #[serde(default)]
    pub course_name: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub component_type: String,
    #[serde(default)]
    pub day_text: String,
    #[serde(default)]
    pub time_text: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub term_text: String,
}

/// A canonical weekday, or the raw token when it could not be recognised
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Day {
    Known(Weekday),
    Unknown(String),
}

impl Day {
    /// Sort key: Mon..Sun first, unknown tokens after
    fn rank(&self) -> u32 {
        match self {
            Day::Known(weekday) => weekday.num_days_from_monday(),
            Day::Unknown(_) => 7,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Day::Known(_))
    }
}

impl Ord for Day {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Day::Unknown(a), Day::Unknown(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Day {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Day::Known(weekday) => write!(f, "{}", weekday),
            Day::Unknown(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for Day {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One day/time occupancy derived from a component
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleBlock<'a> {
    pub component: &'a SelectedComponent,
    pub day: Day,
    pub start_time: f64,
    pub end_time: f64,
    pub color_index: usize,
}

impl ScheduleBlock<'_> {
    pub fn component_id(&self) -> &str {
        &self.component.id
    }
}

/// Closed calendar interval of months; `start` may come after `end` when the term wraps past December
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TermDuration {
    pub start: Month,
    pub end: Month,
}

impl TermDuration {
    pub const fn new(start: Month, end: Month) -> Self {
        Self { start, end }
    }

    pub fn wraps(&self) -> bool {
        self.start.number_from_month() > self.end.number_from_month()
    }
}

/// Ids of components overlapping at least one other block on the same day
pub type ConflictSet = BTreeSet<String>;

/// A maximal run of active months, indexed from September (0) to August (11)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthSegment {
    pub start: usize,
    pub length: usize,
}
