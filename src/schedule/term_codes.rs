//! Term duration resolution: season labels, full-year phrases, and embedded
//! institutional term codes (some of which mean different calendar windows
//! depending on the faculty offering the course).

use chrono::Month::{self, *};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::tokens::{normalize_term, TERM_FALL, TERM_SUMMER, TERM_WINTER, TERM_YEAR};
use super::types::TermDuration;

pub const FALL: TermDuration = TermDuration::new(September, December);
pub const WINTER: TermDuration = TermDuration::new(January, April);
pub const SUMMER: TermDuration = TermDuration::new(May, August);
pub const FULL_YEAR: TermDuration = TermDuration::new(September, April);

/// Default calendar window for each registration code
const TERM_CODES: &[(&str, Month, Month)] = &[
    ("F", September, December),
    ("W", January, April),
    ("Y", September, April),
    ("FW", September, April),
    ("S", May, August),
    ("SU", May, August),
    ("S1", May, June),
    ("S2", July, August),
    ("SA", May, June),
    ("SB", July, August),
    ("F1", September, October),
    ("F2", November, December),
    ("W1", January, February),
    ("W2", March, April),
    ("FP", September, October),
    ("WP", January, April),
    ("SP", May, June),
    ("YN", November, April),
];

/// Faculty recognised from hints embedded in a term label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Faculty {
    Education,
    Schulich,
    GraduateHealth,
}

impl Faculty {
    /// Checks a lower-cased label for this faculty's hint substrings
    pub fn matches(self, label: &str) -> bool {
        let hints: &[&str] = match self {
            Faculty::Education => &["education", "educ"],
            Faculty::Schulich => &["schulich", "business"],
            Faculty::GraduateHealth => &["grad", "graduate", "health"],
        };
        hints.iter().any(|hint| label.contains(hint))
    }
}

/// A faculty-specific reinterpretation of a shared term code
#[derive(Debug, Clone, Copy)]
pub struct FacultyOverride {
    pub code: &'static str,
    pub faculty: Faculty,
    pub duration: TermDuration,
}

/// Evaluated top-down; the first rule whose code and faculty both match wins
pub const FACULTY_OVERRIDES: &[FacultyOverride] = &[
    FacultyOverride { code: "WP", faculty: Faculty::Education, duration: TermDuration::new(January, May) },
    FacultyOverride { code: "WP", faculty: Faculty::Schulich, duration: TermDuration::new(January, February) },
    FacultyOverride { code: "WP", faculty: Faculty::GraduateHealth, duration: TermDuration::new(February, April) },
    FacultyOverride { code: "FP", faculty: Faculty::Education, duration: TermDuration::new(September, November) },
    FacultyOverride { code: "FP", faculty: Faculty::Schulich, duration: TermDuration::new(October, December) },
    FacultyOverride { code: "SP", faculty: Faculty::Education, duration: TermDuration::new(May, July) },
];

struct CodeMatcher {
    code: &'static str,
    pattern: Regex,
    duration: TermDuration,
}

/// Term codes with their word-bounded patterns, longest code first
static CODE_MATCHERS: Lazy<Vec<CodeMatcher>> = Lazy::new(|| {
    let mut matchers: Vec<CodeMatcher> = TERM_CODES
        .iter()
        .filter_map(|&(code, start, end)| {
            let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(code))).ok()?;
            Some(CodeMatcher {
                code,
                pattern,
                duration: TermDuration::new(start, end),
            })
        })
        .collect();
    matchers.sort_by(|a, b| b.code.len().cmp(&a.code.len()).then(a.code.cmp(b.code)));
    matchers
});

static SEASON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(fall|autumn|winter|summer)\b").expect("season pattern is valid"));

/// Finds the longest term code embedded in a label, with its default duration
pub fn find_term_code(label: &str) -> Option<(&'static str, TermDuration)> {
    CODE_MATCHERS
        .iter()
        .find(|matcher| matcher.pattern.is_match(label))
        .map(|matcher| (matcher.code, matcher.duration))
}

/// Applies the first faculty override registered for `code` whose faculty hint appears in the label
pub fn faculty_override(code: &str, lower_label: &str) -> Option<TermDuration> {
    FACULTY_OVERRIDES
        .iter()
        .find(|rule| rule.code == code && rule.faculty.matches(lower_label))
        .map(|rule| rule.duration)
}

/// Resolves a term label to its calendar window, or `None` when nothing is recognisable
pub fn resolve_duration(label: &str) -> Option<TermDuration> {
    let normalized = normalize_term(label);

    if normalized == TERM_YEAR || normalized.contains("full year") {
        return Some(FULL_YEAR);
    }
    match normalized.as_str() {
        TERM_FALL => return Some(FALL),
        TERM_WINTER => return Some(WINTER),
        TERM_SUMMER => return Some(SUMMER),
        _ => {}
    }

    if let Some((code, default)) = find_term_code(label) {
        let duration = faculty_override(code, &label.to_lowercase()).unwrap_or(default);
        return Some(duration);
    }

    // Free-text labels such as "Winter 2025" with no code
    if let Some(season) = SEASON_WORD.captures(&normalized).and_then(|c| c.get(1)) {
        return match season.as_str() {
            "fall" | "autumn" => Some(FALL),
            "winter" => Some(WINTER),
            _ => Some(SUMMER),
        };
    }

    debug!("No term duration for label {:?}", label);
    None
}
