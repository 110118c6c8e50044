//! Canonicalisation of free-text day, month, and term tokens into fixed vocabularies.

use chrono::{Month, Weekday};

use super::types::Day;

/// Canonical term labels produced by [`normalize_term`]
pub const TERM_FALL: &str = "fall";
pub const TERM_WINTER: &str = "winter";
pub const TERM_SUMMER: &str = "summer";
pub const TERM_YEAR: &str = "year";
pub const TERM_UNSPECIFIED: &str = "unspecified";

const MONTHS: [(&str, Month); 12] = [
    ("jan", Month::January),
    ("feb", Month::February),
    ("mar", Month::March),
    ("apr", Month::April),
    ("may", Month::May),
    ("jun", Month::June),
    ("jul", Month::July),
    ("aug", Month::August),
    ("sep", Month::September),
    ("oct", Month::October),
    ("nov", Month::November),
    ("dec", Month::December),
];

/// Normalizes a weekday token such as "M", "Tues", "thurs." or "Sunday".
/// Unrecognised tokens are passed through unchanged as [`Day::Unknown`].
pub fn normalize_day(token: &str) -> Day {
    let trimmed = token.trim();
    let cleaned = trimmed
        .trim_end_matches(|c: char| c.is_ascii_punctuation())
        .to_lowercase();

    let weekday = match cleaned.as_str() {
        "m" | "mo" | "mon" | "mond" | "monday" => Some(Weekday::Mon),
        "t" | "tu" | "tue" | "tues" | "tuesday" => Some(Weekday::Tue),
        "w" | "we" | "wed" | "weds" | "wednesday" => Some(Weekday::Wed),
        "r" | "th" | "thu" | "thur" | "thurs" | "thursday" => Some(Weekday::Thu),
        "f" | "fr" | "fri" | "frid" | "friday" => Some(Weekday::Fri),
        "s" | "sa" | "sat" | "satu" | "saturday" => Some(Weekday::Sat),
        "u" | "su" | "sun" | "sund" | "sunday" => Some(Weekday::Sun),
        _ => None,
    };

    match weekday {
        Some(day) => Day::Known(day),
        None => Day::Unknown(trimmed.to_string()),
    }
}

/// Normalizes a month token: anything of 4+ characters is cut to its first three letters
pub fn normalize_month(token: &str) -> Option<Month> {
    let lower = token.trim().to_lowercase();
    let key: String = if lower.chars().count() >= 4 {
        lower.chars().take(3).collect()
    } else {
        lower
    };

    MONTHS
        .iter()
        .find(|(abbr, _)| *abbr == key)
        .map(|(_, month)| *month)
}

/// Maps common term synonyms onto canonical labels; anything else comes back lower-cased
pub fn normalize_term(label: &str) -> String {
    let lower = label.trim().to_lowercase();
    let collapsed = lower.split_whitespace().collect::<Vec<_>>().join(" ");

    match collapsed.as_str() {
        "" => TERM_UNSPECIFIED.to_string(),
        "f" | "fall" | "autumn" => TERM_FALL.to_string(),
        "w" | "winter" => TERM_WINTER.to_string(),
        "s" | "su" | "summer" | "summer 1" | "summer 2" | "summer1" | "summer2" | "s1" | "s2" => {
            TERM_SUMMER.to_string()
        }
        "y" | "year" | "full year" | "full-year" | "fullyear" => TERM_YEAR.to_string(),
        _ => collapsed,
    }
}

/// Title-cases a normalized label for display ("summer 1" -> "Summer 1")
pub fn title_case(label: &str) -> String {
    label
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
