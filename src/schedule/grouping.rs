use std::collections::{HashMap, HashSet};

use chrono::Month;
use serde::Serialize;

use super::term_codes::{resolve_duration, FULL_YEAR};
use super::tokens::{normalize_term, title_case, TERM_FALL, TERM_SUMMER, TERM_WINTER, TERM_YEAR};
use super::types::SelectedComponent;

/// Buckets always shown first, in this order
pub const BUCKET_PRIORITY: [&str; 5] = ["fall", "winter", "summer", "summer1", "summer2"];

/// One display bucket and the components placed in it
#[derive(Debug, Clone, Serialize)]
pub struct TermGroup<'a> {
    pub key: String,
    pub label: String,
    pub items: Vec<&'a SelectedComponent>,
}

/// Decides the bucket key for one component from its term label
pub fn bucket_for(term_text: &str) -> String {
    let normalized = normalize_term(term_text);
    let duration = resolve_duration(term_text);

    if normalized == TERM_YEAR || duration == Some(FULL_YEAR) {
        return TERM_YEAR.to_string();
    }

    match duration.map(|d| d.start) {
        Some(Month::September | Month::October | Month::November | Month::December) => {
            TERM_FALL.to_string()
        }
        Some(Month::January | Month::February | Month::March | Month::April) => {
            TERM_WINTER.to_string()
        }
        Some(Month::May | Month::June | Month::July | Month::August) => TERM_SUMMER.to_string(),
        None => normalized,
    }
}

/// Display label for a bucket key ("summer1" -> "Summer 1")
pub fn bucket_label(key: &str) -> String {
    match key {
        "summer1" => "Summer 1".to_string(),
        "summer2" => "Summer 2".to_string(),
        other => title_case(other),
    }
}

/// First pass: every component lands in exactly one bucket, insertion ordered
fn build_buckets<'a>(items: &'a [SelectedComponent]) -> (Vec<String>, HashMap<String, Vec<&'a SelectedComponent>>) {
    let mut keys = Vec::new();
    let mut buckets: HashMap<String, Vec<&SelectedComponent>> = HashMap::new();

    for item in items {
        let key = bucket_for(&item.term_text);
        if !buckets.contains_key(&key) {
            keys.push(key.clone());
        }
        buckets.entry(key).or_default().push(item);
    }

    (keys, buckets)
}

/// Second pass: year-long items are shared into fall and winter, then the year bucket is dropped
fn spread_year_items<'a>(
    keys: &mut Vec<String>,
    buckets: &mut HashMap<String, Vec<&'a SelectedComponent>>,
) {
    let Some(year_items) = buckets.remove(TERM_YEAR) else {
        return;
    };
    keys.retain(|key| key != TERM_YEAR);

    for target in [TERM_FALL, TERM_WINTER] {
        if !buckets.contains_key(target) {
            keys.push(target.to_string());
        }
        let bucket = buckets.entry(target.to_string()).or_default();
        let mut present: HashSet<&'a str> = bucket.iter().map(|&item| item.id.as_str()).collect();
        for &item in &year_items {
            if present.insert(item.id.as_str()) {
                bucket.push(item);
            }
        }
    }
}

/// Groups the working set into display buckets: priority buckets first, then the rest by label
pub fn group_by_term(items: &[SelectedComponent]) -> Vec<TermGroup<'_>> {
    let (mut keys, mut buckets) = build_buckets(items);
    spread_year_items(&mut keys, &mut buckets);

    let mut groups: Vec<TermGroup<'_>> = keys
        .into_iter()
        .filter_map(|key| {
            let items = buckets.remove(&key)?;
            Some(TermGroup {
                label: bucket_label(&key),
                key,
                items,
            })
        })
        .collect();

    groups.sort_by(|a, b| {
        let rank = |key: &str| BUCKET_PRIORITY.iter().position(|p| *p == key);
        match (rank(&a.key), rank(&b.key)) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.label.cmp(&b.label),
        }
    });

    groups
}
