use super::types::{ConflictSet, ScheduleBlock};

/// True when two blocks share a day and their half-open intervals overlap.
/// Back-to-back blocks (one ends exactly when the other starts) do not conflict.
pub fn blocks_conflict(a: &ScheduleBlock<'_>, b: &ScheduleBlock<'_>) -> bool {
    a.day == b.day && a.start_time < b.end_time && b.start_time < a.end_time
}

/// Index pairs (i < j) of every conflicting block pair
pub fn conflicting_pairs(blocks: &[ScheduleBlock<'_>]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..blocks.len() {
        for j in (i + 1)..blocks.len() {
            if blocks_conflict(&blocks[i], &blocks[j]) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Collects the ids of all components involved in at least one conflict
pub fn detect_conflicts(blocks: &[ScheduleBlock<'_>]) -> ConflictSet {
    let mut conflicts = ConflictSet::new();
    for (i, j) in conflicting_pairs(blocks) {
        conflicts.insert(blocks[i].component.id.clone());
        conflicts.insert(blocks[j].component.id.clone());
    }
    conflicts
}

/// Union of per-term conflict sets
pub fn merge_conflicts<'s>(sets: impl IntoIterator<Item = &'s ConflictSet>) -> ConflictSet {
    sets.into_iter().flatten().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::blocks::{build_blocks, ColorMap};
    use crate::schedule::types::SelectedComponent;

    fn component(id: &str, days: &str, time: &str) -> SelectedComponent {
        SelectedComponent {
            id: id.to_string(),
            course_code: format!("COURSE {id}"),
            course_name: String::new(),
            section: String::new(),
            component_type: "LECT".to_string(),
            day_text: days.to_string(),
            time_text: time.to_string(),
            location: String::new(),
            instructor: String::new(),
            term_text: "W".to_string(),
        }
    }

    #[test]
    fn overlapping_blocks_conflict_both_ways() {
        let a = component("a", "Tue", "13:00-14:30");
        let b = component("b", "Tue", "14:00-15:00");
        let mut colors = ColorMap::new(8);
        let blocks = build_blocks(&[&a, &b], &mut colors);

        assert!(blocks_conflict(&blocks[0], &blocks[1]));
        assert!(blocks_conflict(&blocks[1], &blocks[0]));
        let conflicts = detect_conflicts(&blocks);
        assert!(conflicts.contains("a") && conflicts.contains("b"));
    }

    #[test]
    fn touching_blocks_do_not_conflict() {
        let a = component("a", "Mon", "10:00-11:00");
        let b = component("b", "Mon", "11:00-12:00");
        let mut colors = ColorMap::new(8);
        let blocks = build_blocks(&[&a, &b], &mut colors);

        assert!(detect_conflicts(&blocks).is_empty());
    }

    #[test]
    fn different_days_do_not_conflict() {
        let a = component("a", "Mon", "10:00-11:00");
        let b = component("b", "Wed", "10:00-11:00");
        let mut colors = ColorMap::new(8);
        let blocks = build_blocks(&[&a, &b], &mut colors);

        assert!(conflicting_pairs(&blocks).is_empty());
    }

    #[test]
    fn single_component_never_conflicts_with_itself() {
        let a = component("a", "Mon/Wed", "10:00-11:00");
        let mut colors = ColorMap::new(8);
        let blocks = build_blocks(&[&a], &mut colors);

        assert!(detect_conflicts(&blocks).is_empty());
    }

    #[test]
    fn merged_sets_are_a_union() {
        let fall: ConflictSet = ["a", "b"].iter().map(|s| s.to_string()).collect();
        let winter: ConflictSet = ["b", "c"].iter().map(|s| s.to_string()).collect();
        let merged = merge_conflicts([&fall, &winter]);

        assert_eq!(merged.len(), 3);
    }
}
