use log::debug;
use serde::Serialize;

use super::blocks::{build_blocks, sort_blocks, ColorMap};
use super::conflicts::{detect_conflicts, merge_conflicts};
use super::grouping::group_by_term;
use super::months::month_segments;
use super::term_codes::resolve_duration;
use super::types::{ConflictSet, MonthSegment, ScheduleBlock, SelectedComponent, TermDuration};

/// Timetable data for one term bucket
#[derive(Debug, Clone, Serialize)]
pub struct TermSchedule<'a> {
    pub key: String,
    pub label: String,
    pub items: Vec<&'a SelectedComponent>,
    pub blocks: Vec<ScheduleBlock<'a>>,
    pub conflicts: ConflictSet,
}

/// Duration bar for one component; `duration` is None when the term label couldn't be resolved
#[derive(Debug, Clone, Serialize)]
pub struct ComponentTimeline<'a> {
    pub component: &'a SelectedComponent,
    pub duration: Option<TermDuration>,
    pub segments: Vec<MonthSegment>,
}

/// Everything the presentation layer needs for one render of the working set
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleView<'a> {
    pub terms: Vec<TermSchedule<'a>>,
    pub colors: ColorMap,
    pub conflicts: ConflictSet,
    pub timelines: Vec<ComponentTimeline<'a>>,
}

impl<'a> ScheduleView<'a> {
    pub fn term(&self, key: &str) -> Option<&TermSchedule<'a>> {
        self.terms.iter().find(|term| term.key == key)
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// Derives term buckets, timetable blocks, conflicts and duration segments from scratch.
/// `items` must be the full working set in its stored order so course colors stay stable.
pub fn derive_schedule(items: &[SelectedComponent], palette_size: usize) -> ScheduleView<'_> {
    let mut colors = ColorMap::from_items(items, palette_size);

    let terms: Vec<TermSchedule<'_>> = group_by_term(items)
        .into_iter()
        .map(|group| {
            let mut blocks = build_blocks(&group.items, &mut colors);
            sort_blocks(&mut blocks);
            let conflicts = detect_conflicts(&blocks);
            if !conflicts.is_empty() {
                debug!("{} conflicting components in {}", conflicts.len(), group.label);
            }
            TermSchedule {
                key: group.key,
                label: group.label,
                items: group.items,
                blocks,
                conflicts,
            }
        })
        .collect();

    let conflicts = merge_conflicts(terms.iter().map(|term| &term.conflicts));

    let timelines = items
        .iter()
        .map(|component| {
            let duration = resolve_duration(&component.term_text);
            ComponentTimeline {
                component,
                duration,
                segments: duration.map(|d| month_segments(&d)).unwrap_or_default(),
            }
        })
        .collect();

    ScheduleView {
        terms,
        colors,
        conflicts,
        timelines,
    }
}
