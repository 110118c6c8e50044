use std::collections::HashMap;

use log::debug;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::time_utils::{parse_days, parse_time};
use super::types::{ScheduleBlock, SelectedComponent};

pub const DEFAULT_PALETTE_SIZE: usize = 8;

/// Course code -> palette slot, assigned in first-seen order
#[derive(Debug, Clone)]
pub struct ColorMap {
    palette_size: usize,
    order: Vec<String>,
    index: HashMap<String, usize>,
}

impl ColorMap {
    pub fn new(palette_size: usize) -> Self {
        Self {
            palette_size: palette_size.max(1),
            order: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Builds the map from the full working set so every term sees the same colors
    pub fn from_items(items: &[SelectedComponent], palette_size: usize) -> Self {
        let mut colors = Self::new(palette_size);
        for item in items {
            colors.color_for(&item.course_code);
        }
        colors
    }

    /// Returns the course's color, assigning the next palette slot if it has none yet
    pub fn color_for(&mut self, course_code: &str) -> usize {
        if let Some(&position) = self.index.get(course_code) {
            return position % self.palette_size;
        }
        let position = self.order.len();
        self.order.push(course_code.to_string());
        self.index.insert(course_code.to_string(), position);
        position % self.palette_size
    }

    pub fn get(&self, course_code: &str) -> Option<usize> {
        self.index
            .get(course_code)
            .map(|position| position % self.palette_size)
    }

    /// Course codes in assignment order
    pub fn courses(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Serializes as `{ "course code": color index }` in assignment order
impl Serialize for ColorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.order.len()))?;
        for (position, course) in self.order.iter().enumerate() {
            map.serialize_entry(course, &(position % self.palette_size))?;
        }
        map.end()
    }
}

/// Expands components into one block per weekday they meet on.
/// Components whose time range can't be parsed produce no blocks at all.
pub fn build_blocks<'a>(
    components: &[&'a SelectedComponent],
    colors: &mut ColorMap,
) -> Vec<ScheduleBlock<'a>> {
    let mut blocks = Vec::new();

    for &component in components {
        let Some((start_time, end_time)) = parse_time(&component.time_text) else {
            debug!(
                "Skipping {} ({}): unparseable time {:?}",
                component.course_code, component.id, component.time_text
            );
            continue;
        };
        let color_index = colors.color_for(&component.course_code);

        for day in parse_days(&component.day_text) {
            blocks.push(ScheduleBlock {
                component,
                day,
                start_time,
                end_time,
                color_index,
            });
        }
    }

    blocks
}

/// Orders blocks by day (unknown days last) and then by start time
pub fn sort_blocks(blocks: &mut [ScheduleBlock<'_>]) {
    blocks.sort_by(|a, b| {
        a.day
            .cmp(&b.day)
            .then(a.start_time.total_cmp(&b.start_time))
            .then(a.end_time.total_cmp(&b.end_time))
    });
}
