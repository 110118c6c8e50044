pub mod types;
pub mod tokens;
pub mod term_codes;
pub mod time_utils;
pub mod blocks;
pub mod conflicts;
pub mod months;
pub mod grouping;
pub mod view;

pub use types::{ConflictSet, Day, MonthSegment, ScheduleBlock, SelectedComponent, TermDuration};
pub use tokens::{normalize_day, normalize_month, normalize_term};
pub use term_codes::resolve_duration;
pub use time_utils::{hours_to_time_string, parse_days, parse_time};
pub use blocks::{build_blocks, ColorMap, DEFAULT_PALETTE_SIZE};
pub use conflicts::{blocks_conflict, detect_conflicts, merge_conflicts};
pub use months::{academic_index, month_segments};
pub use grouping::{group_by_term, TermGroup};
pub use view::{derive_schedule, ScheduleView, TermSchedule};
