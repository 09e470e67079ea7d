pub mod format;
pub mod options;
pub mod range;
pub mod types;

pub use format::{ValueFormat, format_value, human_readable};
pub use options::{GraphOptions, OptionsPatch, Patch};
pub use range::{duration_to_range, range_to_duration};
pub use types::{
    ConsolidationKind, ContainerId, DEFAULT_RANGE, GraphKind, StackMode, TIME_DISPLAY_FORMAT,
    UnitType, ViewId, datetime_to_millis, format_time_display, millis_to_datetime,
};
