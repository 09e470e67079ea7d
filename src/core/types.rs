use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of one live graph view, generated by the dashboard at bind
/// time. Never the persisted graph id: unsaved previews need an identity too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewId(u64);

impl ViewId {
    #[must_use]
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Host-side identity of a scrollable ancestor element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContainerId(u64);

impl ContainerId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Chart rendering kind carried by the plot response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum GraphKind {
    Area,
    Line,
}

impl From<GraphKind> for u8 {
    fn from(kind: GraphKind) -> Self {
        match kind {
            GraphKind::Area => 1,
            GraphKind::Line => 2,
        }
    }
}

impl TryFrom<u8> for GraphKind {
    type Error = String;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            1 => Ok(Self::Area),
            2 => Ok(Self::Line),
            other => Err(format!("unknown graph kind discriminant: {other}")),
        }
    }
}

/// Stacking mode applied to series sharing a stack key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum StackMode {
    None,
    Normal,
    Percent,
}

impl From<StackMode> for u8 {
    fn from(mode: StackMode) -> Self {
        match mode {
            StackMode::None => 1,
            StackMode::Normal => 2,
            StackMode::Percent => 3,
        }
    }
}

impl TryFrom<u8> for StackMode {
    type Error = String;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            1 => Ok(Self::None),
            2 => Ok(Self::Normal),
            3 => Ok(Self::Percent),
            other => Err(format!("unknown stack mode discriminant: {other}")),
        }
    }
}

/// Unit family used when formatting axis labels and summary values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum UnitType {
    Fixed,
    Metric,
}

impl From<UnitType> for u8 {
    fn from(unit: UnitType) -> Self {
        match unit {
            UnitType::Fixed => 1,
            UnitType::Metric => 2,
        }
    }
}

impl TryFrom<u8> for UnitType {
    type Error = String;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            1 => Ok(Self::Fixed),
            2 => Ok(Self::Metric),
            other => Err(format!("unknown unit type discriminant: {other}")),
        }
    }
}

/// Consolidation function the backend applied when downsampling a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ConsolidationKind {
    Average,
    Last,
    Max,
    Min,
    Sum,
}

impl From<ConsolidationKind> for u8 {
    fn from(kind: ConsolidationKind) -> Self {
        match kind {
            ConsolidationKind::Average => 1,
            ConsolidationKind::Last => 2,
            ConsolidationKind::Max => 3,
            ConsolidationKind::Min => 4,
            ConsolidationKind::Sum => 5,
        }
    }
}

impl TryFrom<u8> for ConsolidationKind {
    type Error = String;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            1 => Ok(Self::Average),
            2 => Ok(Self::Last),
            3 => Ok(Self::Max),
            4 => Ok(Self::Min),
            5 => Ok(Self::Sum),
            other => Err(format!("unknown consolidation discriminant: {other}")),
        }
    }
}

/// Range applied when a graph has neither an explicit anchor nor a range.
pub const DEFAULT_RANGE: &str = "-1h";

/// Display format used for graph subtitles and tooltip headers.
pub const TIME_DISPLAY_FORMAT: &str = "%B %-d %Y, %H:%M:%S";

#[must_use]
pub fn datetime_to_millis(time: DateTime<Utc>) -> i64 {
    time.timestamp_millis()
}

#[must_use]
pub fn millis_to_datetime(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(millis)
}

/// Formats an instant the way graph subtitles and tooltips display it.
#[must_use]
pub fn format_time_display(time: DateTime<Utc>) -> String {
    time.format(TIME_DISPLAY_FORMAT).to_string()
}
