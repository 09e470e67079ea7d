//! Wire contract of the plot-data endpoint.
//!
//! Requests carry the view's normalized display options plus exactly one of
//! `id` (saved graph) or `graph` (inline preview specification). Responses
//! either describe a renderable chart or carry a bare `message`.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::core::{ConsolidationKind, GraphKind, StackMode, UnitType};

/// Body of a plot-data request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentiles: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph: Option<Value>,
}

/// Raw plot-data response before outcome classification.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlotResponse {
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<GraphKind>,
    pub stack_mode: Option<StackMode>,
    pub unit_type: Option<UnitType>,
    pub unit_legend: Option<String>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub series: Option<Vec<SeriesPayload>>,
}

impl PlotResponse {
    /// Decodes a response body, mapping JSON errors into [`FetchError`] so
    /// transport adapters can report them uniformly.
    pub fn from_json(body: &str) -> Result<Self, FetchError> {
        serde_json::from_str(body).map_err(|err| FetchError::Decode(err.to_string()))
    }
}

/// One series of the response payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPayload {
    pub name: String,
    #[serde(default)]
    pub stack_id: u32,
    /// `(epoch seconds, value)` pairs; `None` marks a gap.
    #[serde(default)]
    pub plots: Vec<(f64, Option<f64>)>,
    /// Open-ended statistic map; at minimum min/avg/max/last.
    #[serde(default)]
    pub summary: IndexMap<String, f64>,
    #[serde(default)]
    pub options: Option<SeriesOptions>,
}

/// Per-series display options carried by the response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesOptions {
    pub color: Option<String>,
    pub scale: Option<f64>,
    pub unit: Option<String>,
    pub consolidate: Option<ConsolidationKind>,
    pub formatter: Option<String>,
}

/// Response validated for rendering: chart fields present, series nonempty.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotPayload {
    pub kind: GraphKind,
    pub stack_mode: StackMode,
    pub unit_type: Option<UnitType>,
    pub unit_legend: Option<String>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub series: Vec<SeriesPayload>,
}

/// Failure reported by the host transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("malformed plot response: {0}")]
    Decode(String),
}
