//! Value formatting for legends, summary tables, and tooltip text.

use crate::core::UnitType;

const METRIC_PREFIXES: [&str; 9] = ["", "k", "M", "G", "T", "P", "E", "Z", "Y"];

/// Per-value formatting inputs, typically taken from a series' options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueFormat {
    pub unit_type: Option<UnitType>,
    /// Decimal places overriding the two-decimal default.
    pub decimals: Option<usize>,
    /// Unit suffix appended after the formatted number.
    pub unit: Option<String>,
}

impl ValueFormat {
    #[must_use]
    pub fn for_unit_type(unit_type: UnitType) -> Self {
        Self {
            unit_type: Some(unit_type),
            ..Self::default()
        }
    }
}

/// Formats a plot or summary value for display.
///
/// Fixed units print the plain number; metric units scale by powers of 1000
/// with the matching prefix. Without a unit type the value prints unscaled
/// at full precision.
#[must_use]
pub fn format_value(value: f64, format: &ValueFormat) -> String {
    let decimals = format.decimals.unwrap_or(2);

    let mut result = match format.unit_type {
        Some(UnitType::Fixed) => format!("{value:.decimals$}"),
        Some(UnitType::Metric) => human_readable(value, decimals),
        None => format!("{value}"),
    };

    if let Some(unit) = &format.unit {
        result.push(' ');
        result.push_str(unit);
    }

    result
}

/// Scales a value into base-1000 metric notation (`1234` → `1.23 k`).
#[must_use]
pub fn human_readable(value: f64, decimals: usize) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }

    let magnitude = (value.abs().ln() / 1000_f64.ln()).floor() as i32;
    let index = magnitude.clamp(0, METRIC_PREFIXES.len() as i32 - 1) as usize;
    let scaled = value / 1000_f64.powi(index as i32);

    if index > 0 {
        format!("{scaled:.decimals$} {}", METRIC_PREFIXES[index])
    } else {
        format!("{scaled:.decimals$}")
    }
}
