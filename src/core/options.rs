//! Per-view display options and their merge/normalize semantics.
//!
//! Options arrive from loosely-typed sources (element attributes, URL
//! parameters, saved dashboards) and are patched by every toolbar action.
//! The merge rule mirrors attribute semantics: a non-boolean key set to a
//! falsy value (zero, empty string) is removed entirely so defaults apply
//! on the next read, while booleans keep explicit `false`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Tri-state patch entry: leave the key alone, remove it, or replace it.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Patch<T> {
    #[default]
    Keep,
    Clear,
    Set(T),
}

impl<T> Patch<T> {
    /// Resolves this patch against the current value.
    fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            Self::Keep => current,
            Self::Clear => None,
            Self::Set(value) => Some(value),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    /// `Some` sets, `None` clears. Mirrors patch objects whose present keys
    /// with null values delete the option.
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => Self::Set(inner),
            None => Self::Clear,
        }
    }
}

/// Display options for one graph view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::integer"
    )]
    pub refresh_interval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expand: Option<bool>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::integer"
    )]
    pub sample: Option<u32>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::float_list"
    )]
    pub percentiles: Option<Vec<f64>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::float_list"
    )]
    pub constants: Option<Vec<f64>>,
    /// Display title, also named by failure placeholders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Patch applied over the current options by [`GraphOptions::merge`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionsPatch {
    pub time: Patch<DateTime<Utc>>,
    pub range: Patch<String>,
    pub refresh_interval: Patch<u32>,
    pub legend: Patch<bool>,
    pub zoom: Patch<bool>,
    pub expand: Patch<bool>,
    pub sample: Patch<u32>,
    pub percentiles: Patch<Vec<f64>>,
    pub constants: Patch<Vec<f64>>,
    pub title: Patch<String>,
}

impl GraphOptions {
    /// Shallow-merges `patch` over `self` and returns the new canonical
    /// options. Non-boolean keys resolving to a falsy value (zero, empty
    /// string) end up removed; callers must replace their stored state with
    /// the returned value.
    #[must_use]
    pub fn merge(&self, patch: OptionsPatch) -> Self {
        Self {
            time: patch.time.apply(self.time),
            range: patch
                .range
                .apply(self.range.clone())
                .filter(|range| !range.is_empty()),
            refresh_interval: patch
                .refresh_interval
                .apply(self.refresh_interval)
                .filter(|interval| *interval > 0),
            legend: patch.legend.apply(self.legend),
            zoom: patch.zoom.apply(self.zoom),
            expand: patch.expand.apply(self.expand),
            sample: patch.sample.apply(self.sample).filter(|sample| *sample > 0),
            percentiles: patch.percentiles.apply(self.percentiles.clone()),
            constants: patch.constants.apply(self.constants.clone()),
            title: patch
                .title
                .apply(self.title.clone())
                .filter(|title| !title.is_empty()),
        }
    }

    /// Applies draw-time defaults: zoom/expand on, legend off, zero sample
    /// dropped, and the default range when neither anchor nor range is set.
    #[must_use]
    pub fn normalized(&self, default_range: &str) -> Self {
        let mut options = self.clone();

        options.zoom = Some(options.zoom.unwrap_or(true));
        options.expand = Some(options.expand.unwrap_or(true));
        options.legend = Some(options.legend.unwrap_or(false));
        options.sample = options.sample.filter(|sample| *sample > 0);

        if options.time.is_none() && options.range.is_none() {
            options.range = Some(default_range.to_owned());
        }

        options
    }

    /// Parses the `key: value; key: value` element-attribute syntax.
    ///
    /// Numeric and boolean literals are coerced; unparsable values for a
    /// known key are dropped rather than propagated.
    #[must_use]
    pub fn from_attribute(attribute: &str) -> Self {
        let mut options = Self::default();

        for entry in attribute.split(';') {
            let Some((key, value)) = entry.split_once(':') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            match key {
                "time" => options.time = value.parse().ok(),
                "range" => options.range = Some(value.to_owned()).filter(|v| !v.is_empty()),
                "refresh_interval" => options.refresh_interval = parse_integer(value),
                "legend" => options.legend = parse_boolean(value),
                "zoom" => options.zoom = parse_boolean(value),
                "expand" => options.expand = parse_boolean(value),
                "sample" => options.sample = parse_integer(value),
                "percentiles" => options.percentiles = parse_float_list(value),
                "constants" => options.constants = parse_float_list(value),
                "title" => options.title = Some(value.to_owned()).filter(|v| !v.is_empty()),
                other => trace!(key = other, "ignoring unknown graph option"),
            }
        }

        options
    }
}

fn parse_boolean(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn parse_integer(value: &str) -> Option<u32> {
    value
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite() && *parsed >= 0.0)
        .map(|parsed| parsed as u32)
        .filter(|parsed| *parsed > 0)
}

fn parse_float_list(value: &str) -> Option<Vec<f64>> {
    let floats: Vec<f64> = value
        .split(',')
        .filter_map(|chunk| chunk.trim().parse::<f64>().ok())
        .filter(|float| float.is_finite())
        .collect();

    if floats.is_empty() { None } else { Some(floats) }
}

/// Lenient deserializers for fields that arrive as numbers or strings.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::{parse_float_list, parse_integer};

    pub(super) fn integer<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(match raw {
            Some(Value::Number(number)) => number
                .as_u64()
                .and_then(|value| u32::try_from(value).ok())
                .filter(|value| *value > 0),
            Some(Value::String(text)) => parse_integer(&text),
            _ => None,
        })
    }

    pub(super) fn float_list<'de, D>(deserializer: D) -> Result<Option<Vec<f64>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(match raw {
            Some(Value::Number(number)) => number.as_f64().map(|value| vec![value]),
            Some(Value::String(text)) => parse_float_list(&text),
            Some(Value::Array(values)) => {
                let floats: Vec<f64> = values
                    .iter()
                    .filter_map(Value::as_f64)
                    .filter(|value| value.is_finite())
                    .collect();
                if floats.is_empty() { None } else { Some(floats) }
            }
            _ => None,
        })
    }
}
