//! Transforms a fetched series payload into renderer-ready structure.

use indexmap::IndexMap;

use super::plots_contract::SeriesPayload;
use super::view::SummaryTableEntry;
use crate::render::PlotPoint;

/// Stable-sorts series names by descending `summary.avg` for z-index
/// assignment.
///
/// A comparison where either side lacks an `avg` statistic ranks the pair
/// equal, so such series keep their response order. Later names draw on top.
#[must_use]
pub fn order_for_z_index(series: &[SeriesPayload]) -> Vec<String> {
    let mut ordered: Vec<&SeriesPayload> = series.iter().collect();

    // The pairwise rule is not a total order (a missing avg compares equal
    // to everything), so a stable insertion pass is used instead of
    // `sort_by`, which requires one.
    for index in 1..ordered.len() {
        let mut position = index;
        while position > 0 && compare_avg(ordered[position], ordered[position - 1]).is_lt() {
            ordered.swap(position, position - 1);
            position -= 1;
        }
    }

    ordered.into_iter().map(|entry| entry.name.clone()).collect()
}

fn compare_avg(a: &SeriesPayload, b: &SeriesPayload) -> std::cmp::Ordering {
    match (a.summary.get("avg"), b.summary.get("avg")) {
        (Some(left), Some(right)) => right
            .partial_cmp(left)
            .unwrap_or(std::cmp::Ordering::Equal),
        _ => std::cmp::Ordering::Equal,
    }
}

/// Converts `(epoch seconds, value)` pairs into epoch-millisecond plot
/// points. Gaps (`None`) pass through unchanged.
#[must_use]
pub fn to_plot_points(plots: &[(f64, Option<f64>)]) -> Vec<PlotPoint> {
    plots
        .iter()
        .map(|(timestamp, value)| ((timestamp * 1_000.0).round() as i64, *value))
        .collect()
}

/// Grouping key under which series stack cumulatively.
#[must_use]
pub fn stack_key(stack_id: u32) -> String {
    format!("stack{stack_id}")
}

/// Builds the legend/summary table, keyed by series name in response order.
///
/// Independent of chart rendering: hosts feed it to their table/legend
/// presentation step.
#[must_use]
pub fn build_summary_table(series: &[SeriesPayload]) -> IndexMap<String, SummaryTableEntry> {
    series
        .iter()
        .map(|entry| {
            (
                entry.name.clone(),
                SummaryTableEntry {
                    summary: entry.summary.clone(),
                    options: entry.options.clone().unwrap_or_default(),
                },
            )
        })
        .collect()
}
