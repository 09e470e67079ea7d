use dashgraph::api::{SeriesPayload, order_for_z_index, to_plot_points};
use indexmap::IndexMap;
use proptest::prelude::*;

fn payload(name: String, avg: Option<f64>) -> SeriesPayload {
    let mut summary = IndexMap::new();
    if let Some(avg) = avg {
        summary.insert("avg".to_owned(), avg);
    }
    SeriesPayload {
        name,
        stack_id: 0,
        plots: Vec::new(),
        summary,
        options: None,
    }
}

proptest! {
    #[test]
    fn ordering_is_a_permutation_of_the_input(
        averages in proptest::collection::vec(proptest::option::of(-1_000.0f64..1_000.0), 0..12)
    ) {
        let series: Vec<SeriesPayload> = averages
            .iter()
            .enumerate()
            .map(|(index, avg)| payload(format!("series{index}"), *avg))
            .collect();

        let mut ordered = order_for_z_index(&series);
        let mut names: Vec<String> = series.iter().map(|entry| entry.name.clone()).collect();
        ordered.sort();
        names.sort();
        prop_assert_eq!(ordered, names);
    }

    #[test]
    fn series_without_averages_keep_their_relative_order(
        count in 1_usize..10
    ) {
        let series: Vec<SeriesPayload> = (0..count)
            .map(|index| payload(format!("series{index}"), None))
            .collect();

        let ordered = order_for_z_index(&series);
        let expected: Vec<String> = (0..count).map(|index| format!("series{index}")).collect();
        prop_assert_eq!(ordered, expected);
    }

    #[test]
    fn averaged_series_sort_descending(
        averages in proptest::collection::vec(-1_000.0f64..1_000.0, 2..12)
    ) {
        let series: Vec<SeriesPayload> = averages
            .iter()
            .enumerate()
            .map(|(index, avg)| payload(format!("series{index}"), Some(*avg)))
            .collect();

        let ordered = order_for_z_index(&series);
        let value_of = |name: &String| {
            series
                .iter()
                .find(|entry| entry.name == *name)
                .and_then(|entry| entry.summary.get("avg"))
                .copied()
                .unwrap_or(f64::NAN)
        };
        for pair in ordered.windows(2) {
            prop_assert!(value_of(&pair[0]) >= value_of(&pair[1]));
        }
    }

    #[test]
    fn plot_point_conversion_scales_and_preserves_gaps(
        plots in proptest::collection::vec(
            (0.0f64..4_000_000_000.0, proptest::option::of(-1_000.0f64..1_000.0)),
            0..50
        )
    ) {
        let converted = to_plot_points(&plots);
        prop_assert_eq!(converted.len(), plots.len());
        for ((seconds, value), (millis, converted_value)) in plots.iter().zip(&converted) {
            prop_assert_eq!(*millis, (seconds * 1_000.0).round() as i64);
            prop_assert_eq!(value.is_none(), converted_value.is_none());
        }
    }
}
