use proptest::prelude::*;
use wx_boxchart::api::{Graph, GraphConfig, GraphDefaults};
use wx_boxchart::core::{MISSING_SAMPLE, SeriesMatrix, UnitMode, measure_range, select_scale};

fn build_graph(config: GraphConfig, rows: &[Vec<f64>]) -> Graph {
    let mut graph = Graph::new(config, &GraphDefaults::default());
    for row in rows {
        graph.append_row(row).expect("row should append");
    }
    graph
}

proptest! {
    #[test]
    fn bounds_bracket_zero_for_any_samples(
        samples in prop::collection::vec(-99.0f64..500.0, 1..60),
        negative_bars in any::<bool>(),
        height in 20u32..600
    ) {
        let mut matrix = SeriesMatrix::new(UnitMode::Standard);
        matrix.append_row(&samples).expect("row should append");

        let selection = select_scale(&matrix, height, false, negative_bars, 0.0);
        prop_assert!(selection.scale >= 1.0);

        let mut working = matrix.shifted(selection.offset);
        let range = measure_range(&mut working, false);
        prop_assert!(range.neg_max <= 0.0);
        prop_assert!(range.pos_max > 0.0);
        prop_assert!(range.neg_max < range.pos_max);
    }

    #[test]
    fn wind_range_is_fixed(
        samples in prop::collection::vec(0.0f64..360.0, 1..30),
        height in 20u32..600
    ) {
        let mut matrix = SeriesMatrix::new(UnitMode::Standard);
        matrix.append_row(&samples).expect("row should append");

        let selection = select_scale(&matrix, height, true, false, 0.0);
        let mut working = matrix.shifted(selection.offset);
        let range = measure_range(&mut working, true);
        prop_assert_eq!(range.pos_max, 360.0);
        prop_assert_eq!(range.neg_max, 0.0);
    }

    #[test]
    fn tallest_bar_meets_top_of_axis(
        samples in prop::collection::vec(1u32..1_000, 1..40),
        height in 50u32..600,
        width in 100u32..1_200
    ) {
        let row: Vec<f64> = samples.iter().map(|v| f64::from(*v)).collect();
        let graph = build_graph(GraphConfig::new(width, height), &[row]);
        let plan = graph.plan().expect("plan").expect("non-empty plan");

        let tallest = plan
            .bars
            .positive
            .bars()
            .map(|bar| i64::from(bar.height_px))
            .max()
            .expect("at least one bar");
        let axis_top = plan.axis.paxis_height as i64;
        prop_assert!((tallest - axis_top).abs() <= 1, "tallest {} vs axis {}", tallest, axis_top);
    }

    #[test]
    fn missing_samples_never_produce_geometry(
        samples in prop::collection::vec(prop::option::of(1.0f64..300.0), 2..40)
    ) {
        let row: Vec<f64> = samples.iter().map(|v| v.unwrap_or(MISSING_SAMPLE)).collect();
        prop_assume!(samples.iter().any(Option::is_some));

        let graph = build_graph(GraphConfig::new(400, 200), &[row]);
        let plan = graph.plan().expect("plan").expect("non-empty plan");

        for bar in plan.bars.positive.bars() {
            prop_assert!(samples[bar.category].is_some());
        }
        prop_assert_eq!(plan.bars.positive.slot_count(), samples.len());
    }

    #[test]
    fn builds_are_deterministic(
        first in prop::collection::vec(-150.0f64..150.0, 1..20),
        negative_bars in any::<bool>()
    ) {
        let second: Vec<f64> = first.iter().rev().copied().collect();
        let graph = build_graph(
            GraphConfig::new(300, 150).with_negative_bars(negative_bars),
            &[first.clone(), second],
        );

        let a = graph.render_markup().expect("first render");
        let b = graph.render_markup().expect("second render");
        prop_assert_eq!(a, b);
        prop_assert_eq!(graph.matrix().get(0, 0), Some(first[0]));
    }
}
