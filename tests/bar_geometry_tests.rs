use wx_boxchart::core::{
    AxisRange, AxisScale, BarShape, HoverValue, MISSING_SAMPLE, PlanOptions, PlannedCell,
    Polarity, SeriesMatrix, UnitMode, Viewport, plan_bars,
};

fn matrix(rows: &[&[f64]]) -> SeriesMatrix {
    let mut matrix = SeriesMatrix::new(UnitMode::Standard);
    for row in rows {
        matrix.append_row(row).expect("row should append");
    }
    matrix
}

fn axis_for(
    matrix: &SeriesMatrix,
    pos_max: f64,
    neg_max: f64,
    scale: f64,
    viewport: Viewport,
) -> AxisScale {
    AxisScale::resolve(
        AxisRange { pos_max, neg_max },
        scale,
        viewport,
        matrix.total_columns(),
        matrix.series_count(),
        10,
    )
    .expect("axis should resolve")
}

#[test]
fn single_series_bars_grow_with_value() {
    let data = matrix(&[&[1.0, 2.0, 3.0]]);
    let axis = axis_for(&data, 3.0, 0.0, 1.0, Viewport::new(300, 150));
    let plan = plan_bars(&data, &axis, PlanOptions::default());

    assert!(plan.negative.is_none());
    assert_eq!(plan.positive.slot_width_px, 100);
    assert_eq!(plan.positive.slot_count(), 3);

    let heights: Vec<u32> = plan.positive.bars().map(|bar| bar.height_px).collect();
    assert_eq!(heights, vec![50, 100, 150]);
    for bar in plan.positive.bars() {
        assert_eq!(bar.shape, BarShape::Filled);
        assert_eq!(bar.polarity, Polarity::Positive);
        assert_eq!(bar.width_px, 99);
        assert_eq!(bar.lift_px, None);
    }
}

#[test]
fn missing_sample_keeps_its_slot_as_placeholder() {
    let data = matrix(&[&[1.0, MISSING_SAMPLE, 3.0]]);
    let axis = axis_for(&data, 3.0, 0.0, 1.0, Viewport::new(300, 150));
    let plan = plan_bars(&data, &axis, PlanOptions::default());

    let cells: Vec<&PlannedCell> = plan.positive.cells().collect();
    assert_eq!(cells.len(), 3);
    assert!(cells[0].bar().is_some());
    assert_eq!(*cells[1], PlannedCell::Placeholder);
    assert_eq!(cells[2].bar().map(|bar| bar.height_px), Some(150));
}

#[test]
fn signs_pick_their_band() {
    let data = matrix(&[&[4.0, -2.0]]);
    let axis = axis_for(&data, 4.0, -2.0, 1.0, Viewport::new(100, 60));
    let plan = plan_bars(&data, &axis, PlanOptions::default());
    let negative = plan.negative.as_ref().expect("negative band");

    let positive_cells: Vec<&PlannedCell> = plan.positive.cells().collect();
    assert!(positive_cells[0].bar().is_some());
    assert_eq!(*positive_cells[1], PlannedCell::Placeholder);

    let negative_cells: Vec<&PlannedCell> = negative.cells().collect();
    assert_eq!(*negative_cells[0], PlannedCell::Placeholder);
    let bar = negative_cells[1].bar().expect("negative bar");
    assert_eq!(bar.polarity, Polarity::Negative);
    assert_eq!(i64::from(bar.height_px), axis.negative_height(-2.0));
    assert_eq!(bar.hover, HoverValue::Single(-2.0));
}

#[test]
fn max_min_pair_straddling_zero_spans_both_bands() {
    let data = matrix(&[&[5.0], &[-3.0]]);
    let axis = axis_for(&data, 5.0, -3.0, 2.0, Viewport::new(200, 80));
    let options = PlanOptions {
        max_min: true,
        ..PlanOptions::default()
    };
    let plan = plan_bars(&data, &axis, options);

    assert_eq!(plan.positive.slot_count(), 1);
    assert_eq!(plan.positive.slot_width_px, 200);

    let upper = plan.positive.bars().next().expect("positive range bar");
    assert_eq!(upper.shape, BarShape::Range);
    assert_eq!(upper.polarity, Polarity::Positive);
    assert_eq!(upper.height_px, 50);
    assert_eq!(upper.lift_px, Some(50));
    assert_eq!(upper.width_px, 199);
    assert_eq!(upper.hover, HoverValue::Range { min: -3.0, max: 5.0 });

    let negative = plan.negative.as_ref().expect("negative band");
    let lower = negative.bars().next().expect("negative range bar");
    assert_eq!(lower.polarity, Polarity::Negative);
    assert_eq!(lower.height_px, 30);
    assert_eq!(lower.lift_px, Some(30));

    assert_eq!(f64::from(upper.height_px + lower.height_px), axis.vscale * 8.0);
}

#[test]
fn max_min_on_offset_chart_floats_above_baseline() {
    let data = matrix(&[&[3.0], &[8.0]]);
    let axis = axis_for(&data, 8.0, 0.0, 1.0, Viewport::new(100, 80));
    let options = PlanOptions {
        max_min: true,
        offset: 2.0,
        ..PlanOptions::default()
    };
    let plan = plan_bars(&data, &axis, options);

    let bar = plan.positive.bars().next().expect("mid range bar");
    assert_eq!(bar.polarity, Polarity::MidRange);
    assert_eq!(bar.height_px, 50);
    assert_eq!(bar.lift_px, Some(80));
}

#[test]
fn max_min_with_missing_member_is_placeholder() {
    let data = matrix(&[&[5.0, MISSING_SAMPLE], &[-3.0, 2.0]]);
    let axis = axis_for(&data, 5.0, -3.0, 2.0, Viewport::new(200, 80));
    let options = PlanOptions {
        max_min: true,
        ..PlanOptions::default()
    };
    let plan = plan_bars(&data, &axis, options);

    let cells: Vec<&PlannedCell> = plan.positive.cells().collect();
    assert_eq!(cells.len(), 2);
    assert_eq!(*cells[1], PlannedCell::Placeholder);
    let negative = plan.negative.as_ref().expect("negative band");
    assert_eq!(negative.cells().nth(1), Some(&PlannedCell::Placeholder));
}

#[test]
fn max_min_needs_exactly_two_series() {
    let data = matrix(&[&[1.0, 2.0, 3.0]]);
    let axis = axis_for(&data, 3.0, 0.0, 1.0, Viewport::new(300, 150));
    let options = PlanOptions {
        max_min: true,
        ..PlanOptions::default()
    };
    let plan = plan_bars(&data, &axis, options);

    assert_eq!(plan.positive.slot_width_px, axis.slot_width());
    assert!(plan.positive.bars().all(|bar| bar.shape == BarShape::Filled));
}

#[test]
fn wind_samples_become_ticks_at_their_height() {
    let data = matrix(&[&[270.0, 90.0]]);
    let axis = axis_for(&data, 360.0, 0.0, 45.0, Viewport::new(100, 200));
    let options = PlanOptions {
        wind_tick_px: Some(2),
        ..PlanOptions::default()
    };
    let plan = plan_bars(&data, &axis, options);

    let ticks: Vec<_> = plan.positive.bars().collect();
    assert_eq!(ticks.len(), 2);
    assert_eq!(ticks[0].shape, BarShape::Tick);
    assert_eq!(ticks[0].height_px, 2);
    assert_eq!(ticks[0].lift_px, Some((axis.vscale * 270.0).trunc() as u32));
    assert!(ticks[0].lift_px > ticks[1].lift_px);
}

#[test]
fn line_mode_hides_filled_bars() {
    let data = matrix(&[&[1.0, 2.0, 3.0]]);
    let axis = axis_for(&data, 3.0, 0.0, 1.0, Viewport::new(300, 150));
    let options = PlanOptions {
        bars_hidden: true,
        ..PlanOptions::default()
    };
    let plan = plan_bars(&data, &axis, options);

    assert_eq!(plan.positive.slot_count(), 3);
    assert_eq!(plan.positive.bars().count(), 0);
}

#[test]
fn bevel_shrinks_bars() {
    let data = matrix(&[&[1.0, 2.0, 3.0]]);
    let axis = axis_for(&data, 3.0, 0.0, 1.0, Viewport::new(300, 150));
    let options = PlanOptions {
        bevel_px: 2,
        ..PlanOptions::default()
    };
    let plan = plan_bars(&data, &axis, options);

    let first = plan.positive.bars().next().expect("bar");
    assert_eq!(first.width_px, 97);
    assert_eq!(first.height_px, 48);
}

#[test]
fn tiny_positive_sample_keeps_one_pixel() {
    let data = matrix(&[&[0.001, 3.0]]);
    let axis = axis_for(&data, 3.0, 0.0, 1.0, Viewport::new(200, 150));
    let plan = plan_bars(&data, &axis, PlanOptions::default());

    let first = plan.positive.bars().next().expect("bar");
    assert_eq!(first.height_px, 1);
}
