use wx_boxchart::core::range::{WIND_MAX, WIND_SCALE};
use wx_boxchart::core::{MISSING_SAMPLE, SeriesMatrix, UnitMode, measure_range, select_scale};

fn matrix(unit_mode: UnitMode, rows: &[&[f64]]) -> SeriesMatrix {
    let mut matrix = SeriesMatrix::new(unit_mode);
    for row in rows {
        matrix.append_row(row).expect("row should append");
    }
    matrix
}

#[test]
fn scale_follows_pixels_per_tick() {
    let data = matrix(UnitMode::Standard, &[&[0.0, 100.0]]);
    // 150px allows ten 15px ticks for a range of 101 units.
    let selection = select_scale(&data, 150, false, false, 0.0);
    assert_eq!(selection.scale, 11.0);
    assert_eq!(selection.offset, 0.0);
}

#[test]
fn scale_is_at_least_one() {
    let data = matrix(UnitMode::Standard, &[&[1.0, 2.0, 3.0]]);
    let selection = select_scale(&data, 600, false, false, 0.0);
    assert_eq!(selection.scale, 1.0);
}

#[test]
fn positive_minimum_lifts_baseline_below_smallest_sample() {
    let data = matrix(UnitMode::Standard, &[&[12.0, 15.5, 20.0]]);
    let selection = select_scale(&data, 200, false, false, 0.0);
    assert_eq!(selection.offset, 11.0);

    let fractional = matrix(UnitMode::Standard, &[&[12.4, 15.5]]);
    assert_eq!(
        select_scale(&fractional, 200, false, false, 0.0).offset,
        12.0
    );
}

#[test]
fn negative_minimum_depends_on_negative_bars() {
    let data = matrix(UnitMode::Standard, &[&[-5.0, 3.0]]);

    let with_bars = select_scale(&data, 200, false, true, 0.0);
    assert_eq!(with_bars.offset, 0.0);

    let lifted = select_scale(&data, 200, false, false, 0.0);
    assert_eq!(lifted.offset, -6.0);
}

#[test]
fn positive_minimum_is_offset_even_with_negative_bars() {
    let data = matrix(UnitMode::Standard, &[&[10.0, 30.0]]);
    let selection = select_scale(&data, 200, false, true, 0.0);
    assert_eq!(selection.offset, 9.0);

    let small = matrix(UnitMode::Standard, &[&[5.0, 10.0]]);
    for negative_bars in [true, false] {
        let selection = select_scale(&small, 200, false, negative_bars, 0.0);
        assert_eq!(selection.offset, 4.0);
    }
}

#[test]
fn missing_samples_do_not_affect_selection() {
    let data = matrix(
        UnitMode::Standard,
        &[&[MISSING_SAMPLE, 10.0, MISSING_SAMPLE, 20.0]],
    );
    let selection = select_scale(&data, 200, false, false, 0.0);
    assert_eq!(selection.offset, 9.0);

    let all_missing = matrix(UnitMode::Standard, &[&[MISSING_SAMPLE, MISSING_SAMPLE]]);
    let selection = select_scale(&all_missing, 200, false, false, 0.0);
    assert_eq!(selection.scale, 1.0);
    assert_eq!(selection.offset, 0.0);
}

#[test]
fn wind_uses_compass_scale_and_base_offset() {
    let data = matrix(UnitMode::Standard, &[&[10.0, 350.0]]);
    let selection = select_scale(&data, 200, true, false, 7.0);
    assert_eq!(selection.scale, WIND_SCALE);
    assert_eq!(selection.offset, 7.0);

    let mut working = data.shifted(selection.offset);
    let range = measure_range(&mut working, true);
    assert_eq!(range.pos_max, WIND_MAX);
    assert_eq!(range.neg_max, 0.0);
}

#[test]
fn bounds_bracket_zero() {
    let mut data = matrix(UnitMode::Standard, &[&[4.0, -7.5, 2.0], &[9.0, 1.0, -2.0]]);
    let range = measure_range(&mut data, false);
    assert_eq!(range.pos_max, 9.0);
    assert_eq!(range.neg_max, -7.5);
    assert!(range.has_negative_band());
    assert_eq!(range.span(), 16.5);
}

#[test]
fn small_bounds_snap_to_one_unit() {
    let mut data = matrix(UnitMode::Standard, &[&[0.25, -0.5]]);
    let range = measure_range(&mut data, false);
    assert_eq!(range.pos_max, 1.0);
    assert_eq!(range.neg_max, -1.0);
}

#[test]
fn fixed_point_bounds_snap_to_three_hundredths() {
    let mut data = matrix(UnitMode::FixedPoint, &[&[0.01]]);
    let range = measure_range(&mut data, false);
    assert_eq!(range.pos_max, 3.0);
    assert_eq!(range.neg_max, 0.0);
}

#[test]
fn outliers_below_floor_take_running_negative_maximum() {
    let mut data = matrix(UnitMode::Standard, &[&[-20.0, -500.0, -30.0]]);
    let range = measure_range(&mut data, false);

    assert_eq!(data.get(0, 1), Some(-20.0));
    assert_eq!(range.neg_max, -30.0);
}

#[test]
fn outlier_before_any_negative_sample_clamps_to_zero() {
    let mut data = matrix(UnitMode::Standard, &[&[-500.0, 4.0]]);
    let range = measure_range(&mut data, false);

    assert_eq!(data.get(0, 0), Some(0.0));
    assert_eq!(range.neg_max, 0.0);
    assert_eq!(range.pos_max, 4.0);
}
