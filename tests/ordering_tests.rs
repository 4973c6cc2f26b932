use box_timeline::core::{
    BoxSizeTable, BoxSlice, FrameSpec, PriceBox, VisibilityFilter, Window, build_frame, largest,
    order_boxes, smallest,
};

fn table() -> BoxSizeTable {
    BoxSizeTable::new(vec![19.0, 28.0, 41.0, 60.0, 88.0]).expect("valid table")
}

fn b(value: f64) -> PriceBox {
    PriceBox::new(110.0, 100.0, value).expect("valid box")
}

fn values(boxes: &[PriceBox]) -> Vec<f64> {
    boxes.iter().map(|b| b.value).collect()
}

#[test]
fn order_groups_negatives_then_positives_and_snaps() {
    let visible = vec![b(19.0), b(-60.0), b(41.0), b(-28.0), b(0.0)];
    let ordered = order_boxes(&visible, &table());
    assert_eq!(values(&ordered), vec![-60.0, -28.0, 19.0, 19.0, 41.0]);
}

#[test]
fn order_sorts_on_raw_values_before_snapping() {
    // 30 and 27 both snap to 28; raw order must decide their placement.
    let first = PriceBox::new(1.0, 0.0, 30.0).expect("box");
    let second = PriceBox::new(2.0, 0.0, 27.0).expect("box");
    let ordered = order_boxes(&[first, second], &table());

    assert_eq!(values(&ordered), vec![28.0, 28.0]);
    assert_eq!(ordered[0].high, 2.0);
    assert_eq!(ordered[1].high, 1.0);
}

#[test]
fn order_is_independent_of_input_permutation_with_duplicates() {
    let base = [b(-41.0), b(19.0), b(-41.0), b(28.0), b(19.0)];
    let expected = values(&order_boxes(&base, &table()));

    let permutations = [
        [base[4], base[3], base[2], base[1], base[0]],
        [base[1], base[0], base[4], base[2], base[3]],
        [base[2], base[4], base[0], base[3], base[1]],
    ];
    for permutation in permutations {
        assert_eq!(values(&order_boxes(&permutation, &table())), expected);
    }
    assert_eq!(expected, vec![-41.0, -41.0, 19.0, 19.0, 28.0]);
}

#[test]
fn order_preserves_price_bounds() {
    let visible = vec![PriceBox::new(105.5, 101.25, -57.0).expect("box")];
    let ordered = order_boxes(&visible, &table());
    assert_eq!(ordered[0].high, 105.5);
    assert_eq!(ordered[0].low, 101.25);
    assert_eq!(ordered[0].value, -60.0);
}

#[test]
fn largest_and_smallest_resolve_ties_by_first_occurrence() {
    let boxes = vec![b(-60.0), b(-19.0), b(19.0), b(60.0)];
    assert_eq!(largest(&boxes).map(|(i, _)| i), Some(0));
    assert_eq!(smallest(&boxes).map(|(i, _)| i), Some(1));
}

#[test]
fn frame_regime_follows_largest_box_and_anchor_follows_smallest() {
    let table = table();
    let spec = FrameSpec::new(Window::new(0, 4).expect("window"), VisibilityFilter::All, &table);
    let slice = BoxSlice::new("t0", vec![b(28.0), b(-88.0), b(19.0), b(41.0)]);

    let frame = build_frame(&slice, spec).expect("non-empty frame");
    assert_eq!(values(&frame.ordered_boxes), vec![-88.0, 19.0, 28.0, 41.0]);
    assert!(!frame.regime_is_positive);
    assert_eq!(frame.line_anchor.box_index, 1);
    assert!(frame.line_anchor.is_positive);
    assert_eq!(frame.timestamp, "t0");
}

#[test]
fn frame_uses_only_windowed_boxes() {
    let table = table();
    let spec = FrameSpec::new(Window::new(0, 2).expect("window"), VisibilityFilter::All, &table);
    let slice = BoxSlice::new("t0", vec![b(-88.0), b(19.0), b(-28.0)]);

    let frame = build_frame(&slice, spec).expect("non-empty frame");
    assert_eq!(values(&frame.ordered_boxes), vec![-28.0, 19.0]);
    assert!(!frame.regime_is_positive);
}

#[test]
fn filtered_out_window_yields_no_frame() {
    let table = table();
    let spec = FrameSpec::new(
        Window::new(0, 3).expect("window"),
        VisibilityFilter::PositiveOnly,
        &table,
    );
    let slice = BoxSlice::new("t0", vec![b(-88.0), b(-19.0), b(-28.0)]);
    assert!(build_frame(&slice, spec).is_none());

    let empty = BoxSlice::new("t1", Vec::new());
    let all = FrameSpec::new(Window::new(0, 3).expect("window"), VisibilityFilter::All, &table);
    assert!(build_frame(&empty, all).is_none());
}
