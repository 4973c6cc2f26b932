use box_timeline::core::{
    BoxSizeTable, BoxSlice, FrameSpec, PriceBox, TimelineEntry, VisibilityFilter, Window,
    build_frames, collapse_frames, dedupe,
};

fn table() -> BoxSizeTable {
    BoxSizeTable::new(vec![19.0, 28.0, 41.0, 60.0, 88.0]).expect("valid table")
}

fn slice(timestamp: &str, values: &[f64]) -> BoxSlice {
    BoxSlice::new(
        timestamp,
        values
            .iter()
            .map(|v| PriceBox::new(110.0, 100.0, *v).expect("valid box"))
            .collect(),
    )
}

fn timestamps(slices: &[BoxSlice]) -> Vec<&str> {
    slices.iter().map(|s| s.timestamp.as_str()).collect()
}

#[test]
fn visually_identical_frames_collapse_to_first() {
    let table = table();
    let spec = FrameSpec::new(Window::new(0, 3).expect("window"), VisibilityFilter::All, &table);
    let slices = vec![
        slice("1", &[20.0, -30.0, 45.0]),
        slice("2", &[19.0, -28.0, 41.0]),
        slice("3", &[21.0, -27.0, 40.0]),
        slice("4", &[21.0, -27.0, 88.0]),
    ];

    let kept = dedupe(&slices, spec);
    assert_eq!(timestamps(&kept), vec!["1", "4"]);
}

#[test]
fn dedupe_compares_against_last_kept_not_previous() {
    let table = table();
    let spec = FrameSpec::new(Window::new(0, 2).expect("window"), VisibilityFilter::All, &table);
    let slices = vec![
        slice("1", &[19.0, 28.0]),
        slice("2", &[19.0, 41.0]),
        slice("3", &[19.0, 28.0]),
        slice("4", &[19.0, 28.0]),
    ];

    let kept = dedupe(&slices, spec);
    assert_eq!(timestamps(&kept), vec!["1", "2", "3"]);
}

#[test]
fn change_outside_window_is_not_a_visual_change() {
    let table = table();
    let narrow = FrameSpec::new(Window::new(0, 2).expect("window"), VisibilityFilter::All, &table);
    let wide = FrameSpec::new(Window::new(0, 3).expect("window"), VisibilityFilter::All, &table);
    let slices = vec![slice("1", &[19.0, -28.0, 60.0]), slice("2", &[19.0, -28.0, -88.0])];

    assert_eq!(timestamps(&dedupe(&slices, narrow)), vec!["1"]);
    assert_eq!(timestamps(&dedupe(&slices, wide)), vec!["1", "2"]);
}

#[test]
fn visibility_filter_participates_in_signature() {
    let table = table();
    let positive = FrameSpec::new(
        Window::new(0, 3).expect("window"),
        VisibilityFilter::PositiveOnly,
        &table,
    );
    let slices = vec![slice("1", &[19.0, -28.0, 60.0]), slice("2", &[19.0, -41.0, 60.0])];

    assert_eq!(timestamps(&dedupe(&slices, positive)), vec!["1"]);
}

#[test]
fn dedupe_is_idempotent() {
    let table = table();
    let spec = FrameSpec::new(Window::new(1, 2).expect("window"), VisibilityFilter::All, &table);
    let slices = vec![
        slice("1", &[19.0, 28.0, 41.0]),
        slice("2", &[19.0, 28.0, 41.0]),
        slice("3", &[19.0, -28.0, 41.0]),
        slice("4", &[19.0, 28.0, 41.0]),
    ];

    let once = dedupe(&slices, spec);
    let twice = dedupe(&once, spec);
    assert_eq!(once, twice);
}

#[test]
fn empty_input_yields_empty_output() {
    let table = table();
    let spec = FrameSpec::new(Window::new(0, 2).expect("window"), VisibilityFilter::All, &table);
    assert!(dedupe(&[], spec).is_empty());
}

#[test]
fn consecutive_gaps_collapse_into_one() {
    let table = table();
    let spec = FrameSpec::new(
        Window::new(0, 2).expect("window"),
        VisibilityFilter::PositiveOnly,
        &table,
    );
    let slices = vec![
        slice("1", &[19.0, 28.0]),
        slice("2", &[-19.0, -28.0]),
        slice("3", &[-19.0, -41.0]),
        slice("4", &[19.0, 28.0]),
    ];

    let entries = collapse_frames(&build_frames(&slices, spec));
    assert_eq!(entries.len(), 3);
    assert!(matches!(entries[0], TimelineEntry::Frame(_)));
    assert_eq!(entries[1], TimelineEntry::Gap);
    assert_eq!(
        entries[2].frame().map(|frame| frame.timestamp.as_str()),
        Some("4")
    );
}
