use box_timeline::core::{
    BoxSizeTable, BoxSlice, FrameSignature, FrameSpec, PriceBox, VisibilityFilter, Window, dedupe,
};
use proptest::prelude::*;

const SIZES: [f64; 4] = [19.0, -28.0, 41.0, -60.0];

fn history_strategy() -> impl Strategy<Value = Vec<BoxSlice>> {
    prop::collection::vec(prop::collection::vec(0usize..SIZES.len(), 0..5), 0..40).prop_map(
        |rows| {
            rows.into_iter()
                .enumerate()
                .map(|(index, picks)| {
                    BoxSlice::new(
                        index.to_string(),
                        picks
                            .into_iter()
                            .map(|pick| PriceBox::new(2.0, 1.0, SIZES[pick]).expect("valid box"))
                            .collect(),
                    )
                })
                .collect()
        },
    )
}

fn filter_strategy() -> impl Strategy<Value = VisibilityFilter> {
    prop_oneof![
        Just(VisibilityFilter::All),
        Just(VisibilityFilter::PositiveOnly),
        Just(VisibilityFilter::NegativeOnly),
    ]
}

proptest! {
    #[test]
    fn dedupe_is_idempotent(
        slices in history_strategy(),
        count in 1usize..4,
        filter in filter_strategy()
    ) {
        let table = BoxSizeTable::default();
        let spec = FrameSpec::new(Window::new(0, count).expect("window"), filter, &table);

        let once = dedupe(&slices, spec);
        let twice = dedupe(&once, spec);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn kept_neighbours_never_share_a_signature(
        slices in history_strategy(),
        count in 1usize..4
    ) {
        let table = BoxSizeTable::default();
        let spec = FrameSpec::new(
            Window::new(0, count).expect("window"),
            VisibilityFilter::All,
            &table,
        );

        let kept = dedupe(&slices, spec);
        prop_assert_eq!(kept.is_empty(), slices.is_empty());
        let signatures: Vec<FrameSignature> = kept
            .iter()
            .map(|slice| FrameSignature::from_boxes(&spec.visible_boxes(&slice.boxes)))
            .collect();
        prop_assert!(signatures.windows(2).all(|pair| pair[0] != pair[1]));
    }
}
