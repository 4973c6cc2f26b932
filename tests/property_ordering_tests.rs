use box_timeline::core::{BoxSizeTable, PriceBox, order_boxes};
use proptest::prelude::*;

fn boxes(values: &[f64]) -> Vec<PriceBox> {
    values
        .iter()
        .map(|v| PriceBox::new(10.0, 5.0, *v).expect("valid box"))
        .collect()
}

const SIGNED_SIZES: [f64; 8] = [-60.0, -41.0, -28.0, -19.0, 19.0, 28.0, 41.0, 60.0];

/// Boxes tagged by input position through `high`, so equal values stay
/// distinguishable after ordering.
fn tagged_boxes(values: &[f64]) -> Vec<PriceBox> {
    values
        .iter()
        .enumerate()
        .map(|(index, v)| PriceBox::new(1_000.0 + index as f64, 0.0, *v).expect("valid box"))
        .collect()
}

fn duplicated_values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(prop::sample::select(SIGNED_SIZES.to_vec()), 0..16)
}

proptest! {
    #[test]
    fn ordering_ignores_input_permutation(
        (original, shuffled) in duplicated_values()
            .prop_flat_map(|values| (Just(values.clone()), Just(values).prop_shuffle()))
    ) {
        let table = BoxSizeTable::default();
        let values = |boxes: Vec<PriceBox>| boxes.iter().map(|b| b.value).collect::<Vec<f64>>();
        prop_assert_eq!(
            values(order_boxes(&tagged_boxes(&original), &table)),
            values(order_boxes(&tagged_boxes(&shuffled), &table))
        );
    }

    #[test]
    fn equal_values_keep_their_input_order(values in duplicated_values()) {
        let table = BoxSizeTable::default();
        let ordered = order_boxes(&tagged_boxes(&values), &table);

        for (position, earlier) in ordered.iter().enumerate() {
            for later in &ordered[position + 1..] {
                if earlier.value == later.value {
                    prop_assert!(earlier.high < later.high);
                }
            }
        }
    }

    #[test]
    fn negatives_precede_positives_and_every_value_is_snapped(
        values in prop::collection::vec(-3_000.0f64..3_000.0, 0..16)
    ) {
        let table = BoxSizeTable::default();
        let ordered = order_boxes(&boxes(&values), &table);

        prop_assert_eq!(ordered.len(), values.len());
        let first_positive = ordered
            .iter()
            .position(|b| b.is_positive())
            .unwrap_or(ordered.len());
        prop_assert!(ordered[first_positive..].iter().all(|b| b.is_positive()));
        prop_assert!(ordered[..first_positive].iter().all(|b| !b.is_positive()));
        for b in &ordered {
            prop_assert!(table.sizes().contains(&b.magnitude()));
        }
    }
}
