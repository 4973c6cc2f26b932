use crate::core::{BoxSizeTable, PriceBox};

/// Derives the draw order for visible boxes and snaps their values.
///
/// Negative boxes come first (most negative first), followed by
/// non-negative boxes in ascending order, giving the "valley" layout used by
/// stacked box views. Sorting runs on raw values and snapping happens last,
/// so ties introduced by quantization never reorder boxes.
#[must_use]
pub fn order_boxes(visible: &[PriceBox], table: &BoxSizeTable) -> Vec<PriceBox> {
    let (mut negatives, mut positives): (Vec<PriceBox>, Vec<PriceBox>) =
        visible.iter().copied().partition(|b| !b.is_positive());

    negatives.sort_by(|left, right| left.value.total_cmp(&right.value));
    positives.sort_by(|left, right| left.value.total_cmp(&right.value));

    negatives
        .into_iter()
        .chain(positives)
        .map(|b| b.with_value(table.snap(b.value)))
        .collect()
}
