use crate::core::PriceBox;

/// Index and box with the largest magnitude; the first occurrence wins ties.
#[must_use]
pub fn largest(boxes: &[PriceBox]) -> Option<(usize, PriceBox)> {
    let mut best: Option<(usize, PriceBox)> = None;
    for (index, candidate) in boxes.iter().copied().enumerate() {
        match best {
            Some((_, current)) if current.magnitude() >= candidate.magnitude() => {}
            _ => best = Some((index, candidate)),
        }
    }
    best
}

/// Index and box with the smallest magnitude; the first occurrence wins ties.
#[must_use]
pub fn smallest(boxes: &[PriceBox]) -> Option<(usize, PriceBox)> {
    let mut best: Option<(usize, PriceBox)> = None;
    for (index, candidate) in boxes.iter().copied().enumerate() {
        match best {
            Some((_, current)) if current.magnitude() <= candidate.magnitude() => {}
            _ => best = Some((index, candidate)),
        }
    }
    best
}

/// Bullish when the largest-magnitude box is non-negative.
#[must_use]
pub fn regime_is_positive(boxes: &[PriceBox]) -> Option<bool> {
    largest(boxes).map(|(_, b)| b.is_positive())
}
