use crate::analyzers::types::Tiers;

/// Boundaries `(chunk, 2 * chunk)` for a ranking of length `n`.
///
/// | n | top | middle | bottom |
/// |---|-----|--------|--------|
/// | 0 | 0   | 0      | 0      |
/// | 2 | 0   | 0      | 2      |
/// | 3 | 1   | 1      | 1      |
/// | 5 | 1   | 1      | 3      |
/// | 9 | 3   | 3      | 3      |
pub fn tier_bounds(n: usize) -> (usize, usize) {
    let chunk = n / 3;
    (chunk, chunk * 2)
}

/// Splits a ranked sequence into top, middle, and bottom tiers.
///
/// Top and middle each get `n / 3` entries; bottom takes the rest, so the
/// remainder of an uneven split always lands in the bottom tier.
pub fn tier<T: Clone>(ranked: &[T]) -> Tiers<T> {
    let (first, second) = tier_bounds(ranked.len());
    Tiers {
        top: ranked[..first].to_vec(),
        middle: ranked[first..second].to_vec(),
        bottom: ranked[second..].to_vec(),
    }
}
