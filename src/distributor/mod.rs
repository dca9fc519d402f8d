//! Weighted adaptive tile generator.
//!
//! New queue tiles are drawn so that, over a game, low values turn up more
//! often than high ones: the target frequency of value `v` is proportional
//! to `1/v`. Each draw compares that target with what is actually on the
//! board and in the queue, and weights value `v` by
//!
//! ```text
//! base ^ (target(v) / actual(v))
//! ```
//!
//! so a value that is behind its target is strongly favoured and one that
//! is ahead decays towards weight 1. The largest value on offer grows with
//! the number of placed tiles.
//!
//! ## Saturation
//!
//! A value that does not appear at all has an actual frequency of 0 and an
//! infinite weight. When any weight saturates the lowest saturated value is
//! drawn, so a newly unlocked maximum or a missing low value is filled
//! first. With no tiles anywhere there is nothing to correct for and all
//! of `1..=max` are equally likely.

use rustc_hash::FxHashMap;

use crate::board::Board;
use crate::core::{RandomSource, Tile};
use crate::queue::Queue;

/// Actual frequency reported when there are no tiles to count.
pub const FREQUENCY_EPSILON: f64 = f64::MIN_POSITIVE;

/// Largest value that may be generated for a board holding `board_tile_count` tiles.
///
/// `ceil(1/2 + 5/6 * n^(2/3))`, never below 1.
#[must_use]
pub fn max_value(board_tile_count: usize) -> u32 {
    let n = board_tile_count as f64;
    let raw = (0.5 + (5.0 / 6.0) * n.powf(2.0 / 3.0)).ceil();
    (raw as u32).max(1)
}

/// Desired share of value `v` among `1..=max_value`.
#[must_use]
pub fn target_frequency(value: u32, max_value: u32) -> f64 {
    let harmonic: f64 = (1..=max_value).map(|k| 1.0 / f64::from(k)).sum();
    (1.0 / f64::from(value)) / harmonic
}

/// Draw an index with probability proportional to its weight.
///
/// Walks the weights with a running threshold drawn from
/// `[0, sum)`, returning the first index whose weight covers what is
/// left. Zero weights are never returned, so a `0.0` placeholder at index
/// 0 is never picked. The first infinite weight, if any, always wins and
/// consumes no draw.
///
/// Returns `None` if no weight is positive.
pub fn weighted_index<R: RandomSource + ?Sized>(weights: &[f64], rng: &mut R) -> Option<usize> {
    if let Some(i) = weights.iter().position(|&w| w == f64::INFINITY) {
        return Some(i);
    }

    let total: f64 = weights.iter().filter(|&&w| w > 0.0).sum();
    if total <= 0.0 {
        return None;
    }

    let mut threshold = rng.next_unit() * total;
    if threshold <= 0.0 {
        return weights.iter().position(|&w| w > 0.0);
    }

    for (i, &weight) in weights.iter().enumerate() {
        if threshold > 0.0 && threshold <= weight {
            return Some(i);
        }
        threshold -= weight.max(0.0);
    }

    // Floating point overrun - return last non-zero weight
    weights.iter().rposition(|&w| w > 0.0)
}

/// Counts of tile values across board and queue.
#[derive(Clone, Debug, Default)]
pub struct ValueHistogram {
    counts: FxHashMap<u32, usize>,
    total: usize,
}

impl ValueHistogram {
    /// Create an empty histogram.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Histogram of the given values.
    pub fn from_values(values: impl IntoIterator<Item = u32>) -> Self {
        let mut histogram = Self::new();
        for value in values {
            histogram.record(value);
        }
        histogram
    }

    /// Histogram of every tile on the board and in the queue.
    #[must_use]
    pub fn from_tiles<'a>(tiles: impl IntoIterator<Item = &'a Tile>) -> Self {
        Self::from_values(tiles.into_iter().map(|t| t.value))
    }

    /// Count one more tile of `value`.
    pub fn record(&mut self, value: u32) {
        *self.counts.entry(value).or_insert(0) += 1;
        self.total += 1;
    }

    /// Number of tiles with `value`.
    #[must_use]
    pub fn count(&self, value: u32) -> usize {
        self.counts.get(&value).copied().unwrap_or(0)
    }

    /// Number of tiles counted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Share of tiles with `value`, or [`FREQUENCY_EPSILON`] if empty.
    #[must_use]
    pub fn actual_frequency(&self, value: u32) -> f64 {
        if self.total == 0 {
            return FREQUENCY_EPSILON;
        }
        self.count(value) as f64 / self.total as f64
    }
}

/// Picks the value of each new queue tile.
#[derive(Clone, Debug)]
pub struct TileValueDistributor {
    weight_base: f64,
}

impl TileValueDistributor {
    /// Create a distributor with the given correction base.
    #[must_use]
    pub fn new(weight_base: f64) -> Self {
        debug_assert!(weight_base > 1.0, "weight base must exceed 1");
        Self { weight_base }
    }

    /// Correction base.
    #[must_use]
    pub fn weight_base(&self) -> f64 {
        self.weight_base
    }

    /// Weight of a single value.
    #[must_use]
    pub fn weight(&self, value: u32, max_value: u32, histogram: &ValueHistogram) -> f64 {
        let ratio = target_frequency(value, max_value) / histogram.actual_frequency(value);
        self.weight_base.powf(ratio)
    }

    /// Weights indexed by value. Index 0 is an unused `0.0`.
    #[must_use]
    pub fn weights(&self, histogram: &ValueHistogram, max_value: u32) -> Vec<f64> {
        std::iter::once(0.0)
            .chain((1..=max_value).map(|v| self.weight(v, max_value, histogram)))
            .collect()
    }

    /// Draw a value in `1..=max_value` for the given histogram.
    pub fn sample<R: RandomSource + ?Sized>(
        &self,
        histogram: &ValueHistogram,
        max_value: u32,
        rng: &mut R,
    ) -> u32 {
        let max_value = max_value.max(1);
        if histogram.total() == 0 {
            return rng.next_index(max_value as usize) as u32 + 1;
        }
        let weights = self.weights(histogram, max_value);
        // weights are all >= 1 past the placeholder, so a draw always lands
        weighted_index(&weights, rng).map_or(1, |i| i as u32)
    }

    /// Draw the next queue tile's value.
    pub fn next_value<R: RandomSource + ?Sized>(&self, board: &Board, queue: &Queue, rng: &mut R) -> u32 {
        let histogram = ValueHistogram::from_tiles(board.tiles().chain(queue.tiles()));
        self.sample(&histogram, max_value(board.tile_count()), rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of unit draws.
    struct Scripted(Vec<f64>);

    impl RandomSource for Scripted {
        fn next_unit(&mut self) -> f64 {
            self.0.remove(0)
        }
    }

    #[test]
    fn test_max_value() {
        assert_eq!(max_value(0), 1);
        assert_eq!(max_value(1), 2);
        assert_eq!(max_value(2), 2);
        assert_eq!(max_value(3), 3);
        assert_eq!(max_value(8), 4);
        assert_eq!(max_value(20), 7);
    }

    #[test]
    fn test_target_frequencies_sum_to_one() {
        for max in 1..10 {
            let sum: f64 = (1..=max).map(|v| target_frequency(v, max)).sum();
            assert!((sum - 1.0).abs() < 1e-12);
        }
        assert!((target_frequency(1, 2) - 2.0 / 3.0).abs() < 1e-12);
        assert!((target_frequency(2, 2) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_histogram() {
        let h = ValueHistogram::from_values([1, 1, 2, 3]);
        assert_eq!(h.total(), 4);
        assert_eq!(h.count(1), 2);
        assert_eq!(h.count(4), 0);
        assert_eq!(h.actual_frequency(1), 0.5);
        assert_eq!(h.actual_frequency(4), 0.0);
        assert_eq!(ValueHistogram::new().actual_frequency(1), FREQUENCY_EPSILON);
    }

    #[test]
    fn test_weights() {
        let distributor = TileValueDistributor::new(8.0);
        // 2 ones, 1 two: actual (2/3, 1/3) equals target for max 2
        let h = ValueHistogram::from_values([1, 1, 2]);
        let w = distributor.weights(&h, 2);
        assert_eq!(w.len(), 3);
        assert_eq!(w[0], 0.0);
        assert!((w[1] - 8.0).abs() < 1e-9);
        assert!((w[2] - 8.0).abs() < 1e-9);

        // over-represented value decays towards 1, under-represented grows
        let h = ValueHistogram::from_values([1, 1, 1, 1, 1, 2]);
        let w = distributor.weights(&h, 2);
        assert!(w[1] < 8.0 && w[1] > 1.0);
        assert!(w[2] > 8.0);
    }

    #[test]
    fn test_weighted_index_thresholds() {
        let weights = [0.0, 4.0, 2.0];
        // total 6: (0, 4] -> 1, (4, 6) -> 2
        assert_eq!(weighted_index(&weights, &mut Scripted(vec![0.5])), Some(1));
        assert_eq!(weighted_index(&weights, &mut Scripted(vec![0.66])), Some(1));
        assert_eq!(weighted_index(&weights, &mut Scripted(vec![0.7])), Some(2));
        assert_eq!(weighted_index(&weights, &mut Scripted(vec![0.999])), Some(2));
    }

    #[test]
    fn test_weighted_index_never_picks_placeholder() {
        let weights = [0.0, 1.0];
        assert_eq!(weighted_index(&weights, &mut Scripted(vec![0.0])), Some(1));
        assert_eq!(weighted_index(&weights, &mut Scripted(vec![1e-300])), Some(1));
    }

    #[test]
    fn test_weighted_index_empty() {
        assert_eq!(weighted_index(&[], &mut Scripted(vec![0.5])), None);
        assert_eq!(weighted_index(&[0.0, 0.0], &mut Scripted(vec![0.5])), None);
    }

    #[test]
    fn test_lowest_saturated_weight_wins() {
        let weights = [0.0, 3.0, f64::INFINITY, 5.0, f64::INFINITY];
        assert_eq!(weighted_index(&weights, &mut Scripted(vec![])), Some(2));
    }

    #[test]
    fn test_several_unseen_values_fill_lowest_first() {
        let distributor = TileValueDistributor::new(8.0);
        // max 4 with neither 2 nor 4 present
        let h = ValueHistogram::from_values([1, 1, 3]);
        for u in [0.0, 0.5, 0.99] {
            assert_eq!(distributor.sample(&h, 4, &mut Scripted(vec![u])), 2);
        }
    }

    #[test]
    fn test_unseen_value_is_forced() {
        let distributor = TileValueDistributor::new(8.0);
        // max 3 but no 3 anywhere
        let h = ValueHistogram::from_values([1, 1, 2]);
        for u in [0.0, 0.3, 0.99] {
            assert_eq!(distributor.sample(&h, 3, &mut Scripted(vec![u])), 3);
        }
    }

    #[test]
    fn test_empty_histogram_is_uniform() {
        let distributor = TileValueDistributor::new(8.0);
        let h = ValueHistogram::new();
        assert_eq!(distributor.sample(&h, 4, &mut Scripted(vec![0.0])), 1);
        assert_eq!(distributor.sample(&h, 4, &mut Scripted(vec![0.3])), 2);
        assert_eq!(distributor.sample(&h, 4, &mut Scripted(vec![0.99])), 4);
    }

    #[test]
    fn test_sample_stays_in_range() {
        let distributor = TileValueDistributor::new(8.0);
        let h = ValueHistogram::from_values([1, 2, 3, 4, 1, 1]);
        let mut rng = crate::core::GameRng::new(3);
        for _ in 0..500 {
            let v = distributor.sample(&h, 4, &mut rng);
            assert!((1..=4).contains(&v));
        }
    }
}
