/**
 * RateSim
 * Copyright (C) 2026 RateSim developers
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <http://www.gnu.org/licenses/>.
 */

use crate::error::SimilarityError;
use crate::types::{CoRatedPair, Rating};

/// How a pair of rating vectors is turned into a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Angular similarity in [-1, 1], undefined for zero magnitude vectors.
    Cosine,
    /// Raw sum of squared elementwise differences, unbounded and not
    /// normalized. Callers decide how to map it into a similarity.
    SquaredDifference,
}

/// Sums the elementwise products of two equally long rating vectors.
pub fn dot_product(a: &[Rating], b: &[Rating]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "dot product needs equal dimensions");

    a.iter().zip(b).map(|(&x, &y)| x as f64 * y as f64).sum()
}

/// Euclidean length of a rating vector.
pub fn magnitude(v: &[Rating]) -> f64 {
    v.iter().map(|&x| x as f64 * x as f64).sum::<f64>().sqrt()
}

/// Scores one pair of rating vectors. The dimension check happens first
/// and applies to every strategy.
pub fn compute_similarity(
    pair: &CoRatedPair<'_>,
    strategy: Strategy,
) -> Result<f64, SimilarityError> {
    if pair.left.len() != pair.right.len() {
        return Err(SimilarityError::DimensionMismatch {
            left: pair.left.len(),
            right: pair.right.len(),
        });
    }

    match strategy {
        Strategy::Cosine => {
            let magnitude_left = magnitude(pair.left);
            let magnitude_right = magnitude(pair.right);

            if magnitude_left == 0.0 || magnitude_right == 0.0 {
                return Err(SimilarityError::Undefined);
            }

            Ok(dot_product(pair.left, pair.right) / (magnitude_left * magnitude_right))
        }

        Strategy::SquaredDifference => {
            let sum = pair
                .left
                .iter()
                .zip(pair.right)
                .map(|(&l, &r)| {
                    let difference = l as f64 - r as f64;
                    difference * difference
                })
                .sum();

            Ok(sum)
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn cosine_example() {
        let pair = CoRatedPair { left: &[5, 4], right: &[3, 3] };

        let score = compute_similarity(&pair, Strategy::Cosine).unwrap();

        // 27 / (sqrt(41) * sqrt(18))
        assert!(within_epsilon(score, 0.9938837346736189));
    }

    #[test]
    fn identical_vectors_have_cosine_one() {
        let pair = CoRatedPair { left: &[2, 7, 1], right: &[2, 7, 1] };

        let score = compute_similarity(&pair, Strategy::Cosine).unwrap();

        assert!(within_epsilon(score, 1.0));
    }

    #[test]
    fn opposed_vectors_have_cosine_minus_one() {
        let pair = CoRatedPair { left: &[1, 2], right: &[-1, -2] };

        let score = compute_similarity(&pair, Strategy::Cosine).unwrap();

        assert!(within_epsilon(score, -1.0));
    }

    #[test]
    fn zero_magnitude_cosine_is_undefined() {
        let pair = CoRatedPair { left: &[0, 0], right: &[1, 2] };

        let failure = compute_similarity(&pair, Strategy::Cosine).unwrap_err();

        assert_eq!(failure, SimilarityError::Undefined);
    }

    #[test]
    fn empty_vectors_have_no_cosine() {
        let pair = CoRatedPair { left: &[], right: &[] };

        let failure = compute_similarity(&pair, Strategy::Cosine).unwrap_err();

        assert_eq!(failure, SimilarityError::Undefined);
    }

    #[test]
    fn mismatched_dimensions_are_rejected_before_scoring() {
        let pair = CoRatedPair { left: &[0, 0], right: &[1] };

        for strategy in [Strategy::Cosine, Strategy::SquaredDifference] {
            let failure = compute_similarity(&pair, strategy).unwrap_err();

            assert_eq!(failure, SimilarityError::DimensionMismatch { left: 2, right: 1 });
        }
    }

    #[test]
    fn squared_difference_example() {
        let pair = CoRatedPair { left: &[5, 3], right: &[4, 3] };

        let score = compute_similarity(&pair, Strategy::SquaredDifference).unwrap();

        assert!(within_epsilon(score, 1.0));
    }

    #[test]
    fn squared_difference_handles_negative_ratings() {
        let pair = CoRatedPair { left: &[2, -2], right: &[-1, 3] };

        let score = compute_similarity(&pair, Strategy::SquaredDifference).unwrap();

        assert!(within_epsilon(score, 34.0));
    }

    #[test]
    fn cosine_ignores_vector_scale() {
        let mut rng = StdRng::seed_from_u64(42);

        let left: Vec<Rating> = (0..32).map(|_| rng.gen_range(1..=10)).collect();
        let right: Vec<Rating> = (0..32).map(|_| rng.gen_range(1..=10)).collect();
        let scaled: Vec<Rating> = left.iter().map(|&x| x * 3).collect();

        let original = compute_similarity(
            &CoRatedPair { left: &left, right: &right },
            Strategy::Cosine,
        )
        .unwrap();
        let rescaled = compute_similarity(
            &CoRatedPair { left: &scaled, right: &right },
            Strategy::Cosine,
        )
        .unwrap();

        assert!(within_epsilon(original, rescaled));
    }

    #[test]
    fn both_strategies_are_symmetric() {
        let mut rng = StdRng::seed_from_u64(7);

        let left: Vec<Rating> = (0..16).map(|_| rng.gen_range(-5..=5)).collect();
        let right: Vec<Rating> = (0..16).map(|_| rng.gen_range(1..=10)).collect();

        let pair = CoRatedPair { left: &left, right: &right };
        let swapped = CoRatedPair { left: &right, right: &left };

        for strategy in [Strategy::Cosine, Strategy::SquaredDifference] {
            let forward = compute_similarity(&pair, strategy);
            let backward = compute_similarity(&swapped, strategy);

            match (forward, backward) {
                (Ok(a), Ok(b)) => assert!(within_epsilon(a, b)),
                (failed_forward, failed_backward) => {
                    assert_eq!(failed_forward, failed_backward)
                }
            }
        }
    }

    fn within_epsilon(value: f64, expected: f64) -> bool {
        const EPSILON: f64 = 0.000001;
        (value - expected).abs() < EPSILON
    }
}
