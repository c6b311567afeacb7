pub mod diagnostics;
pub mod error;
pub mod eval;
pub mod filters;
pub mod index;
pub mod io;
pub mod similarity;
pub mod stats;
pub mod types;

#[cfg(test)]
mod usage_tests;

use crate::diagnostics::Diagnostics;
use crate::index::{co_rated_pairs, group_ratings, joint_ratings, Axis};
use crate::similarity::{compute_similarity, Strategy};
use crate::types::{CoRatedPair, EntityId, RatingObservation, SimilarityTable};

pub fn similarities(
    observations: &[RatingObservation],
    axis: Axis,
    strategy: Strategy,
    diagnostics: &dyn Diagnostics,
) -> SimilarityTable {

    let mut table = SimilarityTable::new();

    match strategy {
        Strategy::Cosine => {
            // full cross product over the grouped rating vectors
            let group = group_ratings(observations, axis);
            let pairs = co_rated_pairs(&group);

            for (&(left, right), pair) in &pairs {
                score_pair(&mut table, left, right, pair, strategy, diagnostics);
            }
        }

        Strategy::SquaredDifference => {
            // observation join, vectors are aligned and equally long
            let joint = joint_ratings(observations, axis);

            for (&(left, right), (left_ratings, right_ratings)) in &joint {
                let pair = CoRatedPair {
                    left: left_ratings.as_slice(),
                    right: right_ratings.as_slice(),
                };

                score_pair(&mut table, left, right, &pair, strategy, diagnostics);
            }
        }
    }

    table
}

fn score_pair(
    table: &mut SimilarityTable,
    left: EntityId,
    right: EntityId,
    pair: &CoRatedPair<'_>,
    strategy: Strategy,
    diagnostics: &dyn Diagnostics,
) {
    diagnostics.pair_compared(left, right);

    match compute_similarity(pair, strategy) {
        Ok(score) => {
            diagnostics.score_computed(left, right, score);
            table.insert(left, right, score);
        }
        Err(reason) => diagnostics.pair_skipped(left, right, &reason),
    }
}
