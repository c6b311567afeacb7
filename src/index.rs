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

use fnv::FnvHashMap;

use crate::types::{CoRatedPair, EntityId, Rating, RatingGroup, RatingObservation};

/// Which side of an observation a rating group is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Entity,
    Counterpart,
}

impl Axis {
    pub fn key_of(self, observation: &RatingObservation) -> EntityId {
        match self {
            Axis::Entity => observation.entity,
            Axis::Counterpart => observation.counterpart,
        }
    }

    pub fn opposite(self) -> Axis {
        match self {
            Axis::Entity => Axis::Counterpart,
            Axis::Counterpart => Axis::Entity,
        }
    }
}

/// Collects every rating under its key on the chosen axis, keeping the
/// input order within each key.
pub fn group_ratings(observations: &[RatingObservation], axis: Axis) -> RatingGroup {
    let mut group: RatingGroup =
        FnvHashMap::with_capacity_and_hasher(observations.len(), Default::default());

    for observation in observations {
        group
            .entry(axis.key_of(observation))
            .or_insert_with(Vec::new)
            .push(observation.rating);
    }

    group
}

/// Enumerates the full cross product of rating vectors in a group, in both
/// key orders. A key is never paired with itself, and nothing else is
/// filtered: vectors of different lengths still form a pair.
pub fn co_rated_pairs(group: &RatingGroup) -> FnvHashMap<(EntityId, EntityId), CoRatedPair<'_>> {
    let mut pairs = FnvHashMap::with_capacity_and_hasher(
        group.len() * group.len().saturating_sub(1),
        Default::default(),
    );

    for (&left, left_ratings) in group {
        for (&right, right_ratings) in group {
            // don't compare a key with itself
            if left == right {
                continue;
            }

            pairs.insert(
                (left, right),
                CoRatedPair {
                    left: left_ratings.as_slice(),
                    right: right_ratings.as_slice(),
                },
            );
        }
    }

    pairs
}

/// Joins observations that share the key on the opposite axis, accumulating
/// aligned rating vectors per unordered key pair. Position i of the left
/// vector and position i of the right vector always stem from the same
/// shared counterpart, so both vectors are equally long by construction.
pub fn joint_ratings(
    observations: &[RatingObservation],
    axis: Axis,
) -> FnvHashMap<(EntityId, EntityId), (Vec<Rating>, Vec<Rating>)> {
    let mut aligned: FnvHashMap<(EntityId, EntityId), (Vec<Rating>, Vec<Rating>)> =
        FnvHashMap::default();

    for (position, first) in observations.iter().enumerate() {
        for second in &observations[position + 1..] {
            let (a, b) = (axis.key_of(first), axis.key_of(second));

            if a == b {
                continue;
            }
            if axis.opposite().key_of(first) != axis.opposite().key_of(second) {
                continue;
            }

            // normalize the key, keeping each rating on its own side
            let (key, left_rating, right_rating) = if a < b {
                ((a, b), first.rating, second.rating)
            } else {
                ((b, a), second.rating, first.rating)
            };

            let slot = aligned.entry(key).or_insert_with(|| (Vec::new(), Vec::new()));
            slot.0.push(left_rating);
            slot.1.push(right_rating);
        }
    }

    aligned
}
