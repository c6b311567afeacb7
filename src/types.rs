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

use std::str::FromStr;

use fnv::FnvHashMap;
use serde_derive::{Deserialize, Serialize};

use crate::error::MalformedRecord;

pub type EntityId = u32;
pub type Rating = i64;
pub type Timestamp = i64;

/// All ratings seen per index key, in observation order.
pub type RatingGroup = FnvHashMap<EntityId, Vec<Rating>>;

/// A single line of input: who rated what, how, and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingObservation {
    pub entity: EntityId,
    pub counterpart: EntityId,
    pub rating: Rating,
    pub timestamp: Timestamp,
}

/// The rating vectors of two distinct index keys, borrowed from the group
/// they came from. The vectors may have different lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoRatedPair<'a> {
    pub left: &'a [Rating],
    pub right: &'a [Rating],
}

/// Scores for unordered key pairs. A pair that was never scored is simply
/// absent, lookups in either direction hit the same slot.
#[derive(Debug, Clone, Default)]
pub struct SimilarityTable {
    scores: FnvHashMap<(EntityId, EntityId), f64>,
}

impl SimilarityTable {
    pub fn new() -> Self {
        SimilarityTable::default()
    }

    pub fn insert(&mut self, left: EntityId, right: EntityId, score: f64) {
        debug_assert_ne!(left, right, "a key is never scored against itself");
        self.scores.insert(pair_key(left, right), score);
    }

    pub fn get(&self, left: EntityId, right: EntityId) -> Option<f64> {
        self.scores.get(&pair_key(left, right)).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ((EntityId, EntityId), f64)> + '_ {
        self.scores.iter().map(|(&pair, &score)| (pair, score))
    }
}

fn pair_key(left: EntityId, right: EntityId) -> (EntityId, EntityId) {
    if left <= right {
        (left, right)
    } else {
        (right, left)
    }
}

/// Parses raw input lines into observations. We expect four tab separated
/// fields per line: entity, counterpart, rating, timestamp. The first
/// malformed line aborts the whole parse.
pub fn parse_observations<I, S>(lines: I) -> Result<Vec<RatingObservation>, MalformedRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut observations = Vec::new();

    for (index, line) in lines.into_iter().enumerate() {
        let line_number = index + 1;
        let fields: Vec<&str> = line.as_ref().trim().split('\t').collect();

        if fields.len() != 4 {
            return Err(MalformedRecord::FieldCount {
                line: line_number,
                fields: fields.len(),
            });
        }

        observations.push(RatingObservation {
            entity: parse_field(fields[0], "entity", line_number)?,
            counterpart: parse_field(fields[1], "counterpart", line_number)?,
            rating: parse_field(fields[2], "rating", line_number)?,
            timestamp: parse_field(fields[3], "timestamp", line_number)?,
        });
    }

    Ok(observations)
}

fn parse_field<T: FromStr>(
    value: &str,
    field: &'static str,
    line: usize,
) -> Result<T, MalformedRecord> {
    value.trim().parse().map_err(|_| MalformedRecord::IntField {
        line,
        field,
        value: value.to_string(),
    })
}
