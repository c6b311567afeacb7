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

use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::io::{stdout, BufReader};
use std::path::Path;

use serde_derive::Serialize;
use serde_json::json;

use crate::types::{EntityId, RatingObservation, SimilarityTable};

/// Creates a CSV reader for an input file. We expect NO headers, and four
/// tab separated fields per line: entity, counterpart, rating, timestamp.
pub fn csv_reader(file: &str) -> Result<csv::Reader<File>, csv::Error> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .from_path(file)
}

/// Deserializes every record of the reader. The first malformed record
/// fails the whole read, partial input is never silently dropped.
pub fn observations_from_csv<R>(
    reader: &mut csv::Reader<R>,
) -> Result<Vec<RatingObservation>, csv::Error>
where
    R: io::Read,
{
    reader.deserialize().collect()
}

/// Reads a file into memory as raw lines, for the filters that do their
/// own record parsing.
pub fn read_lines(file: &str) -> io::Result<Vec<String>> {
    let reader = BufReader::new(File::open(file)?);

    reader.lines().collect()
}

/// Struct used for JSON serialization of computed scores. Field names will be used in JSON.
#[derive(Serialize)]
struct SimilarityEntry {
    entity_a: EntityId,
    entity_b: EntityId,
    score: f64,
}

/// Output the computed similarity scores in JSON format, one pair per line,
/// ordered by key pair. If an `output_path` is supplied, we write to a file
/// at the specified path, otherwise, we output to stdout.
pub fn write_similarities(
    similarities: &SimilarityTable,
    output_path: Option<String>,
) -> io::Result<()> {

    let mut out: Box<dyn Write> = match output_path {
        Some(path) => Box::new(File::create(Path::new(&path))?),
        _ => Box::new(stdout()),
    };

    let mut entries: Vec<((EntityId, EntityId), f64)> = similarities.iter().collect();
    entries.sort_by_key(|&(pair, _)| pair);

    for ((entity_a, entity_b), score) in entries {

        let entry_as_json = json!(
            SimilarityEntry {
                entity_a,
                entity_b,
                score
            });

        write!(out, "{}\n", entry_as_json)?;
    }

    Ok(())
}
