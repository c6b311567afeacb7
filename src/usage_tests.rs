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

#[cfg(test)]
mod tests {

    use std::cell::RefCell;

    use crate::diagnostics::Diagnostics;
    use crate::error::SimilarityError;
    use crate::filters::{AverageBaseline, CollaborativeFilter, ItemCosineSimilarity};
    use crate::index::Axis;
    use crate::similarity::Strategy;
    use crate::stats::ObservationStats;
    use crate::types::{parse_observations, EntityId};

    #[test]
    fn programmatic_usage() {

        /* Our input data comprises of observed ratings. Every line carries four tab
           separated integer fields: the rating entity, the rated counterpart, the
           rating itself and a timestamp. */
        let lines: Vec<String> = vec![
            "1\t10\t5\t100",
            "1\t11\t3\t101",
            "2\t10\t4\t102",
            "2\t11\t3\t103",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        /* A first pass over the parsed observations gives us basic statistics of
           the data. */
        let observations = parse_observations(&lines).unwrap();
        let stats = ObservationStats::from(&observations);

        println!(
            "Found {} observations from {} entities over {} counterparts.",
            stats.num_observations(),
            stats.num_entities(),
            stats.num_counterparts(),
        );

        /* The item cosine filter groups the ratings by counterpart and scores every
           pair of counterparts by the angle between their rating vectors. */
        let mut filter = ItemCosineSimilarity::new();
        filter.load_training(&lines).unwrap();

        let table = filter.score_similarities().unwrap().unwrap();

        /* Counterparts 10 and 11 were each rated by the same two entities, so they
           form the only scored pair. Lookups work in both key orders. */
        assert_eq!(table.len(), 1);

        let score = table.get(10, 11).unwrap();
        println!("Similarity of counterparts 10 and 11: {:.3}", score);

        assert!(close_enough_to(score, 0.993));
        assert_eq!(table.get(11, 10), Some(score));

        /* The average baseline predicts every rating as the historical average,
           whoever asks, and reports its own error over a held out split. */
        let mut baseline = AverageBaseline::new();
        baseline.load_training(&lines).unwrap();
        baseline
            .load_test(&["1\t20\t4\t200".to_string(), "2\t21\t3\t201".to_string()])
            .unwrap();

        assert!(close_enough_to(baseline.predict(1, 20).unwrap(), 3.75));
        assert!(close_enough_to(baseline.evaluate().unwrap(), 1.0));
    }

    #[derive(Default)]
    struct RecordingDiagnostics {
        compared: RefCell<Vec<(EntityId, EntityId)>>,
        scored: RefCell<Vec<(EntityId, EntityId)>>,
        skipped: RefCell<Vec<(EntityId, EntityId, SimilarityError)>>,
    }

    impl Diagnostics for RecordingDiagnostics {
        fn pair_compared(&self, left: EntityId, right: EntityId) {
            self.compared.borrow_mut().push((left, right));
        }

        fn score_computed(&self, left: EntityId, right: EntityId, _score: f64) {
            self.scored.borrow_mut().push((left, right));
        }

        fn pair_skipped(&self, left: EntityId, right: EntityId, reason: &SimilarityError) {
            self.skipped.borrow_mut().push((left, right, reason.clone()));
        }
    }

    #[test]
    fn scoring_reports_to_the_diagnostics() {

        /* Counterpart 10 has two ratings and counterpart 11 has three, so the only
           candidate pair is compared in both orders and skipped both times. */
        let lines = [
            "1\t10\t5\t1",
            "2\t10\t4\t2",
            "1\t11\t3\t3",
            "2\t11\t3\t4",
            "3\t11\t2\t5",
        ];
        let observations = parse_observations(lines).unwrap();

        let recording = RecordingDiagnostics::default();
        let table =
            crate::similarities(&observations, Axis::Counterpart, Strategy::Cosine, &recording);

        assert!(table.is_empty());
        assert_eq!(recording.compared.borrow().len(), 2);
        assert!(recording.scored.borrow().is_empty());

        let skipped = recording.skipped.borrow();
        assert_eq!(skipped.len(), 2);
        for (_, _, reason) in skipped.iter() {
            assert!(matches!(reason, SimilarityError::DimensionMismatch { .. }));
        }
    }

    fn close_enough_to(value: f64, expected: f64) -> bool {
        const EPSILON: f64 = 0.001;
        (value - expected).abs() < EPSILON
    }
}
