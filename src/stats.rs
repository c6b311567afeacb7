use fnv::FnvHashSet;

use crate::types::RatingObservation;

pub struct ObservationStats {
    num_observations: u64,
    num_entities: usize,
    num_counterparts: usize,
}

impl ObservationStats {

    pub fn num_observations(&self) -> u64 {
        self.num_observations
    }

    pub fn num_entities(&self) -> usize {
        self.num_entities
    }

    pub fn num_counterparts(&self) -> usize {
        self.num_counterparts
    }
}

impl ObservationStats {

    pub fn from(observations: &[RatingObservation]) -> Self {

        let mut entities: FnvHashSet<u32> =
            FnvHashSet::with_capacity_and_hasher(100, Default::default());
        let mut counterparts: FnvHashSet<u32> =
            FnvHashSet::with_capacity_and_hasher(100, Default::default());

        for observation in observations {
            entities.insert(observation.entity);
            counterparts.insert(observation.counterpart);
        }

        ObservationStats {
            num_observations: observations.len() as u64,
            num_entities: entities.len(),
            num_counterparts: counterparts.len(),
        }
    }
}
