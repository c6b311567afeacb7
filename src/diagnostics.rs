use tracing::{debug, trace};

use crate::error::SimilarityError;
use crate::types::EntityId;

/// Observer for the batch scoring loop. Every hook defaults to a no-op, so
/// implementations only pick up the events they care about.
pub trait Diagnostics {
    fn pair_compared(&self, _left: EntityId, _right: EntityId) {}

    fn score_computed(&self, _left: EntityId, _right: EntityId, _score: f64) {}

    fn pair_skipped(&self, _left: EntityId, _right: EntityId, _reason: &SimilarityError) {}
}

/// Ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {}

/// Forwards scoring events to the `tracing` subscriber, pair comparisons
/// at trace level and outcomes at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn pair_compared(&self, left: EntityId, right: EntityId) {
        trace!(left, right, "similarity.pair_compared");
    }

    fn score_computed(&self, left: EntityId, right: EntityId, score: f64) {
        debug!(left, right, score, "similarity.score_computed");
    }

    fn pair_skipped(&self, left: EntityId, right: EntityId, reason: &SimilarityError) {
        debug!(left, right, reason = %reason, "similarity.pair_skipped");
    }
}
