use std::fmt;
use std::str::FromStr;

use crate::diagnostics::{Diagnostics, NoopDiagnostics};
use crate::error::{FilterError, NoOverlap};
use crate::eval;
use crate::index::{group_ratings, Axis};
use crate::similarities;
use crate::similarity::Strategy;
use crate::types::{parse_observations, EntityId, RatingGroup, RatingObservation, SimilarityTable};

/// The shared interface of every collaborative filter variant. Filters take
/// raw input lines and parse them themselves, so a half loaded filter can
/// never exist: loading either succeeds completely or leaves an error.
pub trait CollaborativeFilter {
    fn load_training(&mut self, lines: &[String]) -> Result<(), FilterError>;

    fn load_test(&mut self, lines: &[String]) -> Result<(), FilterError>;

    /// Computes (or returns the cached) similarity table over the training
    /// data. Filters without a pairwise notion of similarity return `None`.
    fn score_similarities(&mut self) -> Result<Option<&SimilarityTable>, FilterError>;

    /// Predicted rating of `entity` for `counterpart`.
    fn predict(&self, entity: EntityId, counterpart: EntityId) -> Result<f64, FilterError>;
}

/// Every filter variant known to the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Average,
    ItemCosine,
    UserEuclidean,
    UserPearson,
    ItemAdjustedCosine,
    SlopeOne,
}

impl FilterKind {
    pub const ALL: [FilterKind; 6] = [
        FilterKind::Average,
        FilterKind::ItemCosine,
        FilterKind::UserEuclidean,
        FilterKind::UserPearson,
        FilterKind::ItemAdjustedCosine,
        FilterKind::SlopeOne,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FilterKind::Average => "average",
            FilterKind::ItemCosine => "item-cosine",
            FilterKind::UserEuclidean => "user-euclidean",
            FilterKind::UserPearson => "user-pearson",
            FilterKind::ItemAdjustedCosine => "item-adjusted-cosine",
            FilterKind::SlopeOne => "slope-one",
        }
    }

    pub fn create(self) -> Box<dyn CollaborativeFilter> {
        self.create_with(Box::new(NoopDiagnostics))
    }

    pub fn create_with(self, diagnostics: Box<dyn Diagnostics>) -> Box<dyn CollaborativeFilter> {
        match self {
            // the baseline has no pairwise scoring to observe
            FilterKind::Average => Box::new(AverageBaseline::new()),
            FilterKind::ItemCosine => {
                Box::new(ItemCosineSimilarity::with_diagnostics(diagnostics))
            }
            FilterKind::UserEuclidean => {
                Box::new(UserEuclideanDistance::with_diagnostics(diagnostics))
            }
            FilterKind::UserPearson => Box::new(UserPearsonCorrelation::new()),
            FilterKind::ItemAdjustedCosine => Box::new(ItemAdjustedCosine::new()),
            FilterKind::SlopeOne => Box::new(SlopeOne::new()),
        }
    }
}

impl FromStr for FilterKind {
    type Err = FilterError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        FilterKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| FilterError::UnknownFilter(name.to_string()))
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Predicts the average of all training ratings. By definition, the
/// prediction is independent of the identity of the entity.
#[derive(Debug, Clone, Default)]
pub struct AverageBaseline {
    training: RatingGroup,
    test: RatingGroup,
}

impl AverageBaseline {
    pub fn new() -> Self {
        AverageBaseline::default()
    }

    /// Error of the baseline over the training/test split it has loaded.
    pub fn evaluate(&self) -> Result<f64, NoOverlap> {
        eval::root_mean_square_error(&self.training, &self.test)
    }
}

impl CollaborativeFilter for AverageBaseline {
    fn load_training(&mut self, lines: &[String]) -> Result<(), FilterError> {
        let observations = parse_observations(lines)?;
        self.training = group_ratings(&observations, Axis::Entity);
        Ok(())
    }

    fn load_test(&mut self, lines: &[String]) -> Result<(), FilterError> {
        let observations = parse_observations(lines)?;
        self.test = group_ratings(&observations, Axis::Entity);
        Ok(())
    }

    fn score_similarities(&mut self) -> Result<Option<&SimilarityTable>, FilterError> {
        Ok(None)
    }

    fn predict(&self, _entity: EntityId, _counterpart: EntityId) -> Result<f64, FilterError> {
        let mut sum = 0.0;
        let mut count: u64 = 0;

        for ratings in self.training.values() {
            for &rating in ratings {
                sum += rating as f64;
                count += 1;
            }
        }

        if count == 0 {
            return Err(FilterError::NoTrainingData);
        }

        Ok(sum / count as f64)
    }
}

/// Item-to-item cosine similarity over the ratings each counterpart has
/// received.
pub struct ItemCosineSimilarity {
    training: Vec<RatingObservation>,
    table: Option<SimilarityTable>,
    diagnostics: Box<dyn Diagnostics>,
}

impl ItemCosineSimilarity {
    pub fn new() -> Self {
        ItemCosineSimilarity::with_diagnostics(Box::new(NoopDiagnostics))
    }

    pub fn with_diagnostics(diagnostics: Box<dyn Diagnostics>) -> Self {
        ItemCosineSimilarity { training: Vec::new(), table: None, diagnostics }
    }
}

impl Default for ItemCosineSimilarity {
    fn default() -> Self {
        ItemCosineSimilarity::new()
    }
}

impl CollaborativeFilter for ItemCosineSimilarity {
    fn load_training(&mut self, lines: &[String]) -> Result<(), FilterError> {
        self.training = parse_observations(lines)?;
        // a cached table belongs to the previous training data
        self.table = None;
        Ok(())
    }

    fn load_test(&mut self, lines: &[String]) -> Result<(), FilterError> {
        // held out data only matters once prediction exists, validate and drop
        parse_observations(lines)?;
        Ok(())
    }

    fn score_similarities(&mut self) -> Result<Option<&SimilarityTable>, FilterError> {
        if self.training.is_empty() {
            return Err(FilterError::NoTrainingData);
        }

        if self.table.is_none() {
            self.table = Some(similarities(
                &self.training,
                Axis::Counterpart,
                Strategy::Cosine,
                self.diagnostics.as_ref(),
            ));
        }

        Ok(self.table.as_ref())
    }

    fn predict(&self, _entity: EntityId, _counterpart: EntityId) -> Result<f64, FilterError> {
        Err(FilterError::NotImplemented("item cosine rating prediction"))
    }
}

/// Entity-to-entity similarity from euclidean rating distance. The raw
/// squared distance accumulator is mapped through 1 / (1 + sqrt(d)), so
/// entities with identical ratings score 1 and the score falls towards 0
/// as their ratings drift apart.
pub struct UserEuclideanDistance {
    training: Vec<RatingObservation>,
    table: Option<SimilarityTable>,
    diagnostics: Box<dyn Diagnostics>,
}

impl UserEuclideanDistance {
    pub fn new() -> Self {
        UserEuclideanDistance::with_diagnostics(Box::new(NoopDiagnostics))
    }

    pub fn with_diagnostics(diagnostics: Box<dyn Diagnostics>) -> Self {
        UserEuclideanDistance { training: Vec::new(), table: None, diagnostics }
    }
}

impl Default for UserEuclideanDistance {
    fn default() -> Self {
        UserEuclideanDistance::new()
    }
}

impl CollaborativeFilter for UserEuclideanDistance {
    fn load_training(&mut self, lines: &[String]) -> Result<(), FilterError> {
        self.training = parse_observations(lines)?;
        self.table = None;
        Ok(())
    }

    fn load_test(&mut self, lines: &[String]) -> Result<(), FilterError> {
        parse_observations(lines)?;
        Ok(())
    }

    fn score_similarities(&mut self) -> Result<Option<&SimilarityTable>, FilterError> {
        if self.training.is_empty() {
            return Err(FilterError::NoTrainingData);
        }

        if self.table.is_none() {
            let accumulators = similarities(
                &self.training,
                Axis::Entity,
                Strategy::SquaredDifference,
                self.diagnostics.as_ref(),
            );

            let mut table = SimilarityTable::new();
            for ((left, right), sum) in accumulators.iter() {
                table.insert(left, right, 1.0 / (1.0 + sum.sqrt()));
            }

            self.table = Some(table);
        }

        Ok(self.table.as_ref())
    }

    fn predict(&self, _entity: EntityId, _counterpart: EntityId) -> Result<f64, FilterError> {
        Err(FilterError::NotImplemented("user euclidean rating prediction"))
    }
}

/// Placeholder for entity-to-entity Pearson correlation.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserPearsonCorrelation;

impl UserPearsonCorrelation {
    pub fn new() -> Self {
        UserPearsonCorrelation
    }
}

impl CollaborativeFilter for UserPearsonCorrelation {
    fn load_training(&mut self, lines: &[String]) -> Result<(), FilterError> {
        parse_observations(lines)?;
        Ok(())
    }

    fn load_test(&mut self, lines: &[String]) -> Result<(), FilterError> {
        parse_observations(lines)?;
        Ok(())
    }

    fn score_similarities(&mut self) -> Result<Option<&SimilarityTable>, FilterError> {
        Err(FilterError::NotImplemented("pearson correlation scoring"))
    }

    fn predict(&self, _entity: EntityId, _counterpart: EntityId) -> Result<f64, FilterError> {
        Err(FilterError::NotImplemented("pearson correlation prediction"))
    }
}

/// Placeholder for cosine similarity over mean centered ratings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemAdjustedCosine;

impl ItemAdjustedCosine {
    pub fn new() -> Self {
        ItemAdjustedCosine
    }
}

impl CollaborativeFilter for ItemAdjustedCosine {
    fn load_training(&mut self, lines: &[String]) -> Result<(), FilterError> {
        parse_observations(lines)?;
        Ok(())
    }

    fn load_test(&mut self, lines: &[String]) -> Result<(), FilterError> {
        parse_observations(lines)?;
        Ok(())
    }

    fn score_similarities(&mut self) -> Result<Option<&SimilarityTable>, FilterError> {
        Err(FilterError::NotImplemented("adjusted cosine scoring"))
    }

    fn predict(&self, _entity: EntityId, _counterpart: EntityId) -> Result<f64, FilterError> {
        Err(FilterError::NotImplemented("adjusted cosine prediction"))
    }
}

/// Placeholder for the slope one prediction scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlopeOne;

impl SlopeOne {
    pub fn new() -> Self {
        SlopeOne
    }
}

impl CollaborativeFilter for SlopeOne {
    fn load_training(&mut self, lines: &[String]) -> Result<(), FilterError> {
        parse_observations(lines)?;
        Ok(())
    }

    fn load_test(&mut self, lines: &[String]) -> Result<(), FilterError> {
        parse_observations(lines)?;
        Ok(())
    }

    fn score_similarities(&mut self) -> Result<Option<&SimilarityTable>, FilterError> {
        Err(FilterError::NotImplemented("slope one scoring"))
    }

    fn predict(&self, _entity: EntityId, _counterpart: EntityId) -> Result<f64, FilterError> {
        Err(FilterError::NotImplemented("slope one prediction"))
    }
}
