use crate::model::{IdentMap, UserScore};

/// Run-wide score table, merged across every successfully processed
/// repository. Owned by the batch runner for the whole run: created empty,
/// grows as repositories complete, never rolled back when a later repository
/// fails, read once at the end.
#[derive(Debug, Clone, Default)]
pub struct ScoreAggregate {
    scores: IdentMap<UserScore>,
}

impl ScoreAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one repository's resolved scores into the table. A new identity
    /// is inserted as-is; a known one (case-insensitive, first-seen casing
    /// canonical) gets the component-wise sum with an additively carried
    /// total. Commutative and associative per identity, so the final table
    /// does not depend on repository order.
    pub fn merge(&mut self, repo_scores: &IdentMap<UserScore>) {
        for (identity, score) in repo_scores.iter() {
            self.scores
                .upsert_with(identity, *score, |existing, new| existing.merge(new));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn scores(&self) -> &IdentMap<UserScore> {
        &self.scores
    }
}
