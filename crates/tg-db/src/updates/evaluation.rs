//! Evaluation create input and update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewEvaluation {
    pub decision_id: String,
    pub option_id: String,
    pub criteria_id: String,
    pub score: i64,
    pub notes: Option<String>,
}

/// Score and notes only; the (decision, option, criterion) triple is fixed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EvaluationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
}

pub struct EvaluationUpdateBuilder(EvaluationUpdate);

impl EvaluationUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(EvaluationUpdate::default())
    }

    #[must_use]
    pub const fn score(mut self, val: i64) -> Self {
        self.0.score = Some(val);
        self
    }

    #[must_use]
    pub fn notes(mut self, val: Option<String>) -> Self {
        self.0.notes = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> EvaluationUpdate {
        self.0
    }
}

impl Default for EvaluationUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
