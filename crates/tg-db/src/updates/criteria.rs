//! Criterion create input and update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewCriterion {
    pub decision_id: String,
    pub title: String,
    pub description: Option<String>,
    pub weight: Option<f64>,
    pub order: Option<i64>,
}

impl NewCriterion {
    #[must_use]
    pub fn new(decision_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            decision_id: decision_id.into(),
            title: title.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CriterionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Option<i64>>,
}

pub struct CriterionUpdateBuilder(CriterionUpdate);

impl CriterionUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(CriterionUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, val: impl Into<String>) -> Self {
        self.0.title = Some(val.into());
        self
    }

    #[must_use]
    pub fn description(mut self, val: Option<String>) -> Self {
        self.0.description = Some(val);
        self
    }

    #[must_use]
    pub const fn weight(mut self, val: Option<f64>) -> Self {
        self.0.weight = Some(val);
        self
    }

    #[must_use]
    pub const fn order(mut self, val: Option<i64>) -> Self {
        self.0.order = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> CriterionUpdate {
        self.0
    }
}

impl Default for CriterionUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
