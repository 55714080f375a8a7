//! Decision create input and update builder.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Fields for a new decision. `parent_id` positions it at creation;
/// `None` makes it a root.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewDecision {
    pub parent_id: Option<String>,
    pub order: Option<f64>,
    pub title: String,
    pub description: Option<String>,
    pub status: Option<Vec<String>>,
    pub position: Option<serde_json::Value>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<Vec<String>>,
    pub outcome: Option<String>,
}

impl NewDecision {
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn under(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    #[must_use]
    pub const fn at(mut self, order: f64) -> Self {
        self.order = Some(order);
        self
    }
}

/// Payload fields of a decision. Tree position (`parent_id`, `path`,
/// `depth`, `order`) is not updatable here; use `move_decision`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DecisionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Option<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Option<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Option<String>>,
}

pub struct DecisionUpdateBuilder(DecisionUpdate);

impl DecisionUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(DecisionUpdate::default())
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
    pub fn status(mut self, val: Option<Vec<String>>) -> Self {
        self.0.status = Some(val);
        self
    }

    #[must_use]
    pub fn position(mut self, val: serde_json::Value) -> Self {
        self.0.position = Some(val);
        self
    }

    #[must_use]
    pub fn due_date(mut self, val: Option<DateTime<Utc>>) -> Self {
        self.0.due_date = Some(val);
        self
    }

    #[must_use]
    pub fn priority(mut self, val: Option<Vec<String>>) -> Self {
        self.0.priority = Some(val);
        self
    }

    #[must_use]
    pub fn outcome(mut self, val: Option<String>) -> Self {
        self.0.outcome = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> DecisionUpdate {
        self.0
    }
}

impl Default for DecisionUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
