//! Option create input and update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewOption {
    pub decision_id: String,
    pub title: String,
    pub description: Option<String>,
    pub pros: Option<Vec<String>>,
    pub cons: Option<Vec<String>>,
    pub order: Option<i64>,
}

impl NewOption {
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
pub struct OptionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pros: Option<Option<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cons: Option<Option<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Option<i64>>,
}

pub struct OptionUpdateBuilder(OptionUpdate);

impl OptionUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(OptionUpdate::default())
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
    pub fn pros(mut self, val: Option<Vec<String>>) -> Self {
        self.0.pros = Some(val);
        self
    }

    #[must_use]
    pub fn cons(mut self, val: Option<Vec<String>>) -> Self {
        self.0.cons = Some(val);
        self
    }

    #[must_use]
    pub const fn order(mut self, val: Option<i64>) -> Self {
        self.0.order = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> OptionUpdate {
        self.0
    }
}

impl Default for OptionUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
