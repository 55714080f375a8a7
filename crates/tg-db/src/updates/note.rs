//! Note create input and update builder.

use serde::Serialize;
use tg_core::enums::EntityType;

#[derive(Debug, Clone, Serialize)]
pub struct NewNote {
    pub entity_type: EntityType,
    pub entity_id: String,
    pub content: String,
    pub note_type: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NoteUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_type: Option<Option<Vec<String>>>,
}

pub struct NoteUpdateBuilder(NoteUpdate);

impl NoteUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(NoteUpdate::default())
    }

    #[must_use]
    pub fn content(mut self, val: impl Into<String>) -> Self {
        self.0.content = Some(val.into());
        self
    }

    #[must_use]
    pub fn note_type(mut self, val: Option<Vec<String>>) -> Self {
        self.0.note_type = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> NoteUpdate {
        self.0
    }
}

impl Default for NoteUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
