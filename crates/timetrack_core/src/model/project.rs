//! Project entity.

use crate::model::validation::{normalize_text, ValidationError};
use crate::model::EntityId;
use serde::{Deserialize, Serialize};

/// A named container for tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: EntityId,
    pub name: String,
}

/// Write input for creating or replacing a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
}

impl NewProject {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns a trimmed copy, or the first rule violation.
    pub fn normalized(&self) -> Result<Self, ValidationError> {
        Ok(Self {
            name: normalize_text("name", &self.name)?,
        })
    }
}
