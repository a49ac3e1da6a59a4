//! User entity.

use crate::model::validation::{normalize_text, ValidationError};
use crate::model::EntityId;
use serde::{Deserialize, Serialize};

/// A person who can be assigned tasks and log time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: EntityId,
    pub full_name: String,
}

/// Write input for creating or replacing a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub full_name: String,
}

impl NewUser {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
        }
    }

    /// Returns a trimmed copy, or the first rule violation.
    pub fn normalized(&self) -> Result<Self, ValidationError> {
        Ok(Self {
            full_name: normalize_text("fullName", &self.full_name)?,
        })
    }
}
