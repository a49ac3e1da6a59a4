//! Task entity.
//!
//! # Invariants
//! - `project_id` and `assigned_user_id` reference existing rows at write time.
//! - `estimate_hours` stays within the accepted estimate range.

use crate::model::validation::{check_estimate, normalize_text, ValidationError};
use crate::model::EntityId;
use serde::{Deserialize, Serialize};

/// A unit of work inside a project, assigned to exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskItem {
    pub id: EntityId,
    pub title: String,
    pub estimate_hours: f64,
    pub project_id: EntityId,
    pub assigned_user_id: EntityId,
}

/// Write input for creating or replacing a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub estimate_hours: f64,
    pub project_id: EntityId,
    pub assigned_user_id: EntityId,
}

impl NewTask {
    pub fn new(
        title: impl Into<String>,
        estimate_hours: f64,
        project_id: EntityId,
        assigned_user_id: EntityId,
    ) -> Self {
        Self {
            title: title.into(),
            estimate_hours,
            project_id,
            assigned_user_id,
        }
    }

    /// Returns a trimmed copy, or the first rule violation.
    ///
    /// Reference existence is not checked here; services own that.
    pub fn normalized(&self) -> Result<Self, ValidationError> {
        Ok(Self {
            title: normalize_text("title", &self.title)?,
            estimate_hours: check_estimate(self.estimate_hours)?,
            project_id: self.project_id,
            assigned_user_id: self.assigned_user_id,
        })
    }
}
