//! Read models that join entity rows with related names.
//!
//! # Invariants
//! - Unresolvable related rows render as `UNKNOWN_LABEL`, never as errors.

use crate::model::project::Project;
use crate::model::task::TaskItem;
use crate::model::time_entry::TimeEntry;
use crate::model::user::User;
use crate::model::EntityId;
use crate::repo::entity_repo::{RepoResult, Repository};
use crate::repo::unit_of_work::UnitOfWork;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Placeholder for names whose row cannot be resolved.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Time entry joined with its task title and user name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntryView {
    pub id: EntityId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_hours: f64,
    pub task_item_id: EntityId,
    pub task_title: String,
    pub user_id: EntityId,
    pub user_name: String,
}

/// Task joined with its project name and assignee name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    pub id: EntityId,
    pub title: String,
    pub estimate_hours: f64,
    pub project_id: EntityId,
    pub project_name: String,
    pub assigned_user_id: EntityId,
    pub assigned_user_name: String,
}

/// In-memory id lookups over full table snapshots.
#[derive(Debug, Default)]
pub struct LookupTables {
    users: HashMap<EntityId, User>,
    projects: HashMap<EntityId, Project>,
    tasks: HashMap<EntityId, TaskItem>,
}

impl LookupTables {
    /// Loads users, projects, and tasks in one pass.
    pub fn load(uow: &UnitOfWork<'_>) -> RepoResult<Self> {
        Ok(Self::from_rows(
            uow.users().list_all()?,
            uow.projects().list_all()?,
            uow.tasks().list_all()?,
        ))
    }

    pub fn from_rows(users: Vec<User>, projects: Vec<Project>, tasks: Vec<TaskItem>) -> Self {
        Self {
            users: users.into_iter().map(|user| (user.id, user)).collect(),
            projects: projects
                .into_iter()
                .map(|project| (project.id, project))
                .collect(),
            tasks: tasks.into_iter().map(|task| (task.id, task)).collect(),
        }
    }

    pub fn task(&self, id: EntityId) -> Option<&TaskItem> {
        self.tasks.get(&id)
    }

    pub fn user_name(&self, id: EntityId) -> &str {
        self.users
            .get(&id)
            .map_or(UNKNOWN_LABEL, |user| user.full_name.as_str())
    }

    pub fn project_name(&self, id: EntityId) -> &str {
        self.projects
            .get(&id)
            .map_or(UNKNOWN_LABEL, |project| project.name.as_str())
    }

    pub fn task_title(&self, id: EntityId) -> &str {
        self.tasks
            .get(&id)
            .map_or(UNKNOWN_LABEL, |task| task.title.as_str())
    }

    pub fn time_entry_view(&self, entry: &TimeEntry) -> TimeEntryView {
        time_entry_view(
            entry,
            self.task_title(entry.task_item_id),
            self.user_name(entry.user_id),
        )
    }

    pub fn task_view(&self, task: &TaskItem) -> TaskView {
        TaskView {
            id: task.id,
            title: task.title.clone(),
            estimate_hours: task.estimate_hours,
            project_id: task.project_id,
            project_name: self.project_name(task.project_id).to_string(),
            assigned_user_id: task.assigned_user_id,
            assigned_user_name: self.user_name(task.assigned_user_id).to_string(),
        }
    }
}

/// Builds a view when the related names are already at hand.
pub fn time_entry_view(entry: &TimeEntry, task_title: &str, user_name: &str) -> TimeEntryView {
    TimeEntryView {
        id: entry.id,
        start: entry.start,
        end: entry.end,
        duration_hours: entry.duration_hours(),
        task_item_id: entry.task_item_id,
        task_title: task_title.to_string(),
        user_id: entry.user_id,
        user_name: user_name.to_string(),
    }
}
