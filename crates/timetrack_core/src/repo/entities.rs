//! `Entity` mappings for the four tracking tables.

use crate::model::project::{NewProject, Project};
use crate::model::task::{NewTask, TaskItem};
use crate::model::time_entry::{NewTimeEntry, TimeEntry};
use crate::model::user::{NewUser, User};
use crate::repo::entity_repo::{Entity, RepoError, RepoResult};
use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::Row;

/// Foreign-key column of `tasks` pointing at `projects`.
pub const TASK_PROJECT_COLUMN: &str = "project_id";
/// Foreign-key column of `tasks` pointing at `users`.
pub const TASK_USER_COLUMN: &str = "assigned_user_id";
/// Foreign-key column of `time_entries` pointing at `tasks`.
pub const TIME_ENTRY_TASK_COLUMN: &str = "task_item_id";
/// Foreign-key column of `time_entries` pointing at `users`.
pub const TIME_ENTRY_USER_COLUMN: &str = "user_id";

impl Entity for User {
    type Draft = NewUser;

    const TABLE: &'static str = "users";
    const LABEL: &'static str = "User";
    const COLUMNS: &'static [&'static str] = &["full_name"];

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: row.get("id")?,
            full_name: row.get("full_name")?,
        })
    }

    fn draft_values(draft: &NewUser) -> Vec<Value> {
        vec![Value::Text(draft.full_name.clone())]
    }
}

impl Entity for Project {
    type Draft = NewProject;

    const TABLE: &'static str = "projects";
    const LABEL: &'static str = "Project";
    const COLUMNS: &'static [&'static str] = &["name"];

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }

    fn draft_values(draft: &NewProject) -> Vec<Value> {
        vec![Value::Text(draft.name.clone())]
    }
}

impl Entity for TaskItem {
    type Draft = NewTask;

    const TABLE: &'static str = "tasks";
    const LABEL: &'static str = "Task";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "estimate_hours",
        TASK_PROJECT_COLUMN,
        TASK_USER_COLUMN,
    ];

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: row.get("id")?,
            title: row.get("title")?,
            estimate_hours: row.get("estimate_hours")?,
            project_id: row.get(TASK_PROJECT_COLUMN)?,
            assigned_user_id: row.get(TASK_USER_COLUMN)?,
        })
    }

    fn draft_values(draft: &NewTask) -> Vec<Value> {
        vec![
            Value::Text(draft.title.clone()),
            Value::Real(draft.estimate_hours),
            Value::Integer(draft.project_id),
            Value::Integer(draft.assigned_user_id),
        ]
    }
}

impl Entity for TimeEntry {
    type Draft = NewTimeEntry;

    const TABLE: &'static str = "time_entries";
    const LABEL: &'static str = "Time entry";
    const COLUMNS: &'static [&'static str] = &[
        "start_ms",
        "end_ms",
        TIME_ENTRY_TASK_COLUMN,
        TIME_ENTRY_USER_COLUMN,
    ];

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: row.get("id")?,
            start: parse_epoch_ms(row.get("start_ms")?, "time_entries.start_ms")?,
            end: parse_epoch_ms(row.get("end_ms")?, "time_entries.end_ms")?,
            task_item_id: row.get(TIME_ENTRY_TASK_COLUMN)?,
            user_id: row.get(TIME_ENTRY_USER_COLUMN)?,
        })
    }

    fn draft_values(draft: &NewTimeEntry) -> Vec<Value> {
        vec![
            Value::Integer(draft.start.timestamp_millis()),
            Value::Integer(draft.end.timestamp_millis()),
            Value::Integer(draft.task_item_id),
            Value::Integer(draft.user_id),
        ]
    }
}

fn parse_epoch_ms(value: i64, column: &str) -> RepoResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(value)
        .ok_or_else(|| RepoError::InvalidData(format!("invalid epoch ms `{value}` in {column}")))
}
