//! Aggregated detail views for projects, users, and tasks.
//!
//! # Responsibility
//! - Join an entity with its dependent rows and compute hour totals.
//!
//! # Invariants
//! - `total_time_spent` sums entry durations in hours.
//! - `total_estimated_hours` sums task estimates in hours.

use crate::model::project::Project;
use crate::model::task::TaskItem;
use crate::model::time_entry::TimeEntry;
use crate::model::user::User;
use crate::model::EntityId;
use crate::repo::entities::{
    TASK_PROJECT_COLUMN, TASK_USER_COLUMN, TIME_ENTRY_TASK_COLUMN, TIME_ENTRY_USER_COLUMN,
};
use crate::repo::entity_repo::Repository;
use crate::repo::unit_of_work::UnitOfWork;
use crate::service::views::{LookupTables, TaskView, TimeEntryView};
use crate::service::{require, ServiceResult};
use serde::Serialize;

/// Minimal project reference embedded in task details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRef {
    pub id: EntityId,
    pub name: String,
}

/// Minimal user reference embedded in task details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: EntityId,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
    pub id: EntityId,
    pub name: String,
    pub tasks: Vec<TaskView>,
    pub total_estimated_hours: f64,
    pub total_time_spent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    pub id: EntityId,
    pub full_name: String,
    pub assigned_tasks: Vec<TaskView>,
    pub time_entries: Vec<TimeEntryView>,
    pub total_time_spent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetail {
    pub id: EntityId,
    pub title: String,
    pub estimate_hours: f64,
    pub project: ProjectRef,
    pub assigned_user: UserRef,
    pub time_entries: Vec<TimeEntryView>,
    pub total_time_spent: f64,
}

/// Read-only aggregation service.
pub struct ReportService<'conn> {
    uow: UnitOfWork<'conn>,
}

impl<'conn> ReportService<'conn> {
    pub fn new(uow: UnitOfWork<'conn>) -> Self {
        Self { uow }
    }

    pub fn project_details(&self, id: EntityId) -> ServiceResult<ProjectDetail> {
        let project: Project = require(&self.uow.projects(), id)?;
        let lookups = LookupTables::load(&self.uow)?;
        let tasks = self.uow.tasks().list_by(TASK_PROJECT_COLUMN, id)?;

        let mut total_time_spent = 0.0;
        for task in &tasks {
            total_time_spent += total_hours(&self.entries_of_task(task)?);
        }

        Ok(ProjectDetail {
            id: project.id,
            name: project.name,
            total_estimated_hours: tasks.iter().map(|task| task.estimate_hours).sum(),
            tasks: tasks.iter().map(|task| lookups.task_view(task)).collect(),
            total_time_spent,
        })
    }

    pub fn user_details(&self, id: EntityId) -> ServiceResult<UserDetail> {
        let user: User = require(&self.uow.users(), id)?;
        let lookups = LookupTables::load(&self.uow)?;
        let tasks = self.uow.tasks().list_by(TASK_USER_COLUMN, id)?;
        let entries = self
            .uow
            .time_entries()
            .list_by(TIME_ENTRY_USER_COLUMN, id)?;

        Ok(UserDetail {
            id: user.id,
            full_name: user.full_name,
            assigned_tasks: tasks.iter().map(|task| lookups.task_view(task)).collect(),
            total_time_spent: total_hours(&entries),
            time_entries: entries
                .iter()
                .map(|entry| lookups.time_entry_view(entry))
                .collect(),
        })
    }

    pub fn task_details(&self, id: EntityId) -> ServiceResult<TaskDetail> {
        let task: TaskItem = require(&self.uow.tasks(), id)?;
        let lookups = LookupTables::load(&self.uow)?;
        let entries = self.entries_of_task(&task)?;

        Ok(TaskDetail {
            id: task.id,
            title: task.title.clone(),
            estimate_hours: task.estimate_hours,
            project: ProjectRef {
                id: task.project_id,
                name: lookups.project_name(task.project_id).to_string(),
            },
            assigned_user: UserRef {
                id: task.assigned_user_id,
                full_name: lookups.user_name(task.assigned_user_id).to_string(),
            },
            total_time_spent: total_hours(&entries),
            time_entries: entries
                .iter()
                .map(|entry| lookups.time_entry_view(entry))
                .collect(),
        })
    }

    fn entries_of_task(&self, task: &TaskItem) -> ServiceResult<Vec<TimeEntry>> {
        Ok(self
            .uow
            .time_entries()
            .list_by(TIME_ENTRY_TASK_COLUMN, task.id)?)
    }
}

fn total_hours(entries: &[TimeEntry]) -> f64 {
    entries.iter().map(TimeEntry::duration_hours).sum()
}
