//! Task use-case service.
//!
//! # Invariants
//! - Create/update fail with `MissingReference` when the project or the
//!   assigned user does not exist.
//! - Filtered listings fail with `NotFound` when the parent row is missing.

use crate::model::project::Project;
use crate::model::task::{NewTask, TaskItem};
use crate::model::user::User;
use crate::model::EntityId;
use crate::repo::entities::{TASK_PROJECT_COLUMN, TASK_USER_COLUMN};
use crate::repo::entity_repo::Repository;
use crate::repo::unit_of_work::UnitOfWork;
use crate::service::{ensure_exists, require, require_reference, ServiceResult};
use log::info;

/// CRUD and lookup entry points for tasks.
pub struct TaskService<'conn> {
    uow: UnitOfWork<'conn>,
}

impl<'conn> TaskService<'conn> {
    pub fn new(uow: UnitOfWork<'conn>) -> Self {
        Self { uow }
    }

    pub fn list_tasks(&self) -> ServiceResult<Vec<TaskItem>> {
        Ok(self.uow.tasks().list_all()?)
    }

    pub fn get_task(&self, id: EntityId) -> ServiceResult<TaskItem> {
        require(&self.uow.tasks(), id)
    }

    pub fn list_tasks_by_project(&self, project_id: EntityId) -> ServiceResult<Vec<TaskItem>> {
        ensure_exists::<Project, _>(&self.uow.projects(), project_id)?;
        Ok(self.uow.tasks().list_by(TASK_PROJECT_COLUMN, project_id)?)
    }

    pub fn list_tasks_by_user(&self, user_id: EntityId) -> ServiceResult<Vec<TaskItem>> {
        ensure_exists::<User, _>(&self.uow.users(), user_id)?;
        Ok(self.uow.tasks().list_by(TASK_USER_COLUMN, user_id)?)
    }

    pub fn create_task(&self, draft: &NewTask) -> ServiceResult<TaskItem> {
        let draft = draft.normalized()?;
        self.check_references(&draft)?;
        let task = self.uow.tasks().insert(&draft)?;
        info!(
            "event=task_create module=service status=ok task_id={} project_id={} user_id={}",
            task.id, task.project_id, task.assigned_user_id
        );
        Ok(task)
    }

    /// Replaces every writable field of the task.
    pub fn update_task(&self, id: EntityId, draft: &NewTask) -> ServiceResult<TaskItem> {
        let draft = draft.normalized()?;
        require::<TaskItem, _>(&self.uow.tasks(), id)?;
        self.check_references(&draft)?;
        let task = self.uow.tasks().update(id, &draft)?;
        info!("event=task_update module=service status=ok task_id={id}");
        Ok(task)
    }

    /// Deletes the task and its time entries.
    pub fn delete_task(&self, id: EntityId) -> ServiceResult<()> {
        self.uow.tasks().delete(id)?;
        info!("event=task_delete module=service status=ok task_id={id}");
        Ok(())
    }

    fn check_references(&self, draft: &NewTask) -> ServiceResult<()> {
        require_reference::<Project, _>(&self.uow.projects(), draft.project_id)?;
        require_reference::<User, _>(&self.uow.users(), draft.assigned_user_id)?;
        Ok(())
    }
}
