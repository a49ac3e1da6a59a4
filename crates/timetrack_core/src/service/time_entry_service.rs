//! Time entry use-case service.
//!
//! # Invariants
//! - Create/update fail with `MissingReference` when the task or user is missing.
//! - Every read returns `TimeEntryView`, joined with task title and user name.

use crate::model::task::TaskItem;
use crate::model::time_entry::{NewTimeEntry, TimeEntry};
use crate::model::user::User;
use crate::model::EntityId;
use crate::repo::entities::{TIME_ENTRY_TASK_COLUMN, TIME_ENTRY_USER_COLUMN};
use crate::repo::entity_repo::Repository;
use crate::repo::unit_of_work::UnitOfWork;
use crate::service::views::{time_entry_view, LookupTables, TimeEntryView, UNKNOWN_LABEL};
use crate::service::{require, require_reference, ServiceResult};
use log::info;

/// CRUD and lookup entry points for time entries.
pub struct TimeEntryService<'conn> {
    uow: UnitOfWork<'conn>,
}

impl<'conn> TimeEntryService<'conn> {
    pub fn new(uow: UnitOfWork<'conn>) -> Self {
        Self { uow }
    }

    pub fn list_time_entries(&self) -> ServiceResult<Vec<TimeEntryView>> {
        let entries = self.uow.time_entries().list_all()?;
        let lookups = LookupTables::load(&self.uow)?;
        Ok(entries
            .iter()
            .map(|entry| lookups.time_entry_view(entry))
            .collect())
    }

    pub fn get_time_entry(&self, id: EntityId) -> ServiceResult<TimeEntryView> {
        let entry = require::<TimeEntry, _>(&self.uow.time_entries(), id)?;
        self.single_view(&entry)
    }

    pub fn list_time_entries_by_task(&self, task_id: EntityId) -> ServiceResult<Vec<TimeEntryView>> {
        let task: TaskItem = require(&self.uow.tasks(), task_id)?;
        let users = self.uow.users();
        let entries = self
            .uow
            .time_entries()
            .list_by(TIME_ENTRY_TASK_COLUMN, task_id)?;

        entries
            .iter()
            .map(|entry| -> ServiceResult<TimeEntryView> {
                let user = users.get_by_id(entry.user_id)?;
                let user_name = user.as_ref().map_or(UNKNOWN_LABEL, |u| u.full_name.as_str());
                Ok(time_entry_view(entry, &task.title, user_name))
            })
            .collect()
    }

    pub fn list_time_entries_by_user(&self, user_id: EntityId) -> ServiceResult<Vec<TimeEntryView>> {
        let user: User = require(&self.uow.users(), user_id)?;
        let tasks = self.uow.tasks();
        let entries = self
            .uow
            .time_entries()
            .list_by(TIME_ENTRY_USER_COLUMN, user_id)?;

        entries
            .iter()
            .map(|entry| -> ServiceResult<TimeEntryView> {
                let task = tasks.get_by_id(entry.task_item_id)?;
                let task_title = task.as_ref().map_or(UNKNOWN_LABEL, |t| t.title.as_str());
                Ok(time_entry_view(entry, task_title, &user.full_name))
            })
            .collect()
    }

    pub fn create_time_entry(&self, draft: &NewTimeEntry) -> ServiceResult<TimeEntryView> {
        let draft = draft.normalized()?;
        let (task, user) = self.check_references(&draft)?;
        let entry = self.uow.time_entries().insert(&draft)?;
        info!(
            "event=time_entry_create module=service status=ok time_entry_id={} task_id={} user_id={}",
            entry.id, entry.task_item_id, entry.user_id
        );
        Ok(time_entry_view(&entry, &task.title, &user.full_name))
    }

    /// Replaces start, end, task, and user of the entry.
    pub fn update_time_entry(
        &self,
        id: EntityId,
        draft: &NewTimeEntry,
    ) -> ServiceResult<TimeEntryView> {
        let draft = draft.normalized()?;
        require::<TimeEntry, _>(&self.uow.time_entries(), id)?;
        let (task, user) = self.check_references(&draft)?;
        let entry = self.uow.time_entries().update(id, &draft)?;
        info!("event=time_entry_update module=service status=ok time_entry_id={id}");
        Ok(time_entry_view(&entry, &task.title, &user.full_name))
    }

    pub fn delete_time_entry(&self, id: EntityId) -> ServiceResult<()> {
        self.uow.time_entries().delete(id)?;
        info!("event=time_entry_delete module=service status=ok time_entry_id={id}");
        Ok(())
    }

    fn check_references(&self, draft: &NewTimeEntry) -> ServiceResult<(TaskItem, User)> {
        let task = require_reference(&self.uow.tasks(), draft.task_item_id)?;
        let user = require_reference(&self.uow.users(), draft.user_id)?;
        Ok((task, user))
    }

    fn single_view(&self, entry: &TimeEntry) -> ServiceResult<TimeEntryView> {
        let task = self.uow.tasks().get_by_id(entry.task_item_id)?;
        let user = self.uow.users().get_by_id(entry.user_id)?;
        Ok(time_entry_view(
            entry,
            task.as_ref().map_or(UNKNOWN_LABEL, |t| t.title.as_str()),
            user.as_ref().map_or(UNKNOWN_LABEL, |u| u.full_name.as_str()),
        ))
    }
}
