//! Sequential push of a local snapshot to Clockify.

use crate::model::project::Project;
use crate::model::task::TaskItem;
use crate::model::time_entry::TimeEntry;
use crate::model::user::User;
use crate::model::EntityId;
use crate::repo::entity_repo::{RepoResult, Repository};
use crate::repo::unit_of_work::UnitOfWork;
use crate::sync::clockify::{ClockifyApi, ProjectRequest, TaskRequest, TimeEntryRequest};
use crate::sync::{SyncError, SyncResult};
use log::{debug, error, info, warn};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Instant;

const PROJECT_COLOR: &str = "#000000";
const REMOTE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Full copy of the local tables taken before any network call.
#[derive(Debug, Clone, Default)]
pub struct SyncSnapshot {
    pub users: Vec<User>,
    pub projects: Vec<Project>,
    pub tasks: Vec<TaskItem>,
    pub time_entries: Vec<TimeEntry>,
}

impl SyncSnapshot {
    pub fn load(uow: &UnitOfWork<'_>) -> RepoResult<Self> {
        Ok(Self {
            users: uow.users().list_all()?,
            projects: uow.projects().list_all()?,
            tasks: uow.tasks().list_all()?,
            time_entries: uow.time_entries().list_all()?,
        })
    }
}

/// Per-kind counters for one push run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub workspace_id: String,
    pub users_skipped: usize,
    pub projects_pushed: usize,
    pub projects_failed: usize,
    pub tasks_pushed: usize,
    pub tasks_failed: usize,
    pub tasks_skipped: usize,
    pub time_entries_pushed: usize,
    pub time_entries_failed: usize,
}

impl SyncReport {
    pub fn failed_total(&self) -> usize {
        self.projects_failed + self.tasks_failed + self.time_entries_failed
    }
}

/// Push orchestrator over any `ClockifyApi` implementation.
pub struct ClockifySync<A: ClockifyApi> {
    api: A,
    workspace_id: Option<String>,
}

impl<A: ClockifyApi> ClockifySync<A> {
    /// `workspace_id` pins the target workspace; `None` picks the first one listed.
    pub fn new(api: A, workspace_id: Option<String>) -> Self {
        Self { api, workspace_id }
    }

    /// Pushes projects, then tasks, then time entries.
    ///
    /// # Errors
    /// - Fails only when the workspace cannot be resolved; item failures are
    ///   counted in the returned report.
    pub fn run(&self, snapshot: &SyncSnapshot) -> SyncResult<SyncReport> {
        let started_at = Instant::now();
        info!(
            "event=clockify_sync module=sync status=start users={} projects={} tasks={} time_entries={}",
            snapshot.users.len(),
            snapshot.projects.len(),
            snapshot.tasks.len(),
            snapshot.time_entries.len()
        );

        let workspace_id = match self.resolve_workspace() {
            Ok(id) => id,
            Err(err) => {
                error!(
                    "event=clockify_sync module=sync status=error stage=workspace duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err);
            }
        };

        let mut report = SyncReport {
            workspace_id: workspace_id.clone(),
            ..SyncReport::default()
        };

        for user in &snapshot.users {
            // Clockify members are invited, not created through this API.
            debug!(
                "event=clockify_push module=sync entity=user local_id={} status=skipped",
                user.id
            );
            report.users_skipped += 1;
        }

        let remote_projects = self.push_projects(&workspace_id, &snapshot.projects, &mut report);
        let remote_tasks =
            self.push_tasks(&workspace_id, &snapshot.tasks, &remote_projects, &mut report);
        self.push_time_entries(
            &workspace_id,
            snapshot,
            &remote_projects,
            &remote_tasks,
            &mut report,
        );

        info!(
            "event=clockify_sync module=sync status=ok workspace_id={} projects_pushed={} tasks_pushed={} time_entries_pushed={} failed={} duration_ms={}",
            report.workspace_id,
            report.projects_pushed,
            report.tasks_pushed,
            report.time_entries_pushed,
            report.failed_total(),
            started_at.elapsed().as_millis()
        );
        Ok(report)
    }

    fn resolve_workspace(&self) -> SyncResult<String> {
        if let Some(id) = self
            .workspace_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
        {
            return Ok(id.to_string());
        }

        // A rejected lookup means the account exposes no usable workspace.
        let workspaces = match self.api.list_workspaces() {
            Ok(workspaces) => workspaces,
            Err(SyncError::Status { status, body }) => {
                warn!(
                    "event=clockify_workspaces module=sync status=error http_status={} body={}",
                    status, body
                );
                return Err(SyncError::NoWorkspace);
            }
            Err(err) => return Err(err),
        };

        workspaces
            .into_iter()
            .map(|workspace| workspace.id)
            .find(|id| !id.trim().is_empty())
            .ok_or(SyncError::NoWorkspace)
    }

    fn push_projects(
        &self,
        workspace_id: &str,
        projects: &[Project],
        report: &mut SyncReport,
    ) -> HashMap<EntityId, String> {
        let mut remote_ids = HashMap::new();
        for project in projects {
            let request = ProjectRequest {
                name: project.name.clone(),
                is_public: true,
                color: PROJECT_COLOR.to_string(),
            };
            match self.api.create_project(workspace_id, &request) {
                Ok(remote) => {
                    info!(
                        "event=clockify_push module=sync entity=project local_id={} remote_id={} status=ok",
                        project.id, remote.id
                    );
                    remote_ids.insert(project.id, remote.id);
                    report.projects_pushed += 1;
                }
                Err(err) => {
                    warn!(
                        "event=clockify_push module=sync entity=project local_id={} status=error error={}",
                        project.id, err
                    );
                    report.projects_failed += 1;
                }
            }
        }
        remote_ids
    }

    fn push_tasks(
        &self,
        workspace_id: &str,
        tasks: &[TaskItem],
        remote_projects: &HashMap<EntityId, String>,
        report: &mut SyncReport,
    ) -> HashMap<EntityId, String> {
        let mut remote_ids = HashMap::new();
        for task in tasks {
            let Some(remote_project_id) = remote_projects.get(&task.project_id) else {
                debug!(
                    "event=clockify_push module=sync entity=task local_id={} status=skipped reason=project_not_pushed",
                    task.id
                );
                report.tasks_skipped += 1;
                continue;
            };

            let request = TaskRequest {
                name: task.title.clone(),
            };
            match self
                .api
                .create_task(workspace_id, remote_project_id, &request)
            {
                Ok(remote) => {
                    info!(
                        "event=clockify_push module=sync entity=task local_id={} remote_id={} status=ok",
                        task.id, remote.id
                    );
                    remote_ids.insert(task.id, remote.id);
                    report.tasks_pushed += 1;
                }
                Err(err) => {
                    warn!(
                        "event=clockify_push module=sync entity=task local_id={} status=error error={}",
                        task.id, err
                    );
                    report.tasks_failed += 1;
                }
            }
        }
        remote_ids
    }

    fn push_time_entries(
        &self,
        workspace_id: &str,
        snapshot: &SyncSnapshot,
        remote_projects: &HashMap<EntityId, String>,
        remote_tasks: &HashMap<EntityId, String>,
        report: &mut SyncReport,
    ) {
        let task_projects: HashMap<EntityId, EntityId> = snapshot
            .tasks
            .iter()
            .map(|task| (task.id, task.project_id))
            .collect();

        for entry in &snapshot.time_entries {
            let request = TimeEntryRequest {
                start: entry.start.format(REMOTE_TIME_FORMAT).to_string(),
                end: entry.end.format(REMOTE_TIME_FORMAT).to_string(),
                description: format!("Time entry for task {}", entry.task_item_id),
                project_id: task_projects
                    .get(&entry.task_item_id)
                    .and_then(|project_id| remote_projects.get(project_id))
                    .cloned(),
                task_id: remote_tasks.get(&entry.task_item_id).cloned(),
            };
            match self.api.create_time_entry(workspace_id, &request) {
                Ok(()) => {
                    info!(
                        "event=clockify_push module=sync entity=time_entry local_id={} task_id={} status=ok",
                        entry.id, entry.task_item_id
                    );
                    report.time_entries_pushed += 1;
                }
                Err(err) => {
                    warn!(
                        "event=clockify_push module=sync entity=time_entry local_id={} task_id={} status=error error={}",
                        entry.id, entry.task_item_id, err
                    );
                    report.time_entries_failed += 1;
                }
            }
        }
    }
}
