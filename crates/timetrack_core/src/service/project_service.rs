//! Project use-case service.

use crate::model::project::{NewProject, Project};
use crate::model::EntityId;
use crate::repo::entity_repo::Repository;
use crate::repo::unit_of_work::UnitOfWork;
use crate::service::{require, ServiceResult};
use log::info;

/// CRUD entry points for projects.
pub struct ProjectService<'conn> {
    uow: UnitOfWork<'conn>,
}

impl<'conn> ProjectService<'conn> {
    pub fn new(uow: UnitOfWork<'conn>) -> Self {
        Self { uow }
    }

    pub fn list_projects(&self) -> ServiceResult<Vec<Project>> {
        Ok(self.uow.projects().list_all()?)
    }

    pub fn get_project(&self, id: EntityId) -> ServiceResult<Project> {
        require(&self.uow.projects(), id)
    }

    pub fn create_project(&self, draft: &NewProject) -> ServiceResult<Project> {
        let draft = draft.normalized()?;
        let project = self.uow.projects().insert(&draft)?;
        info!(
            "event=project_create module=service status=ok project_id={}",
            project.id
        );
        Ok(project)
    }

    pub fn update_project(&self, id: EntityId, draft: &NewProject) -> ServiceResult<Project> {
        let draft = draft.normalized()?;
        let project = self.uow.projects().update(id, &draft)?;
        info!("event=project_update module=service status=ok project_id={id}");
        Ok(project)
    }

    /// Deletes the project together with its tasks and their time entries.
    pub fn delete_project(&self, id: EntityId) -> ServiceResult<()> {
        self.uow.projects().delete(id)?;
        info!("event=project_delete module=service status=ok project_id={id}");
        Ok(())
    }
}
