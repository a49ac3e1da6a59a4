//! User use-case service.

use crate::model::user::{NewUser, User};
use crate::model::EntityId;
use crate::repo::entity_repo::Repository;
use crate::repo::unit_of_work::UnitOfWork;
use crate::service::{require, ServiceResult};
use log::info;

/// CRUD entry points for users.
pub struct UserService<'conn> {
    uow: UnitOfWork<'conn>,
}

impl<'conn> UserService<'conn> {
    pub fn new(uow: UnitOfWork<'conn>) -> Self {
        Self { uow }
    }

    pub fn list_users(&self) -> ServiceResult<Vec<User>> {
        Ok(self.uow.users().list_all()?)
    }

    pub fn get_user(&self, id: EntityId) -> ServiceResult<User> {
        require(&self.uow.users(), id)
    }

    pub fn create_user(&self, draft: &NewUser) -> ServiceResult<User> {
        let draft = draft.normalized()?;
        let user = self.uow.users().insert(&draft)?;
        info!(
            "event=user_create module=service status=ok user_id={}",
            user.id
        );
        Ok(user)
    }

    /// Replaces the user's full name.
    pub fn update_user(&self, id: EntityId, draft: &NewUser) -> ServiceResult<User> {
        let draft = draft.normalized()?;
        let user = self.uow.users().update(id, &draft)?;
        info!("event=user_update module=service status=ok user_id={id}");
        Ok(user)
    }

    /// Deletes the user; assigned tasks and logged time cascade.
    pub fn delete_user(&self, id: EntityId) -> ServiceResult<()> {
        self.uow.users().delete(id)?;
        info!("event=user_delete module=service status=ok user_id={id}");
        Ok(())
    }
}
