use crate::errors::ApiError;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use timetrack_core::sync::ClockifyConfig;
use timetrack_core::{ServiceResult, UnitOfWork};

/// Shared handler state.
///
/// SQLite access is serialized through one connection; every use runs on the
/// blocking pool.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
    clockify: Arc<ClockifyConfig>,
}

impl AppState {
    pub fn new(conn: Connection, clockify: ClockifyConfig) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            clockify: Arc::new(clockify),
        }
    }

    pub fn clockify(&self) -> &ClockifyConfig {
        &self.clockify
    }

    /// Runs `work` with exclusive access to the connection.
    pub async fn with_conn<T, F>(&self, action: &'static str, work: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T, ApiError> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        run_blocking(action, move || {
            let mut conn = db
                .lock()
                .map_err(|_| ApiError::internal(action, "database connection lock poisoned"))?;
            work(&mut *conn)
        })
        .await
    }

    /// Runs a service call, mapping its error for `action`.
    pub async fn with_uow<T, F>(&self, action: &'static str, work: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(UnitOfWork<'_>) -> ServiceResult<T> + Send + 'static,
    {
        self.with_conn(action, move |conn| {
            work(UnitOfWork::new(conn)).map_err(|err| ApiError::from_service(err, action))
        })
        .await
    }
}

/// Moves blocking work off the async workers.
pub async fn run_blocking<T, F>(action: &'static str, work: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| ApiError::internal(action, err))?
}
