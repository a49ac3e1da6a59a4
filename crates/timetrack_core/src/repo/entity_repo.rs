//! Generic entity repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide get/list/insert/update/delete over one table per entity type.
//! - Keep SQL text generation inside the persistence boundary.
//!
//! # Invariants
//! - Listing order is always `id ASC`.
//! - `update` and `delete` on a missing id return `RepoError::NotFound`.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::EntityId;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for entity persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound { entity: &'static str, id: EntityId },
    UnknownColumn {
        table: &'static str,
        column: &'static str,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} with ID {id} not found"),
            Self::UnknownColumn { table, column } => {
                write!(f, "column `{column}` is not declared for table `{table}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Table mapping for one persisted entity type.
///
/// Every table has an `INTEGER PRIMARY KEY` column named `id`; `COLUMNS`
/// lists the remaining writable columns in bind order.
pub trait Entity: Sized {
    /// Write input accepted by `insert` and `update`.
    type Draft;

    const TABLE: &'static str;
    /// Human-readable name used in messages ("Time entry").
    const LABEL: &'static str;
    const COLUMNS: &'static [&'static str];

    /// Decodes one row selected as `id, COLUMNS...`.
    fn from_row(row: &Row<'_>) -> RepoResult<Self>;

    /// Encodes a draft into values matching `COLUMNS` order.
    fn draft_values(draft: &Self::Draft) -> Vec<Value>;
}

/// Generic CRUD contract used by services.
pub trait Repository<E: Entity> {
    fn get_by_id(&self, id: EntityId) -> RepoResult<Option<E>>;
    fn exists(&self, id: EntityId) -> RepoResult<bool>;
    fn list_all(&self) -> RepoResult<Vec<E>>;
    /// Lists rows whose `column` equals `id`; `column` must be declared in `E::COLUMNS`.
    fn list_by(&self, column: &'static str, id: EntityId) -> RepoResult<Vec<E>>;
    fn insert(&self, draft: &E::Draft) -> RepoResult<E>;
    fn update(&self, id: EntityId, draft: &E::Draft) -> RepoResult<E>;
    fn delete(&self, id: EntityId) -> RepoResult<()>;
    fn count(&self) -> RepoResult<u64>;
}

/// SQLite-backed repository for any `Entity`.
pub struct SqliteRepository<'conn, E> {
    conn: &'conn Connection,
    _entity: PhantomData<fn() -> E>,
}

impl<'conn, E: Entity> SqliteRepository<'conn, E> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            _entity: PhantomData,
        }
    }

    fn select_sql() -> String {
        format!("SELECT id, {} FROM {}", E::COLUMNS.join(", "), E::TABLE)
    }

    fn query_rows(&self, sql: &str, bind_values: Vec<Value>) -> RepoResult<Vec<E>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(E::from_row(row)?);
        }
        Ok(items)
    }
}

impl<E> Clone for SqliteRepository<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for SqliteRepository<'_, E> {}

impl<E: Entity> Repository<E> for SqliteRepository<'_, E> {
    fn get_by_id(&self, id: EntityId) -> RepoResult<Option<E>> {
        let sql = format!("{} WHERE id = ?1;", Self::select_sql());
        Ok(self
            .query_rows(&sql, vec![Value::Integer(id)])?
            .into_iter()
            .next())
    }

    fn exists(&self, id: EntityId) -> RepoResult<bool> {
        let found: i64 = self.conn.query_row(
            &format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1);", E::TABLE),
            [id],
            |row| row.get(0),
        )?;
        Ok(found == 1)
    }

    fn list_all(&self) -> RepoResult<Vec<E>> {
        let sql = format!("{} ORDER BY id ASC;", Self::select_sql());
        self.query_rows(&sql, Vec::new())
    }

    fn list_by(&self, column: &'static str, id: EntityId) -> RepoResult<Vec<E>> {
        if !E::COLUMNS.contains(&column) {
            return Err(RepoError::UnknownColumn {
                table: E::TABLE,
                column,
            });
        }
        let sql = format!("{} WHERE {column} = ?1 ORDER BY id ASC;", Self::select_sql());
        self.query_rows(&sql, vec![Value::Integer(id)])
    }

    fn insert(&self, draft: &E::Draft) -> RepoResult<E> {
        let placeholders = (1..=E::COLUMNS.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({placeholders});",
            E::TABLE,
            E::COLUMNS.join(", ")
        );
        self.conn
            .execute(&sql, params_from_iter(E::draft_values(draft)))?;

        let id = self.conn.last_insert_rowid();
        self.get_by_id(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("{} row {id} missing after insert", E::TABLE))
        })
    }

    fn update(&self, id: EntityId, draft: &E::Draft) -> RepoResult<E> {
        let assignments = E::COLUMNS
            .iter()
            .enumerate()
            .map(|(index, column)| format!("{column} = ?{}", index + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {assignments} WHERE id = ?{};",
            E::TABLE,
            E::COLUMNS.len() + 1
        );
        let mut bind_values = E::draft_values(draft);
        bind_values.push(Value::Integer(id));

        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: E::LABEL,
                id,
            });
        }

        self.get_by_id(id)?.ok_or(RepoError::NotFound {
            entity: E::LABEL,
            id,
        })
    }

    fn delete(&self, id: EntityId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(&format!("DELETE FROM {} WHERE id = ?1;", E::TABLE), [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: E::LABEL,
                id,
            });
        }
        Ok(())
    }

    fn count(&self) -> RepoResult<u64> {
        let total: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {};", E::TABLE),
            [],
            |row| row.get(0),
        )?;
        u64::try_from(total)
            .map_err(|_| RepoError::InvalidData(format!("negative row count in {}", E::TABLE)))
    }
}
