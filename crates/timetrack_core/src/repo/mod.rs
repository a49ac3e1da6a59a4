//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define one generic CRUD contract shared by every tracked entity.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repositories never validate drafts or check references; services do.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod entities;
pub mod entity_repo;
pub mod unit_of_work;
