//! `hireboard-store` — keyed record repository for users and companies.
//!
//! The domain treats persistence as point lookups plus whole-record saves.
//! Two implementations: an in-memory store for tests/dev and a Postgres
//! store persisting records as JSONB documents.

pub mod memory;
pub mod postgres;
pub mod repository;

pub use memory::InMemoryRepository;
pub use postgres::PostgresRepository;
pub use repository::{Repository, StoreError};
