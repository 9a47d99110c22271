//! Authoritative Store Module
//!
//! The durable `persons` relation the cache-aside layer defers to.

mod repository;

pub use repository::{PersonRepository, SqlitePersonRepository};
