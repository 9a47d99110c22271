//! Person record and response models for the HTTP API
//!
//! This module defines the record type stored by the service and the
//! DTOs used for serializing HTTP response bodies.

pub mod person;
pub mod responses;

// Re-export commonly used types
pub use person::{validate_person, Person, EMAIL_DOMAIN, MAX_AGE};
pub use responses::{DeleteResponse, HealthResponse};
