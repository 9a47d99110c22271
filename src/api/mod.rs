//! API Module
//!
//! HTTP handlers and routing for the person service REST API.
//!
//! # Endpoints
//! - `POST /persons` - Create a person
//! - `GET /persons/:id` - Read a person
//! - `PUT /persons/:id` - Update a person
//! - `DELETE /persons/:id` - Delete a person
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
