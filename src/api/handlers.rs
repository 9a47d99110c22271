//! API Handlers
//!
//! HTTP request handlers mapping each endpoint onto a person store operation.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::error::Result;
use crate::models::{DeleteResponse, HealthResponse, Person};
use crate::store::CachedPersonStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache-aside person store
    pub store: Arc<CachedPersonStore>,
}

impl AppState {
    /// Creates a new AppState around the given store.
    pub fn new(store: CachedPersonStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Handler for POST /persons
///
/// Responds 201 with the stored record, including its new id.
pub async fn create_handler(
    State(state): State<AppState>,
    Json(person): Json<Person>,
) -> Result<(StatusCode, Json<Person>)> {
    let created = state.store.create(person).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for GET /persons/:id
///
/// The body is the cached JSON text when present, passed through unchanged.
pub async fn read_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response> {
    let json = state.store.read(id).await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], json).into_response())
}

/// Handler for PUT /persons/:id
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(person): Json<Person>,
) -> Result<Json<Person>> {
    let updated = state.store.update(id, person).await?;
    Ok(Json(updated))
}

/// Handler for DELETE /persons/:id
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>> {
    state.store.delete(id).await?;
    Ok(Json(DeleteResponse::new(id)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::db::SqlitePersonRepository;
    use crate::error::StoreError;

    async fn test_state() -> AppState {
        let repo = SqlitePersonRepository::in_memory().await.unwrap();
        AppState::new(CachedPersonStore::new(
            Arc::new(repo),
            Arc::new(MemoryCache::new()),
        ))
    }

    fn kunal() -> Person {
        Person::new("kunal", 21, "Kunal@gmail.com")
    }

    #[tokio::test]
    async fn test_create_and_read_handler() {
        let state = test_state().await;

        let (status, Json(created)) = create_handler(State(state.clone()), Json(kunal()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert!(created.id > 0);

        let response = read_handler(State(state), Path(created.id)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
    }

    #[tokio::test]
    async fn test_read_nonexistent_person() {
        let state = test_state().await;

        let result = read_handler(State(state), Path(6348)).await;
        assert!(matches!(result, Err(StoreError::NotFound(6348))));
    }

    #[tokio::test]
    async fn test_update_handler_uses_path_id() {
        let state = test_state().await;
        let (_, Json(created)) = create_handler(State(state.clone()), Json(kunal()))
            .await
            .unwrap();

        let body = Person::new("kunal", 25, "kunal@gmail.com").with_id(12345);
        let Json(updated) = update_handler(State(state), Path(created.id), Json(body))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.age, 25);
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let state = test_state().await;
        let (_, Json(created)) = create_handler(State(state.clone()), Json(kunal()))
            .await
            .unwrap();

        let Json(response) = delete_handler(State(state.clone()), Path(created.id))
            .await
            .unwrap();
        assert_eq!(response.id, created.id);

        let result = delete_handler(State(state), Path(created.id)).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_create_invalid_request() {
        let state = test_state().await;

        let result = create_handler(State(state), Json(Person::new("Akash", -1, "akash@gmail.com"))).await;
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }
}
