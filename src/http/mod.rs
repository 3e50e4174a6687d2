//! Versioned REST surface over the task and evidence services.
//!
//! Every route lives under `/v1/organizations/{organizationId}` so the
//! caller's tenant is explicit in the path. Request parsing happens in the
//! extractors in [`extract`]; handlers only map DTOs to service calls and
//! service results back to DTOs. [`ApiError`] is the single place where
//! failures become HTTP responses.

mod backend;
pub mod dto;
mod error;
pub mod extract;
mod handlers;

pub use backend::{AppState, Backend, MemoryBackend, PostgresBackend};
pub use error::ApiError;

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

/// Builds the application router over the given state.
pub fn router<B: Backend>(state: AppState<B>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/v1/organizations/{organizationId}/tasks",
            post(handlers::create_task::<B>).get(handlers::list_tasks::<B>),
        )
        .route(
            "/v1/organizations/{organizationId}/tasks/{taskId}",
            get(handlers::get_task::<B>)
                .patch(handlers::patch_task::<B>)
                .delete(handlers::delete_task::<B>),
        )
        .route(
            "/v1/organizations/{organizationId}/tasks/{taskId}/evidence",
            post(handlers::add_evidence::<B>),
        )
        .route(
            "/v1/organizations/{organizationId}/tasks/{taskId}/evidence/{evidenceId}",
            delete(handlers::delete_evidence::<B>),
        )
        .fallback(handlers::fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
