//! HTTP route composition.

use axum::Router;

use crate::state::SharedState;

pub mod docs;
pub mod health;
pub mod hint;
pub mod session;

/// Compose every route tree and wire in the shared state.
///
/// Game and hint endpoints live under `/api/v1`; the healthcheck and the
/// Swagger UI stay at the root.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .nest("/api/v1", session::router().merge(hint::router()));

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}
