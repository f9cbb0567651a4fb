use axum::{Extension, Router, extract::DefaultBodyLimit, middleware};

use crate::security;
use crate::security::session::{SessionLayerState, attach_session};
use crate::session::SessionStore;

pub mod assets;
pub mod registration;

/// Builds the full application: routes, session resolution, and the
/// response hardening layers.
pub fn create_router(store: SessionStore, secure_cookie: bool) -> Router {
    tracing::debug!("Creating application router");

    let session_layer = middleware::from_fn_with_state(
        SessionLayerState {
            store: store.clone(),
            secure_cookie,
        },
        attach_session,
    );

    Router::new()
        .merge(registration::router().route_layer(session_layer))
        .merge(assets::router())
        .layer(Extension(store))
        .layer(middleware::from_fn(security::headers::set_security_headers))
        .layer(DefaultBodyLimit::max(security::form::MAX_BODY_SIZE_BYTES))
}
