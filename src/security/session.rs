use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{
        HeaderMap, HeaderValue, Method, Request, header::COOKIE, header::SET_COOKIE,
        request::Parts,
    },
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::logging::{RegistrationEvent, SessionTag};
use crate::session::SessionStore;

pub const SESSION_COOKIE: &str = "registration_sid";

/// Session the current request belongs to, resolved by [`attach_session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionId(pub Uuid);

#[derive(Clone)]
pub struct SessionLayerState {
    pub store: SessionStore,
    pub secure_cookie: bool,
}

/// Resolves the session cookie to a live session. When the cookie is absent,
/// malformed, unknown or expired, a new session is started for requests that
/// can change state; safe requests (GET, HEAD) proceed without one, so
/// cookieless page views do not grow the store.
pub async fn attach_session(
    State(state): State<SessionLayerState>,
    mut request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let now = Utc::now();
    let existing = session_cookie(request.headers()).filter(|id| state.store.touch(*id, now));

    let (id, started) = match existing {
        Some(id) => (id, false),
        None if is_safe(request.method()) => return next.run(request).await,
        None => {
            let id = Uuid::new_v4();
            state.store.create(id, now);
            crate::log_registration_event!(
                RegistrationEvent::SessionStarted,
                session = %SessionTag(id),
                active_sessions = state.store.len(),
                "Started new registration session"
            );
            (id, true)
        }
    };

    request.extensions_mut().insert(SessionId(id));

    let mut response = next.run(request).await;

    if started {
        match HeaderValue::from_str(&session_cookie_header(id, state.secure_cookie)) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to encode session cookie");
            }
        }
    }

    response
}

fn is_safe(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD)
}

fn session_cookie(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

fn session_cookie_header(id: Uuid, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
        id.simple()
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionId>()
            .copied()
            .ok_or(AppError::MissingSession)
    }
}
