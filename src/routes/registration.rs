use axum::{
    Extension, Router,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
};
use chrono::Utc;

use crate::controller::{Outcome, View, transition};
use crate::errors::AppError;
use crate::logging::{FieldList, RegistrationEvent, SanitizedContact, SanitizedEmail, SessionTag};
use crate::models::FieldErrors;
use crate::models::submission::Submission;
use crate::security::form::ValidatedForm;
use crate::security::session::SessionId;
use crate::session::SessionStore;
use crate::views::render;

pub fn router() -> Router {
    Router::new().route("/", get(show_form).post(submit))
}

/// Viewing the blank form never starts a session; the first POST does.
#[tracing::instrument(name = "show_form", skip_all)]
pub async fn show_form() -> impl IntoResponse {
    Html(render(&View::blank_form()))
}

#[tracing::instrument(name = "submit_registration", skip_all, fields(session = %SessionTag(session.0)))]
pub async fn submit(
    Extension(store): Extension<SessionStore>,
    session: SessionId,
    ValidatedForm(submission): ValidatedForm<Submission>,
) -> Result<impl IntoResponse, AppError> {
    let action = match submission.into_action() {
        Ok(action) => action,
        Err(values) => {
            tracing::info!(
                session = %SessionTag(session.0),
                "Submission named no action; echoing the form"
            );
            let view = View::Form {
                values,
                errors: FieldErrors::new(),
            };
            return Ok((StatusCode::OK, Html(render(&view))));
        }
    };

    let (view, outcome) = store.update(session.0, Utc::now(), |state| {
        let (state, view, outcome) = transition(state, action);
        (state, (view, outcome))
    });

    let status = match &outcome {
        Outcome::Accepted { roster_len } => {
            let latest = match &view {
                View::Summary { records } => records.last(),
                View::Form { .. } => None,
            };
            crate::log_registration_event!(
                RegistrationEvent::RegistrationAccepted,
                session = %SessionTag(session.0),
                roster_len = *roster_len,
                contact = %SanitizedContact::new(latest.map_or("", |r| r.contact.as_str())),
                email = %SanitizedEmail::new(latest.map_or("", |r| r.email.as_str())),
                "Student registered"
            );
            StatusCode::OK
        }
        Outcome::Rejected { failing } => {
            crate::log_registration_event!(
                RegistrationEvent::RegistrationRejected,
                session = %SessionTag(session.0),
                failing_fields = %FieldList::new(failing),
                "Registration rejected by validation"
            );
            StatusCode::UNPROCESSABLE_ENTITY
        }
        Outcome::ReturnedHome => {
            crate::log_registration_event!(
                RegistrationEvent::ReturnedHome,
                session = %SessionTag(session.0),
                "Returned to registration form"
            );
            StatusCode::OK
        }
    };

    Ok((status, Html(render(&view))))
}
