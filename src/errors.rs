use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::logging::RegistrationEvent;
use crate::views::render_error;

/// Request-level failures. Field validation problems are not errors here;
/// they travel back to the user inside the form view.
#[derive(Debug, Error)]
pub enum AppError {
    // Request parsing errors
    #[error("malformed form submission: {0}")]
    MalformedForm(String),

    #[error("unsupported media type: expected application/x-www-form-urlencoded")]
    UnsupportedMediaType,

    #[error("request body too large")]
    PayloadTooLarge,

    // Session errors
    #[error("session not found in request context")]
    MissingSession,
}

impl AppError {
    /// Determines the HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MalformedForm(_) => StatusCode::BAD_REQUEST,
            AppError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,

            AppError::MissingSession => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// In release builds only client errors describe themselves
    fn should_expose_details(&self) -> bool {
        cfg!(debug_assertions) || self.status_code().is_client_error()
    }

    fn user_message(&self) -> String {
        if self.should_expose_details() {
            self.to_string()
        } else {
            match self {
                AppError::MissingSession => "your session could not be resumed".to_string(),
                _ => "an internal error occurred".to_string(),
            }
        }
    }

    fn log_error(&self) {
        match self.status_code() {
            code if code.is_client_error() => match self {
                AppError::MalformedForm(_) => {
                    crate::log_registration_event!(
                        RegistrationEvent::MalformedSubmission,
                        error = %self,
                        status_code = %code,
                        "Rejected malformed form submission"
                    );
                }
                _ => {
                    tracing::warn!(
                        error = %self,
                        status_code = %code,
                        "Client error"
                    );
                }
            },
            code if code.is_server_error() => {
                tracing::error!(
                    error = %self,
                    status_code = %code,
                    "Server error"
                );
            }
            _ => {}
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log_error();

        let status = self.status_code();
        let heading = status.canonical_reason().unwrap_or("Error");
        let body = Html(render_error(heading, &self.user_message()));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::header;

    use super::*;

    #[test]
    fn test_malformed_form_status() {
        let error = AppError::MalformedForm("bad".to_string());
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_media_type_and_size_statuses() {
        assert_eq!(
            AppError::UnsupportedMediaType.status_code(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            AppError::PayloadTooLarge.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn test_client_errors_have_detailed_messages() {
        let error = AppError::MalformedForm("unknown field `nickname`".to_string());
        assert!(error.should_expose_details());
        assert!(error.user_message().contains("unknown field `nickname`"));
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn test_internal_errors_hidden_in_production() {
        let error = AppError::MissingSession;
        assert!(!error.should_expose_details());
        assert!(!error.user_message().contains("request context"));
    }

    #[cfg(debug_assertions)]
    #[test]
    fn test_internal_errors_exposed_in_debug() {
        assert!(AppError::MissingSession.should_expose_details());
    }

    #[test]
    fn test_error_response_is_html() {
        let response = AppError::PayloadTooLarge.into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("text/html; charset=utf-8")
        );
    }
}
