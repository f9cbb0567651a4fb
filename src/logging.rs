use std::fmt;
use uuid::Uuid;

use crate::models::Field;

/// Sanitized wrapper for email addresses that masks the local part
#[derive(Debug, Clone)]
pub struct SanitizedEmail(String);

impl SanitizedEmail {
    pub fn new(email: impl Into<String>) -> Self {
        let email = email.into();
        Self(Self::sanitize(&email))
    }

    fn sanitize(email: &str) -> String {
        if let Some((local, domain)) = email.split_once('@') {
            let masked_local = match local.chars().next() {
                Some(first) if local.chars().count() > 2 => format!("{first}***"),
                _ => "*".repeat(local.chars().count()),
            };
            format!("{}@{}", masked_local, domain)
        } else {
            "***@***".to_string()
        }
    }
}

impl fmt::Display for SanitizedEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Contact number showing only its last three digits
#[derive(Debug, Clone)]
pub struct SanitizedContact(String);

impl SanitizedContact {
    pub fn new(contact: impl AsRef<str>) -> Self {
        Self(Self::sanitize(contact.as_ref()))
    }

    fn sanitize(contact: &str) -> String {
        let len = contact.chars().count();
        if len <= 3 {
            return "*".repeat(len);
        }
        let tail: String = contact.chars().skip(len - 3).collect();
        format!("{}{}", "*".repeat(len - 3), tail)
    }
}

impl fmt::Display for SanitizedContact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Session id shortened to its first eight hex digits for log correlation
#[derive(Debug, Clone, Copy)]
pub struct SessionTag(pub Uuid);

impl fmt::Display for SessionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let simple = self.0.simple().to_string();
        write!(f, "{}", &simple[..8])
    }
}

impl From<Uuid> for SessionTag {
    fn from(uuid: Uuid) -> Self {
        SessionTag(uuid)
    }
}

/// Comma-separated field names, for reporting which controls failed without
/// logging what was typed into them.
#[derive(Debug, Clone)]
pub struct FieldList(String);

impl FieldList {
    pub fn new<'a>(fields: impl IntoIterator<Item = &'a Field>) -> Self {
        let names: Vec<&str> = fields.into_iter().map(Field::as_str).collect();
        Self(names.join(","))
    }
}

impl fmt::Display for FieldList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registration lifecycle events for structured logging
#[derive(Debug, Clone, Copy)]
pub enum RegistrationEvent {
    SessionStarted,
    SessionExpired,
    RegistrationAccepted,
    RegistrationRejected,
    ReturnedHome,
    MalformedSubmission,
}

impl RegistrationEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationEvent::SessionStarted => "session_started",
            RegistrationEvent::SessionExpired => "session_expired",
            RegistrationEvent::RegistrationAccepted => "registration_accepted",
            RegistrationEvent::RegistrationRejected => "registration_rejected",
            RegistrationEvent::ReturnedHome => "returned_home",
            RegistrationEvent::MalformedSubmission => "malformed_submission",
        }
    }

    /// Events that point at a client not using the rendered form.
    pub fn is_suspicious(&self) -> bool {
        matches!(self, RegistrationEvent::MalformedSubmission)
    }
}

impl fmt::Display for RegistrationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Log a registration event with sanitized context
#[macro_export]
macro_rules! log_registration_event {
    ($event:expr, $($field:tt)*) => {
        if $event.is_suspicious() {
            tracing::warn!(
                registration_event = %$event,
                event_type = "registration",
                $($field)*
            );
        } else {
            tracing::info!(
                registration_event = %$event,
                event_type = "registration",
                $($field)*
            );
        }
    };
}
