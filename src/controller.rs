use crate::models::student::StudentRecord;
use crate::models::submission::{Action, RegistrationForm};
use crate::models::{Field, FieldErrors};
use crate::session::SessionState;
use crate::validation::validate;

/// What the next response shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Form {
        values: RegistrationForm,
        errors: FieldErrors,
    },
    Summary {
        records: Vec<StudentRecord>,
    },
}

impl View {
    pub fn blank_form() -> Self {
        View::Form {
            values: RegistrationForm::default(),
            errors: FieldErrors::new(),
        }
    }
}

/// Result of applying an action, as reported to the caller for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted { roster_len: usize },
    Rejected { failing: Vec<Field> },
    ReturnedHome,
}

/// Applies `action` to the session's state.
///
/// A successful registration is appended before the summary is built, so the
/// summary always includes it. Nothing here removes records.
pub fn transition(mut state: SessionState, action: Action) -> (SessionState, View, Outcome) {
    match action {
        Action::Register(values) => match validate(&values) {
            Ok(record) => {
                state.roster.append(record);
                let outcome = Outcome::Accepted {
                    roster_len: state.roster.len(),
                };
                let view = View::Summary {
                    records: state.roster.list().to_vec(),
                };
                (state, view, outcome)
            }
            Err(errors) => {
                let outcome = Outcome::Rejected {
                    failing: errors.fields().collect(),
                };
                (state, View::Form { values, errors }, outcome)
            }
        },
        Action::Home => (state, View::blank_form(), Outcome::ReturnedHome),
    }
}
