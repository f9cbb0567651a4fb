pub mod student;
pub mod submission;

use std::collections::BTreeMap;
use std::fmt;

/// Form controls that carry a value the validator checks.
///
/// Declaration order is the order the controls appear on the form, so an
/// ordered map keyed by `Field` lists errors top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    MiddleName,
    LastName,
    StudentNumber,
    Age,
    Gender,
    Address,
    Contact,
    Email,
    Course,
}

impl Field {
    pub const REQUIRED: [Field; 9] = [
        Field::FirstName,
        Field::MiddleName,
        Field::LastName,
        Field::StudentNumber,
        Field::Email,
        Field::Contact,
        Field::Address,
        Field::Course,
        Field::Age,
    ];

    pub const NAMES: [Field; 3] = [Field::FirstName, Field::MiddleName, Field::LastName];

    /// Wire name of the control in the submitted form body.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FirstName => "firstname",
            Field::MiddleName => "middlename",
            Field::LastName => "lastname",
            Field::StudentNumber => "studentno",
            Field::Age => "age",
            Field::Gender => "gender",
            Field::Address => "address",
            Field::Contact => "contact",
            Field::Email => "email",
            Field::Course => "course",
        }
    }

    /// Human label used in messages and on the form.
    pub fn label(&self) -> &'static str {
        match self {
            Field::FirstName => "First name",
            Field::MiddleName => "Middle name",
            Field::LastName => "Last name",
            Field::StudentNumber => "Student number",
            Field::Age => "Age",
            Field::Gender => "Gender",
            Field::Address => "Address",
            Field::Contact => "Contact",
            Field::Email => "Email",
            Field::Course => "Course",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field → message mapping produced by a rejected submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` for `field`, replacing any earlier message for it.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }
}

pub type ValidationResult<T> = Result<T, FieldErrors>;
