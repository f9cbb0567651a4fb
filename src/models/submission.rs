use serde::Deserialize;

use super::Field;

/// Raw values of the registration form as the browser sent them.
///
/// Absent controls are empty strings so the validator sees one uniform
/// "empty" case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub student_number: String,
    pub age: String,
    pub gender: String,
    pub address: String,
    pub contact: String,
    pub email: String,
    pub course: String,
}

impl RegistrationForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::MiddleName => &self.middle_name,
            Field::LastName => &self.last_name,
            Field::StudentNumber => &self.student_number,
            Field::Age => &self.age,
            Field::Gender => &self.gender,
            Field::Address => &self.address,
            Field::Contact => &self.contact,
            Field::Email => &self.email,
            Field::Course => &self.course,
        }
    }
}

/// What the user asked for on a `POST /`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Register(RegistrationForm),
    Home,
}

/// Wire shape of a form post: every control plus the name of the submit
/// button that was pressed. Keys the form does not define are ignored.
#[derive(Debug, Deserialize)]
pub struct Submission {
    #[serde(default)]
    firstname: String,
    #[serde(default)]
    middlename: String,
    #[serde(default)]
    lastname: String,
    #[serde(default)]
    studentno: String,
    #[serde(default)]
    age: String,
    #[serde(default)]
    gender: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    contact: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    course: String,
    register: Option<String>,
    home: Option<String>,
}

impl Submission {
    /// Resolves the pressed button into an [`Action`]. `register` takes
    /// precedence when a client sends both. When neither was sent the
    /// submitted values come back as the error so they can be shown again.
    pub fn into_action(self) -> Result<Action, RegistrationForm> {
        let (register, home) = (self.register.is_some(), self.home.is_some());
        let form = self.into_form();

        if register {
            Ok(Action::Register(form))
        } else if home {
            Ok(Action::Home)
        } else {
            Err(form)
        }
    }

    fn into_form(self) -> RegistrationForm {
        RegistrationForm {
            first_name: self.firstname,
            middle_name: self.middlename,
            last_name: self.lastname,
            student_number: self.studentno,
            age: self.age,
            gender: self.gender,
            address: self.address,
            contact: self.contact,
            email: self.email,
            course: self.course,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::RegistrationForm;

    pub fn ana_form() -> RegistrationForm {
        RegistrationForm {
            first_name: "Ana".to_string(),
            middle_name: "Lopez".to_string(),
            last_name: "Cruz".to_string(),
            student_number: "24-00015".to_string(),
            age: "20".to_string(),
            gender: "Female".to_string(),
            address: "123 Rd".to_string(),
            contact: "09171234567".to_string(),
            email: "ana@x.com".to_string(),
            course: "Bachelor of Science in Information Technology".to_string(),
        }
    }
}
