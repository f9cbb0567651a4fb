use std::sync::LazyLock;

use regex::Regex;

use crate::models::student::StudentRecord;
use crate::models::submission::RegistrationForm;
use crate::models::{Field, FieldErrors, ValidationResult};

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z ]+$").expect("valid name pattern"));
static STUDENT_NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(24|27)-[0-9]{5}$").expect("valid student number pattern"));
static CONTACT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{11}$").expect("valid contact pattern"));
static INTEGER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(0|[1-9][0-9]*)$").expect("valid integer pattern"));

const AGE_RANGE: std::ops::RangeInclusive<i64> = 1..=120;

const STUDENT_NUMBER_MESSAGE: &str =
    "Student number must start with 24- or 27- and have 5 digits.";
const AGE_MESSAGE: &str = "Age must be between 1 and 120.";
const CONTACT_MESSAGE: &str = "Contact number must be exactly 11 digits.";
const EMAIL_MESSAGE: &str = "Invalid email address.";

/// Checks every rule against `form` and either builds a [`StudentRecord`] or
/// returns all failures at once. Rules never short-circuit each other.
pub fn validate(form: &RegistrationForm) -> ValidationResult<StudentRecord> {
    let mut errors = FieldErrors::new();

    for field in Field::REQUIRED {
        if form.value(field).trim().is_empty() {
            errors.insert(field, format!("{} is required.", field.label()));
        }
    }

    for field in Field::NAMES {
        let value = form.value(field).trim();
        if !value.is_empty() && !NAME_PATTERN.is_match(value) {
            errors.insert(field, format!("{} must contain letters only.", field.label()));
        }
    }

    let student_number = form.student_number.trim();
    if !student_number.is_empty() && !STUDENT_NUMBER_PATTERN.is_match(student_number) {
        errors.insert(Field::StudentNumber, STUDENT_NUMBER_MESSAGE);
    }

    let age = form.age.trim();
    let parsed_age = if age.is_empty() {
        None
    } else {
        let parsed = parse_age(age);
        if parsed.is_none() {
            errors.insert(Field::Age, AGE_MESSAGE);
        }
        parsed
    };

    let contact = form.contact.trim();
    if !contact.is_empty() && !CONTACT_PATTERN.is_match(contact) {
        errors.insert(Field::Contact, CONTACT_MESSAGE);
    }

    let email = form.email.trim();
    if !email.is_empty() && !is_valid_email(email) {
        errors.insert(Field::Email, EMAIL_MESSAGE);
    }

    let age = match parsed_age {
        Some(age) if errors.is_empty() => age,
        _ => {
            tracing::debug!(
                failing_fields = errors.len(),
                "Registration form failed validation"
            );
            return Err(errors);
        }
    };

    let gender = form.gender.trim();

    Ok(StudentRecord {
        first_name: form.first_name.trim().to_string(),
        middle_name: form.middle_name.trim().to_string(),
        last_name: form.last_name.trim().to_string(),
        student_number: student_number.to_string(),
        age,
        gender: (!gender.is_empty()).then(|| gender.to_string()),
        address: form.address.trim().to_string(),
        contact: contact.to_string(),
        email: email.to_string(),
        course: form.course.trim().to_string(),
    })
}

/// Strict integer parse: optional sign, no leading zeros, inside [`AGE_RANGE`].
fn parse_age(value: &str) -> Option<u8> {
    if !INTEGER_PATTERN.is_match(value) {
        tracing::debug!("Age validation failed: not a plain integer");
        return None;
    }

    let age = value.parse::<i64>().ok()?;
    if !AGE_RANGE.contains(&age) {
        tracing::debug!(age, "Age validation failed: out of range");
        return None;
    }

    u8::try_from(age).ok()
}

const LOCAL_PART_SYMBOLS: &str = "!#$%&'*+/=?^_`{|}~-";

pub(crate) fn is_valid_email(value: &str) -> bool {
    let len = value.len();
    if !(3..=254).contains(&len) {
        tracing::debug!(length = len, "Email validation failed: invalid length");
        return false;
    }

    let mut parts = value.split('@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        tracing::debug!("Email validation failed: missing @");
        return false;
    };
    if parts.next().is_some() {
        tracing::debug!("Email validation failed: multiple @ symbols");
        return false;
    }

    is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_valid_local_part(local: &str) -> bool {
    if local.is_empty() || local.len() > 64 {
        tracing::debug!(
            length = local.len(),
            "Email validation failed: invalid local part length"
        );
        return false;
    }

    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        tracing::debug!("Email validation failed: misplaced dot in local part");
        return false;
    }

    let allowed = local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || LOCAL_PART_SYMBOLS.contains(c));
    if !allowed {
        tracing::debug!("Email validation failed: invalid characters in local part");
    }
    allowed
}

fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        tracing::debug!("Email validation failed: domain has no dot");
        return false;
    }

    let valid = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    if !valid {
        tracing::debug!(
            label_count = labels.len(),
            "Email validation failed: invalid domain label"
        );
    }
    valid
}
