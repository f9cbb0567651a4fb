/// Programmes offered on the course selector.
pub const COURSES: [&str; 8] = [
    "Bachelor of Science in Information Technology",
    "Bachelor of Science in Computer Engineering",
    "Bachelor of Secondary Education Major in Science",
    "Bachelor of Elementary Education (Generalist)",
    "Bachelor of Technology and Livelihood Education Major in ICT",
    "Teacher Certificate Program (18 Units)",
    "BSBA Major in HRM",
    "Bachelor of Science in Entrepreneurship",
];

pub const GENDERS: [&str; 3] = ["Male", "Female", "Other"];

/// An accepted registration. Only the validator constructs these, so every
/// value held here has passed all field rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub student_number: String,
    pub age: u8,
    pub gender: Option<String>,
    pub address: String,
    pub contact: String,
    pub email: String,
    pub course: String,
}

impl StudentRecord {
    pub fn full_name(&self) -> String {
        format!(
            "{} {} {}",
            self.first_name, self.middle_name, self.last_name
        )
    }

    pub fn gender_or_blank(&self) -> &str {
        self.gender.as_deref().unwrap_or("")
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_joins_with_single_spaces() {
        assert_eq!(fixtures::ana().full_name(), "Ana Lopez Cruz");
    }

    #[test]
    fn test_unset_gender_renders_blank() {
        let mut record = fixtures::ana();
        record.gender = None;
        assert_eq!(record.gender_or_blank(), "");
    }
}
