pub mod store;

use crate::models::student::StudentRecord;

pub use store::SessionStore;

/// Accepted registrations for one session, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    records: Vec<StudentRecord>,
}

impl Roster {
    /// Adds `record` after every earlier one. No deduplication.
    pub fn append(&mut self, record: StudentRecord) {
        self.records.push(record);
    }

    pub fn list(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Everything the server keeps for one browser session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub roster: Roster,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::student::fixtures::ana;

    #[test]
    fn test_append_preserves_insertion_order() {
        let mut roster = Roster::default();
        let mut second = ana();
        second.student_number = "27-00001".to_string();

        roster.append(ana());
        roster.append(second);

        let numbers: Vec<_> = roster
            .list()
            .iter()
            .map(|record| record.student_number.as_str())
            .collect();
        assert_eq!(numbers, vec!["24-00015", "27-00001"]);
    }

    #[test]
    fn test_append_keeps_duplicates() {
        let mut roster = Roster::default();
        roster.append(ana());
        roster.append(ana());
        assert_eq!(roster.len(), 2);
    }
}
