use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub name: String,
}

impl Record {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The table shown when no seed file is configured.
pub fn default_seed() -> Vec<Record> {
    (1..=6)
        .map(|n| Record::new(format!("id-{}", n), format!("Row {}", n)))
        .collect()
}

/// Returns the first id that appears more than once, if any.
pub fn find_duplicate_id(records: &[Record]) -> Option<&str> {
    let mut seen = std::collections::HashSet::new();
    records
        .iter()
        .find(|record| !seen.insert(record.id.as_str()))
        .map(|record| record.id.as_str())
}
