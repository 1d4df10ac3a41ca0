//! Materialized user directory.
//!
//! The platform hands out users page by page; the importer flattens them into
//! a lowercased name -> id map once, before any row is processed, and treats
//! the result as immutable for the rest of the run.

use std::collections::HashMap;

use super::models::UserRecord;

/// Lookup table resolving owner names to platform user ids.
///
/// Names are stored lowercased so spreadsheet authors can capitalize owners
/// however they like.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: HashMap<String, i64>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, id: i64) {
        self.users.insert(name.to_lowercase(), id);
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = UserRecord>) {
        for record in records {
            self.insert(&record.user_name, record.user_id);
        }
    }

    /// Resolve an owner name, case-insensitively.
    pub fn resolve(&self, name: &str) -> Option<i64> {
        self.users.get(&name.to_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
