//! Unconfirmed delete requests.
//!
//! Maps task id to the user who asked for the deletion. Entries live until
//! confirmed or cancelled by that same user, and vanish with the process.

use std::collections::HashMap;

/// Result of a confirm or cancel attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The requester matched; the entry was removed.
    Granted,
    /// Someone else requested this delete; the entry is kept.
    NotAuthorized { requester: String },
    /// No delete is pending for this task.
    NothingPending,
}

#[derive(Debug, Default)]
pub struct PendingDeletes {
    entries: HashMap<i64, String>,
}

impl PendingDeletes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a request. A later request for the same task replaces the requester.
    pub fn request(&mut self, task_id: i64, requester: &str) {
        self.entries.insert(task_id, requester.to_string());
    }

    /// Remove the entry if `user` is the one who requested it.
    pub fn resolve(&mut self, task_id: i64, user: &str) -> Resolution {
        match self.entries.get(&task_id) {
            None => Resolution::NothingPending,
            Some(requester) if requester != user => Resolution::NotAuthorized {
                requester: requester.clone(),
            },
            Some(_) => {
                self.entries.remove(&task_id);
                Resolution::Granted
            }
        }
    }

    #[must_use]
    pub fn is_pending(&self, task_id: i64) -> bool {
        self.entries.contains_key(&task_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
