use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const DONE: &str = "done";

/// Storage key of the progress marker for one user and batch.
#[must_use]
pub fn progress_key(username: &str, batch_id: &str) -> String {
    format!("tryout_progress_{username}_{batch_id}")
}

/// Which subtests of a batch a user has finished. Maps subtest id to `"done"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressMarker(BTreeMap<String, String>);

impl ProgressMarker {
    #[must_use]
    pub fn is_done(&self, subtest_id: &str) -> bool {
        self.0.get(subtest_id).is_some_and(|state| state == DONE)
    }

    pub fn mark_done(&mut self, subtest_id: &str) {
        self.0.insert(subtest_id.to_string(), DONE.to_string());
    }

    #[must_use]
    pub fn done_count(&self) -> usize {
        self.0.values().filter(|state| *state == DONE).count()
    }
}
