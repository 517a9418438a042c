//! Candidate set — ordered entrants on the wheel
//!
//! A candidate's index decides its sector, so order is load-bearing.
//! The owning session resets its sequencer after every structural edit.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use dw_core::{WheelError, WheelResult};

/// Duplicate handling for `add`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    #[default]
    Allow,
    /// Reject exact (case-sensitive) repeats
    Forbid,
}

impl DuplicatePolicy {
    pub fn from_allow(allow_duplicates: bool) -> Self {
        if allow_duplicates {
            Self::Allow
        } else {
            Self::Forbid
        }
    }
}

/// Ordered list of entrants
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSet {
    names: Vec<String>,
    #[serde(default)]
    policy: DuplicatePolicy,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set built from a name list, in order
    ///
    /// Names are trimmed and blanks dropped, matching `add`. No dedup is
    /// applied.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| {
                    let n: String = n.into();
                    n.trim().to_string()
                })
                .filter(|n| !n.is_empty())
                .collect(),
            policy: DuplicatePolicy::Allow,
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Change the duplicate policy. Existing entries are left as they are.
    pub fn set_policy(&mut self, policy: DuplicatePolicy) {
        self.policy = policy;
    }

    // ═══════════════════════════════════════════════════════════════════════
    // QUERIES
    // ═══════════════════════════════════════════════════════════════════════

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Index of the first exact match
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // MUTATION
    // ═══════════════════════════════════════════════════════════════════════

    /// Append a name
    ///
    /// The name is trimmed; a blank name is a validation error. Under
    /// `DuplicatePolicy::Forbid` an exact repeat is rejected without mutation.
    pub fn add(&mut self, name: &str) -> WheelResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WheelError::validation("name is empty"));
        }
        if self.policy == DuplicatePolicy::Forbid && self.contains(name) {
            return Err(WheelError::DuplicateRejected(name.to_string()));
        }
        self.names.push(name.to_string());
        Ok(())
    }

    /// Replace the whole list
    ///
    /// Entries are trimmed and blanks dropped; no dedup is applied even under
    /// `Forbid`. If nothing usable remains the current list is kept and a
    /// validation error is returned.
    pub fn replace_all<I, S>(&mut self, names: I) -> WheelResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cleaned: Vec<String> = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();

        if cleaned.is_empty() {
            return Err(WheelError::validation("please enter at least one name"));
        }
        self.names = cleaned;
        Ok(())
    }

    /// Remove the first occurrence of `name`. Returns whether anything was removed.
    pub fn remove_first(&mut self, name: &str) -> bool {
        match self.index_of(name) {
            Some(index) => {
                self.names.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.names.shuffle(rng);
    }

    /// Sort by byte-wise string order
    pub fn sort_lexicographic(&mut self) {
        self.names.sort();
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }
}

/// Split free-form input into names
///
/// Accepts one name per line and/or comma-separated names. Entries are
/// trimmed and blanks dropped.
pub fn parse_names(input: &str) -> Vec<String> {
    input
        .split(['\n', ','])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
