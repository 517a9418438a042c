//! Override registry — Magic Mode forced outcomes
//!
//! Maps a future spin number to the candidate that must win it. Entries are
//! one-shot: the resolver removes an entry when its spin number is resolved,
//! whether or not the target was still on the wheel.
//!
//! `OverridePattern` is a small declarative layer that expands into entries:
//!
//! - `Single` — one spin, one target
//! - `Alternating` — `count` spins from `start`, first/second/first/…
//! - `Specific` — an explicit list of spins, all for one target; spins that
//!   are already in the past are dropped

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use dw_core::{WheelError, WheelResult};

/// Upper bound on spins a single `Alternating` pattern may cover
pub const MAX_PATTERN_SPINS: u64 = 1_000;

/// Declarative override rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OverridePattern {
    Single {
        spin: u64,
        target: String,
    },
    Alternating {
        start: u64,
        count: u64,
        first: String,
        second: String,
    },
    Specific {
        spins: Vec<u64>,
        target: String,
    },
}

/// Spin number → forced target
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideRegistry {
    entries: BTreeMap<u64, String>,
}

impl OverrideRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, spin: u64) -> Option<&str> {
        self.entries.get(&spin).map(String::as_str)
    }

    pub fn contains(&self, spin: u64) -> bool {
        self.entries.contains_key(&spin)
    }

    /// Entries in spin order
    pub fn iter(&self) -> impl Iterator<Item = (u64, &str)> {
        self.entries.iter().map(|(spin, target)| (*spin, target.as_str()))
    }

    /// Set the target for one spin. A later write for the same spin wins.
    pub fn set(&mut self, spin: u64, target: &str) -> WheelResult<()> {
        let target = validate_target(target)?;
        validate_spin(spin)?;
        self.entries.insert(spin, target);
        Ok(())
    }

    /// Remove and return the entry for `spin`
    pub fn take(&mut self, spin: u64) -> Option<String> {
        self.entries.remove(&spin)
    }

    pub fn remove(&mut self, spin: u64) -> bool {
        self.entries.remove(&spin).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Expand `pattern` into entries
    ///
    /// `next_spin` is the number the upcoming spin will receive; `Specific`
    /// silently drops anything below it. The pattern is validated as a whole
    /// before anything is written. Returns the number of distinct spins
    /// written; a spin listed twice counts once.
    pub fn apply(&mut self, pattern: &OverridePattern, next_spin: u64) -> WheelResult<usize> {
        let expanded: BTreeMap<u64, String> = expand(pattern, next_spin)?.into_iter().collect();
        let written = expanded.len();
        for (spin, target) in expanded {
            self.entries.insert(spin, target);
        }
        log::debug!("Override pattern wrote {} entries", written);
        Ok(written)
    }
}

fn expand(pattern: &OverridePattern, next_spin: u64) -> WheelResult<Vec<(u64, String)>> {
    match pattern {
        OverridePattern::Single { spin, target } => {
            validate_spin(*spin)?;
            Ok(vec![(*spin, validate_target(target)?)])
        }
        OverridePattern::Alternating {
            start,
            count,
            first,
            second,
        } => {
            validate_spin(*start)?;
            if *count > MAX_PATTERN_SPINS {
                return Err(WheelError::validation(format!(
                    "pattern covers {} spins (max {})",
                    count, MAX_PATTERN_SPINS
                )));
            }
            if start.checked_add(count.saturating_sub(1)).is_none() {
                return Err(WheelError::validation("pattern runs past the last spin number"));
            }
            let first = validate_target(first)?;
            let second = validate_target(second)?;
            Ok((0..*count)
                .map(|offset| {
                    let target = if offset % 2 == 0 { &first } else { &second };
                    (start + offset, target.clone())
                })
                .collect())
        }
        OverridePattern::Specific { spins, target } => {
            let target = validate_target(target)?;
            for spin in spins {
                validate_spin(*spin)?;
            }
            Ok(spins
                .iter()
                .filter(|&&spin| spin >= next_spin)
                .map(|&spin| (spin, target.clone()))
                .collect())
        }
    }
}

fn validate_spin(spin: u64) -> WheelResult<()> {
    if spin == 0 {
        return Err(WheelError::validation("spin numbers start at 1"));
    }
    Ok(())
}

/// Targets are matched exactly against candidate names, which are stored
/// trimmed, so targets are trimmed the same way.
fn validate_target(target: &str) -> WheelResult<String> {
    let target = target.trim();
    if target.is_empty() {
        return Err(WheelError::validation("override target is empty"));
    }
    Ok(target.to_string())
}

/// Parse a user-entered list of spin numbers
///
/// Tokens are separated by commas and/or whitespace. Every token must be a
/// positive integer; anything else rejects the whole list.
pub fn parse_spin_numbers(input: &str) -> WheelResult<Vec<u64>> {
    let mut spins = Vec::new();
    for token in input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let spin: u64 = token
            .parse()
            .map_err(|_| WheelError::validation(format!("'{}' is not a spin number", token)))?;
        validate_spin(spin)?;
        spins.push(spin);
    }

    if spins.is_empty() {
        return Err(WheelError::validation("no spin numbers given"));
    }
    Ok(spins)
}
