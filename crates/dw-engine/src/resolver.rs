//! Outcome resolver — the decision core
//!
//! Picks the winner for one spin number. In Magic Mode an override entry for
//! the spin is consulted first and consumed regardless of whether its target
//! is still on the wheel; otherwise (or on a stale target) the pick is
//! uniform over the current candidates.

use rand::Rng;
use serde::{Deserialize, Serialize};

use dw_core::{EngineMode, SpinRecord, WheelError, WheelResult};

use crate::candidates::CandidateSet;
use crate::overrides::OverrideRegistry;

/// Decision for one spin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub spin_number: u64,
    /// Sector index of the winner at resolution time
    pub winner_index: usize,
    pub winner: String,
    /// Winner came from the override registry
    pub forced: bool,
    /// An override was pending but its target was missing
    pub override_missed: bool,
}

impl Resolution {
    /// Record for the result log, stamped now
    pub fn to_record(&self) -> SpinRecord {
        SpinRecord::new(self.spin_number, self.winner.clone(), self.forced)
            .with_override_missed(self.override_missed)
    }
}

/// Resolve the winner of `spin_number`
///
/// Fails with `EmptyCandidateSet` (touching nothing) when there is no one to
/// pick. Logging the result and removing the winner are up to the caller.
pub fn resolve<R: Rng>(
    spin_number: u64,
    candidates: &CandidateSet,
    overrides: &mut OverrideRegistry,
    mode: EngineMode,
    rng: &mut R,
) -> WheelResult<Resolution> {
    if candidates.is_empty() {
        return Err(WheelError::EmptyCandidateSet);
    }

    let mut override_missed = false;

    if mode == EngineMode::Magic {
        if let Some(target) = overrides.take(spin_number) {
            if let Some(index) = candidates.index_of(&target) {
                log::debug!("Spin #{}: override applied (index {})", spin_number, index);
                return Ok(Resolution {
                    spin_number,
                    winner_index: index,
                    winner: target,
                    forced: true,
                    override_missed: false,
                });
            }
            log::warn!(
                "Spin #{}: override target '{}' not on the wheel, falling back to random",
                spin_number,
                target
            );
            override_missed = true;
        }
    }

    let index = rng.random_range(0..candidates.len());
    let winner = candidates
        .get(index)
        .ok_or(WheelError::EmptyCandidateSet)?
        .to_string();
    log::debug!("Spin #{}: random pick index {}", spin_number, index);

    Ok(Resolution {
        spin_number,
        winner_index: index,
        winner,
        forced: false,
        override_missed,
    })
}
