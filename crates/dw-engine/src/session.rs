//! Wheel session — the per-user engine context
//!
//! Owns the candidate set, sequencer, override registry, result log,
//! settings and Magic Mode gate. There is no ambient state: every UI
//! session gets its own `WheelSession`.
//!
//! Every structural candidate edit (add, bulk replace, shuffle, sort, clear,
//! template load, import) resets the sequencer, so the next spin is #1 again.
//! Removing a winner after a spin does not.

use std::sync::Arc;

use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use dw_core::{EngineMode, MagicGate, SpinRecord, WheelError, WheelResult, WheelSettings};

use crate::candidates::{CandidateSet, DuplicatePolicy, parse_names};
use crate::overrides::{OverridePattern, OverrideRegistry, parse_spin_numbers};
use crate::presentation::{PresentationAdapter, SpinDirective};
use crate::resolver::{Resolution, resolve};
use crate::results::ResultLog;
use crate::sequencer::SpinSequencer;
use crate::templates::{DEFAULT_NAMES, RESET_NAMES, find_template};

/// Lifecycle of the most recent spin attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "phase", content = "spin", rename_all = "snake_case")]
pub enum SpinPhase {
    #[default]
    Idle,
    /// Spin requested, outcome not yet decided. Never reported by
    /// `WheelSession::phase`, since `spin` resolves within one `&mut self`
    /// call; available to front ends that track a request themselves.
    Resolving,
    /// Terminal for that spin number
    Resolved(u64),
    /// Refused: no candidates
    Blocked,
}

/// Result of one spin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinOutcome {
    pub resolution: Resolution,
    /// Candidate count the resolution was made against
    pub segments: usize,
    /// Winner was taken off the wheel afterwards
    pub winner_removed: bool,
}

/// Per-session engine context
pub struct WheelSession {
    candidates: CandidateSet,
    sequencer: SpinSequencer,
    overrides: OverrideRegistry,
    results: ResultLog,
    settings: WheelSettings,
    gate: MagicGate,
    phase: SpinPhase,
    rng: StdRng,
}

impl WheelSession {
    /// Session with the default name list
    pub fn new() -> Self {
        Self::with_names(DEFAULT_NAMES)
    }

    /// Session starting from `names` (trimmed, blanks dropped)
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let settings = WheelSettings::default();
        let mut candidates = CandidateSet::from_names(names);
        candidates.set_policy(DuplicatePolicy::from_allow(settings.allow_duplicates));

        Self {
            candidates,
            sequencer: SpinSequencer::new(),
            overrides: OverrideRegistry::new(),
            results: ResultLog::new(),
            settings,
            gate: MagicGate::default(),
            phase: SpinPhase::Idle,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seed RNG for reproducible results
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    pub fn overrides(&self) -> &OverrideRegistry {
        &self.overrides
    }

    pub fn results(&self) -> &ResultLog {
        &self.results
    }

    pub fn settings(&self) -> &WheelSettings {
        &self.settings
    }

    /// Last allocated spin number (0 after a reset)
    pub fn spin_number(&self) -> u64 {
        self.sequencer.current()
    }

    /// Number the next spin will receive
    pub fn next_spin_number(&self) -> u64 {
        self.sequencer.peek_next()
    }

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    /// Spin control should be enabled
    pub fn can_spin(&self) -> bool {
        !self.candidates.is_empty()
    }

    pub fn gate(&self) -> &MagicGate {
        &self.gate
    }

    pub fn mode(&self) -> EngineMode {
        self.gate.mode()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // SETTINGS
    // ═══════════════════════════════════════════════════════════════════════

    /// Replace settings (clamped). Not a structural edit.
    pub fn set_settings(&mut self, settings: WheelSettings) {
        self.settings = settings.clamped();
        self.candidates
            .set_policy(DuplicatePolicy::from_allow(self.settings.allow_duplicates));
    }

    // ═══════════════════════════════════════════════════════════════════════
    // CANDIDATE EDITS
    // ═══════════════════════════════════════════════════════════════════════

    /// Add one name. A rejected add changes nothing.
    pub fn add(&mut self, name: &str) -> WheelResult<()> {
        self.candidates.add(name)?;
        self.structural_reset("add");
        Ok(())
    }

    /// Replace the list. An all-blank list changes nothing.
    pub fn replace_all<I, S>(&mut self, names: I) -> WheelResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.candidates.replace_all(names)?;
        self.structural_reset("replace");
        Ok(())
    }

    /// Replace the list from free-form text (lines and/or commas)
    pub fn replace_from_text(&mut self, text: &str) -> WheelResult<()> {
        self.replace_all(parse_names(text))
    }

    pub fn shuffle(&mut self) {
        self.candidates.shuffle(&mut self.rng);
        self.structural_reset("shuffle");
    }

    pub fn sort(&mut self) {
        self.candidates.sort_lexicographic();
        self.structural_reset("sort");
    }

    /// Full reset: empties candidates, results and overrides
    pub fn clear(&mut self) {
        self.candidates.clear();
        self.results.clear();
        self.overrides.clear();
        self.structural_reset("clear");
    }

    /// Install the short default list and drop history and overrides
    pub fn reset_to_defaults(&mut self) {
        self.candidates = CandidateSet::from_names(RESET_NAMES);
        self.candidates
            .set_policy(DuplicatePolicy::from_allow(self.settings.allow_duplicates));
        self.results.clear();
        self.overrides.clear();
        self.structural_reset("reset to defaults");
    }

    /// Replace the list with a built-in template
    pub fn load_template(&mut self, name: &str) -> WheelResult<()> {
        let template = find_template(name)?;
        self.replace_all(&template.names)?;
        log::info!("Loaded template '{}'", template.name);
        Ok(())
    }

    /// Install imported state
    ///
    /// Names are installed trimmed (blanks dropped, may end up empty), the
    /// result log is replaced, overrides are discarded and the sequencer
    /// resets. Callers validate the whole import before calling this.
    pub fn apply_import(&mut self, names: Vec<String>, settings: WheelSettings, results: ResultLog) {
        self.set_settings(settings);
        self.candidates = CandidateSet::from_names(names);
        self.candidates
            .set_policy(DuplicatePolicy::from_allow(self.settings.allow_duplicates));
        self.results = results;
        self.overrides.clear();
        self.structural_reset("import");
    }

    fn structural_reset(&mut self, reason: &str) {
        self.sequencer.reset();
        self.phase = SpinPhase::Idle;
        log::debug!("Spin counter reset ({})", reason);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // MAGIC MODE
    // ═══════════════════════════════════════════════════════════════════════

    /// Configure the shared secret. Locks the gate.
    pub fn set_magic_secret(&mut self, secret: impl Into<String>) {
        self.gate.set_secret(secret);
    }

    pub fn unlock_magic(&mut self, attempt: &str) -> bool {
        self.gate.unlock(attempt)
    }

    pub fn lock_magic(&mut self) {
        self.gate.lock();
    }

    pub fn set_magic_enabled(&mut self, enabled: bool) {
        self.gate.set_enabled(enabled);
    }

    fn require_unlocked(&self) -> WheelResult<()> {
        if !self.gate.is_unlocked() {
            return Err(WheelError::validation("magic mode is locked"));
        }
        Ok(())
    }

    /// Force the winner of one spin
    pub fn set_override(&mut self, spin: u64, target: &str) -> WheelResult<()> {
        self.require_unlocked()?;
        self.overrides.set(spin, target)
    }

    /// Expand a pattern into overrides relative to the next spin number
    pub fn apply_override_pattern(&mut self, pattern: &OverridePattern) -> WheelResult<usize> {
        self.require_unlocked()?;
        self.overrides.apply(pattern, self.sequencer.peek_next())
    }

    /// Force `target` on every spin listed in `spins_text`
    ///
    /// A malformed list is rejected before the registry is touched; spins
    /// that are already past are dropped.
    pub fn set_override_spins(&mut self, spins_text: &str, target: &str) -> WheelResult<usize> {
        self.require_unlocked()?;
        let spins = parse_spin_numbers(spins_text)?;
        self.apply_override_pattern(&OverridePattern::Specific {
            spins,
            target: target.to_string(),
        })
    }

    pub fn remove_override(&mut self, spin: u64) -> WheelResult<bool> {
        self.require_unlocked()?;
        Ok(self.overrides.remove(spin))
    }

    pub fn clear_overrides(&mut self) -> WheelResult<()> {
        self.require_unlocked()?;
        self.overrides.clear();
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // SPIN EXECUTION
    // ═══════════════════════════════════════════════════════════════════════

    /// Resolve the next spin
    ///
    /// Allocates the spin number, resolves, appends the record and applies
    /// winner removal as one step. With no candidates nothing changes except
    /// the phase, which becomes `Blocked`.
    pub fn spin(&mut self) -> WheelResult<SpinOutcome> {
        if self.candidates.is_empty() {
            self.phase = SpinPhase::Blocked;
            return Err(WheelError::EmptyCandidateSet);
        }

        let spin_number = self.sequencer.peek_next();
        let segments = self.candidates.len();
        let mode = self.gate.mode();

        let resolution = match resolve(
            spin_number,
            &self.candidates,
            &mut self.overrides,
            mode,
            &mut self.rng,
        ) {
            Ok(resolution) => resolution,
            Err(e) => {
                self.phase = SpinPhase::Blocked;
                return Err(e);
            }
        };
        self.sequencer.next();

        let record: SpinRecord = resolution.to_record();
        self.results.append(record);

        let winner_removed =
            self.settings.remove_winner && self.candidates.remove_first(&resolution.winner);

        self.phase = SpinPhase::Resolved(spin_number);
        log::info!(
            "Spin #{} resolved ({} candidates, mode {:?})",
            spin_number,
            segments,
            mode
        );

        Ok(SpinOutcome {
            resolution,
            segments,
            winner_removed,
        })
    }

    /// Resolve the next spin, then hand it to `adapter`
    pub fn spin_and_present<P: PresentationAdapter + ?Sized>(
        &mut self,
        adapter: &mut P,
    ) -> WheelResult<SpinOutcome> {
        let outcome = self.spin()?;
        match SpinDirective::plan(
            &outcome.resolution,
            outcome.segments,
            &self.settings,
            &mut self.rng,
        ) {
            Some(directive) => adapter.present(&directive),
            None => log::warn!(
                "Spin #{}: no sector for index {}",
                outcome.resolution.spin_number,
                outcome.resolution.winner_index
            ),
        }
        Ok(outcome)
    }
}

impl Default for WheelSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared, serialized access to one session
///
/// Every call takes the session lock for its whole duration, so two spin
/// triggers can never resolve against the same spin number or race on
/// override consumption.
#[derive(Clone)]
pub struct SessionHandle {
    inner: Arc<Mutex<WheelSession>>,
}

impl SessionHandle {
    pub fn new(session: WheelSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub fn spin(&self) -> WheelResult<SpinOutcome> {
        self.inner.lock().spin()
    }

    pub fn spin_and_present<P: PresentationAdapter + ?Sized>(
        &self,
        adapter: &mut P,
    ) -> WheelResult<SpinOutcome> {
        self.inner.lock().spin_and_present(adapter)
    }

    /// Run `f` with exclusive access to the session
    pub fn with<T>(&self, f: impl FnOnce(&mut WheelSession) -> T) -> T {
        f(&mut self.inner.lock())
    }
}
