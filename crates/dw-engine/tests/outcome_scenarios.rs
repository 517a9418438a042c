//! Spin Outcome Engine scenarios
//!
//! End-to-end behaviour through the public session API:
//! - Uniformity of organic picks (chi-squared)
//! - Magic Mode overrides, stale targets, one-shot consumption
//! - Sequencer resets on structural edits
//! - Winner removal
//! - Presentation hand-off

use dw_core::{EngineMode, WheelError, WheelSettings};
use dw_engine::{
    CandidateSet, OverridePattern, OverrideRegistry, PresentationAdapter, SpinDirective,
    WheelGeometry, WheelSession, resolve,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ═══════════════════════════════════════════════════════════════════════════════
// TEST FIXTURES
// ═══════════════════════════════════════════════════════════════════════════════

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const SECRET: &str = "letmein";

fn magic_session(names: &[&str]) -> WheelSession {
    let mut session = WheelSession::with_names(names.iter().copied());
    session.seed(2024);
    session.set_magic_secret(SECRET);
    assert!(session.unlock_magic(SECRET));
    session.set_magic_enabled(true);
    assert_eq!(session.mode(), EngineMode::Magic);
    session
}

#[derive(Default)]
struct RecordingAdapter {
    directives: Vec<SpinDirective>,
}

impl PresentationAdapter for RecordingAdapter {
    fn present(&mut self, directive: &SpinDirective) {
        self.directives.push(directive.clone());
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// FAIRNESS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_normal_mode_is_uniform() {
    init_logging();
    let candidates = CandidateSet::from_names(["Alice", "Bob", "Charlie", "Diana", "Ethan"]);
    let mut overrides = OverrideRegistry::new();
    let mut rng = ChaCha8Rng::seed_from_u64(0xD15C);

    let trials = 20_000usize;
    let mut counts = [0usize; 5];
    for spin in 1..=trials as u64 {
        let res = resolve(spin, &candidates, &mut overrides, EngineMode::Normal, &mut rng).unwrap();
        assert!(!res.forced);
        counts[res.winner_index] += 1;
    }

    let expected = trials as f64 / counts.len() as f64;
    let chi_squared: f64 = counts
        .iter()
        .map(|&c| {
            let diff = c as f64 - expected;
            diff * diff / expected
        })
        .sum();

    // df = 4, p = 0.001
    assert!(chi_squared < 18.47, "chi² = {chi_squared}, counts = {counts:?}");
}

#[test]
fn test_session_spins_cover_every_candidate() {
    let mut session = WheelSession::with_names(["Alice", "Bob", "Amy"]);
    session.seed(7);

    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
        seen.insert(session.spin().unwrap().resolution.winner);
    }
    assert_eq!(seen.len(), 3);
}

// ═══════════════════════════════════════════════════════════════════════════════
// MAGIC MODE
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_override_on_first_spin() {
    init_logging();
    let mut session = magic_session(&["Alice", "Bob", "Amy"]);
    session.set_override(1, "Amy").unwrap();

    let outcome = session.spin().unwrap();
    assert_eq!(outcome.resolution.spin_number, 1);
    assert_eq!(outcome.resolution.winner, "Amy");
    assert!(outcome.resolution.forced);
    assert!(!session.overrides().contains(1));

    let record = session.results().last().unwrap();
    assert!(record.forced);
    assert_eq!(record.winner, "Amy");
}

#[test]
fn test_override_target_missing_falls_back() {
    init_logging();
    let mut session = magic_session(&["Alice", "Bob", "Amy"]);
    session.set_override(5, "Zoe").unwrap();

    for _ in 0..4 {
        assert!(!session.spin().unwrap().resolution.forced);
    }
    assert!(session.overrides().contains(5));

    let outcome = session.spin().unwrap();
    assert_eq!(outcome.resolution.spin_number, 5);
    assert!(!outcome.resolution.forced);
    assert!(outcome.resolution.override_missed);
    assert!(["Alice", "Bob", "Amy"].contains(&outcome.resolution.winner.as_str()));
    assert!(!session.overrides().contains(5));

    let record = session.results().last().unwrap();
    assert!(!record.forced);
    assert!(record.override_missed);
}

#[test]
fn test_override_target_removed_after_setting() {
    let mut session = magic_session(&["Alice", "Bob", "Amy"]);
    session.set_override(1, "Amy").unwrap();
    session.replace_all(["Alice", "Bob"]).unwrap();

    let outcome = session.spin().unwrap();
    assert!(!outcome.resolution.forced);
    assert!(session.overrides().is_empty());
}

#[test]
fn test_alternating_pattern_drives_spins() {
    let mut session = magic_session(&["A", "B", "C"]);
    session
        .apply_override_pattern(&OverridePattern::Alternating {
            start: 2,
            count: 4,
            first: "A".into(),
            second: "B".into(),
        })
        .unwrap();

    let entries: Vec<(u64, String)> = session
        .overrides()
        .iter()
        .map(|(s, t)| (s, t.to_string()))
        .collect();
    assert_eq!(
        entries,
        vec![
            (2, "A".to_string()),
            (3, "B".to_string()),
            (4, "A".to_string()),
            (5, "B".to_string())
        ]
    );

    let first = session.spin().unwrap();
    assert!(!first.resolution.forced);

    let winners: Vec<String> = (0..4)
        .map(|_| {
            let outcome = session.spin().unwrap();
            assert!(outcome.resolution.forced);
            outcome.resolution.winner
        })
        .collect();
    assert_eq!(winners, vec!["A", "B", "A", "B"]);
    assert!(session.overrides().is_empty());
    assert_eq!(session.results().forced_count(), 4);
}

#[test]
fn test_overrides_are_one_shot_across_resets() {
    let mut session = magic_session(&["Alice", "Amy"]);
    session.set_override(1, "Amy").unwrap();

    assert!(session.spin().unwrap().resolution.forced);

    // list edit restarts numbering, but the consumed entry is gone
    session.add("Bob").unwrap();
    let outcome = session.spin().unwrap();
    assert_eq!(outcome.resolution.spin_number, 1);
    assert!(!outcome.resolution.forced);
}

#[test]
fn test_malformed_spin_list_leaves_registry() {
    let mut session = magic_session(&["Alice", "Amy"]);
    session.set_override(4, "Alice").unwrap();

    let err = session.set_override_spins("1, 2, x", "Amy").unwrap_err();
    assert!(err.is_validation());
    assert_eq!(session.overrides().len(), 1);
    assert_eq!(session.overrides().get(4), Some("Alice"));

    session.spin().unwrap();
    let written = session.set_override_spins("1 2 3", "Amy").unwrap();
    assert_eq!(written, 2);
    assert_eq!(session.overrides().get(2), Some("Amy"));
    assert!(!session.overrides().contains(1));
}

// ═══════════════════════════════════════════════════════════════════════════════
// SEQUENCER AND LIST POLICY
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_every_structural_edit_resets_sequencer() {
    let mut session = WheelSession::with_names(["Alice", "Bob", "Charlie"]);
    session.seed(1);

    let edits: Vec<Box<dyn Fn(&mut WheelSession)>> = vec![
        Box::new(|s: &mut WheelSession| s.add("Diana").unwrap()),
        Box::new(|s: &mut WheelSession| s.replace_all(["Eve", "Finn"]).unwrap()),
        Box::new(|s: &mut WheelSession| s.shuffle()),
        Box::new(|s: &mut WheelSession| s.sort()),
        Box::new(|s: &mut WheelSession| s.replace_from_text("Gus, Hal\nIvy").unwrap()),
    ];

    for edit in &edits {
        session.spin().unwrap();
        session.spin().unwrap();
        edit(&mut session);
        assert_eq!(session.spin().unwrap().resolution.spin_number, 1);
    }

    session.clear();
    assert_eq!(session.spin_number(), 0);
    assert!(matches!(session.spin(), Err(WheelError::EmptyCandidateSet)));
    assert!(session.results().is_empty());
}

#[test]
fn test_remove_winner_never_repeats() {
    let mut session = WheelSession::with_names(["Alice", "Bob", "Amy", "Dan"]);
    session.seed(99);
    session.set_settings(WheelSettings {
        remove_winner: true,
        ..Default::default()
    });

    let mut winners = Vec::new();
    for _ in 0..4 {
        winners.push(session.spin().unwrap().resolution.winner);
    }
    winners.sort();
    assert_eq!(winners, vec!["Alice", "Amy", "Bob", "Dan"]);
    assert!(session.candidates().is_empty());
    assert!(matches!(session.spin(), Err(WheelError::EmptyCandidateSet)));
    assert_eq!(session.results().len(), 4);
}

// ═══════════════════════════════════════════════════════════════════════════════
// PRESENTATION
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_presentation_lands_on_winner() {
    let mut session = magic_session(&["Alice", "Bob", "Amy", "Dan", "Eve"]);
    session.set_override(3, "Dan").unwrap();

    let mut adapter = RecordingAdapter::default();
    for _ in 0..10 {
        session.spin_and_present(&mut adapter).unwrap();
    }
    assert_eq!(adapter.directives.len(), 10);

    let geometry = WheelGeometry::new(5).unwrap();
    for (directive, record) in adapter.directives.iter().zip(session.results().records()) {
        assert_eq!(directive.winner, record.winner);
        assert_eq!(directive.forced, record.forced);
        assert_eq!(geometry.sector_at(directive.stop_angle_deg), directive.winner_index);
        assert_eq!(
            session.candidates().get(directive.winner_index),
            Some(directive.winner.as_str())
        );
    }
    assert!(adapter.directives[2].forced);
    assert_eq!(adapter.directives[2].winner, "Dan");
}

#[test]
fn test_presentation_uses_pre_removal_layout() {
    let mut session = WheelSession::with_names(["Alice", "Bob", "Amy"]);
    session.seed(3);
    session.set_settings(WheelSettings {
        remove_winner: true,
        ..Default::default()
    });

    let mut adapter = RecordingAdapter::default();
    let outcome = session.spin_and_present(&mut adapter).unwrap();

    let directive = &adapter.directives[0];
    let geometry = WheelGeometry::new(outcome.segments).unwrap();
    assert_eq!(outcome.segments, 3);
    assert_eq!(geometry.sector_at(directive.stop_angle_deg), outcome.resolution.winner_index);
}

#[test]
fn test_abandoned_animation_does_not_duplicate() {
    struct AbandoningAdapter;

    impl PresentationAdapter for AbandoningAdapter {
        fn present(&mut self, _directive: &SpinDirective) {}
    }

    let mut session = WheelSession::with_names(["Alice", "Bob"]);
    session.seed(5);
    session.spin_and_present(&mut AbandoningAdapter).unwrap();

    assert_eq!(session.results().len(), 1);
    assert_eq!(session.spin_number(), 1);
}
