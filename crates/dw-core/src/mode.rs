//! Engine mode and the Magic Mode access gate

use serde::{Deserialize, Serialize};

/// Resolution path selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EngineMode {
    /// Uniform random pick
    #[default]
    Normal,
    /// Override registry is consulted before the random pick
    Magic,
}

/// Magic Mode access gate
///
/// Two independent switches: `unlocked` (shared secret accepted) and
/// `enabled` (user toggle). Magic Mode is active only when both hold.
/// The secret comparison is a plain equality check.
#[derive(Debug, Clone, Default)]
pub struct MagicGate {
    secret: Option<String>,
    unlocked: bool,
    enabled: bool,
}

impl MagicGate {
    /// Gate that accepts `secret`
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Some(secret.into()),
            unlocked: false,
            enabled: false,
        }
    }

    /// Replace the secret. Locks the gate.
    pub fn set_secret(&mut self, secret: impl Into<String>) {
        self.secret = Some(secret.into());
        self.lock();
    }

    /// Try to unlock with `attempt`. Returns whether the gate is now unlocked.
    pub fn unlock(&mut self, attempt: &str) -> bool {
        self.unlocked = self.secret.as_deref().is_some_and(|s| s == attempt);
        if !self.unlocked {
            self.enabled = false;
            log::debug!("Magic gate: unlock attempt rejected");
        }
        self.unlocked
    }

    /// Lock the gate and switch Magic Mode off
    pub fn lock(&mut self) {
        self.unlocked = false;
        self.enabled = false;
    }

    /// Toggle Magic Mode. Ignored while locked.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled && self.unlocked;
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current engine mode
    pub fn mode(&self) -> EngineMode {
        if self.unlocked && self.enabled {
            EngineMode::Magic
        } else {
            EngineMode::Normal
        }
    }
}
