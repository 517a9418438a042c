//! Presentation contract — handing a decided outcome to the animation layer
//!
//! The engine decides first; the animation only shows that decision. A
//! `SpinDirective` tells the adapter where the pointer must come to rest.
//! Nothing an adapter does can reach back into resolution, so abandoning an
//! animation never re-resolves or duplicates a record.
//!
//! Sector `i` spans `[i * w, (i + 1) * w)` degrees with `w = 360 / n`, in
//! candidate order.

use rand::Rng;
use serde::{Deserialize, Serialize};

use dw_core::WheelSettings;

use crate::resolver::Resolution;

/// Fraction of the half-width a forced stop may stray from the sector centre
pub const FORCED_JITTER_FRACTION: f64 = 0.35;

/// Fraction of the sector width kept clear at each edge for random stops
pub const EDGE_MARGIN_FRACTION: f64 = 0.05;

/// Angular slice owned by one candidate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub index: usize,
    pub start_deg: f64,
    pub end_deg: f64,
}

impl Sector {
    pub fn width(&self) -> f64 {
        self.end_deg - self.start_deg
    }

    pub fn center(&self) -> f64 {
        self.start_deg + self.width() / 2.0
    }

    /// Strictly inside the sector (edges excluded)
    pub fn contains_strict(&self, angle_deg: f64) -> bool {
        angle_deg > self.start_deg && angle_deg < self.end_deg
    }
}

/// Equal-sector wheel layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelGeometry {
    segments: usize,
}

impl WheelGeometry {
    /// Layout for `segments` candidates. Returns `None` for an empty wheel.
    pub fn new(segments: usize) -> Option<Self> {
        (segments > 0).then_some(Self { segments })
    }

    pub fn segments(&self) -> usize {
        self.segments
    }

    pub fn sector_width(&self) -> f64 {
        360.0 / self.segments as f64
    }

    pub fn sector(&self, index: usize) -> Option<Sector> {
        (index < self.segments).then(|| {
            let width = self.sector_width();
            Sector {
                index,
                start_deg: index as f64 * width,
                end_deg: (index + 1) as f64 * width,
            }
        })
    }

    /// Sector under `angle_deg` (any angle, normalized)
    pub fn sector_at(&self, angle_deg: f64) -> usize {
        let normalized = angle_deg.rem_euclid(360.0);
        ((normalized / self.sector_width()) as usize).min(self.segments - 1)
    }
}

/// Pick the resting angle for the winner's sector
///
/// Forced outcomes land near the centre with a small jitter so they do not
/// look snapped; random outcomes land anywhere inside the sector. Either way
/// the angle stays strictly inside the sector.
pub fn plan_stop_angle<R: Rng>(sector: Sector, forced: bool, rng: &mut R) -> f64 {
    let width = sector.width();
    if forced {
        let reach = width / 2.0 * FORCED_JITTER_FRACTION;
        sector.center() + rng.random_range(-reach..reach)
    } else {
        let margin = width * EDGE_MARGIN_FRACTION;
        rng.random_range((sector.start_deg + margin)..(sector.end_deg - margin))
    }
}

/// Everything an animation needs to show one decided spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinDirective {
    pub spin_number: u64,
    pub winner: String,
    pub winner_index: usize,
    pub forced: bool,
    /// Resting angle within the winner's sector
    pub stop_angle_deg: f64,
    /// Full rotations plus the resting angle
    pub total_rotation_deg: f64,
    pub duration_secs: u32,
    pub rotations: u32,
    pub sound_enabled: bool,
}

impl SpinDirective {
    /// Build the directive for a resolution made against `segments` candidates
    pub fn plan<R: Rng>(
        resolution: &Resolution,
        segments: usize,
        settings: &WheelSettings,
        rng: &mut R,
    ) -> Option<Self> {
        let sector = WheelGeometry::new(segments)?.sector(resolution.winner_index)?;
        let stop_angle_deg = plan_stop_angle(sector, resolution.forced, rng);

        Some(Self {
            spin_number: resolution.spin_number,
            winner: resolution.winner.clone(),
            winner_index: resolution.winner_index,
            forced: resolution.forced,
            stop_angle_deg,
            total_rotation_deg: settings.spin_count as f64 * 360.0 + stop_angle_deg,
            duration_secs: settings.spin_duration,
            rotations: settings.spin_count,
            sound_enabled: settings.sound_enabled,
        })
    }
}

/// Animation layer
///
/// Receives a decided outcome and renders it. Implementations own no engine
/// state and return nothing into the decision.
pub trait PresentationAdapter {
    fn present(&mut self, directive: &SpinDirective);
}
