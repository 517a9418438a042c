//! # dw-engine — Spin Outcome Engine for the decision wheel
//!
//! Decides which candidate wins a spin, whether that choice was a genuine
//! random pick or a Magic Mode override, and hands the decision to the
//! presentation layer before any animation starts.
//!
//! ## Architecture
//!
//! ```text
//! WheelSession (one per user session)
//!     │
//!     ├── CandidateSet     (ordered entrants, duplicate policy)
//!     ├── SpinSequencer    (spin numbers, reset on structural edits)
//!     ├── OverrideRegistry (spin number → forced target)
//!     └── ResultLog        (append-only SpinRecord history)
//!           │
//!           v
//!     resolve() → Resolution → SpinDirective → PresentationAdapter
//! ```

pub mod candidates;
pub mod overrides;
pub mod presentation;
pub mod resolver;
pub mod results;
pub mod sequencer;
pub mod session;
pub mod templates;

pub use candidates::*;
pub use overrides::*;
pub use presentation::*;
pub use resolver::*;
pub use results::*;
pub use sequencer::*;
pub use session::*;
pub use templates::*;
