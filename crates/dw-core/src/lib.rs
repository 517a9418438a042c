//! dw-core: Shared types for the decision wheel
//!
//! Provides the error taxonomy, the uniform spin record, wheel settings
//! and the Magic Mode access gate used by the engine and state crates.

mod error;
mod mode;
mod record;
mod settings;

pub use error::*;
pub use mode::*;
pub use record::*;
pub use settings::*;
