//! dw-state: Decision wheel persistence
//!
//! Provides:
//! - JSON configuration export/import (names, settings, results, metadata)
//! - Tolerant import of older files (missing keys, bare-string results)
//! - Results history CSV export
//! - Timestamped export file names

pub mod config;
pub mod history;

pub use config::*;
pub use history::*;
