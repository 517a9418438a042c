//! Wheel configuration file
//!
//! ## Format
//!
//! ```json
//! {
//!   "names": ["Alice", "Bob"],
//!   "settings": { "spin_duration": 4, "spin_count": 8, ... },
//!   "results": [{ "spin_number": 1, "winner": "Bob", "forced": false, "timestamp": "..." }],
//!   "metadata": { "export_date": "...", "version": 1 }
//! }
//! ```
//!
//! Export always writes the full shape. Import accepts any subset of it:
//! missing settings keep their current values, results may be bare winner
//! strings, and missing metadata means version 1. The file is parsed and
//! validated completely before the session is touched, so a failed import
//! leaves prior state as it was.
//!
//! Overrides are never written and never read back.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use dw_core::{SpinRecord, WheelError, WheelResult, WheelSettings};
use dw_engine::{ResultLog, WheelSession};

/// Current configuration format version
pub const CONFIG_VERSION: u32 = 1;

/// Maximum accepted configuration file size (10MB)
const MAX_CONFIG_FILE_SIZE: u64 = 10 * 1024 * 1024;

// ============ Export ============

/// Export metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigMetadata {
    pub export_date: DateTime<Utc>,
    pub version: u32,
}

/// Snapshot of a session as written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelConfig {
    pub names: Vec<String>,
    pub settings: WheelSettings,
    pub results: Vec<SpinRecord>,
    pub metadata: ConfigMetadata,
}

impl WheelConfig {
    /// Capture the persistable part of a session
    pub fn capture(session: &WheelSession, export_date: DateTime<Utc>) -> Self {
        Self {
            names: session.candidates().as_slice().to_vec(),
            settings: session.settings().clone(),
            results: session.results().records().to_vec(),
            metadata: ConfigMetadata {
                export_date,
                version: CONFIG_VERSION,
            },
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> WheelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Export a session as pretty JSON, stamped with the current time
pub fn export_json(session: &WheelSession) -> WheelResult<String> {
    let config = WheelConfig::capture(session, Utc::now());
    let json = config.to_json()?;
    log::info!(
        "Exported configuration: {} names, {} results",
        config.names.len(),
        config.results.len()
    );
    Ok(json)
}

/// Timestamped export file name, e.g. `wheel_config_20250301_101500.json`
pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("wheel_config_{}.json", now.format("%Y%m%d_%H%M%S"))
}

// ============ Import ============

/// What an import installed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub names: usize,
    pub results: usize,
    /// Result entries skipped because they named no winner
    pub dropped_results: usize,
    pub version: u32,
}

/// Imported file, every key optional
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ImportedConfig {
    names: Vec<String>,
    settings: Map<String, Value>,
    results: Vec<ResultEntry>,
    metadata: Option<ImportedMetadata>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ImportedMetadata {
    export_date: Option<String>,
    version: Option<Value>,
}

/// A result entry as older files wrote it
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResultEntry {
    Winner(String),
    Record(PartialRecord),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PartialRecord {
    spin_number: Option<u64>,
    winner: Option<String>,
    forced: Option<bool>,
    override_missed: Option<bool>,
    timestamp: Option<String>,
}

/// Parse a timestamp leniently: RFC 3339, else a naive ISO date-time read as UTC
fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Read `metadata.version`: an integer, or a numeric string such as `"1.0"`
fn parse_version(value: &Value) -> WheelResult<u32> {
    let version = match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f as u64)),
        Value::String(s) => s
            .trim()
            .split('.')
            .next()
            .and_then(|major| major.parse::<u64>().ok()),
        _ => None,
    };
    version
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| WheelError::validation(format!("unreadable config version: {}", value)))
}

/// Normalize imported result entries into records
///
/// Spin numbers start at 1; a missing or zero number takes the entry's
/// 1-based position. Returns the records and the number of entries dropped
/// for lacking a winner.
fn normalize_results(
    entries: Vec<ResultEntry>,
    fallback_time: DateTime<Utc>,
) -> (Vec<SpinRecord>, usize) {
    let mut records = Vec::with_capacity(entries.len());
    let mut dropped = 0;

    for (position, entry) in entries.into_iter().enumerate() {
        let position = position as u64 + 1;
        let partial = match entry {
            ResultEntry::Winner(winner) => PartialRecord {
                winner: Some(winner),
                ..Default::default()
            },
            ResultEntry::Record(partial) => partial,
        };

        let winner = match partial.winner.map(|w| w.trim().to_string()) {
            Some(w) if !w.is_empty() => w,
            _ => {
                dropped += 1;
                continue;
            }
        };

        let timestamp = partial
            .timestamp
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(fallback_time);

        records.push(
            SpinRecord::new(
                partial.spin_number.filter(|&n| n >= 1).unwrap_or(position),
                winner,
                partial.forced.unwrap_or(false),
            )
            .with_override_missed(partial.override_missed.unwrap_or(false))
            .at(timestamp),
        );
    }

    (records, dropped)
}

/// Import a configuration into a session
///
/// Settings are merged over the current ones, names and results are
/// replaced, overrides are cleared and the spin counter restarts. Any
/// failure leaves the session untouched.
pub fn import_json(session: &mut WheelSession, json: &str) -> WheelResult<ImportSummary> {
    let imported: ImportedConfig = serde_json::from_str(json)?;
    let metadata = imported.metadata.unwrap_or_default();

    let version = match &metadata.version {
        Some(value) => parse_version(value)?,
        None => CONFIG_VERSION,
    };
    if version > CONFIG_VERSION {
        return Err(WheelError::FutureVersion(version));
    }

    let settings = session.settings().merge_json(&imported.settings)?;

    let fallback_time = metadata
        .export_date
        .as_deref()
        .and_then(parse_timestamp)
        .unwrap_or_else(Utc::now);
    let (records, dropped_results) = normalize_results(imported.results, fallback_time);
    if dropped_results > 0 {
        log::warn!("Dropped {} result entries without a winner", dropped_results);
    }

    let result_count = records.len();
    session.apply_import(imported.names, settings, ResultLog::from_records(records));

    let summary = ImportSummary {
        names: session.candidates().len(),
        results: result_count,
        dropped_results,
        version,
    };
    log::info!(
        "Imported configuration v{}: {} names, {} results",
        version,
        summary.names,
        summary.results
    );
    Ok(summary)
}

// ============ Save/Load ============

/// Write a timestamped configuration file into `dir`
pub fn save_config(session: &WheelSession, dir: &Path) -> WheelResult<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let now = Utc::now();
    let path = dir.join(export_file_name(now));
    let json = WheelConfig::capture(session, now).to_json()?;
    std::fs::write(&path, json)?;

    log::info!("Saved configuration to {}", path.display());
    Ok(path)
}

/// Import a configuration file into a session
pub fn load_config(session: &mut WheelSession, path: &Path) -> WheelResult<ImportSummary> {
    let metadata = std::fs::metadata(path)?;
    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        return Err(WheelError::validation(format!(
            "configuration file too large: {} bytes (max {} bytes)",
            metadata.len(),
            MAX_CONFIG_FILE_SIZE
        )));
    }

    let json = std::fs::read_to_string(path)?;
    import_json(session, &json)
}
