//! Result log — append-only spin history

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use dw_core::SpinRecord;

/// Winner tally entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinnerFrequency {
    pub winner: String,
    pub count: usize,
    /// Share of all records (0–100)
    pub percentage: f64,
}

/// Append-only record of resolved outcomes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultLog {
    records: Vec<SpinRecord>,
}

impl ResultLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log restored from previously exported records
    pub fn from_records(records: Vec<SpinRecord>) -> Self {
        Self { records }
    }

    pub fn append(&mut self, record: SpinRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[SpinRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&SpinRecord> {
        self.records.last()
    }

    /// Last `n` records, newest first
    pub fn recent(&self, n: usize) -> Vec<&SpinRecord> {
        self.records.iter().rev().take(n).collect()
    }

    /// Number of overridden outcomes
    pub fn forced_count(&self) -> usize {
        self.records.iter().filter(|r| r.forced).count()
    }

    /// Winner tally, most frequent first (ties by name)
    pub fn winner_frequency(&self) -> Vec<WinnerFrequency> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in &self.records {
            *counts.entry(record.winner.as_str()).or_default() += 1;
        }

        let total = self.records.len() as f64;
        let mut tally: Vec<WinnerFrequency> = counts
            .into_iter()
            .map(|(winner, count)| WinnerFrequency {
                winner: winner.to_string(),
                count,
                percentage: count as f64 / total * 100.0,
            })
            .collect();
        tally.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.winner.cmp(&b.winner)));
        tally
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
