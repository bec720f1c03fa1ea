//! The persisted progress document and the values derived from it.
//!
//! Field names serialize in camelCase so a document written by the web
//! client (`quran-user-progress` in its local storage) loads unchanged.

use std::collections::{BTreeMap, HashSet};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastRead {
    pub surah: u16,
    pub verse: u16,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl Default for LastRead {
    fn default() -> Self {
        Self {
            surah: 1,
            verse: 1,
            timestamp: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadHistoryEntry {
    pub date: NaiveDate,
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProgress {
    pub last_read: LastRead,
    pub favorites: Vec<String>,
    pub memorized: Vec<String>,
    pub read_count: BTreeMap<String, u32>,
    pub read_history: Vec<ReadHistoryEntry>,
}

impl UserProgress {
    /// Restores the document invariants after loading from storage: no
    /// duplicate favorites or memorized keys, one history entry per day,
    /// newest first, at most `history_days` entries.
    pub fn normalize(&mut self, history_days: usize) {
        dedup_keys(&mut self.favorites);
        dedup_keys(&mut self.memorized);

        let mut merged: BTreeMap<NaiveDate, u32> = BTreeMap::new();
        for entry in self.read_history.drain(..) {
            let count = merged.entry(entry.date).or_insert(0);
            *count = count.saturating_add(entry.count);
        }
        self.read_history = merged
            .into_iter()
            .rev()
            .take(history_days)
            .map(|(date, count)| ReadHistoryEntry { date, count })
            .collect();
    }

    pub fn total_reads(&self) -> u64 {
        self.read_count.values().map(|&n| u64::from(n)).sum()
    }
}

fn dedup_keys(keys: &mut Vec<String>) {
    let mut seen = HashSet::new();
    keys.retain(|key| seen.insert(key.clone()));
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingStats {
    pub total_reads: u64,
    pub daily_average: f64,
    pub current_streak: u32,
    pub favorite_count: usize,
    pub memorized_count: usize,
    pub read_history: Vec<ReadHistoryEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserMode {
    Adult,
    Kid,
}

impl Display for UserMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            UserMode::Adult => write!(f, "adult"),
            UserMode::Kid => write!(f, "kid"),
        }
    }
}

impl FromStr for UserMode {
    type Err = AppResponse;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "adult" => Ok(UserMode::Adult),
            "kid" => Ok(UserMode::Kid),
            other => Err(AppResponse::ValidationError(format!("Unknown user mode: {other}"))),
        }
    }
}
