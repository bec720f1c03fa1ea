//! Reading progress tracker.
//!
//! Every operation is a read-modify-write of the whole progress document.
//! Writers inside one process are serialized through `write_lock`, so two
//! threads recording reads at once never drop each other's update. Two
//! processes sharing one store are not coordinated.
//!
//! Storage trouble never reaches the caller: a failed or malformed load
//! falls back to a default document, and a failed save is logged and
//! dropped. The returned values always describe the document as mutated in
//! memory for that call.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use log::{debug, warn};

use crate::content_model::VerseKey;
use crate::progress_model::{LastRead, ReadHistoryEntry, ReadingStats, UserProgress};
use crate::storage::DocumentStorage;

const STATS_WINDOW_DAYS: usize = 7;

pub struct ProgressTracker {
    storage: Arc<dyn DocumentStorage>,
    key: String,
    history_days: usize,
    write_lock: Mutex<()>,
}

impl ProgressTracker {
    pub fn new(storage: Arc<dyn DocumentStorage>, key: impl Into<String>, history_days: usize) -> Self {
        Self {
            storage,
            key: key.into(),
            history_days,
            write_lock: Mutex::new(()),
        }
    }

    /// Current progress document, or the defaults if none is stored or it cannot be read.
    pub fn progress(&self) -> UserProgress {
        let document = match self.storage.load(&self.key) {
            Ok(Some(document)) => document,
            Ok(None) => return UserProgress::default(),
            Err(e) => {
                warn!("Could not load progress from '{}': {e}", self.key);
                return UserProgress::default();
            }
        };

        match serde_json::from_str::<UserProgress>(&document) {
            Ok(mut progress) => {
                progress.normalize(self.history_days);
                progress
            }
            Err(e) => {
                warn!("Stored progress under '{}' is malformed, using defaults: {e}", self.key);
                UserProgress::default()
            }
        }
    }

    pub fn record_read(&self, key: &str) -> u32 {
        self.record_read_at(key, Utc::now())
    }

    /// Counts one read of `key` at `now` and returns the key's new read count.
    pub fn record_read_at(&self, key: &str, now: DateTime<Utc>) -> u32 {
        let Some(key) = accepted_key(key, "record_read") else {
            return 0;
        };
        let history_days = self.history_days;

        self.mutate(|progress| {
            let count = progress.read_count.entry(key.to_string()).or_insert(0);
            *count = count.saturating_add(1);
            let new_count = *count;

            match key.parse::<VerseKey>() {
                Ok(verse_key) => {
                    progress.last_read = LastRead {
                        surah: verse_key.surah,
                        verse: verse_key.verse,
                        timestamp: now.timestamp_millis(),
                    };
                }
                Err(_) => debug!("'{key}' is not a verse key, last-read pointer unchanged"),
            }

            let today = now.date_naive();
            match progress.read_history.iter_mut().find(|entry| entry.date == today) {
                Some(entry) => entry.count = entry.count.saturating_add(1),
                None => progress.read_history.push(ReadHistoryEntry { date: today, count: 1 }),
            }
            progress.read_history.sort_by(|a, b| b.date.cmp(&a.date));
            progress.read_history.truncate(history_days);

            new_count
        })
    }

    pub fn toggle_favorite(&self, key: &str) -> bool {
        let Some(key) = accepted_key(key, "toggle_favorite") else {
            return false;
        };
        self.mutate(|progress| toggle_membership(&mut progress.favorites, key))
    }

    pub fn toggle_memorized(&self, key: &str) -> bool {
        let Some(key) = accepted_key(key, "toggle_memorized") else {
            return false;
        };
        self.mutate(|progress| toggle_membership(&mut progress.memorized, key))
    }

    pub fn is_favorite(&self, key: &str) -> bool {
        self.progress().favorites.iter().any(|k| k == key.trim())
    }

    pub fn is_memorized(&self, key: &str) -> bool {
        self.progress().memorized.iter().any(|k| k == key.trim())
    }

    pub fn compute_stats(&self) -> ReadingStats {
        self.compute_stats_on(Utc::now().date_naive())
    }

    pub fn compute_stats_on(&self, today: NaiveDate) -> ReadingStats {
        reading_stats(&self.progress(), today)
    }

    /// Replaces the stored document with a fresh default one.
    pub fn reset(&self) {
        let _guard = self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.persist(&UserProgress::default());
    }

    fn mutate<R>(&self, apply: impl FnOnce(&mut UserProgress) -> R) -> R {
        let _guard = self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut progress = self.progress();
        let result = apply(&mut progress);
        self.persist(&progress);
        result
    }

    fn persist(&self, progress: &UserProgress) {
        let document = match serde_json::to_string(progress) {
            Ok(document) => document,
            Err(e) => {
                warn!("Could not serialize progress: {e}");
                return;
            }
        };
        if let Err(e) = self.storage.save(&self.key, &document) {
            warn!("Could not save progress under '{}': {e}", self.key);
        }
    }
}

fn accepted_key<'a>(key: &'a str, operation: &str) -> Option<&'a str> {
    let key = key.trim();
    if key.is_empty() {
        warn!("{operation} called with an empty key, ignoring");
        None
    } else {
        Some(key)
    }
}

fn toggle_membership(keys: &mut Vec<String>, key: &str) -> bool {
    if keys.iter().any(|k| k == key) {
        keys.retain(|k| k != key);
        false
    } else {
        keys.push(key.to_string());
        true
    }
}

/// Derives aggregate statistics from a progress document as of `today`.
pub fn reading_stats(progress: &UserProgress, today: NaiveDate) -> ReadingStats {
    let mut history = progress.read_history.clone();
    history.sort_by(|a, b| b.date.cmp(&a.date));

    let window = &history[..history.len().min(STATS_WINDOW_DAYS)];
    let daily_average = if window.is_empty() {
        0.0
    } else {
        let sum: u64 = window.iter().map(|entry| u64::from(entry.count)).sum();
        let average = sum as f64 / window.len() as f64;
        (average * 10.0).round() / 10.0
    };

    ReadingStats {
        total_reads: progress.total_reads(),
        daily_average,
        current_streak: current_streak(&history, today),
        favorite_count: progress.favorites.len(),
        memorized_count: progress.memorized.len(),
        read_history: history,
    }
}

/// Consecutive days with reads ending today. `history` must be newest first.
fn current_streak(history: &[ReadHistoryEntry], today: NaiveDate) -> u32 {
    match history.first() {
        Some(newest) if newest.date == today => {}
        _ => return 0,
    }

    let mut streak = 1;
    for pair in history.windows(2) {
        if pair[0].date - pair[1].date == Duration::days(1) {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}
