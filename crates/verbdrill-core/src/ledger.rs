//! Per-identity mastery records.
//!
//! Each (identity, exercise key) pair owns one `ReviewRecord`. Records are
//! created on the first answer and never deleted. A record's priority decides
//! how early its exercise appears in the next round: any outstanding wrong
//! streak outranks the whole due-weight range, so recently missed forms always
//! come first.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::model::{Exercise, ExerciseKey};

/// Due-weight of an exercise that has never been answered.
pub const DEFAULT_DUE_WEIGHT: f64 = 1.0;
/// Lower clamp for due-weight.
pub const MIN_DUE_WEIGHT: f64 = 0.25;
/// Upper clamp for due-weight.
pub const MAX_DUE_WEIGHT: f64 = 10.0;
/// Priority added per consecutive wrong answer.
pub const WRONG_STREAK_WEIGHT: f64 = 100.0;
/// Multiplier applied to due-weight on a correct answer.
pub const CORRECT_DECAY: f64 = 0.75;
/// Amount added to due-weight on a wrong answer.
pub const WRONG_PENALTY: f64 = 1.0;

/// Exposure counters and due-weight for one (identity, exercise key) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub times_seen: u32,
    pub times_correct: u32,
    /// Consecutive wrong answers since the last correct one.
    pub wrong_streak: u32,
    /// Always within `[MIN_DUE_WEIGHT, MAX_DUE_WEIGHT]`.
    pub due_weight: f64,
    /// When the last answer was recorded. Informational only.
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

impl Default for ReviewRecord {
    fn default() -> Self {
        Self {
            times_seen: 0,
            times_correct: 0,
            wrong_streak: 0,
            due_weight: DEFAULT_DUE_WEIGHT,
            last_reviewed_at: None,
        }
    }
}

impl ReviewRecord {
    /// `wrong_streak * 100 + due_weight`.
    pub fn priority(&self) -> f64 {
        self.wrong_streak as f64 * WRONG_STREAK_WEIGHT + self.due_weight
    }

    /// Fold one graded answer into the record.
    pub fn apply(&mut self, was_correct: bool, at: DateTime<Utc>) {
        self.times_seen = self.times_seen.saturating_add(1);
        if was_correct {
            self.times_correct = self.times_correct.saturating_add(1);
            self.wrong_streak = 0;
            self.due_weight *= CORRECT_DECAY;
        } else {
            self.wrong_streak = self.wrong_streak.saturating_add(1);
            self.due_weight += WRONG_PENALTY;
        }
        self.due_weight = self.due_weight.clamp(MIN_DUE_WEIGHT, MAX_DUE_WEIGHT);
        self.last_reviewed_at = Some(at);
    }
}

type LedgerKey = (String, ExerciseKey);

/// Concurrency-safe store of review records.
///
/// The outer lock is only held to find or insert an entry; updates to a
/// single record serialize on that record's own mutex.
#[derive(Debug, Default)]
pub struct ReviewLedger {
    records: RwLock<HashMap<LedgerKey, Arc<Mutex<ReviewRecord>>>>,
}

impl ReviewLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection priority of `exercise` for `identity`. Unseen exercises
    /// score `DEFAULT_DUE_WEIGHT`.
    pub fn priority_of(&self, identity: &str, exercise: &Exercise) -> f64 {
        self.entry(identity, &exercise.key())
            .map(|record| record.lock().priority())
            .unwrap_or(DEFAULT_DUE_WEIGHT)
    }

    /// Record one graded answer and return the updated record.
    pub fn record_outcome(
        &self,
        identity: &str,
        exercise: &Exercise,
        was_correct: bool,
    ) -> ReviewRecord {
        let key = exercise.key();
        let record = match self.entry(identity, &key) {
            Some(record) => record,
            None => Arc::clone(
                self.records
                    .write()
                    .entry((identity.to_string(), key.clone()))
                    .or_default(),
            ),
        };

        let mut record = record.lock();
        record.apply(was_correct, Utc::now());
        tracing::debug!(
            identity,
            exercise = %key,
            was_correct,
            wrong_streak = record.wrong_streak,
            due_weight = record.due_weight,
            "recorded outcome"
        );
        record.clone()
    }

    /// Snapshot of one record, if it exists.
    pub fn record(&self, identity: &str, key: &ExerciseKey) -> Option<ReviewRecord> {
        self.entry(identity, key).map(|record| record.lock().clone())
    }

    /// Snapshots of every record belonging to `identity`, ordered by key.
    pub fn records_for(&self, identity: &str) -> Vec<(ExerciseKey, ReviewRecord)> {
        let entries: Vec<(ExerciseKey, Arc<Mutex<ReviewRecord>>)> = self
            .records
            .read()
            .iter()
            .filter(|((owner, _), _)| owner == identity)
            .map(|((_, key), record)| (key.clone(), Arc::clone(record)))
            .collect();

        let mut snapshots: Vec<_> = entries
            .into_iter()
            .map(|(key, record)| (key, record.lock().clone()))
            .collect();
        snapshots.sort_by(|a, b| a.0.cmp(&b.0));
        snapshots
    }

    /// Total number of records across all identities.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    fn entry(&self, identity: &str, key: &ExerciseKey) -> Option<Arc<Mutex<ReviewRecord>>> {
        // Tuple keys can't be borrowed as (&str, &ExerciseKey), so build the owned key.
        self.records
            .read()
            .get(&(identity.to_string(), key.clone()))
            .cloned()
    }
}
