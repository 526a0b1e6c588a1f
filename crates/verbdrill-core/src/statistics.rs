//! Per-identity progress summaries derived from the review ledger.

use serde::{Deserialize, Serialize};

use crate::ledger::ReviewLedger;
use crate::model::ExerciseKey;

/// Aggregate view of one identity's practice history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    /// Distinct exercise identities answered at least once.
    pub forms_seen: usize,
    pub total_attempts: u64,
    pub total_correct: u64,
    /// `total_correct / total_attempts`, or 0.0 with no attempts.
    pub accuracy: f64,
    /// Forms with an outstanding wrong streak, highest priority first.
    pub struggling: Vec<StrugglingForm>,
}

/// A form the learner currently keeps missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrugglingForm {
    pub key: ExerciseKey,
    pub wrong_streak: u32,
    pub due_weight: f64,
    pub priority: f64,
}

impl ProgressSummary {
    pub fn for_identity(ledger: &ReviewLedger, identity: &str) -> Self {
        let records = ledger.records_for(identity);

        let total_attempts: u64 = records.iter().map(|(_, r)| r.times_seen as u64).sum();
        let total_correct: u64 = records.iter().map(|(_, r)| r.times_correct as u64).sum();
        let accuracy = if total_attempts == 0 {
            0.0
        } else {
            total_correct as f64 / total_attempts as f64
        };

        let mut struggling: Vec<StrugglingForm> = records
            .iter()
            .filter(|(_, r)| r.wrong_streak > 0)
            .map(|(key, r)| StrugglingForm {
                key: key.clone(),
                wrong_streak: r.wrong_streak,
                due_weight: r.due_weight,
                priority: r.priority(),
            })
            .collect();
        struggling.sort_by(|a, b| {
            b.priority
                .total_cmp(&a.priority)
                .then_with(|| a.key.infinitive.cmp(&b.key.infinitive))
        });

        Self {
            forms_seen: records.len(),
            total_attempts,
            total_correct,
            accuracy,
            struggling,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Exercise;

    #[test]
    fn empty_history() {
        let ledger = ReviewLedger::new();
        let summary = ProgressSummary::for_identity(&ledger, "u");
        assert_eq!(summary.forms_seen, 0);
        assert_eq!(summary.total_attempts, 0);
        assert_eq!(summary.accuracy, 0.0);
        assert!(summary.struggling.is_empty());
    }

    #[test]
    fn summarizes_attempts_and_struggling_forms() {
        let ledger = ReviewLedger::new();
        let machen = Exercise::new("machen", "Ich ____.", "I do.", "mache");
        let gehen = Exercise::new("gehen", "Ich ____.", "I go.", "gehe");
        let sein = Exercise::new("sein", "Ich ____.", "I am.", "bin");

        ledger.record_outcome("u", &machen, true);
        ledger.record_outcome("u", &machen, true);
        ledger.record_outcome("u", &gehen, false);
        ledger.record_outcome("u", &sein, false);
        ledger.record_outcome("u", &sein, false);
        ledger.record_outcome("other", &machen, false);

        let summary = ProgressSummary::for_identity(&ledger, "u");
        assert_eq!(summary.forms_seen, 3);
        assert_eq!(summary.total_attempts, 5);
        assert_eq!(summary.total_correct, 2);
        assert!((summary.accuracy - 0.4).abs() < 1e-9);

        let order: Vec<_> = summary
            .struggling
            .iter()
            .map(|s| s.key.infinitive.as_str())
            .collect();
        assert_eq!(order, vec!["sein", "gehen"]);
        assert_eq!(summary.struggling[0].priority, 203.0);
    }
}
