//! Priority-ordered exercise selection for a new round.

use std::sync::Arc;

use crate::catalog::PresetCatalog;
use crate::ledger::ReviewLedger;
use crate::model::Exercise;

/// Maximum number of exercises in one round.
pub const DEFAULT_ROUND_LENGTH: usize = 10;

/// Builds the frozen exercise list for a round.
pub struct RoundSelector {
    catalog: Arc<PresetCatalog>,
    ledger: Arc<ReviewLedger>,
    max_len: usize,
}

impl RoundSelector {
    pub fn new(catalog: Arc<PresetCatalog>, ledger: Arc<ReviewLedger>) -> Self {
        Self {
            catalog,
            ledger,
            max_len: DEFAULT_ROUND_LENGTH,
        }
    }

    /// Override the round-length cap.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    pub fn catalog(&self) -> &Arc<PresetCatalog> {
        &self.catalog
    }

    /// The preset's exercises, highest priority first, capped at `max_len`.
    ///
    /// Equal priorities keep catalog order. Unknown or empty presets yield an
    /// empty list.
    pub fn build_round(&self, identity: &str, preset_id: &str) -> Vec<Exercise> {
        let mut ranked: Vec<(f64, Exercise)> = self
            .catalog
            .get_exercises(preset_id)
            .into_iter()
            .map(|exercise| (self.ledger.priority_of(identity, &exercise), exercise))
            .collect();

        // `sort_by` is stable.
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

        ranked
            .into_iter()
            .take(self.max_len)
            .map(|(_, exercise)| exercise)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Person;

    fn numbered_preset(n: usize) -> Vec<Exercise> {
        (0..n)
            .map(|i| {
                Exercise::new(
                    format!("verb{i}"),
                    format!("Satz {i} ____."),
                    format!("Sentence {i}."),
                    format!("form{i}"),
                )
            })
            .collect()
    }

    fn selector_with(preset: Vec<Exercise>) -> (RoundSelector, Arc<ReviewLedger>) {
        let catalog = Arc::new(PresetCatalog::new());
        catalog.create_or_replace("p", preset);
        let ledger = Arc::new(ReviewLedger::new());
        (RoundSelector::new(catalog, Arc::clone(&ledger)), ledger)
    }

    #[test]
    fn fresh_identity_gets_catalog_order() {
        let (selector, _) = selector_with(numbered_preset(4));
        let round = selector.build_round("u", "p");
        let forms: Vec<_> = round.iter().map(|e| e.expected.as_str()).collect();
        assert_eq!(forms, vec!["form0", "form1", "form2", "form3"]);
    }

    #[test]
    fn round_is_capped_at_ten() {
        let (selector, _) = selector_with(numbered_preset(25));
        let round = selector.build_round("u", "p");
        assert_eq!(round.len(), DEFAULT_ROUND_LENGTH);
        assert_eq!(round[0].expected, "form0");
        assert_eq!(round[9].expected, "form9");
    }

    #[test]
    fn custom_cap() {
        let (selector, _) = selector_with(numbered_preset(5));
        let selector = selector.with_max_len(3);
        assert_eq!(selector.build_round("u", "p").len(), 3);
    }

    #[test]
    fn missed_exercise_moves_to_front() {
        let preset = numbered_preset(12);
        let (selector, ledger) = selector_with(preset.clone());

        ledger.record_outcome("u", &preset[11], false);
        ledger.record_outcome("u", &preset[5], false);
        ledger.record_outcome("u", &preset[5], false);

        let round = selector.build_round("u", "p");
        assert_eq!(round[0].expected, "form5");
        assert_eq!(round[1].expected, "form11");
        assert_eq!(round[2].expected, "form0");
        assert_eq!(round.len(), 10);
    }

    #[test]
    fn mastered_exercise_sinks_below_unseen() {
        let preset = numbered_preset(3);
        let (selector, ledger) = selector_with(preset.clone());
        ledger.record_outcome("u", &preset[0], true);

        let round = selector.build_round("u", "p");
        let forms: Vec<_> = round.iter().map(|e| e.expected.as_str()).collect();
        assert_eq!(forms, vec!["form1", "form2", "form0"]);
    }

    #[test]
    fn history_of_other_identities_is_ignored() {
        let preset = numbered_preset(3);
        let (selector, ledger) = selector_with(preset.clone());
        ledger.record_outcome("someone-else", &preset[2], false);

        let round = selector.build_round("u", "p");
        assert_eq!(round[0].expected, "form0");
    }

    #[test]
    fn shared_identity_exercises_move_together() {
        let a = Exercise::new("machen", "Ich ____ Sport.", "I do sports.", "mache");
        let b = Exercise::new("machen", "Ich ____ Pause.", "Break.", "mache");
        let c = Exercise::new("gehen", "Wir ____.", "We go.", "gehen").with_person(Person::Wir);
        let (selector, ledger) = selector_with(vec![c.clone(), a.clone(), b.clone()]);

        ledger.record_outcome("u", &a, false);
        let round = selector.build_round("u", "p");
        assert_eq!(round, vec![a, b, c]);
    }

    #[test]
    fn unknown_or_empty_preset_is_empty_round() {
        let (selector, _) = selector_with(vec![]);
        assert!(selector.build_round("u", "p").is_empty());
        assert!(selector.build_round("u", "missing").is_empty());
    }
}
