//! Practice round state machine.
//!
//! A round moves from `InProgress` (index < total) to `Complete`
//! (index >= total) through repeated `advance` calls and never goes back.
//! Grading (`submit`) and moving the cursor (`advance`) are separate
//! operations: a submission never changes the index.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

use crate::catalog::PresetCatalog;
use crate::error::RoundError;
use crate::ledger::ReviewLedger;
use crate::model::{Exercise, RoundView, SubmitOutcome};
use crate::selector::{RoundSelector, DEFAULT_ROUND_LENGTH};
use crate::traits::SessionAuthority;

/// Configuration for the round engine.
#[derive(Debug, Clone)]
pub struct RoundEngineConfig {
    /// Maximum exercises per round.
    pub max_round_len: usize,
}

impl Default for RoundEngineConfig {
    fn default() -> Self {
        Self {
            max_round_len: DEFAULT_ROUND_LENGTH,
        }
    }
}

/// One active round. Only the engine touches these.
#[derive(Debug)]
struct Round {
    owner: String,
    preset_id: String,
    /// Frozen at start; never re-ranked.
    exercises: Vec<Exercise>,
    index: usize,
    score: u32,
    started_at: DateTime<Utc>,
}

impl Round {
    fn view(&self, round_id: &str) -> RoundView {
        RoundView {
            round_id: round_id.to_string(),
            index: self.index,
            score: self.score,
            total: self.exercises.len(),
            exercise: self.exercises.get(self.index).cloned(),
        }
    }
}

type RoundTable = RwLock<HashMap<String, Arc<Mutex<Round>>>>;

/// Owns every active round and drives start / submit / advance.
pub struct RoundEngine {
    selector: RoundSelector,
    ledger: Arc<ReviewLedger>,
    sessions: Arc<dyn SessionAuthority>,
    rounds: RoundTable,
}

impl RoundEngine {
    pub fn new(
        catalog: Arc<PresetCatalog>,
        ledger: Arc<ReviewLedger>,
        sessions: Arc<dyn SessionAuthority>,
        config: RoundEngineConfig,
    ) -> Self {
        let selector = RoundSelector::new(catalog, Arc::clone(&ledger))
            .with_max_len(config.max_round_len);
        Self {
            selector,
            ledger,
            sessions,
            rounds: RwLock::new(HashMap::new()),
        }
    }

    pub fn catalog(&self) -> &Arc<PresetCatalog> {
        self.selector.catalog()
    }

    pub fn ledger(&self) -> &Arc<ReviewLedger> {
        &self.ledger
    }

    /// Start a round over `preset_id` for `identity`.
    ///
    /// Rejects identities without an active session before allocating
    /// anything. An empty or unknown preset produces a round that is already
    /// complete.
    pub async fn start(&self, identity: &str, preset_id: &str) -> Result<RoundView, RoundError> {
        if !self.sessions.is_active_session(identity).await {
            tracing::warn!(preset = preset_id, "round start rejected: no active session");
            return Err(RoundError::Unauthorized);
        }

        let exercises = self.selector.build_round(identity, preset_id);
        let round_id = format!("round-{}", Uuid::new_v4());
        let round = Round {
            owner: identity.to_string(),
            preset_id: preset_id.to_string(),
            exercises,
            index: 0,
            score: 0,
            started_at: Utc::now(),
        };
        let view = round.view(&round_id);

        tracing::info!(
            round = %round_id,
            preset = %round.preset_id,
            total = view.total,
            "round started"
        );
        self.rounds
            .write()
            .insert(round_id, Arc::new(Mutex::new(round)));

        Ok(view)
    }

    /// Grade `answer` against the current exercise.
    ///
    /// The outcome is always reported to the review ledger. Repeated calls at
    /// the same index grade (and record) again.
    pub fn submit(&self, round_id: &str, answer: &str) -> Result<SubmitOutcome, RoundError> {
        let round = self.lookup(round_id)?;
        let mut guard = round.lock();
        let round = &mut *guard;

        let Some(exercise) = round.exercises.get(round.index) else {
            tracing::warn!(round = round_id, "submit on completed round");
            return Err(RoundError::RoundComplete(round_id.to_string()));
        };

        let correct = exercise.accepts(answer);
        if correct {
            round.score = round.score.saturating_add(1);
        }
        self.ledger.record_outcome(&round.owner, exercise, correct);

        tracing::debug!(
            round = round_id,
            index = round.index,
            correct,
            score = round.score,
            "answer graded"
        );

        Ok(SubmitOutcome {
            correct,
            expected: exercise.expected.clone(),
            score: round.score,
        })
    }

    /// Move the cursor forward by one.
    ///
    /// Past the last exercise the view carries no exercise; further calls keep
    /// returning a complete view.
    pub fn advance(&self, round_id: &str) -> Result<RoundView, RoundError> {
        let round = self.lookup(round_id)?;
        let mut round = round.lock();
        round.index = round.index.saturating_add(1);

        let view = round.view(round_id);
        tracing::debug!(
            round = round_id,
            index = view.index,
            complete = view.is_complete(),
            "round advanced"
        );
        Ok(view)
    }

    /// Current state of a round without changing it.
    pub fn view(&self, round_id: &str) -> Result<RoundView, RoundError> {
        let round = self.lookup(round_id)?;
        let round = round.lock();
        Ok(round.view(round_id))
    }

    /// When a round was started.
    pub fn started_at(&self, round_id: &str) -> Result<DateTime<Utc>, RoundError> {
        Ok(self.lookup(round_id)?.lock().started_at)
    }

    /// Number of rounds held in memory.
    pub fn round_count(&self) -> usize {
        self.rounds.read().len()
    }

    fn lookup(&self, round_id: &str) -> Result<Arc<Mutex<Round>>, RoundError> {
        self.rounds
            .read()
            .get(round_id)
            .cloned()
            .ok_or_else(|| RoundError::RoundNotFound(round_id.to_string()))
    }
}
