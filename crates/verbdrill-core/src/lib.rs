//! verbdrill-core — Practice round engine, review ledger, and preset catalog.
//!
//! This crate holds the stateful heart of verbdrill: which exercises a round
//! contains and in what order, how answers are graded, and how each answer
//! feeds back into future selection. Everything is kept in process memory.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod model;
pub mod parser;
pub mod selector;
pub mod statistics;
pub mod traits;

pub use catalog::PresetCatalog;
pub use engine::{RoundEngine, RoundEngineConfig};
pub use error::RoundError;
pub use ledger::{ReviewLedger, ReviewRecord};
pub use model::{Exercise, ExerciseKey, Mood, Person, Preset, RoundView, SubmitOutcome, Tense};
pub use selector::RoundSelector;
pub use traits::{SessionAuthority, StaticSessions};
