//! Core data model types for verbdrill.
//!
//! These are the value types shared by the catalog, the review ledger, and the
//! round engine: exercises, their grammatical tags, presets, and the views the
//! engine hands back to callers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Grammatical tense of an exercise.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tense {
    #[default]
    Present,
}

impl fmt::Display for Tense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tense::Present => write!(f, "present"),
        }
    }
}

impl FromStr for Tense {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "present" | "praesens" | "präsens" => Ok(Tense::Present),
            other => Err(format!("unknown tense: {other}")),
        }
    }
}

/// Grammatical mood of an exercise.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mood {
    #[default]
    Indicative,
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mood::Indicative => write!(f, "indicative"),
        }
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "indicative" | "indikativ" => Ok(Mood::Indicative),
            other => Err(format!("unknown mood: {other}")),
        }
    }
}

/// Grammatical person of an exercise.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Person {
    #[default]
    Ich,
    Du,
    ErSieEs,
    Wir,
    Ihr,
    Sie,
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Person::Ich => write!(f, "ich"),
            Person::Du => write!(f, "du"),
            Person::ErSieEs => write!(f, "er/sie/es"),
            Person::Wir => write!(f, "wir"),
            Person::Ihr => write!(f, "ihr"),
            Person::Sie => write!(f, "Sie"),
        }
    }
}

impl FromStr for Person {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ich" => Ok(Person::Ich),
            "du" => Ok(Person::Du),
            "er_sie_es" | "er/sie/es" | "er" | "es" => Ok(Person::ErSieEs),
            "wir" => Ok(Person::Wir),
            "ihr" => Ok(Person::Ihr),
            "sie" => Ok(Person::Sie),
            other => Err(format!("unknown person: {other}")),
        }
    }
}

/// A single fill-in-the-blank conjugation exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Infinitive of the verb being drilled (e.g. "machen").
    pub infinitive: String,
    /// Cloze sentence with `____` marking the blank(s).
    pub sentence: String,
    /// English translation shown alongside the sentence.
    pub translation: String,
    /// The conjugated form the learner must type.
    pub expected: String,
    /// Detached prefix of a separable verb (e.g. "auf" for "aufstehen").
    #[serde(default)]
    pub separable_prefix: Option<String>,
    #[serde(default)]
    pub tense: Tense,
    #[serde(default)]
    pub mood: Mood,
    #[serde(default)]
    pub person: Person,
}

impl Exercise {
    /// Create a present-indicative, first-person exercise.
    pub fn new(
        infinitive: impl Into<String>,
        sentence: impl Into<String>,
        translation: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self {
            infinitive: infinitive.into(),
            sentence: sentence.into(),
            translation: translation.into(),
            expected: expected.into(),
            separable_prefix: None,
            tense: Tense::default(),
            mood: Mood::default(),
            person: Person::default(),
        }
    }

    pub fn with_person(mut self, person: Person) -> Self {
        self.person = person;
        self
    }

    pub fn with_separable_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.separable_prefix = Some(prefix.into());
        self
    }

    /// The ledger identity of this exercise.
    ///
    /// Sentence and translation are not part of the key: two
    /// exercises drilling the same form share one review record.
    pub fn key(&self) -> ExerciseKey {
        ExerciseKey {
            infinitive: self.infinitive.clone(),
            tense: self.tense,
            mood: self.mood,
            person: self.person,
        }
    }

    /// Whether `answer` matches the expected form, ignoring surrounding
    /// whitespace and letter case.
    pub fn accepts(&self, answer: &str) -> bool {
        answer.trim().to_lowercase() == self.expected.to_lowercase()
    }
}

/// Grammatical identity of an exercise: (infinitive, tense, mood, person).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseKey {
    pub infinitive: String,
    pub tense: Tense,
    pub mood: Mood,
    pub person: Person,
}

impl fmt::Display for ExerciseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} {})",
            self.infinitive, self.person, self.tense, self.mood
        )
    }
}

/// A named, ordered collection of exercises.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preset {
    /// Unique identifier (e.g. "basic").
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Description of what this preset drills.
    #[serde(default)]
    pub description: String,
    /// Exercises in catalog order.
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

/// Snapshot of a round as seen by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundView {
    pub round_id: String,
    /// 0-based cursor into the round's exercise list.
    pub index: usize,
    pub score: u32,
    pub total: usize,
    /// Current exercise, or `None` once the round is complete.
    pub exercise: Option<Exercise>,
}

impl RoundView {
    pub fn is_complete(&self) -> bool {
        self.exercise.is_none()
    }
}

/// Result of grading one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitOutcome {
    pub correct: bool,
    /// The expected answer, revealed regardless of correctness.
    pub expected: String,
    /// Cumulative round score after this submission.
    pub score: u32,
}
