//! TOML preset parser.
//!
//! Loads presets from TOML files and directories, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Exercise, Mood, Person, Preset, Tense};

/// The placeholder that marks a blank in a cloze sentence.
pub const BLANK: &str = "____";

/// Intermediate TOML structure for parsing preset files.
#[derive(Debug, Deserialize)]
struct TomlPresetFile {
    preset: TomlPresetHeader,
    #[serde(default)]
    exercises: Vec<TomlExercise>,
}

#[derive(Debug, Deserialize)]
struct TomlPresetHeader {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlExercise {
    infinitive: String,
    sentence: String,
    #[serde(default)]
    translation: String,
    expected: String,
    #[serde(default)]
    separable_prefix: Option<String>,
    #[serde(default)]
    tense: Option<String>,
    #[serde(default)]
    mood: Option<String>,
    #[serde(default)]
    person: Option<String>,
}

/// Parse a single TOML file into a `Preset`.
pub fn parse_preset_file(path: &Path) -> Result<Preset> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read preset file: {}", path.display()))?;

    parse_preset_str(&content, path)
}

/// Parse a TOML string into a `Preset`.
pub fn parse_preset_str(content: &str, source_path: &Path) -> Result<Preset> {
    let parsed: TomlPresetFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let exercises = parsed
        .exercises
        .into_iter()
        .enumerate()
        .map(|(i, e)| {
            let tense = parse_tag::<Tense>(e.tense.as_deref())
                .with_context(|| format!("exercise #{} ({})", i + 1, e.infinitive))?;
            let mood = parse_tag::<Mood>(e.mood.as_deref())
                .with_context(|| format!("exercise #{} ({})", i + 1, e.infinitive))?;
            let person = parse_tag::<Person>(e.person.as_deref())
                .with_context(|| format!("exercise #{} ({})", i + 1, e.infinitive))?;

            Ok(Exercise {
                infinitive: e.infinitive,
                sentence: e.sentence,
                translation: e.translation,
                expected: e.expected,
                separable_prefix: e.separable_prefix,
                tense,
                mood,
                person,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let name = if parsed.preset.name.is_empty() {
        parsed.preset.id.clone()
    } else {
        parsed.preset.name
    };

    Ok(Preset {
        id: parsed.preset.id,
        name,
        description: parsed.preset.description,
        exercises,
    })
}

fn parse_tag<T>(value: Option<&str>) -> Result<T>
where
    T: std::str::FromStr<Err = String> + Default,
{
    match value {
        Some(s) => s.parse().map_err(|e: String| anyhow::anyhow!("{}", e)),
        None => Ok(T::default()),
    }
}

/// Recursively load all `.toml` preset files from a directory.
pub fn load_preset_directory(dir: &Path) -> Result<Vec<Preset>> {
    let mut presets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    // Symlinked directories are not followed.
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        entries.push((entry.path(), entry.file_type()?.is_dir()));
    }
    entries.sort();

    for (path, is_dir) in entries {
        if is_dir {
            presets.extend(load_preset_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_preset_file(&path) {
                Ok(preset) => presets.push(preset),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(presets)
}

/// A warning from preset validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based position of the offending exercise, if applicable.
    pub exercise: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a preset for common authoring mistakes.
pub fn validate_preset(preset: &Preset) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if preset.exercises.is_empty() {
        warnings.push(ValidationWarning {
            exercise: None,
            message: "preset has no exercises".into(),
        });
    }

    // Exercises sharing a grammatical identity share one review record
    let mut seen_keys = HashSet::new();
    for (i, ex) in preset.exercises.iter().enumerate() {
        let key = ex.key();
        if !seen_keys.insert(key.clone()) {
            warnings.push(ValidationWarning {
                exercise: Some(i + 1),
                message: format!("duplicate exercise identity: {key}"),
            });
        }
    }

    for (i, ex) in preset.exercises.iter().enumerate() {
        if ex.expected.trim().is_empty() {
            warnings.push(ValidationWarning {
                exercise: Some(i + 1),
                message: "expected answer is empty".into(),
            });
        }

        let blanks = ex.sentence.matches(BLANK).count();
        if blanks == 0 {
            warnings.push(ValidationWarning {
                exercise: Some(i + 1),
                message: format!("sentence has no {BLANK} blank"),
            });
        } else if ex.separable_prefix.is_some() && blanks < 2 {
            warnings.push(ValidationWarning {
                exercise: Some(i + 1),
                message: "separable verb needs a second blank for its prefix".into(),
            });
        }
    }

    warnings
}
