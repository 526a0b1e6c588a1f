//! Process-wide preset catalog.
//!
//! Built-in presets are seeded at startup; user-created presets are added at
//! runtime and never removed. Unknown lookups degrade to empty results.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::model::{Exercise, Person, Preset};

/// Maps preset ids to their ordered exercise lists.
#[derive(Debug, Default)]
pub struct PresetCatalog {
    presets: RwLock<BTreeMap<String, Vec<Exercise>>>,
}

impl PresetCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog seeded with the built-in `basic` and `separable` presets.
    pub fn with_builtin() -> Self {
        let catalog = Self::new();
        catalog.extend(builtin_presets());
        catalog
    }

    /// All preset ids in ascending order.
    pub fn list_preset_ids(&self) -> Vec<String> {
        self.presets.read().keys().cloned().collect()
    }

    /// Exercises of `preset_id` in catalog order; empty if the id is unknown.
    pub fn get_exercises(&self, preset_id: &str) -> Vec<Exercise> {
        self.presets
            .read()
            .get(preset_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Insert a preset, overwriting any existing preset with the same id.
    pub fn create_or_replace(&self, id: impl Into<String>, exercises: Vec<Exercise>) {
        let id = id.into();
        let replaced = self.presets.write().insert(id.clone(), exercises).is_some();
        if replaced {
            tracing::info!(preset = %id, "replaced preset");
        } else {
            tracing::info!(preset = %id, "created preset");
        }
    }

    /// Bulk-load parsed presets.
    pub fn extend(&self, presets: impl IntoIterator<Item = Preset>) {
        let mut map = self.presets.write();
        for preset in presets {
            map.insert(preset.id, preset.exercises);
        }
    }

    pub fn len(&self) -> usize {
        self.presets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.read().is_empty()
    }
}

/// The presets every server starts with.
pub fn builtin_presets() -> Vec<Preset> {
    vec![
        Preset {
            id: "basic".into(),
            name: "Basic verbs".into(),
            description: "Regular and irregular verbs in the present tense".into(),
            exercises: vec![
                Exercise::new(
                    "machen",
                    "Ich ____ meine Hausaufgaben.",
                    "I do my homework.",
                    "mache",
                ),
                Exercise::new(
                    "gehen",
                    "Wir ____ heute ins Kino.",
                    "We go to the cinema today.",
                    "gehen",
                )
                .with_person(Person::Wir),
            ],
        },
        Preset {
            id: "separable".into(),
            name: "Separable verbs".into(),
            description: "Verbs whose prefix moves to the end of the clause".into(),
            exercises: vec![Exercise::new(
                "aufstehen",
                "Ich ____ um 7 Uhr ____.",
                "I get up at 7.",
                "stehe",
            )
            .with_separable_prefix("auf")],
        },
    ]
}
