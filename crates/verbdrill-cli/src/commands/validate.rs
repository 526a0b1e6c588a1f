//! The `verbdrill validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(presets_path: PathBuf) -> Result<()> {
    let presets = if presets_path.is_dir() {
        verbdrill_core::parser::load_preset_directory(&presets_path)?
    } else {
        vec![verbdrill_core::parser::parse_preset_file(&presets_path)?]
    };

    let mut total_warnings = 0;

    for preset in &presets {
        println!(
            "Preset: {} [{}] ({} exercises)",
            preset.name,
            preset.id,
            preset.exercises.len()
        );

        let warnings = verbdrill_core::parser::validate_preset(preset);
        for w in &warnings {
            let prefix = w
                .exercise
                .map(|n| format!("  [#{n}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All presets valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
