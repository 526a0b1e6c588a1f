//! The `verbdrill list-presets` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use verbdrill_core::catalog::builtin_presets;
use verbdrill_core::parser::load_preset_directory;
use verbdrill_server::config::load_config_from;

pub fn execute(preset_dir: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let dir = match preset_dir {
        Some(dir) => Some(dir),
        None => load_config_from(config_path.as_deref())?.preset_dir,
    };

    let mut presets: Vec<(String, _)> = builtin_presets()
        .into_iter()
        .map(|p| ("built-in".to_string(), p))
        .collect();
    if let Some(dir) = &dir {
        for preset in load_preset_directory(dir)? {
            // A file preset with a built-in id replaces the built-in.
            presets.retain(|(_, p)| p.id != preset.id);
            presets.push((dir.display().to_string(), preset));
        }
    }
    presets.sort_by(|a, b| a.1.id.cmp(&b.1.id));

    let mut table = Table::new();
    table.set_header(vec!["Id", "Name", "Exercises", "Source"]);
    for (source, preset) in &presets {
        table.add_row(vec![
            Cell::new(&preset.id),
            Cell::new(&preset.name),
            Cell::new(preset.exercises.len()),
            Cell::new(source),
        ]);
    }

    println!("{table}");
    Ok(())
}
