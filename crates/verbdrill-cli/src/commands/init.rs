//! The `verbdrill init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create verbdrill.toml
    if std::path::Path::new("verbdrill.toml").exists() {
        println!("verbdrill.toml already exists, skipping.");
    } else {
        std::fs::write("verbdrill.toml", SAMPLE_CONFIG)?;
        println!("Created verbdrill.toml");
    }

    // Create example preset
    std::fs::create_dir_all("presets")?;
    let example_path = std::path::Path::new("presets/modal.toml");
    if example_path.exists() {
        println!("presets/modal.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_PRESET)?;
        println!("Created presets/modal.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit verbdrill.toml (bind address, accounts)");
    println!("  2. Run: verbdrill validate --presets presets");
    println!("  3. Run: verbdrill serve");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# verbdrill configuration

bind = "127.0.0.1:8080"
preset_dir = "presets"
max_round_len = 10
users = ["test@example.com"]
test_login = true
cors_origins = ["http://localhost:5173"]
"#;

const EXAMPLE_PRESET: &str = r#"[preset]
id = "modal"
name = "Modal verbs"
description = "Present tense of können, müssen, and dürfen"

[[exercises]]
infinitive = "können"
sentence = "Ich ____ gut schwimmen."
translation = "I can swim well."
expected = "kann"

[[exercises]]
infinitive = "müssen"
sentence = "Du ____ jetzt gehen."
translation = "You have to go now."
expected = "musst"
person = "du"

[[exercises]]
infinitive = "dürfen"
sentence = "Wir ____ hier parken."
translation = "We are allowed to park here."
expected = "dürfen"
person = "wir"

[[exercises]]
infinitive = "anrufen"
sentence = "Sie ____ ihre Mutter ____."
translation = "She calls her mother."
expected = "ruft"
person = "er_sie_es"
separable_prefix = "an"
"#;
