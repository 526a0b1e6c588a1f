//! The `verbdrill serve` command.

use std::path::PathBuf;

use anyhow::Result;

use verbdrill_server::config::load_config_from;

pub async fn execute(
    config_path: Option<PathBuf>,
    bind: Option<String>,
    preset_dir: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(bind) = bind {
        config.bind = bind;
    }
    if let Some(dir) = preset_dir {
        config.preset_dir = Some(dir);
    }
    // Fail on a bad address before touching the catalog.
    config.bind_addr()?;

    tracing::debug!(?config, "starting server");
    verbdrill_server::serve(&config).await
}
