use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use tg_config::{GeneralConfig, STATE_DIR, ThinkgraphConfig};
use tg_db::service::ThinkgraphService;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InitArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct InitResponse {
    project_root: PathBuf,
    config_path: PathBuf,
    config_written: bool,
    database: String,
    trail_dir: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ProjectConfigFile {
    general: GeneralConfig,
}

/// Handle `tg init`: create `.thinkgraph/`, seed its config, and migrate the database.
pub async fn handle(args: &InitArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let project_root = match flags.project.as_deref() {
        Some(path) => PathBuf::from(path),
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    std::fs::create_dir_all(project_root.join(STATE_DIR))
        .with_context(|| format!("failed to create {STATE_DIR} in {}", project_root.display()))?;

    let config_path = ThinkgraphConfig::project_config_path(&project_root);
    let config_written = write_project_config(&config_path, args)?;

    let config = ThinkgraphConfig::load_from(&project_root)
        .context("failed to load thinkgraph configuration")?;
    let service = ThinkgraphService::from_config(&config, &project_root)
        .await
        .context("failed to initialize tg-db service")?;
    tracing::info!(root = %project_root.display(), "initialized thinkgraph project");

    output(
        &InitResponse {
            database: if config.database.is_in_memory() {
                config.database.path.clone()
            } else {
                config.database.resolved_path(&project_root).display().to_string()
            },
            trail_dir: service
                .trail()
                .is_enabled()
                .then(|| service.trail().trail_dir().to_path_buf()),
            project_root,
            config_path,
            config_written,
        },
        flags.format,
    )
}

/// Returns whether the file was (re)written.
fn write_project_config(path: &Path, args: &InitArgs) -> anyhow::Result<bool> {
    if path.exists() && !args.force {
        return Ok(false);
    }
    let file = ProjectConfigFile {
        general: GeneralConfig {
            default_team: args.default_team.clone().unwrap_or_default(),
            default_user: args.default_user.clone().unwrap_or_default(),
            ..GeneralConfig::default()
        },
    };
    let rendered = toml::to_string_pretty(&file).context("failed to render project config")?;
    std::fs::write(path, rendered)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(true)
}
