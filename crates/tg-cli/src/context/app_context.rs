use std::path::PathBuf;

use anyhow::Context;
use tg_config::ThinkgraphConfig;
use tg_core::identity::Actor;
use tg_db::service::ThinkgraphService;

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: ThinkgraphService,
    pub config: ThinkgraphConfig,
    pub project_root: PathBuf,
    team: Option<String>,
    user: Option<String>,
}

impl AppContext {
    /// Open the project database and trail described by `config`.
    pub async fn init(
        project_root: PathBuf,
        config: ThinkgraphConfig,
        flags: &GlobalFlags,
    ) -> anyhow::Result<Self> {
        let service = ThinkgraphService::from_config(&config, &project_root)
            .await
            .context("failed to initialize tg-db service")?;

        tracing::debug!(
            root = %project_root.display(),
            trail = service.trail().is_enabled(),
            "opened project"
        );

        Ok(Self {
            service,
            config,
            project_root,
            team: flags.team.clone(),
            user: flags.user.clone(),
        })
    }

    /// Identity for mutations: `--team`/`--user`, else the configured defaults.
    pub fn actor(&self) -> anyhow::Result<Actor> {
        self.config
            .general
            .actor(self.team.as_deref(), self.user.as_deref())
            .context(
                "no acting identity: pass --team and --user, or set general.default_team \
                 and general.default_user",
            )
    }

    /// Team for reads. Only the team is required.
    pub fn team_id(&self) -> anyhow::Result<String> {
        let team = self
            .team
            .as_deref()
            .unwrap_or(&self.config.general.default_team)
            .trim();
        if team.is_empty() {
            anyhow::bail!("no team selected: pass --team or set general.default_team");
        }
        Ok(team.to_string())
    }

    #[must_use]
    pub const fn default_limit(&self) -> u32 {
        self.config.general.default_limit
    }
}
