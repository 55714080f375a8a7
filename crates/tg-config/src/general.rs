//! General application configuration.

use serde::{Deserialize, Serialize};
use tg_core::identity::Actor;

use crate::ConfigError;

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default result limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Team used when the CLI is not given `--team`.
    #[serde(default)]
    pub default_team: String,

    /// User used when the CLI is not given `--user`.
    #[serde(default)]
    pub default_user: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            default_team: String::new(),
            default_user: String::new(),
        }
    }
}

impl GeneralConfig {
    /// Build the acting identity, preferring explicit overrides over the
    /// configured defaults.
    ///
    /// # Errors
    ///
    /// `NotConfigured` when neither an override nor a default supplies a
    /// team or a user.
    pub fn actor(&self, team: Option<&str>, user: Option<&str>) -> Result<Actor, ConfigError> {
        let team = team.unwrap_or(&self.default_team);
        let user = user.unwrap_or(&self.default_user);
        if team.trim().is_empty() || user.trim().is_empty() {
            return Err(ConfigError::NotConfigured {
                section: "general".to_string(),
            });
        }
        Ok(Actor::new(user, team))
    }
}
