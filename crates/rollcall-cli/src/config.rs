//! Configuration loading.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("rollcall.db"),
        }
    }
}

impl Config {
    /// Loads configuration, layering the default config file, an optional
    /// explicit file, and `ROLLCALL_`-prefixed environment variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = config_dir_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed("ROLLCALL_")).extract()
    }
}

fn config_dir_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("rollcall"))
}

/// Platform-specific data directory, `~/.local/share/rollcall` on Linux.
fn data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("rollcall"))
}
