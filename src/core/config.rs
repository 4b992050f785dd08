//! Rules configuration.
//!
//! Only the per-player occupant stock is configurable; everything else is
//! fixed by the rules. The defaults are 5 pawns and 3 huts per player.
//!
//! A configuration can be read from JSON. `load_from_env` looks for a file
//! named by `NEOLITHIC_RULES_CONFIG` and falls back to the defaults when the
//! variable is unset or the file cannot be used.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tiles::OccupantKind;

/// Environment variable naming a JSON rules configuration file.
pub const RULES_CONFIG_ENV: &str = "NEOLITHIC_RULES_CONFIG";

/// Per-player occupant stock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Pawns each player owns.
    pub pawns_per_player: u32,

    /// Huts each player owns.
    pub huts_per_player: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            pawns_per_player: 5,
            huts_per_player: 3,
        }
    }
}

impl RulesConfig {
    /// Stock of the given occupant kind for one player.
    #[must_use]
    pub const fn stock(&self, kind: OccupantKind) -> u32 {
        match kind {
            OccupantKind::Pawn => self.pawns_per_player,
            OccupantKind::Hut => self.huts_per_player,
        }
    }

    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json_str(data: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(data)?)
    }

    /// Read a configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Load the configuration named by `NEOLITHIC_RULES_CONFIG`, or the defaults.
    #[must_use]
    pub fn load_from_env() -> Self {
        let Some(path) = env::var(RULES_CONFIG_ENV).ok().map(PathBuf::from) else {
            return Self::default();
        };

        match Self::from_file(&path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(
                    target: "neolithic::config",
                    path = %path.display(),
                    error = %err,
                    "rules_config.load_failed"
                );
                Self::default()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse rules config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read rules config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
