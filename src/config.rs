use crate::common::{ApplicationError, ApplicationResult};
use crate::domains::workspace::{canonical_workspace, Workspace};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix for environment overrides, e.g. `MULTI_ROBOT__LEDGER__DATA_DIR`.
pub const ENV_PREFIX: &str = "MULTI_ROBOT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub ledger: LedgerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub workspace: WorkspaceConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerBackend {
    Memory,
    File,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    pub backend: LedgerBackend,
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// tracing env-filter directive, e.g. `info` or `multi_robot_ledger=debug`
    pub level: String,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// JSON workspace definition; the canonical arena when unset.
    pub definition: Option<PathBuf>,
}

impl Config {
    pub async fn from_file<P: AsRef<Path>>(path: P) -> ApplicationResult<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)
            .context("invalid configuration file")
            .map_err(ApplicationError::Configuration)?;
        Ok(config)
    }

    /// Defaults, then the optional TOML file, then `MULTI_ROBOT__*` variables.
    pub fn load(path: Option<&Path>) -> ApplicationResult<Self> {
        let defaults = ::config::Config::try_from(&Config::default())
            .context("failed to seed configuration defaults")?;
        let mut builder = ::config::Config::builder().add_source(defaults);
        if let Some(path) = path {
            builder = builder.add_source(
                ::config::File::from(path)
                    .format(::config::FileFormat::Toml)
                    .required(false),
            );
        }
        let config = builder
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .context("failed to assemble configuration")?
            .try_deserialize()
            .context("invalid configuration")?;
        Ok(config)
    }

    /// The workspace to initialize the ledger with.
    pub async fn resolve_workspace(&self) -> ApplicationResult<Workspace> {
        match &self.workspace.definition {
            Some(path) => {
                let bytes = tokio::fs::read(path).await?;
                Ok(Workspace::from_json(&bytes)?)
            }
            None => Ok(canonical_workspace()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ledger: LedgerConfig {
                backend: LedgerBackend::File,
                data_dir: PathBuf::from("/tmp/multi-robot-ledger"),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file: None,
            },
            workspace: WorkspaceConfig::default(),
        }
    }
}
