//! Importer configuration
//!
//! Every setting has a built-in default. A `.tfvars-import.yaml` file in the
//! workspace (or an explicit `--config` file) overrides individual fields.

use crate::error::GenerateError;
use crate::traits::FileSystem;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the workspace when no explicit path is given
pub const DEFAULT_CONFIG_FILE: &str = ".tfvars-import.yaml";

pub const DEFAULT_IMPORT_FILE: &str = "import.tf";
pub const DEFAULT_TEMP_IMPORT_FILE: &str = "import_temp.tf";
pub const DEFAULT_GENERATED_CONFIG_FILE: &str = "generated_drift_resource.tf";
pub const DEFAULT_PLACEHOLDER_ADDRESS: &str = "google_compute_instance.temp_importer";
pub const DEFAULT_BINARY: &str = "terraform";
pub const DEFAULT_TFVARS_FILE: &str = "compute.auto.tfvars";

pub const DEFAULT_NETWORK_PROJECT: &str = "tws-lz-host-networking";
pub const DEFAULT_NETWORK_KEY: &str = "tws-dev-shared-vpc";
pub const DEFAULT_SUBNET_PREFIX: &str = "tws-dev-subnet-";
pub const DEFAULT_IMAGE_PROJECT: &str = "debian-cloud";

/// Tags the environment applies itself; they never end up in `custom_tags`
pub const DEFAULT_EXCLUDED_TAGS: [&str; 4] = ["ssh", "dev", "prod", "staging"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImporterConfig {
    pub import_file: String,
    pub temp_import_file: String,
    pub generated_config_file: String,
    pub placeholder_address: String,
    pub binary: String,
    /// Variables file named in the follow-up instructions
    pub tfvars_file: String,
    pub network: NetworkDefaults,
    pub image_project: String,
    pub excluded_tags: Vec<String>,
}

/// Organizational network settings written into every entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkDefaults {
    pub project: String,
    pub key: String,
    pub subnet_prefix: String,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            import_file: DEFAULT_IMPORT_FILE.to_string(),
            temp_import_file: DEFAULT_TEMP_IMPORT_FILE.to_string(),
            generated_config_file: DEFAULT_GENERATED_CONFIG_FILE.to_string(),
            placeholder_address: DEFAULT_PLACEHOLDER_ADDRESS.to_string(),
            binary: DEFAULT_BINARY.to_string(),
            tfvars_file: DEFAULT_TFVARS_FILE.to_string(),
            network: NetworkDefaults::default(),
            image_project: DEFAULT_IMAGE_PROJECT.to_string(),
            excluded_tags: DEFAULT_EXCLUDED_TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl Default for NetworkDefaults {
    fn default() -> Self {
        Self {
            project: DEFAULT_NETWORK_PROJECT.to_string(),
            key: DEFAULT_NETWORK_KEY.to_string(),
            subnet_prefix: DEFAULT_SUBNET_PREFIX.to_string(),
        }
    }
}

impl ImporterConfig {
    /// Parse a config file
    pub fn from_file(fs: &dyn FileSystem, path: &Path) -> Result<Self> {
        let content = fs.read_to_string(path)?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: ImporterConfig = serde_yaml::from_str(&content)
            .map_err(GenerateError::from)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        Ok(config)
    }

    /// Resolve the configuration for a workspace
    ///
    /// An explicit path must exist; otherwise the workspace default file is
    /// used when present and built-in defaults when not.
    pub fn load(fs: &dyn FileSystem, workspace: &Path, explicit: Option<&str>) -> Result<Self> {
        match explicit {
            Some(path) => {
                let path = PathBuf::from(path);
                if !fs.exists(&path) {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                tracing::debug!(path = %path.display(), "loading config");
                Self::from_file(fs, &path)
            }
            None => {
                let path = workspace.join(DEFAULT_CONFIG_FILE);
                if fs.exists(&path) {
                    tracing::debug!(path = %path.display(), "loading workspace config");
                    Self::from_file(fs, &path)
                } else {
                    tracing::debug!("no config file, using built-in defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Backup location of the import file while the temporary import is in place
    pub fn backup_file(&self) -> String {
        format!("{}.bak", self.import_file)
    }
}
