//! Selection configuration (`addons.yaml`).
//!
//! The configuration is an external declarative document enumerating the
//! addon sources (with their priority-relevant ordering), per-source include
//! lists, and per-addon disabled flags. It is loaded once per invocation into
//! a validated struct; there is no dynamic lookup and no global default
//! beyond "include everything".
//!
//! ```yaml
//! runtime_version: "2.0"
//! target: auto/addons
//! private:
//!   path: custom/private
//!   include: [private_addon, disabled_addon]
//! core:
//!   path: /usr/lib/runtime/addons
//! enterprise:
//!   path: custom/enterprise
//! repositories:
//!   - id: server-tools
//!     path: custom/repos/server-tools
//!     include: [dummy_addon, product]
//! disabled: [disabled_addon]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::manifest::RuntimeVersion;

/// The canonical selection configuration filename.
pub const CONFIG_FILENAME: &str = "addons.yaml";

/// Include-list entry admitting every addon found in the source.
pub const WILDCARD: &str = "*";

/// One named addon source root with its include list.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceEntry {
    /// Source root directory, relative paths resolved against the config dir.
    pub path: PathBuf,
    /// Addon names admitted from this source; `"*"` admits all (default).
    #[serde(default = "default_include")]
    pub include: Vec<String>,
}

/// An extra repository source. Declared order is priority order.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RepositoryEntry {
    /// Unique repository identifier.
    pub id: String,
    pub path: PathBuf,
    #[serde(default = "default_include")]
    pub include: Vec<String>,
}

fn default_include() -> Vec<String> {
    vec![WILDCARD.to_string()]
}

/// Parsed per-project selection configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SelectionConfig {
    /// Target runtime version, e.g. `"2.0"`. Defaults to the current series.
    #[serde(default)]
    pub runtime_version: Option<String>,
    /// Default target directory for the merged namespace.
    #[serde(default)]
    pub target: Option<PathBuf>,
    #[serde(default)]
    pub private: Option<SourceEntry>,
    #[serde(default)]
    pub core: Option<SourceEntry>,
    #[serde(default)]
    pub enterprise: Option<SourceEntry>,
    #[serde(default)]
    pub repositories: Vec<RepositoryEntry>,
    /// Addons omitted from default listings but kept resolvable by closure.
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl SelectionConfig {
    /// Parse a configuration from a YAML string.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).map_err(|e| Error::ConfigInvalid {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// The effective runtime version.
    pub fn runtime_version(&self) -> Result<RuntimeVersion> {
        match &self.runtime_version {
            Some(raw) => raw.parse(),
            None => Ok(RuntimeVersion::default()),
        }
    }

    /// Whether the configuration flags this addon as disabled.
    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled.iter().any(|n| n == name)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = std::collections::BTreeSet::new();
        for repo in &self.repositories {
            if repo.id.is_empty() {
                return Err(Error::ConfigInvalid {
                    reason: "repository id must not be empty".to_string(),
                });
            }
            if matches!(repo.id.as_str(), "private" | "core" | "enterprise") {
                return Err(Error::ConfigInvalid {
                    reason: format!("repository id '{}' is reserved", repo.id),
                });
            }
            if !seen.insert(repo.id.as_str()) {
                return Err(Error::ConfigInvalid {
                    reason: format!("duplicate repository id '{}'", repo.id),
                });
            }
        }
        // Surface a bad version at load time, not at first use.
        self.runtime_version()?;
        Ok(())
    }
}
