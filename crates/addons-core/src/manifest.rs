//! Addon manifest parsing.
//!
//! Every addon directory carries a manifest declaring its dependencies and
//! whether it is installable. The manifest filename and format depend on the
//! target runtime version: runtimes from the 2.x series read
//! [`MANIFEST_FILENAME`] (TOML), older runtimes read
//! [`LEGACY_MANIFEST_FILENAME`] (YAML). Both formats map to the same schema.
//!
//! A directory without a manifest file is simply not an addon; a manifest
//! that exists but fails to parse is a fatal error naming the path.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Manifest filename for 2.x runtimes.
pub const MANIFEST_FILENAME: &str = "addon.toml";

/// Manifest filename for legacy 1.x runtimes.
pub const LEGACY_MANIFEST_FILENAME: &str = "addon.yaml";

/// First runtime series that uses the TOML manifest format.
const TOML_MANIFEST_SINCE: u32 = 2;

/// Target runtime version, e.g. `"2.0"`.
///
/// This is an input parameter (configuration or environment), never internal
/// state: it only selects the manifest format the loader expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RuntimeVersion {
    pub major: u32,
    pub minor: u32,
}

impl RuntimeVersion {
    /// The manifest format addons of this runtime use.
    pub fn manifest_format(&self) -> ManifestFormat {
        if self.major >= TOML_MANIFEST_SINCE {
            ManifestFormat::Toml
        } else {
            ManifestFormat::Yaml
        }
    }
}

impl Default for RuntimeVersion {
    fn default() -> Self {
        Self { major: 2, minor: 0 }
    }
}

impl FromStr for RuntimeVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidRuntimeVersion(s.to_string());
        let mut parts = s.split('.');
        let major = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(invalid)?;
        let minor = match parts.next() {
            Some(p) => p.parse().map_err(|_| invalid())?,
            None => 0,
        };
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self { major, minor })
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Supported manifest serialization formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Toml,
    Yaml,
}

impl ManifestFormat {
    /// The manifest filename looked up inside each addon directory.
    pub fn filename(&self) -> &'static str {
        match self {
            ManifestFormat::Toml => MANIFEST_FILENAME,
            ManifestFormat::Yaml => LEGACY_MANIFEST_FILENAME,
        }
    }
}

/// Normalized addon manifest, identical for both formats.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddonManifest {
    /// Names of addons this addon depends on. Duplicates are irrelevant.
    #[serde(default)]
    pub depends: Vec<String>,
    /// Whether the addon may enter the merged namespace.
    #[serde(default = "default_installable")]
    pub installable: bool,
    /// Optional human-readable summary. Unknown keys are tolerated.
    #[serde(default)]
    pub summary: Option<String>,
}

fn default_installable() -> bool {
    true
}

impl Default for AddonManifest {
    fn default() -> Self {
        Self {
            depends: Vec::new(),
            installable: true,
            summary: None,
        }
    }
}

impl AddonManifest {
    /// Parse a manifest from a string in the given format.
    pub fn parse(content: &str, format: ManifestFormat) -> std::result::Result<Self, String> {
        match format {
            ManifestFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            ManifestFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        }
    }

    /// Load the manifest for one addon candidate directory.
    ///
    /// Returns `Ok(None)` when no manifest file is present (the directory is
    /// not an addon). A present but unparseable manifest is fatal.
    pub fn load(addon_dir: &Path, format: ManifestFormat) -> Result<Option<Self>> {
        let path = addon_dir.join(format.filename());
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        let manifest = Self::parse(&content, format).map_err(|reason| Error::ManifestParse {
            path: path.clone(),
            reason,
        })?;
        Ok(Some(manifest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_runtime_version_parses() {
        let v: RuntimeVersion = "2.0".parse().unwrap();
        assert_eq!(v, RuntimeVersion { major: 2, minor: 0 });
        let v: RuntimeVersion = "1.4".parse().unwrap();
        assert_eq!(v, RuntimeVersion { major: 1, minor: 4 });
        let v: RuntimeVersion = "3".parse().unwrap();
        assert_eq!(v, RuntimeVersion { major: 3, minor: 0 });
    }

    #[test]
    fn test_runtime_version_rejects_garbage() {
        assert!("".parse::<RuntimeVersion>().is_err());
        assert!("x.y".parse::<RuntimeVersion>().is_err());
        assert!("2.0.1".parse::<RuntimeVersion>().is_err());
    }

    #[test]
    fn test_runtime_version_selects_format() {
        let modern: RuntimeVersion = "2.0".parse().unwrap();
        assert_eq!(modern.manifest_format(), ManifestFormat::Toml);
        let legacy: RuntimeVersion = "1.9".parse().unwrap();
        assert_eq!(legacy.manifest_format(), ManifestFormat::Yaml);
    }

    #[test]
    fn test_parse_toml_manifest() {
        let manifest = AddonManifest::parse(
            r#"
depends = ["base", "web"]
installable = true
summary = "Demo addon"
"#,
            ManifestFormat::Toml,
        )
        .unwrap();
        assert_eq!(manifest.depends, vec!["base", "web"]);
        assert!(manifest.installable);
        assert_eq!(manifest.summary.as_deref(), Some("Demo addon"));
    }

    #[test]
    fn test_parse_yaml_manifest() {
        let manifest = AddonManifest::parse(
            "depends: [base]\ninstallable: false\n",
            ManifestFormat::Yaml,
        )
        .unwrap();
        assert_eq!(manifest.depends, vec!["base"]);
        assert!(!manifest.installable);
    }

    #[test]
    fn test_installable_defaults_true() {
        let manifest = AddonManifest::parse("depends = []", ManifestFormat::Toml).unwrap();
        assert!(manifest.installable);
        let manifest = AddonManifest::parse("{}", ManifestFormat::Yaml).unwrap();
        assert!(manifest.installable);
    }

    #[test]
    fn test_unknown_keys_tolerated() {
        let manifest = AddonManifest::parse(
            "depends = [\"base\"]\nauthor = \"someone\"\n",
            ManifestFormat::Toml,
        )
        .unwrap();
        assert_eq!(manifest.depends, vec!["base"]);
    }

    #[test]
    fn test_load_missing_manifest_is_not_an_addon() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = AddonManifest::load(dir.path(), ManifestFormat::Toml).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_broken_manifest_is_fatal_and_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILENAME);
        std::fs::write(&path, "depends = [not closed").unwrap();

        let err = AddonManifest::load(dir.path(), ManifestFormat::Toml).unwrap_err();
        assert!(matches!(err, Error::ManifestParse { .. }));
        assert!(err.to_string().contains(MANIFEST_FILENAME));
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILENAME),
            "depends = [\"base\"]\n",
        )
        .unwrap();

        let manifest = AddonManifest::load(dir.path(), ManifestFormat::Toml)
            .unwrap()
            .unwrap();
        assert_eq!(manifest.depends, vec!["base"]);
    }
}
