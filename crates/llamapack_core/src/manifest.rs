//! Package build manifest stored at `<package_root>/manifest.json`.
//!
//! Records which engine reference the package was built from and one
//! entry per staged variant, so `list` and `clean` know what is installed
//! without probing the filesystem.

use crate::error::ManifestError;
use crate::platform::Platform;
use crate::variant::Variant;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Build manifest of one package directory.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PackageManifest {
    /// Schema version for future compatibility
    pub version: u32,
    /// Engine source the binaries were built from
    #[serde(default)]
    pub engine: EngineInfo,
    /// One record per staged variant
    #[serde(default)]
    pub builds: Vec<BuildRecord>,
}

/// Engine source pin.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineInfo {
    /// Git URL of the engine repository
    pub repo: String,
    /// Tag or commit the binaries were built from
    pub reference: String,
}

/// One staged variant build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildRecord {
    pub variant: Variant,
    pub platform: Platform,
    /// Subdirectory under the bin root (`"."` for the bin root itself)
    pub subdir: String,
    /// Executable filename inside `subdir`
    pub executable: String,
    /// Shared libraries staged alongside this build
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub libraries: Vec<String>,
    /// Build timestamp (unix seconds)
    pub built_at: String,
}

impl PackageManifest {
    /// Current schema version
    pub const CURRENT_VERSION: u32 = 1;

    /// Create a new empty manifest
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            engine: EngineInfo::default(),
            builds: Vec::new(),
        }
    }

    /// Manifest location inside a package root
    pub fn manifest_path(root: &Path) -> PathBuf {
        root.join("manifest.json")
    }

    /// Load a manifest from file; a missing file is an empty manifest
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ManifestError::Io(e.to_string()))?;

        let manifest: Self = serde_json::from_str(&content).map_err(|e| ManifestError::Parse(e.to_string()))?;

        Ok(manifest)
    }

    /// Save the manifest, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<(), ManifestError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ManifestError::Io(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self).map_err(|e| ManifestError::Serialize(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| ManifestError::Io(e.to_string()))?;

        Ok(())
    }

    /// Find the record for a variant
    pub fn find(&self, variant: Variant) -> Option<&BuildRecord> {
        self.builds.iter().find(|b| b.variant == variant)
    }

    /// Add or replace the record for a variant
    pub fn upsert(&mut self, record: BuildRecord) {
        if let Some(existing) = self.builds.iter_mut().find(|b| b.variant == record.variant) {
            *existing = record;
        } else {
            self.builds.push(record);
        }
    }

    /// Remove the record for a variant
    pub fn remove(&mut self, variant: Variant) -> Option<BuildRecord> {
        if let Some(idx) = self.builds.iter().position(|b| b.variant == variant) {
            Some(self.builds.remove(idx))
        } else {
            None
        }
    }
}

/// Unix-seconds timestamp for [`BuildRecord::built_at`].
pub fn unix_timestamp() -> String {
    use std::time::SystemTime;
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}", now)
}
