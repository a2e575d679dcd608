//! Build configuration (`llamapack.toml`).
//!
//! Everything here is optional; CLI flags override config values, and an
//! absent file yields the pinned defaults.
//!
//! ```toml
//! package-dir = "dist"
//!
//! [engine]
//! git = "https://github.com/ggml-org/llama.cpp"
//! tag = "b4689"
//! # or build from a local checkout instead of cloning:
//! # path = "../llama.cpp"
//!
//! [build]
//! variants = ["default", "cuda"]
//! jobs = 8
//! cmake-args = ["-DGGML_NATIVE=OFF"]
//! ```

use crate::error::ConfigError;
use crate::variant::Variant;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Upstream repository of the packaged engine.
pub const ENGINE_REPO_URL: &str = "https://github.com/ggml-org/llama.cpp";

/// Engine release the package is pinned to by default.
pub const ENGINE_DEFAULT_TAG: &str = "b4689";

/// Config filename looked up in the working directory.
pub const CONFIG_FILE: &str = "llamapack.toml";

/// Build configuration file contents.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct BuildConfig {
    /// Package directory build outputs are staged into
    pub package_dir: Option<PathBuf>,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub build: BuildOptions,
}

/// `[engine]` section: where the engine source comes from.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EngineConfig {
    /// Git URL to clone
    #[serde(default = "default_repo")]
    pub git: String,
    /// Tag or commit to build
    #[serde(default = "default_tag")]
    pub tag: String,
    /// Local checkout used instead of cloning when set
    pub path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            git: default_repo(),
            tag: default_tag(),
            path: None,
        }
    }
}

/// `[build]` section: how the engine is compiled.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct BuildOptions {
    /// Variant names to build when the CLI does not name any
    #[serde(default)]
    variants: Vec<String>,
    /// Parallel build jobs
    pub jobs: Option<u32>,
    /// Extra arguments appended to the CMake configure step
    #[serde(default)]
    pub cmake_args: Vec<String>,
}

impl BuildOptions {
    /// Configured variants as the closed enum.
    ///
    /// The free-form names stop here: unrecognized entries fall back to
    /// `default` and duplicates collapse.
    pub fn requested_variants(&self) -> Vec<Variant> {
        if self.variants.is_empty() {
            return Vec::new();
        }
        Variant::parse_requested(&self.variants)
    }

    /// Raw variant names as written in the file.
    pub fn variant_names(&self) -> &[String] {
        &self.variants
    }
}

impl BuildConfig {
    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        Ok(config)
    }

    /// Load `llamapack.toml` from the working directory if present,
    /// otherwise return the defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = Path::new(CONFIG_FILE);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

fn default_repo() -> String {
    ENGINE_REPO_URL.to_string()
}

fn default_tag() -> String {
    ENGINE_DEFAULT_TAG.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_pinned_defaults() {
        let config: BuildConfig = toml::from_str("").unwrap();
        assert_eq!(config.engine.git, ENGINE_REPO_URL);
        assert_eq!(config.engine.tag, ENGINE_DEFAULT_TAG);
        assert!(config.engine.path.is_none());
        assert!(config.package_dir.is_none());
        assert!(config.build.requested_variants().is_empty());
    }

    #[test]
    fn test_full_config_parses() {
        let config: BuildConfig = toml::from_str(
            r#"
            package-dir = "dist"

            [engine]
            git = "https://example.com/fork.git"
            tag = "b9999"

            [build]
            variants = ["cuda", "tensorcores"]
            jobs = 4
            cmake-args = ["-DGGML_NATIVE=OFF"]
            "#,
        )
        .unwrap();

        assert_eq!(config.package_dir.as_deref(), Some(Path::new("dist")));
        assert_eq!(config.engine.git, "https://example.com/fork.git");
        assert_eq!(config.engine.tag, "b9999");
        assert_eq!(
            config.build.requested_variants(),
            vec![Variant::Cuda, Variant::TensorCores]
        );
        assert_eq!(config.build.jobs, Some(4));
        assert_eq!(config.build.cmake_args, vec!["-DGGML_NATIVE=OFF"]);
    }

    #[test]
    fn test_local_engine_path() {
        let config: BuildConfig = toml::from_str(
            r#"
            [engine]
            path = "../llama.cpp"
            "#,
        )
        .unwrap();

        assert_eq!(config.engine.path.as_deref(), Some(Path::new("../llama.cpp")));
        // Defaults still fill the unset fields.
        assert_eq!(config.engine.tag, ENGINE_DEFAULT_TAG);
    }

    #[test]
    fn test_unrecognized_variant_falls_back() {
        let config: BuildConfig = toml::from_str(
            r#"
            [build]
            variants = ["metal"]
            "#,
        )
        .unwrap();

        assert_eq!(config.build.requested_variants(), vec![Variant::Default]);
    }
}
