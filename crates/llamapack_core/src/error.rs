//! Error types for layout, manifest and configuration handling.
//!
//! Placement resolution itself is total and has no error taxonomy.

use std::fmt;

/// Layout errors
#[derive(Debug)]
pub enum LayoutError {
    NoHomeDir,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::NoHomeDir => write!(f, "Could not find home directory"),
        }
    }
}

impl std::error::Error for LayoutError {}

/// Manifest errors
#[derive(Debug)]
pub enum ManifestError {
    Io(String),
    Parse(String),
    Serialize(String),
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestError::Io(e) => write!(f, "IO error: {}", e),
            ManifestError::Parse(e) => write!(f, "Parse error: {}", e),
            ManifestError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for ManifestError {}

impl From<std::io::Error> for ManifestError {
    fn from(e: std::io::Error) -> Self {
        ManifestError::Io(e.to_string())
    }
}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e.to_string())
    }
}
