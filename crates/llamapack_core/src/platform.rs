//! Host platform detection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating system the package is built on and installed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linux,
    Macos,
    Windows,
    /// Anything else (BSDs, wasm, ...). Treated like Linux for layout but
    /// gets no embedded search path.
    Other,
}

impl Platform {
    /// Detect the host platform.
    pub fn host() -> Platform {
        match std::env::consts::OS {
            "linux" => Platform::Linux,
            "macos" => Platform::Macos,
            "windows" => Platform::Windows,
            _ => Platform::Other,
        }
    }

    /// All platform values.
    pub const fn all() -> [Platform; 4] {
        [Platform::Linux, Platform::Macos, Platform::Windows, Platform::Other]
    }

    /// Filename of the packaged server executable on this platform.
    pub fn executable_name(&self) -> &'static str {
        match self {
            Platform::Windows => "llama-server.exe",
            _ => "llama-server",
        }
    }

    /// Canonical lowercase name, matching the serde encoding.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Macos => "macos",
            Platform::Windows => "windows",
            Platform::Other => "other",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_executable_name() {
        assert_eq!(Platform::Windows.executable_name(), "llama-server.exe");
        assert_eq!(Platform::Linux.executable_name(), "llama-server");
        assert_eq!(Platform::Macos.executable_name(), "llama-server");
        assert_eq!(Platform::Other.executable_name(), "llama-server");
    }

    #[test]
    fn test_host_is_a_known_value() {
        // Whatever we run the tests on must map into the closed enum.
        let host = Platform::host();
        assert!(Platform::all().contains(&host));
    }
}
