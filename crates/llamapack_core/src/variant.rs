//! Acceleration variants of the packaged engine build.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hardware-acceleration build configuration of the engine.
///
/// Selected by the caller (CLI flag or config file), never auto-detected.
/// Free-form strings are converted to this closed enum once at the
/// boundary via [`Variant::parse`]; only the enum travels through the
/// system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Plain CPU build.
    #[default]
    Default,
    /// CUDA build with MMQ kernels forced on.
    Cuda,
    /// CUDA build using the cuBLAS tensor-core path.
    TensorCores,
}

impl Variant {
    /// All variants, in build order.
    pub const fn all() -> [Variant; 3] {
        [Variant::Default, Variant::Cuda, Variant::TensorCores]
    }

    /// Parse a variant name.
    ///
    /// Total and case-insensitive: an unrecognized name yields
    /// [`Variant::Default`] rather than an error (fails open).
    pub fn parse(name: &str) -> Variant {
        match name.trim().to_lowercase().as_str() {
            "cuda" => Variant::Cuda,
            "tensorcores" => Variant::TensorCores,
            _ => Variant::Default,
        }
    }

    /// Whether a name maps to a variant without falling back.
    ///
    /// `"all"` counts as recognized; callers use this to warn about typos
    /// before the silent fallback in [`Variant::parse`] kicks in.
    pub fn is_recognized(name: &str) -> bool {
        matches!(name.trim().to_lowercase().as_str(), "default" | "cuda" | "tensorcores" | "all")
    }

    /// Expand requested variant names into concrete variants.
    ///
    /// `"all"` expands to every variant, duplicates collapse (first
    /// occurrence wins the ordering), unrecognized names fall back to
    /// `Default`. An empty request yields `[Default]`.
    pub fn parse_requested(names: &[String]) -> Vec<Variant> {
        let mut variants = Vec::new();
        for name in names {
            if name.trim().eq_ignore_ascii_case("all") {
                for v in Variant::all() {
                    if !variants.contains(&v) {
                        variants.push(v);
                    }
                }
            } else {
                let v = Variant::parse(name);
                if !variants.contains(&v) {
                    variants.push(v);
                }
            }
        }
        if variants.is_empty() {
            variants.push(Variant::Default);
        }
        variants
    }

    /// Canonical lowercase name, matching the serde encoding.
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Default => "default",
            Variant::Cuda => "cuda",
            Variant::TensorCores => "tensorcores",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_names() {
        assert_eq!(Variant::parse("default"), Variant::Default);
        assert_eq!(Variant::parse("cuda"), Variant::Cuda);
        assert_eq!(Variant::parse("tensorcores"), Variant::TensorCores);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Variant::parse("CUDA"), Variant::Cuda);
        assert_eq!(Variant::parse(" TensorCores "), Variant::TensorCores);
    }

    #[test]
    fn test_parse_falls_back_to_default() {
        assert_eq!(Variant::parse("rocm"), Variant::Default);
        assert_eq!(Variant::parse(""), Variant::Default);
        assert_eq!(Variant::parse("cuda12"), Variant::Default);
    }

    #[test]
    fn test_parse_requested_expands_all() {
        let names = vec!["all".to_string()];
        assert_eq!(Variant::parse_requested(&names), Variant::all().to_vec());
    }

    #[test]
    fn test_parse_requested_dedups_and_defaults() {
        let names = vec!["cuda".to_string(), "cuda".to_string()];
        assert_eq!(Variant::parse_requested(&names), vec![Variant::Cuda]);
        assert_eq!(Variant::parse_requested(&[]), vec![Variant::Default]);
    }

    #[test]
    fn test_display_matches_serde_encoding() {
        for v in Variant::all() {
            let json = serde_json::to_string(&v).unwrap();
            assert_eq!(json, format!("\"{}\"", v));
        }
    }
}
