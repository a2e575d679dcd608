//! CLI subcommands

pub mod build;
pub mod clean;
pub mod list;
pub mod path;
pub mod version;

use crate::output;
use llamapack_core::layout::PackageLayout;
use llamapack_core::variant::Variant;
use std::path::PathBuf;

/// Convert a variant argument at the CLI boundary.
///
/// The fallback itself is silent policy (an unrecognized variant behaves
/// exactly like `default`), but a typo on the command line is worth a
/// warning before it does.
pub(crate) fn parse_variant_arg(name: &str) -> Variant {
    if !Variant::is_recognized(name) {
        output::warning(&format!("unrecognized variant '{}', using default", name));
    }
    Variant::parse(name)
}

/// Package layout from an optional `--package-dir` override.
pub(crate) fn package_layout(package_dir: Option<PathBuf>) -> Result<PackageLayout, Box<dyn std::error::Error>> {
    let root = match package_dir {
        Some(dir) if dir.is_relative() => std::env::current_dir()?.join(dir),
        Some(dir) => dir,
        None => PackageLayout::default_root()?,
    };
    Ok(PackageLayout::new(root))
}
