//! Path command - resolve the packaged server binary for a variant
//!
//! Reconstructs the variant's placement with the same table the build
//! used and prints the absolute path. No existence check: a missing
//! binary is discovered when the caller executes it.

use crate::commands;
use clap::Args;
use llamapack_core::platform::Platform;
use std::path::PathBuf;

#[derive(Args)]
pub struct PathArgs {
    /// Variant to resolve (default, cuda, tensorcores)
    #[arg(short = 'V', long, default_value = "default")]
    pub variant: String,

    /// Package directory (default: $LLAMAPACK_DIR or ~/.llamapack)
    #[arg(long)]
    pub package_dir: Option<PathBuf>,
}

pub fn execute(args: PathArgs) -> Result<(), Box<dyn std::error::Error>> {
    let variant = commands::parse_variant_arg(&args.variant);
    let layout = commands::package_layout(args.package_dir)?;

    println!("{}", layout.binary_path(variant, Platform::host()).display());

    Ok(())
}
