//! List command - show built variants recorded in the package manifest

use crate::commands;
use clap::Args;
use llamapack_core::manifest::PackageManifest;
use llamapack_core::platform::Platform;
use std::path::PathBuf;

#[derive(Args)]
pub struct ListArgs {
    /// Package directory (default: $LLAMAPACK_DIR or ~/.llamapack)
    #[arg(long)]
    pub package_dir: Option<PathBuf>,
}

pub fn execute(args: ListArgs) -> Result<(), Box<dyn std::error::Error>> {
    let layout = commands::package_layout(args.package_dir)?;
    let manifest = PackageManifest::load(&PackageManifest::manifest_path(layout.root()))?;

    println!("Package: {}", layout.root().display());
    if !manifest.engine.repo.is_empty() {
        println!("Engine: {} ({})", manifest.engine.repo, manifest.engine.reference);
    }
    println!();

    println!("Built variants:");
    if manifest.builds.is_empty() {
        println!("  (none built)");
        return Ok(());
    }

    for record in &manifest.builds {
        let binary = layout.binary_path(record.variant, record.platform);
        println!(
            "  {:<14} {:<8} {:<3} lib(s)  {}",
            record.variant.name(),
            record.platform.name(),
            record.libraries.len(),
            binary.display()
        );
    }

    // Point out records built on another OS; their paths resolve for
    // that OS, not this one.
    let host = Platform::host();
    if manifest.builds.iter().any(|b| b.platform != host) {
        println!();
        println!("Note: some variants were built for a different platform than this host ({}).", host);
    }

    Ok(())
}
