//! Clean command - remove built artifacts from the package directory

use crate::{commands, output};
use clap::Args;
use llamapack_core::manifest::PackageManifest;
use llamapack_core::platform::Platform;
use llamapack_core::variant::Variant;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct CleanArgs {
    /// Only show what would be deleted (dry run)
    #[arg(long)]
    pub dry_run: bool,

    /// Clean a single variant's artifacts only
    #[arg(short = 'V', long)]
    pub variant: Option<String>,

    /// Remove the whole package directory including the manifest
    #[arg(long)]
    pub all: bool,

    /// Package directory (default: $LLAMAPACK_DIR or ~/.llamapack)
    #[arg(long)]
    pub package_dir: Option<PathBuf>,
}

pub fn execute(args: CleanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let layout = commands::package_layout(args.package_dir.clone())?;
    let root = layout.root().to_path_buf();

    if !root.exists() {
        println!("Nothing to clean.");
        return Ok(());
    }

    if args.all {
        clean_path(&root, "package directory", args.dry_run)?;
        return Ok(());
    }

    let manifest_path = PackageManifest::manifest_path(&root);
    let mut manifest = PackageManifest::load(&manifest_path)?;

    if let Some(name) = &args.variant {
        let variant = commands::parse_variant_arg(name);

        // The default variant lives in the bin root itself, so only its
        // executable goes; nested variants drop their whole directory.
        let target = match variant {
            Variant::Default => layout.binary_path(variant, Platform::host()),
            _ => layout.variant_dir(variant),
        };

        if target.exists() {
            clean_path(&target, &format!("{} artifacts", variant), args.dry_run)?;
        } else {
            println!("Nothing built for variant '{}'", variant);
        }

        if !args.dry_run && manifest.remove(variant).is_some() {
            manifest.save(&manifest_path)?;
        }
        return Ok(());
    }

    // Default: drop all built output, keep the manifest file around with
    // the engine pin but no build records.
    let mut cleaned = false;
    for dir in [layout.bin_root(), layout.lib_dir()] {
        if dir.exists() {
            clean_path(&dir, &format!("{}", dir.display()), args.dry_run)?;
            cleaned = true;
        }
    }

    if !cleaned {
        println!("Nothing to clean.");
        return Ok(());
    }

    if !args.dry_run && !manifest.builds.is_empty() {
        manifest.builds.clear();
        manifest.save(&manifest_path)?;
    }

    Ok(())
}

fn clean_path(path: &Path, name: &str, dry_run: bool) -> Result<(), Box<dyn std::error::Error>> {
    let size = path_size(path)?;
    let size_str = format_size(size);

    if dry_run {
        output::skipping(&format!("{} ({}) - dry run", name, size_str));
    } else {
        output::cleaning(&format!("{} ({})", name, size_str));
        if path.is_dir() {
            std::fs::remove_dir_all(path)?;
        } else {
            std::fs::remove_file(path)?;
        }
        output::removed(name);
    }

    Ok(())
}

fn path_size(path: &Path) -> Result<u64, Box<dyn std::error::Error>> {
    let mut size = 0;
    if path.is_dir() {
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                size += path_size(&path)?;
            } else {
                size += entry.metadata()?.len();
            }
        }
    } else {
        size = std::fs::metadata(path)?.len();
    }
    Ok(size)
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 bytes");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.00 MB");
    }
}
