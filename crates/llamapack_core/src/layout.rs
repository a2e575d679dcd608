//! Installed package layout and binary lookup.

use crate::error::LayoutError;
use crate::placement::resolve;
use crate::platform::Platform;
use crate::variant::Variant;
use std::path::{Path, PathBuf};

/// Environment variable overriding the default package root.
pub const PACKAGE_DIR_ENV: &str = "LLAMAPACK_DIR";

/// Layout of one installed package directory.
///
/// Executables live under `root/bin` (nested per variant), shared
/// libraries under `root/lib`, the build manifest at
/// `root/manifest.json`.
#[derive(Debug, Clone)]
pub struct PackageLayout {
    root: PathBuf,
}

impl PackageLayout {
    /// Create a layout over an explicit package root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Layout over the default package root ([`default_root`]).
    ///
    /// [`default_root`]: PackageLayout::default_root
    pub fn from_env() -> Result<Self, LayoutError> {
        Ok(Self::new(Self::default_root()?))
    }

    /// Default package root: `$LLAMAPACK_DIR` if set and non-empty,
    /// otherwise `~/.llamapack`.
    pub fn default_root() -> Result<PathBuf, LayoutError> {
        if let Ok(dir) = std::env::var(PACKAGE_DIR_ENV) {
            if !dir.is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }
        let home = dirs::home_dir().ok_or(LayoutError::NoHomeDir)?;
        Ok(home.join(".llamapack"))
    }

    /// The package root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Root of the per-variant binary tree (`root/bin`).
    pub fn bin_root(&self) -> PathBuf {
        self.root.join("bin")
    }

    /// Shared library directory (`root/lib`).
    pub fn lib_dir(&self) -> PathBuf {
        self.root.join("lib")
    }

    /// Directory a variant's artifacts are placed in.
    pub fn variant_dir(&self, variant: Variant) -> PathBuf {
        let plan = resolve(variant, Platform::host());
        join_subdir(self.bin_root(), plan.output_subdir)
    }

    /// Path of the packaged server executable for a variant.
    ///
    /// Purely computed: no existence check and no error signaling. A
    /// missing file is discovered only when the caller executes it.
    pub fn binary_path(&self, variant: Variant, platform: Platform) -> PathBuf {
        let plan = resolve(variant, platform);
        join_subdir(self.bin_root(), plan.output_subdir).join(platform.executable_name())
    }

    /// Where a variant's shared libraries are staged.
    ///
    /// Linux/macOS (and other) use the single shared `lib` directory the
    /// embedded search path points at; Windows has no rpath mechanism, so
    /// DLLs land next to the executable in the variant directory.
    pub fn library_dest(&self, variant: Variant, platform: Platform) -> PathBuf {
        match platform {
            Platform::Windows => {
                let plan = resolve(variant, platform);
                join_subdir(self.bin_root(), plan.output_subdir)
            },
            _ => self.lib_dir(),
        }
    }
}

/// Resolve the packaged server binary for a variant under the default
/// package root.
///
/// The runtime entry point: reconstructs the variant's placement with the
/// same table the build used and concatenates it with the installed bin
/// root. Performs no existence check.
pub fn get_binary_path(variant: Variant) -> Result<PathBuf, LayoutError> {
    Ok(PackageLayout::from_env()?.binary_path(variant, Platform::host()))
}

/// Join a placement subdirectory onto a base path; `"."` adds no
/// component.
fn join_subdir(base: PathBuf, subdir: &str) -> PathBuf {
    if subdir == "." {
        base
    } else {
        base.join(subdir)
    }
}
