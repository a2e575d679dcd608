//! llamapack core library
//!
//! Placement resolution and package layout for packaged llama.cpp server
//! binaries. The CLI (`llamapack-cli`) drives the actual CMake build and
//! file copying; everything in this crate is pure path computation plus
//! the package manifest and build configuration it records decisions in.
//!
//! ## Layout
//!
//! An installed package directory looks like:
//!
//! ```text
//! <package_root>/
//!   bin/
//!     llama-server              # default (CPU) variant
//!     cuda/llama-server         # cuda variant
//!     cuda-tensorcores/llama-server
//!   lib/                        # shared libraries (Linux/macOS)
//!   manifest.json
//! ```
//!
//! Executables built for Linux/macOS carry an embedded search path
//! (`$ORIGIN` / `@executable_path` relative) that climbs from their
//! variant directory back to the shared `lib/` directory, so the package
//! is relocatable as a whole.

pub mod config;
pub mod error;
pub mod layout;
pub mod manifest;
pub mod placement;
pub mod platform;
pub mod variant;

pub use config::{BuildConfig, ENGINE_DEFAULT_TAG, ENGINE_REPO_URL};
pub use error::{ConfigError, LayoutError, ManifestError};
pub use layout::{get_binary_path, PackageLayout, PACKAGE_DIR_ENV};
pub use manifest::{BuildRecord, EngineInfo, PackageManifest};
pub use placement::{resolve, PlacementPlan};
pub use platform::Platform;
pub use variant::Variant;
