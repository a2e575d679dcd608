//! Per-variant, per-platform placement resolution.
//!
//! The one decision table in this package: where a variant's build outputs
//! go under the bin root, and which runtime-linker directive gets embedded
//! so the executable finds its shared libraries after installation.

use crate::platform::Platform;
use crate::variant::Variant;

/// Directory-layout and linker-path decision for one variant.
///
/// Produced fresh by [`resolve`] for each variant in a build session and
/// never persisted. `output_subdir` and `lib_search_rel` are a matched
/// pair: joining them always climbs from the variant directory back to
/// the shared `lib` directory next to the bin root, regardless of nesting
/// depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementPlan {
    /// Relative path under the package bin root where this variant's
    /// artifacts are placed. `"."` means the bin root itself.
    pub output_subdir: &'static str,
    /// Relative path from `output_subdir` back to the shared lib
    /// directory. Only embedded on platforms with an rpath mechanism.
    pub lib_search_rel: &'static str,
    /// Runtime-linker search directive covering both the executable's own
    /// directory and the shared lib directory. `None` on Windows and
    /// other platforms without an rpath mechanism.
    pub search_path_expr: Option<String>,
}

/// Resolve the placement for one variant on one platform.
///
/// Pure and total: every input combination yields a plan, there are no
/// error conditions and no side effects. Directory creation and file
/// copying are the caller's business.
pub fn resolve(variant: Variant, platform: Platform) -> PlacementPlan {
    let (output_subdir, lib_search_rel) = match variant {
        Variant::Default => (".", "../lib"),
        Variant::Cuda => ("cuda", "../../lib"),
        Variant::TensorCores => ("cuda-tensorcores", "../../lib"),
    };

    let search_path_expr = match platform {
        Platform::Linux => Some(format!("$ORIGIN:$ORIGIN/{}", lib_search_rel)),
        Platform::Macos => Some(format!("@executable_path:@executable_path/{}", lib_search_rel)),
        Platform::Windows | Platform::Other => None,
    };

    PlacementPlan {
        output_subdir,
        lib_search_rel,
        search_path_expr,
    }
}
