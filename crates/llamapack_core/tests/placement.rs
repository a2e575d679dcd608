use llamapack_core::placement::resolve;
use llamapack_core::platform::Platform;
use llamapack_core::variant::Variant;
use std::path::{Component, Path, PathBuf};

/// Normalize `.` and `..` components without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::ParentDir => {
                out.pop();
            },
            c => out.push(c),
        }
    }
    out
}

#[test]
fn test_output_subdir_table() {
    for platform in Platform::all() {
        assert_eq!(resolve(Variant::Default, platform).output_subdir, ".");
        assert_eq!(resolve(Variant::Cuda, platform).output_subdir, "cuda");
        assert_eq!(resolve(Variant::TensorCores, platform).output_subdir, "cuda-tensorcores");
    }
}

#[test]
fn test_lib_search_rel_table() {
    for platform in Platform::all() {
        assert_eq!(resolve(Variant::Default, platform).lib_search_rel, "../lib");
        assert_eq!(resolve(Variant::Cuda, platform).lib_search_rel, "../../lib");
        assert_eq!(resolve(Variant::TensorCores, platform).lib_search_rel, "../../lib");
    }
}

#[test]
fn test_search_path_expr_only_on_linux_and_macos() {
    for variant in Variant::all() {
        assert!(resolve(variant, Platform::Linux).search_path_expr.is_some());
        assert!(resolve(variant, Platform::Macos).search_path_expr.is_some());
        assert!(resolve(variant, Platform::Windows).search_path_expr.is_none());
        assert!(resolve(variant, Platform::Other).search_path_expr.is_none());
    }
}

#[test]
fn test_cuda_on_linux() {
    let plan = resolve(Variant::Cuda, Platform::Linux);
    assert_eq!(plan.output_subdir, "cuda");
    assert_eq!(plan.lib_search_rel, "../../lib");
    assert_eq!(plan.search_path_expr.as_deref(), Some("$ORIGIN:$ORIGIN/../../lib"));
}

#[test]
fn test_default_on_macos() {
    let plan = resolve(Variant::Default, Platform::Macos);
    assert_eq!(plan.output_subdir, ".");
    assert_eq!(plan.lib_search_rel, "../lib");
    assert_eq!(
        plan.search_path_expr.as_deref(),
        Some("@executable_path:@executable_path/../lib")
    );
}

#[test]
fn test_tensorcores_on_windows() {
    let plan = resolve(Variant::TensorCores, Platform::Windows);
    assert_eq!(plan.output_subdir, "cuda-tensorcores");
    assert_eq!(plan.search_path_expr, None);
}

#[test]
fn test_subdir_and_rel_path_are_a_matched_pair() {
    // From any variant directory, the relative search path must land on
    // the single shared lib directory next to the bin root.
    let root = Path::new("/pkg");
    for variant in Variant::all() {
        let plan = resolve(variant, Platform::Linux);
        let from_variant_dir = root
            .join("bin")
            .join(plan.output_subdir)
            .join(plan.lib_search_rel);
        assert_eq!(
            normalize(&from_variant_dir),
            PathBuf::from("/pkg/lib"),
            "variant {} does not climb back to the shared lib dir",
            variant
        );
    }
}

#[test]
fn test_subdir_does_not_depend_on_platform() {
    for variant in Variant::all() {
        let reference = resolve(variant, Platform::Linux);
        for platform in Platform::all() {
            let plan = resolve(variant, platform);
            assert_eq!(plan.output_subdir, reference.output_subdir);
            assert_eq!(plan.lib_search_rel, reference.lib_search_rel);
        }
    }
}

#[test]
fn test_unrecognized_variant_resolves_like_default() {
    let fallback = Variant::parse("no-such-variant");
    for platform in Platform::all() {
        assert_eq!(resolve(fallback, platform), resolve(Variant::Default, platform));
    }
}
