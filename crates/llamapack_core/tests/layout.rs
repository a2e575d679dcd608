use llamapack_core::layout::{PackageLayout, PACKAGE_DIR_ENV};
use llamapack_core::platform::Platform;
use llamapack_core::variant::Variant;
use std::path::{Path, PathBuf};

#[test]
fn test_binary_path_per_variant() {
    let layout = PackageLayout::new("/pkg");

    assert_eq!(
        layout.binary_path(Variant::Default, Platform::Linux),
        PathBuf::from("/pkg/bin/llama-server")
    );
    assert_eq!(
        layout.binary_path(Variant::Cuda, Platform::Linux),
        PathBuf::from("/pkg/bin/cuda/llama-server")
    );
    assert_eq!(
        layout.binary_path(Variant::TensorCores, Platform::Linux),
        PathBuf::from("/pkg/bin/cuda-tensorcores/llama-server")
    );
}

#[test]
fn test_binary_path_executable_name_per_platform() {
    let layout = PackageLayout::new("/pkg");

    for variant in Variant::all() {
        let windows = layout.binary_path(variant, Platform::Windows);
        assert!(windows.to_string_lossy().ends_with("llama-server.exe"));

        for platform in [Platform::Linux, Platform::Macos, Platform::Other] {
            let other = layout.binary_path(variant, platform);
            assert!(other.to_string_lossy().ends_with("llama-server"));
            assert!(!other.to_string_lossy().ends_with(".exe"));
        }
    }
}

#[test]
fn test_default_variant_has_no_dot_component() {
    let layout = PackageLayout::new("/pkg");
    let path = layout.binary_path(Variant::Default, Platform::Linux);
    assert!(path.components().all(|c| c.as_os_str() != "."));
}

#[test]
fn test_library_dest() {
    let layout = PackageLayout::new("/pkg");

    // rpath platforms share one lib directory...
    for platform in [Platform::Linux, Platform::Macos, Platform::Other] {
        for variant in Variant::all() {
            assert_eq!(layout.library_dest(variant, platform), PathBuf::from("/pkg/lib"));
        }
    }

    // ...Windows keeps DLLs next to each executable.
    assert_eq!(
        layout.library_dest(Variant::Default, Platform::Windows),
        PathBuf::from("/pkg/bin")
    );
    assert_eq!(
        layout.library_dest(Variant::Cuda, Platform::Windows),
        PathBuf::from("/pkg/bin/cuda")
    );
}

#[test]
fn test_env_var_overrides_default_root() {
    std::env::set_var(PACKAGE_DIR_ENV, "/custom/root");
    let root = PackageLayout::default_root().unwrap();
    std::env::remove_var(PACKAGE_DIR_ENV);

    assert_eq!(root, PathBuf::from("/custom/root"));
}

#[test]
fn test_bin_and_lib_are_siblings() {
    let layout = PackageLayout::new("/pkg");
    assert_eq!(layout.bin_root().parent(), Some(Path::new("/pkg")));
    assert_eq!(layout.lib_dir().parent(), Some(Path::new("/pkg")));
}
