use llamapack_core::config::{ENGINE_DEFAULT_TAG, ENGINE_REPO_URL};
use llamapack_core::layout::PackageLayout;
use llamapack_core::manifest::PackageManifest;

pub fn execute() -> Result<(), Box<dyn std::error::Error>> {
    println!("llamapack {}", env!("CARGO_PKG_VERSION"));
    println!("engine: {} (pinned: {})", ENGINE_REPO_URL, ENGINE_DEFAULT_TAG);

    #[cfg(target_os = "macos")]
    let platform = format!("{}-apple-darwin", std::env::consts::ARCH);
    #[cfg(target_os = "linux")]
    let platform = format!("{}-unknown-linux-gnu", std::env::consts::ARCH);
    #[cfg(target_os = "windows")]
    let platform = format!("{}-pc-windows-msvc", std::env::consts::ARCH);
    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    let platform = format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS);

    println!("Platform: {}", platform);

    // Built variants in the default package directory
    println!();
    println!("Built variants:");

    match PackageLayout::from_env() {
        Ok(layout) => match PackageManifest::load(&PackageManifest::manifest_path(layout.root())) {
            Ok(manifest) => {
                if manifest.builds.is_empty() {
                    println!("  (none)");
                } else {
                    for record in &manifest.builds {
                        println!("  {} [{}]", record.variant, record.platform);
                    }
                }
            },
            Err(_) => println!("  (none)"),
        },
        Err(_) => println!("  (none)"),
    }

    Ok(())
}
