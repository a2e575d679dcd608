//! Build command - compile engine variants and stage them into the package
//!
//! Drives CMake over a llama.cpp checkout (local or freshly cloned), then
//! copies the server executable and its shared libraries into the
//! per-variant package layout and records the build in the manifest.

use crate::{commands, output};
use clap::Args;
use llamapack_core::config::BuildConfig;
use llamapack_core::layout::PackageLayout;
use llamapack_core::manifest::{unix_timestamp, BuildRecord, EngineInfo, PackageManifest};
use llamapack_core::placement::{resolve, PlacementPlan};
use llamapack_core::platform::Platform;
use llamapack_core::variant::Variant;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Args)]
pub struct BuildArgs {
    /// Variants to build: default, cuda, tensorcores, or all
    #[arg(short = 'V', long = "variant")]
    pub variants: Vec<String>,

    /// Local engine checkout (skips cloning)
    #[arg(long)]
    pub engine_dir: Option<PathBuf>,

    /// Git tag or commit to build (overrides the pinned tag)
    #[arg(long)]
    pub tag: Option<String>,

    /// Package directory to stage into (default: $LLAMAPACK_DIR or ~/.llamapack)
    #[arg(long)]
    pub package_dir: Option<PathBuf>,

    /// Parallel build jobs
    #[arg(short, long)]
    pub jobs: Option<u32>,

    /// Config file (default: llamapack.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Keep the per-variant CMake build directories
    #[arg(long)]
    pub keep_build: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn execute(args: BuildArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => BuildConfig::load(path)?,
        None => BuildConfig::load_default()?,
    };

    let platform = Platform::host();
    let variants = requested_variants(&args, &config);
    let layout = commands::package_layout(args.package_dir.clone().or_else(|| config.package_dir.clone()))?;

    if args.verbose {
        println!("Package: {}", layout.root().display());
        println!("Platform: {}", platform);
        println!(
            "Variants: {}",
            variants.iter().map(|v| v.name()).collect::<Vec<_>>().join(", ")
        );
    }

    let engine = acquire_engine(&args, &config)?;

    let manifest_path = PackageManifest::manifest_path(layout.root());
    let mut manifest = PackageManifest::load(&manifest_path)?;
    manifest.engine = EngineInfo {
        repo: engine.repo.clone(),
        reference: engine.reference.clone(),
    };

    for &variant in &variants {
        let record = build_variant(&engine.dir, variant, platform, &layout, &config, &args)?;
        manifest.upsert(record);
        manifest.save(&manifest_path)?;
    }

    if !args.keep_build {
        engine.cleanup();
    }

    output::finished(&format!(
        "{} variant(s) in {}",
        variants.len(),
        layout.root().display()
    ));
    Ok(())
}

/// Engine source checkout used for this build session.
struct EngineSource {
    dir: PathBuf,
    repo: String,
    reference: String,
    /// Set when the checkout is a temp clone we own.
    temp: Option<PathBuf>,
}

impl EngineSource {
    fn cleanup(&self) {
        if let Some(temp) = &self.temp {
            let _ = std::fs::remove_dir_all(temp);
        }
    }
}

/// Variants requested on the command line, falling back to the config.
fn requested_variants(args: &BuildArgs, config: &BuildConfig) -> Vec<Variant> {
    let names: Vec<String> = if args.variants.is_empty() {
        config.build.variant_names().to_vec()
    } else {
        args.variants.clone()
    };

    for name in &names {
        if !Variant::is_recognized(name) {
            output::warning(&format!("unrecognized variant '{}', using default", name));
        }
    }

    Variant::parse_requested(&names)
}

/// Locate or clone the engine source tree.
fn acquire_engine(args: &BuildArgs, config: &BuildConfig) -> Result<EngineSource, Box<dyn std::error::Error>> {
    let reference = args.tag.clone().unwrap_or_else(|| config.engine.tag.clone());

    if let Some(dir) = args.engine_dir.clone().or_else(|| config.engine.path.clone()) {
        let dir = dir
            .canonicalize()
            .map_err(|e| format!("Engine directory not found: {} ({})", dir.display(), e))?;
        if !dir.join("CMakeLists.txt").exists() {
            return Err(format!("No CMakeLists.txt found in {}", dir.display()).into());
        }
        return Ok(EngineSource {
            dir,
            repo: config.engine.git.clone(),
            reference,
            temp: None,
        });
    }

    let temp_dir = std::env::temp_dir().join(format!("llamapack_engine_{}", std::process::id()));
    if temp_dir.exists() {
        std::fs::remove_dir_all(&temp_dir)?;
    }

    output::cloning(&format!("{} ({})", config.engine.git, reference));
    let status = Command::new("git")
        .arg("clone")
        .arg("--depth")
        .arg("1")
        .arg("--branch")
        .arg(&reference)
        .arg(&config.engine.git)
        .arg(&temp_dir)
        .status()
        .map_err(|e| format!("Failed to run git: {}. Make sure git is in PATH.", e))?;
    if !status.success() {
        return Err(format!("Failed to clone {} at {}", config.engine.git, reference).into());
    }

    Ok(EngineSource {
        dir: temp_dir.clone(),
        repo: config.engine.git.clone(),
        reference,
        temp: Some(temp_dir),
    })
}

/// Configure, build and stage one variant.
fn build_variant(
    engine_dir: &Path,
    variant: Variant,
    platform: Platform,
    layout: &PackageLayout,
    config: &BuildConfig,
    args: &BuildArgs,
) -> Result<BuildRecord, Box<dyn std::error::Error>> {
    let plan = resolve(variant, platform);
    let build_dir = engine_dir.join(format!("build-{}", variant));

    output::configuring(&format!("llama-server [{}]", variant));
    let mut configure = Command::new("cmake");
    configure
        .arg("-S")
        .arg(engine_dir)
        .arg("-B")
        .arg(&build_dir)
        .arg("-DCMAKE_BUILD_TYPE=Release")
        .arg("-DLLAMA_BUILD_SERVER=ON")
        .arg("-DBUILD_SHARED_LIBS=ON")
        .arg("-DLLAMA_CURL=OFF");
    for define in variant_defines(variant) {
        configure.arg(define);
    }
    if let Some(expr) = &plan.search_path_expr {
        configure.arg("-DCMAKE_BUILD_WITH_INSTALL_RPATH=ON");
        configure.arg(format!("-DCMAKE_INSTALL_RPATH={}", expr));
    }
    for extra in &config.build.cmake_args {
        configure.arg(extra);
    }
    run(configure, "cmake", "CMake configure", args.verbose)?;

    output::building(&format!("llama-server [{}]", variant));
    let mut build = Command::new("cmake");
    build
        .arg("--build")
        .arg(&build_dir)
        .arg("--config")
        .arg("Release")
        .arg("--target")
        .arg("llama-server")
        .arg("--parallel");
    if let Some(jobs) = args.jobs.or(config.build.jobs) {
        build.arg(jobs.to_string());
    }
    run(build, "cmake", "CMake build", args.verbose)?;

    let record = stage_artifacts(&build_dir, variant, platform, layout, &plan)?;

    if !args.keep_build {
        let _ = std::fs::remove_dir_all(&build_dir);
    }

    Ok(record)
}

/// Copy the built executable and shared libraries into the package.
fn stage_artifacts(
    build_dir: &Path,
    variant: Variant,
    platform: Platform,
    layout: &PackageLayout,
    plan: &PlacementPlan,
) -> Result<BuildRecord, Box<dyn std::error::Error>> {
    let executable = platform.executable_name();

    // Single-config generators emit into bin/, multi-config (MSVC) into
    // bin/Release/.
    let candidates = [build_dir.join("bin"), build_dir.join("bin").join("Release")];
    let mut built_bin_dir = None;
    for dir in &candidates {
        if dir.join(executable).exists() {
            built_bin_dir = Some(dir.clone());
            break;
        }
    }
    let built_bin_dir = built_bin_dir.ok_or_else(|| {
        format!(
            "No {} found under {}. Checked: {:?}",
            executable,
            build_dir.display(),
            candidates
        )
    })?;

    let variant_dir = layout.variant_dir(variant);
    std::fs::create_dir_all(&variant_dir)?;

    let dest = variant_dir.join(executable);
    output::installing(&format!("{}", dest.display()));
    std::fs::copy(built_bin_dir.join(executable), &dest)?;

    // Make executable on Unix
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(&dest)?.permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&dest, perms)?;
    }

    let lib_dest = layout.library_dest(variant, platform);
    std::fs::create_dir_all(&lib_dest)?;

    let mut libraries = Vec::new();
    for entry in std::fs::read_dir(&built_bin_dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if !is_shared_library(&name, platform) {
            continue;
        }
        std::fs::copy(entry.path(), lib_dest.join(&name))?;
        libraries.push(name);
    }
    libraries.sort();

    Ok(BuildRecord {
        variant,
        platform,
        subdir: plan.output_subdir.to_string(),
        executable: executable.to_string(),
        libraries,
        built_at: unix_timestamp(),
    })
}

/// Variant-specific CMake defines.
///
/// Both CUDA variants build with GGML_CUDA; the plain cuda build forces
/// the MMQ kernels while tensorcores leaves them off so matrix products
/// go through the cuBLAS tensor-core path.
fn variant_defines(variant: Variant) -> &'static [&'static str] {
    match variant {
        Variant::Default => &[],
        Variant::Cuda => &["-DGGML_CUDA=ON", "-DGGML_CUDA_FORCE_MMQ=ON"],
        Variant::TensorCores => &["-DGGML_CUDA=ON"],
    }
}

/// Shared-library filename check per platform. Versioned Linux names
/// (`libllama.so.1`) count.
fn is_shared_library(name: &str, platform: Platform) -> bool {
    match platform {
        Platform::Windows => name.ends_with(".dll"),
        Platform::Macos => name.ends_with(".dylib"),
        _ => name.ends_with(".so") || name.contains(".so."),
    }
}

/// Run a child process, mapping spawn failures and non-zero exits to
/// readable errors.
fn run(mut cmd: Command, tool: &str, what: &str, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if verbose {
        eprintln!("+ {:?}", cmd);
    }
    let status = cmd
        .status()
        .map_err(|e| format!("Failed to run {}: {}. Make sure {} is in PATH.", what, e, tool))?;
    if !status.success() {
        return Err(format!("{} failed", what).into());
    }
    Ok(())
}
