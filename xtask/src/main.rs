//! Build automation tasks for Bug Crossing
//!
//! Usage:
//!   cargo xtask package                     # Release build for this platform
//!   cargo xtask package --platform windows  # Label the output for another platform

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::Command;

const BINARY: &str = "bug-crossing";
const CONFIG_FILE: &str = "bug-crossing.ron";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for Bug Crossing")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a native release and collect it with assets under dist/
    Package {
        /// Target platform: windows, macos, linux (defaults to the host)
        #[arg(long)]
        platform: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Package { platform } => package(platform),
    }
}

/// Get the project root directory
fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask has no parent directory")
}

/// Run a command and check for success
fn run_cmd(cmd: &mut Command) -> Result<()> {
    let status = cmd.status().context("Failed to execute command")?;
    if !status.success() {
        anyhow::bail!("Command failed with status: {}", status);
    }
    Ok(())
}

/// Copy directory recursively
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src).with_context(|| format!("reading {}", src.display()))? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// File name of the release binary. Cargo builds for the host, so the
/// suffix follows the host, not the `--platform` label.
fn binary_file_name() -> String {
    format!("{}{}", BINARY, std::env::consts::EXE_SUFFIX)
}

fn host_platform() -> &'static str {
    if cfg!(target_os = "windows") {
        "windows"
    } else if cfg!(target_os = "macos") {
        "macos"
    } else {
        "linux"
    }
}

/// Build release and copy binary, assets and config to dist/<platform>
fn package(platform: Option<String>) -> Result<()> {
    let root = project_root()?;
    let platform = platform.unwrap_or_else(|| host_platform().to_string());
    let dist = root.join("dist").join(&platform);

    if platform != host_platform() {
        println!(
            "Note: building on {} for a package labelled {}; the binary is a {} build",
            host_platform(),
            platform,
            host_platform()
        );
    }
    println!("Building native release for {}...", platform);

    // Clean and create dist folder
    if dist.exists() {
        std::fs::remove_dir_all(&dist)?;
    }
    std::fs::create_dir_all(&dist)?;

    run_cmd(
        Command::new("cargo")
            .current_dir(&root)
            .args(["build", "--release", "--bin", BINARY]),
    )?;

    let binary_name = binary_file_name();
    std::fs::copy(
        root.join("target/release").join(&binary_name),
        dist.join(&binary_name),
    )
    .with_context(|| format!("copying {}", binary_name))?;

    copy_dir_recursive(&root.join("assets"), &dist.join("assets"))?;

    let config = root.join(CONFIG_FILE);
    if config.exists() {
        std::fs::copy(&config, dist.join(CONFIG_FILE))?;
    } else {
        println!("No {} found, the packaged game will use defaults", CONFIG_FILE);
    }

    println!("Package complete: dist/{}/", platform);
    Ok(())
}
