//! espenv CLI
//!
//! Wraps the ESP-IDF (Xtensa) cross build of a Rust project: sources the
//! toolchain export script, runs `cargo clean` + `cargo build` for the
//! target, and scrubs the toolchain variables again afterwards.
//!
//! # Usage
//!
//! ```bash
//! # Check prerequisites (host tools, export script, disk, network)
//! espenv preflight
//!
//! # Clean + release build for the default target (xtensa-esp32s3-espidf)
//! espenv build
//!
//! # Debug build for another chip
//! espenv build --target xtensa-esp32s2-espidf --debug
//!
//! # Show which toolchain variables are currently set
//! espenv status
//!
//! # Clear stale toolchain variables from the current shell
//! eval "$(espenv scrub)"
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use espenv::config::{CONFLICT_VAR, DEFAULT_TARGET, SCRUBBED_VARS};
use espenv::cycle::CycleOptions;

#[derive(Parser)]
#[command(name = "espenv")]
#[command(author, version, about = "ESP-IDF cross-build environment wrapper", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bootstrap the toolchain environment, run clean + build, scrub
    Build {
        /// Cross-compilation target triple
        #[arg(long, default_value = DEFAULT_TARGET)]
        target: String,

        /// Build the debug profile instead of release
        #[arg(long)]
        debug: bool,

        /// Toolchain export script (default: probe standard locations)
        #[arg(long)]
        export_script: Option<PathBuf>,

        /// Project directory to build
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// Print shell code clearing the toolchain variables (use with eval)
    Scrub,

    /// Show toolchain environment status
    Status,

    /// Validate build prerequisites without building
    Preflight {
        /// Toolchain export script (default: probe standard locations)
        #[arg(long)]
        export_script: Option<PathBuf>,

        /// Project directory the build would run in
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build {
            target,
            debug,
            export_script,
            project_dir,
        } => cmd_build(target, debug, export_script, project_dir),
        Commands::Scrub => cmd_scrub(),
        Commands::Status => cmd_status(),
        Commands::Preflight {
            export_script,
            project_dir,
        } => cmd_preflight(export_script, project_dir),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn cmd_build(
    target: String,
    debug: bool,
    export_script: Option<PathBuf>,
    project_dir: PathBuf,
) -> Result<()> {
    println!("=== espenv build ===\n");

    espenv::cycle::run(&CycleOptions {
        project_dir,
        target,
        release: !debug,
        export_script,
    })
}

fn cmd_scrub() -> Result<()> {
    // Emitted as shell code so the caller's own session gets cleaned:
    //   eval "$(espenv scrub)"
    // A child process cannot unset variables in its parent.
    let mut vars: Vec<&str> = vec![CONFLICT_VAR];
    vars.extend(SCRUBBED_VARS);
    println!("unset {}", vars.join(" "));
    Ok(())
}

fn cmd_status() -> Result<()> {
    use espenv::env::find_export_script;
    use espenv::process::which;

    println!("espenv Status");
    println!("=============");
    println!();
    println!("Configuration:");
    println!("  Default target: {}", DEFAULT_TARGET);
    println!();

    println!("Export script:");
    match find_export_script(None) {
        Ok(path) => println!("  FOUND at {}", path.display()),
        Err(_) => println!("  NOT FOUND (run 'espup install', or pass --export-script)"),
    }
    println!();

    println!("Toolchain variables:");
    let mut any_set = false;
    for var in std::iter::once(&CONFLICT_VAR).chain(SCRUBBED_VARS.iter()) {
        match std::env::var(var) {
            Ok(value) => {
                any_set = true;
                println!("  {:24} SET = {}", var, value);
            }
            Err(_) => println!("  {:24} unset", var),
        }
    }
    if any_set {
        println!();
        println!("  Clear stale variables with: eval \"$(espenv scrub)\"");
    }
    println!();

    println!("Build tool:");
    match which("cargo") {
        Some(path) => println!("  cargo FOUND at {}", path),
        None => println!("  cargo NOT FOUND (install rustup: https://rustup.rs)"),
    }

    Ok(())
}

fn cmd_preflight(export_script: Option<PathBuf>, project_dir: PathBuf) -> Result<()> {
    use espenv::preflight::PreflightChecker;

    let mut checker = PreflightChecker::new(project_dir);
    if let Some(script) = export_script {
        checker = checker.export_script(script);
    }

    let report = checker.run_all();
    report.print_summary();

    if !report.is_ok() {
        std::process::exit(1);
    }
    Ok(())
}
