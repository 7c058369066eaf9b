//! The build cycle: bootstrap, build, scrub.
//!
//! A fixed linear sequence, matching how these builds are driven by hand:
//!
//! 1. source the toolchain export script and import its variables
//! 2. print `LIBCLANG_PATH` for diagnostics
//! 3. clear `IDF_PATH` so SDK auto-detection stays in charge
//! 4. `cargo clean`, then `cargo build --target <target> [--release]`
//! 5. scrub the toolchain variables
//! 6. print them again to confirm they are gone
//!
//! The scrub runs whether or not the build succeeded; a build failure is
//! propagated afterwards, so a failed build exits nonzero without leaving
//! toolchain state behind.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::build::CargoBuild;
use crate::config::ToolchainEnv;
use crate::env;
use crate::Timer;

/// Parameters of one build cycle.
#[derive(Debug, Clone)]
pub struct CycleOptions {
    /// Project to build.
    pub project_dir: PathBuf,
    /// Cross-compilation target triple.
    pub target: String,
    /// Release profile when true, debug otherwise.
    pub release: bool,
    /// Explicit export script; standard locations are probed when `None`.
    pub export_script: Option<PathBuf>,
}

impl CycleOptions {
    fn to_build(&self) -> CargoBuild {
        let build = CargoBuild::new(&self.project_dir, &self.target);
        if self.release {
            build
        } else {
            build.debug()
        }
    }
}

/// Run one full build cycle with the real toolchain variables.
pub fn run(opts: &CycleOptions) -> Result<()> {
    run_with(
        opts.export_script.as_deref(),
        &ToolchainEnv::default(),
        opts.to_build(),
    )
}

/// Run one full build cycle against explicit variable names and build tool.
///
/// Split out from [`run`] so the sequence can be exercised with synthetic
/// variables and a stand-in build tool.
pub fn run_with(
    export_script: Option<&Path>,
    toolchain: &ToolchainEnv,
    build: CargoBuild,
) -> Result<()> {
    // 1. Bootstrap
    let script = env::find_export_script(export_script)?;
    println!("Sourcing {}", script.display());
    let delta = env::capture_exports(&script)?;
    println!("  {} variable(s) imported", delta.len());
    delta.apply();

    // 2. Probe
    env::print_var(&toolchain.probe_var);

    // 3. Conflict clear
    std::env::remove_var(&toolchain.conflict_var);
    println!(
        "Cleared {} (conflicts with SDK auto-detection)",
        toolchain.conflict_var
    );

    // 4. Clean + build. The outcome is held, not propagated, until the
    //    environment has been scrubbed.
    println!("Building {}", build.describe());
    let outcome = run_build_steps(&build);

    // 5. Scrub
    env::scrub(&toolchain.scrubbed_vars);

    // 6. Report
    env::report(&toolchain.scrubbed_vars);

    outcome?;
    println!("=== Build complete ===");
    Ok(())
}

fn run_build_steps(build: &CargoBuild) -> Result<()> {
    let t = Timer::start("clean");
    build.clean()?;
    t.finish();

    let t = Timer::start("build");
    build.build()?;
    t.finish();

    Ok(())
}
