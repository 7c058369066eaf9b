//! Build tool invocation.
//!
//! espenv delegates the actual clean and compile to cargo; this module only
//! constructs the two invocations. No retries, no artifact caching, no
//! recovery: cargo owns all of that.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::process::Cmd;

/// One configured cross build: a project directory, a target triple, and a
/// profile.
#[derive(Debug, Clone)]
pub struct CargoBuild {
    project_dir: PathBuf,
    target: String,
    release: bool,
    program: String,
}

impl CargoBuild {
    /// Configure a build of the project at `project_dir`.
    pub fn new(project_dir: impl Into<PathBuf>, target: impl Into<String>) -> Self {
        Self {
            project_dir: project_dir.into(),
            target: target.into(),
            release: true,
            program: cargo_program(),
        }
    }

    /// Select the debug profile instead of release.
    pub fn debug(mut self) -> Self {
        self.release = false;
        self
    }

    /// Override the build tool binary (normally resolved via `$CARGO`).
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Arguments of the clean invocation.
    pub fn clean_args(&self) -> Vec<String> {
        vec!["clean".to_string()]
    }

    /// Arguments of the build invocation.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = vec![
            "build".to_string(),
            "--target".to_string(),
            self.target.clone(),
        ];
        if self.release {
            args.push("--release".to_string());
        }
        args
    }

    /// Remove prior build artifacts.
    pub fn clean(&self) -> Result<()> {
        self.run(self.clean_args())
            .context("cargo clean failed")
    }

    /// Compile the project for the configured target and profile.
    pub fn build(&self) -> Result<()> {
        self.run(self.build_args())
            .with_context(|| format!("cargo build failed for target {}", self.target))
    }

    fn run(&self, args: Vec<String>) -> Result<()> {
        Cmd::new(&self.program)
            .args(args)
            .current_dir(&self.project_dir)
            .run_streamed()?;
        Ok(())
    }

    /// One-line description for progress output.
    pub fn describe(&self) -> String {
        format!(
            "{} ({}) in {}",
            self.target,
            if self.release { "release" } else { "debug" },
            self.project_dir.display()
        )
    }
}

/// Resolve the build tool binary.
///
/// Cargo sets `$CARGO` for processes it spawns; honoring it keeps espenv
/// working as a cargo subcommand and under toolchain overrides.
fn cargo_program() -> String {
    std::env::var("CARGO").unwrap_or_else(|_| "cargo".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_args_release() {
        let build = CargoBuild::new(".", "xtensa-esp32s3-espidf");
        assert_eq!(
            build.build_args(),
            ["build", "--target", "xtensa-esp32s3-espidf", "--release"]
        );
    }

    #[test]
    fn test_build_args_debug() {
        let build = CargoBuild::new(".", "xtensa-esp32s3-espidf").debug();
        assert_eq!(
            build.build_args(),
            ["build", "--target", "xtensa-esp32s3-espidf"]
        );
    }

    #[test]
    fn test_clean_args() {
        let build = CargoBuild::new(".", "xtensa-esp32s3-espidf");
        assert_eq!(build.clean_args(), ["clean"]);
    }

    #[test]
    fn test_describe() {
        let build = CargoBuild::new("/tmp/project", "xtensa-esp32s2-espidf");
        let text = build.describe();
        assert!(text.contains("xtensa-esp32s2-espidf"));
        assert!(text.contains("release"));
        assert!(text.contains("/tmp/project"));
    }
}
