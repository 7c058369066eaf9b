//! Preflight checks for the cross-build prerequisites.
//!
//! The first build of an ESP-IDF project is expensive: the SDK gets cloned,
//! a Python environment gets created, gigabytes land on disk. These checks
//! validate the prerequisites BEFORE any of that starts.
//!
//! # Checks Performed
//!
//! - **Host tools**: cargo, sh, git, python3 are installed
//! - **Export script**: a toolchain export script can be located
//! - **Disk space**: sufficient space for the SDK and build artifacts
//! - **Network**: the SDK host is reachable
//!
//! # Usage
//!
//! ```rust,ignore
//! use espenv::preflight::PreflightChecker;
//!
//! let checker = PreflightChecker::new(project_dir);
//! let report = checker.run_all();
//!
//! if !report.is_ok() {
//!     eprintln!("Preflight checks failed:");
//!     for error in report.errors() {
//!         eprintln!("  - {}", error.message);
//!     }
//!     std::process::exit(1);
//! }
//! ```

mod disk_space;
mod export_script;
mod host_tools;
mod network;

pub use disk_space::check_disk_space;
pub use export_script::check_export_script;
pub use host_tools::check_host_tools;
pub use network::check_network;

use std::path::{Path, PathBuf};

/// Result of a single preflight check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check
    pub name: String,
    /// Whether the check passed
    pub passed: bool,
    /// Human-readable message
    pub message: String,
    /// Optional suggestion for fixing the issue
    pub suggestion: Option<String>,
}

impl CheckResult {
    /// Create a passing check result.
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Create a failing check result.
    pub fn fail(
        name: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            passed: false,
            message: message.into(),
            suggestion: Some(suggestion.into()),
        }
    }
}

/// Comprehensive preflight report.
#[derive(Debug, Default)]
pub struct PreflightReport {
    /// All check results
    pub checks: Vec<CheckResult>,
}

impl PreflightReport {
    /// Check if all preflight checks passed.
    pub fn is_ok(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Get all failing checks.
    pub fn errors(&self) -> Vec<&CheckResult> {
        self.checks.iter().filter(|c| !c.passed).collect()
    }

    /// Get count of passing checks.
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Get total check count.
    pub fn total_count(&self) -> usize {
        self.checks.len()
    }

    /// Print a summary of the preflight checks.
    pub fn print_summary(&self) {
        println!("=== Preflight Check Results ===\n");

        for check in &self.checks {
            let status = if check.passed { "[OK]" } else { "[FAIL]" };
            println!("{} {}: {}", status, check.name, check.message);
            if let Some(suggestion) = &check.suggestion {
                println!("     Suggestion: {}", suggestion);
            }
        }

        println!();
        if self.is_ok() {
            println!(
                "All preflight checks passed ({}/{})",
                self.passed_count(),
                self.total_count()
            );
        } else {
            println!(
                "Preflight checks failed: {} of {} passed",
                self.passed_count(),
                self.total_count()
            );
        }
    }
}

/// Preflight checker for the cross-build prerequisites.
pub struct PreflightChecker {
    project_dir: PathBuf,
    export_script: Option<PathBuf>,
}

impl PreflightChecker {
    /// Create a new preflight checker for the project at `project_dir`.
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            export_script: None,
        }
    }

    /// Use an explicit export script instead of probing standard locations.
    pub fn export_script(mut self, path: PathBuf) -> Self {
        self.export_script = Some(path);
        self
    }

    /// Run all preflight checks and return a comprehensive report.
    pub fn run_all(&self) -> PreflightReport {
        let mut report = PreflightReport::default();

        report.checks.extend(check_host_tools());
        report
            .checks
            .push(check_export_script(self.export_script.as_deref()));
        report.checks.push(check_disk_space(&self.project_dir));
        report.checks.push(check_network());

        report
    }

    /// Get the project directory.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_pass() {
        let result = CheckResult::pass("test", "passed");
        assert!(result.passed);
        assert!(result.suggestion.is_none());
    }

    #[test]
    fn test_check_result_fail() {
        let result = CheckResult::fail("test", "failed", "fix it");
        assert!(!result.passed);
        assert!(result.suggestion.is_some());
    }

    #[test]
    fn test_preflight_report_is_ok() {
        let mut report = PreflightReport::default();
        assert!(report.is_ok()); // Empty is OK

        report.checks.push(CheckResult::pass("test1", "ok"));
        assert!(report.is_ok());

        report.checks.push(CheckResult::fail("test2", "bad", "fix"));
        assert!(!report.is_ok());
        assert_eq!(report.errors().len(), 1);
        assert_eq!(report.passed_count(), 1);
        assert_eq!(report.total_count(), 2);
    }
}
