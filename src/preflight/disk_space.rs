//! Disk space check for the cross build.
//!
//! Verifies sufficient disk space is available for the SDK and build
//! artifacts.

use super::CheckResult;
use crate::process::Cmd;
use std::path::Path;

/// Minimum required disk space in bytes (4 GB).
///
/// Breakdown:
/// - ESP-IDF SDK checkout: ~1.5 GB
/// - Toolchain + Python env install: ~1.5 GB
/// - target/ build artifacts: ~1 GB
const MIN_DISK_SPACE_BYTES: u64 = 4 * 1024 * 1024 * 1024;

/// Check that sufficient disk space is available.
pub fn check_disk_space(project_dir: &Path) -> CheckResult {
    // Use df to get available space
    let result = Cmd::new("df")
        .args(["--output=avail", "-B1"]) // Output available bytes
        .arg_path(project_dir)
        .allow_fail()
        .run();

    match result {
        Ok(result) if result.success() => {
            // Skip header line, get first number
            let available = result
                .stdout
                .lines()
                .nth(1)
                .and_then(|line| line.trim().parse::<u64>().ok())
                .unwrap_or(0);

            let available_gb = available as f64 / (1024.0 * 1024.0 * 1024.0);
            let required_gb = MIN_DISK_SPACE_BYTES as f64 / (1024.0 * 1024.0 * 1024.0);

            if available >= MIN_DISK_SPACE_BYTES {
                CheckResult::pass(
                    "Disk space",
                    format!("{:.1} GB available (need {:.1} GB)", available_gb, required_gb),
                )
            } else {
                CheckResult::fail(
                    "Disk space",
                    format!(
                        "Only {:.1} GB available, need {:.1} GB",
                        available_gb, required_gb
                    ),
                    "Free up disk space or build from a different directory",
                )
            }
        }
        _ => CheckResult::fail(
            "Disk space",
            "Failed to check available disk space",
            "Ensure df command is available",
        ),
    }
}
