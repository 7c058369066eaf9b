//! Export script check.
//!
//! The whole cycle hinges on being able to source the toolchain export
//! script; report early if none can be located.

use super::CheckResult;
use crate::env::find_export_script;
use std::path::Path;

/// Check that a toolchain export script can be located.
pub fn check_export_script(explicit: Option<&Path>) -> CheckResult {
    match find_export_script(explicit) {
        Ok(path) => CheckResult::pass(
            "Export script",
            format!("Found at {}", path.display()),
        ),
        Err(_) => CheckResult::fail(
            "Export script",
            "No toolchain export script found",
            "Run 'espup install', or pass --export-script with its location",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_missing_script_fails() {
        let result = check_export_script(Some(Path::new("/nonexistent/export.sh")));
        assert!(!result.passed);
        assert!(result.suggestion.is_some());
    }

    #[test]
    fn test_explicit_existing_script_passes() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("export-esp.sh");
        std::fs::write(&script, "export X=1\n").unwrap();

        let result = check_export_script(Some(&script));
        assert!(result.passed);
        assert!(result.message.contains("export-esp.sh"));
    }
}
