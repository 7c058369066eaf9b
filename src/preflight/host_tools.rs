//! Host tool validation for the cross build.
//!
//! Checks that required external tools are installed and executable.

use super::CheckResult;
use crate::process::{exists, which};

/// Required host tools with their install suggestions.
const REQUIRED_TOOLS: &[(&str, &str, &str)] = &[
    ("cargo", "Run the cross build", "Install rustup: https://rustup.rs"),
    ("sh", "Source the export script", "Provided by any POSIX system"),
    ("git", "Fetch the ESP-IDF SDK", "sudo dnf install git"),
    ("python3", "Run the SDK's build scripts", "sudo dnf install python3"),
];

/// Check that all required host tools are installed.
pub fn check_host_tools() -> Vec<CheckResult> {
    REQUIRED_TOOLS
        .iter()
        .map(|(tool, purpose, install)| check_tool(tool, purpose, install))
        .collect()
}

/// Check a single tool.
fn check_tool(tool: &str, purpose: &str, install_cmd: &str) -> CheckResult {
    match which(tool) {
        Some(path) => CheckResult::pass(
            format!("{} tool", tool),
            format!("Found at {} ({})", path, purpose),
        ),
        None => CheckResult::fail(
            format!("{} tool", tool),
            format!("Not found (needed for: {})", purpose),
            install_cmd,
        ),
    }
}

/// Check if a specific tool is available (returns bool for quick checks).
pub fn has_tool(tool: &str) -> bool {
    exists(tool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_tool_existing() {
        // sh should exist on any Unix system
        assert!(has_tool("sh"));
    }

    #[test]
    fn test_has_tool_nonexistent() {
        assert!(!has_tool("definitely_not_a_real_command_12345"));
    }

    #[test]
    fn test_check_host_tools_returns_results() {
        let results = check_host_tools();
        assert_eq!(results.len(), REQUIRED_TOOLS.len());
    }
}
