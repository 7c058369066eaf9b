//! Network connectivity check for the cross build.
//!
//! The first build clones the ESP-IDF SDK; verify the host is reachable
//! before cargo gets half-way there.

use super::CheckResult;
use crate::process::Cmd;

/// URL probed for reachability; where the SDK is cloned from.
const SDK_URL: &str = "https://github.com/espressif/esp-idf";

/// Check network connectivity to the SDK host.
///
/// Performs a HEAD request via curl; avoids pulling in an HTTP client for a
/// single probe.
pub fn check_network() -> CheckResult {
    let result = Cmd::new("curl")
        .args([
            "--head",           // HEAD request only
            "--silent",         // No progress output
            "--fail",           // Fail on HTTP errors
            "--location",       // Follow the redirect to the repo page
            "--max-time", "10", // 10 second timeout
            "--output", "/dev/null",
            SDK_URL,
        ])
        .allow_fail()
        .run();

    match result {
        Ok(output) if output.success() => CheckResult::pass(
            "Network",
            format!("SDK host reachable ({})", sdk_host()),
        ),
        Ok(_) => CheckResult::fail(
            "Network",
            format!("SDK host unreachable ({})", sdk_host()),
            "Check your internet connection or try again later",
        ),
        Err(e) => CheckResult::fail(
            "Network",
            format!("Failed to check network: {}", e),
            "Ensure curl is installed and you have network access",
        ),
    }
}

/// Extract just the host from the SDK URL for display.
fn sdk_host() -> &'static str {
    "github.com"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sdk_host() {
        assert!(SDK_URL.contains(sdk_host()));
    }
}
