//! Toolchain environment configuration for espenv.
//!
//! All the named pieces of the build environment live here: which variables
//! the export script is expected to set, which one conflicts with the build
//! tool's auto-detection, which ones get scrubbed after the build, and the
//! default cross-compilation target.

use std::path::PathBuf;

/// Default cross-compilation target (ESP32-S3, ESP-IDF framework).
pub const DEFAULT_TARGET: &str = "xtensa-esp32s3-espidf";

/// Variable printed before the build for diagnostics.
///
/// Points at the libclang the bindings generator loads; if the export script
/// didn't set it, the build will fail generating SDK bindings.
pub const PROBE_VAR: &str = "LIBCLANG_PATH";

/// Variable cleared before the build.
///
/// esp-idf-sys auto-detects the SDK when the project pins a workspace tools
/// install; a set `IDF_PATH` overrides that detection and breaks the build.
pub const CONFLICT_VAR: &str = "IDF_PATH";

/// Variables scrubbed from the environment after the build.
///
/// These are what the export script leaves behind. They must not leak into
/// later invocations or unrelated cargo builds in the same session.
pub const SCRUBBED_VARS: [&str; 4] = [
    "LIBCLANG_PATH",
    "IDF_TOOLS_PATH",
    "IDF_PYTHON_ENV_PATH",
    "ESP_IDF_VERSION",
];

/// Shell used to source the export script.
pub const BOOTSTRAP_SHELL: &str = "sh";

/// Candidate locations for the toolchain export script, checked in order.
///
/// `export-esp.sh` is what espup writes; `esp/esp-idf/export.sh` is the
/// stock ESP-IDF checkout location.
pub fn export_script_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(home) = std::env::var_os("HOME") {
        let home = PathBuf::from(home);
        candidates.push(home.join("export-esp.sh"));
        candidates.push(home.join("esp/esp-idf/export.sh"));
    }
    candidates
}

/// The set of variable names one build cycle operates on.
///
/// Bundled as a value so the cycle can be exercised against synthetic names
/// in tests; `Default` wires in the real toolchain constants.
#[derive(Debug, Clone)]
pub struct ToolchainEnv {
    /// Printed before the build.
    pub probe_var: String,
    /// Cleared before the build.
    pub conflict_var: String,
    /// Scrubbed and reported after the build.
    pub scrubbed_vars: Vec<String>,
}

impl Default for ToolchainEnv {
    fn default() -> Self {
        Self {
            probe_var: PROBE_VAR.to_string(),
            conflict_var: CONFLICT_VAR.to_string(),
            scrubbed_vars: SCRUBBED_VARS.iter().map(|v| v.to_string()).collect(),
        }
    }
}
