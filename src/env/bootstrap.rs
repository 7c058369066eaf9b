//! Environment bootstrap: source the toolchain export script.
//!
//! The script mutates the environment of whatever shell sources it; to get
//! those mutations into this process, it is sourced in a child shell whose
//! resulting environment is dumped with `env -0`, diffed against ours, and
//! the delta applied.

use anyhow::{bail, Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::{export_script_candidates, BOOTSTRAP_SHELL};
use crate::process::Cmd;

/// Variables the child shell owns; never part of the applied delta.
const SHELL_PRIVATE: [&str; 4] = ["_", "SHLVL", "PWD", "OLDPWD"];

/// Variables the export script added or changed.
#[derive(Debug, Default)]
pub struct EnvDelta {
    entries: Vec<(String, String)>,
}

impl EnvDelta {
    /// Number of variables in the delta.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the script exported nothing new.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a variable in the delta.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Apply the delta to this process's environment.
    pub fn apply(&self) {
        for (name, value) in &self.entries {
            std::env::set_var(name, value);
        }
    }
}

/// Locate the toolchain export script.
///
/// An explicit path must exist; otherwise the standard locations are probed
/// in order.
pub fn find_export_script(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if !path.exists() {
            bail!("export script not found at {}", path.display());
        }
        return Ok(path.to_path_buf());
    }

    for candidate in export_script_candidates() {
        if candidate.exists() {
            return Ok(candidate);
        }
    }

    bail!(
        "no toolchain export script found.\n\
         Checked ~/export-esp.sh and ~/esp/esp-idf/export.sh.\n\
         Install the toolchain with 'espup install', or pass --export-script."
    );
}

/// Source `script` in a child shell and capture the variables it exports.
///
/// The script's own output is silenced so only the `env -0` dump reaches
/// stdout; a script that fails to source aborts before the dump, surfacing
/// as an error here.
pub fn capture_exports(script: &Path) -> Result<EnvDelta> {
    let before: BTreeMap<String, String> = std::env::vars().collect();

    let result = Cmd::new(BOOTSTRAP_SHELL)
        .arg("-c")
        .arg(r#". "$0" >/dev/null 2>&1 && env -0"#)
        .arg_path(script)
        .run()
        .with_context(|| format!("sourcing {}", script.display()))?;

    let after = parse_env_dump(&result.stdout);

    let entries = after
        .into_iter()
        .filter(|(name, _)| !SHELL_PRIVATE.contains(&name.as_str()))
        .filter(|(name, value)| before.get(name) != Some(value))
        .collect();

    Ok(EnvDelta { entries })
}

/// Parse NUL-separated `NAME=value` records from `env -0`.
///
/// NUL separation is what makes values containing newlines survive.
fn parse_env_dump(dump: &str) -> BTreeMap<String, String> {
    dump.split('\0')
        .filter(|record| !record.is_empty())
        .filter_map(|record| record.split_once('='))
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_script(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("export-test.sh");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_parse_env_dump() {
        let parsed = parse_env_dump("A=1\0B=two\nlines\0C=\0");
        assert_eq!(parsed.get("A").map(String::as_str), Some("1"));
        assert_eq!(parsed.get("B").map(String::as_str), Some("two\nlines"));
        assert_eq!(parsed.get("C").map(String::as_str), Some(""));
    }

    #[test]
    fn test_parse_env_dump_skips_malformed() {
        let parsed = parse_env_dump("no_equals_sign\0X=ok\0");
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_find_export_script_explicit_missing() {
        let err = find_export_script(Some(Path::new("/nonexistent/export.sh"))).unwrap_err();
        assert!(format!("{}", err).contains("not found"));
    }

    #[test]
    fn test_find_export_script_explicit_existing() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "export X=1\n");
        let found = find_export_script(Some(&script)).unwrap();
        assert_eq!(found, script);
    }

    #[test]
    fn test_capture_exports_new_variable() {
        let _guard = crate::env::env_lock();
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(
            dir.path(),
            "export ESPENV_TEST_BOOTSTRAP_NEW=/opt/toolchain\n",
        );

        let delta = capture_exports(&script).unwrap();
        assert_eq!(delta.get("ESPENV_TEST_BOOTSTRAP_NEW"), Some("/opt/toolchain"));

        delta.apply();
        assert_eq!(
            std::env::var("ESPENV_TEST_BOOTSTRAP_NEW").unwrap(),
            "/opt/toolchain"
        );
        std::env::remove_var("ESPENV_TEST_BOOTSTRAP_NEW");
    }

    #[test]
    fn test_capture_exports_unchanged_variable_excluded() {
        let _guard = crate::env::env_lock();
        std::env::set_var("ESPENV_TEST_BOOTSTRAP_SAME", "fixed");
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "export ESPENV_TEST_BOOTSTRAP_SAME=fixed\n");

        let delta = capture_exports(&script).unwrap();
        assert!(delta.get("ESPENV_TEST_BOOTSTRAP_SAME").is_none());
        std::env::remove_var("ESPENV_TEST_BOOTSTRAP_SAME");
    }

    #[test]
    fn test_capture_exports_shell_private_excluded() {
        let _guard = crate::env::env_lock();
        let dir = tempfile::tempdir().unwrap();
        // SHLVL differs in the child shell but must never reach the delta.
        let script = write_script(dir.path(), "export SHLVL=99\n");

        let delta = capture_exports(&script).unwrap();
        assert!(delta.get("SHLVL").is_none());
    }

    #[test]
    fn test_capture_exports_failing_script() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "exit 3\n");

        assert!(capture_exports(&script).is_err());
    }

    #[test]
    fn test_capture_exports_script_output_silenced() {
        let _guard = crate::env::env_lock();
        let dir = tempfile::tempdir().unwrap();
        // Chatty script output must not corrupt the env dump.
        let script = write_script(
            dir.path(),
            "echo 'Setting up the toolchain...'\nexport ESPENV_TEST_BOOTSTRAP_CHATTY=yes\n",
        );

        let delta = capture_exports(&script).unwrap();
        assert_eq!(delta.get("ESPENV_TEST_BOOTSTRAP_CHATTY"), Some("yes"));
    }
}
