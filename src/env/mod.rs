//! Process environment handling: bootstrap and teardown.
//!
//! The export script is an external collaborator. espenv never reimplements
//! what it does; it sources the script in a child shell, imports the
//! resulting variable delta into its own environment (so the build child
//! inherits it), and scrubs the toolchain variables again once the build has
//! run.

mod bootstrap;
mod teardown;

pub use bootstrap::{capture_exports, find_export_script, EnvDelta};
pub use teardown::{report, scrub};

/// Print one variable for diagnostics, empty if unset.
///
/// Same shape as `echo $VAR` in an interactive shell: a set-but-empty and an
/// unset variable read the same.
pub fn print_var(name: &str) {
    println!("{}={}", name, std::env::var(name).unwrap_or_default());
}

/// Serializes tests that touch the process environment.
///
/// `std::env::set_var`/`remove_var` are process-global; concurrent test
/// threads would race.
#[cfg(test)]
pub(crate) fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(|e| e.into_inner())
}
