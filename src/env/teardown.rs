//! Environment teardown: scrub toolchain variables after the build.
//!
//! A pure set of deletions. Order-independent, idempotent, and unconditional:
//! the variables are removed whether or not they were set, and whether or not
//! the build succeeded.

/// Remove each named variable from the process environment.
pub fn scrub<S: AsRef<str>>(vars: &[S]) {
    for var in vars {
        std::env::remove_var(var.as_ref());
    }
}

/// Print each named variable for diagnostic confirmation.
///
/// After [`scrub`] these all read empty; the printout is the proof.
pub fn report<S: AsRef<str>>(vars: &[S]) {
    for var in vars {
        super::print_var(var.as_ref());
    }
}
