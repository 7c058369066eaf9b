//! espenv build wrapper library.
//!
//! Building an ESP-IDF Rust project means juggling environment state: the
//! toolchain export script must be sourced before `cargo build` runs, and the
//! variables it leaves behind must be cleared again or they poison later
//! builds (a stale `IDF_PATH` in particular fights esp-idf-sys's workspace
//! auto-detection). This library packages that bootstrap / build / scrub
//! cycle so it runs the same way every time.

pub mod build;
pub mod config;
pub mod cycle;
pub mod env;
pub mod preflight;
pub mod process;

use std::time::Instant;

/// Wall-clock timer for build phases.
///
/// Prints elapsed time on finish, switching to minutes past 60s.
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    /// Start timing a phase.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    /// Stop the timer and print the elapsed time.
    pub fn finish(self) {
        let secs = self.start.elapsed().as_secs_f64();
        if secs >= 60.0 {
            println!("  [{}: {:.1}m]", self.label, secs / 60.0);
        } else {
            println!("  [{}: {:.1}s]", self.label, secs);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_finish_does_not_panic() {
        let t = Timer::start("phase");
        t.finish();
    }
}
