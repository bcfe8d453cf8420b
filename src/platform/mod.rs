//! Host-side collaborators for running without a display.

use std::time::Duration;

mod headless;

pub use headless::{NaturalSizeSource, TraceSurface};

/// Sleeps precisely enough to pace frames.
pub fn sleep(duration: Duration) {
    spin_sleep::sleep(duration);
}
