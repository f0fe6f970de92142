//! Process-wide shutdown flag.
//!
//! Ctrl+C sets `SHUTDOWN`. Long-running loops (route resolution, export)
//! poll `is_shutdown()` and stop taking new work.

use std::sync::atomic::{AtomicBool, Ordering};

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Interrupted twice: the second Ctrl+C exits immediately.
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Install the global Ctrl+C handler. Call once at program start.
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        if INTERRUPTED.swap(true, Ordering::SeqCst) {
            std::process::exit(130);
        }
        SHUTDOWN.store(true, Ordering::SeqCst);
        crate::log!("build"; "interrupted, finishing current routes...");
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Check if shutdown has been requested
///
/// Relaxed ordering: a worker may resolve a few more routes before noticing.
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_not_requested_by_default() {
        assert!(!is_shutdown());
        assert!(!INTERRUPTED.load(Ordering::SeqCst));
    }
}
