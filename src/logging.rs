//! Logging setup shared by both binaries.
//!
//! Events go to stderr; stdout belongs to the menu and status lines.

use tracing::Level;

/// Installs the global `tracing` subscriber with `level` as the maximum level.
///
/// Calling it again after a subscriber is installed is a no-op.
pub fn init(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .try_init();
}
