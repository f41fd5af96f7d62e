//! Logging setup shared by binaries and tests.

use env_logger::Env;

pub use log::{debug, error, info, trace, warn};

/// Initializes env_logger with an info-level default.
///
/// `RUST_LOG` still overrides the filter when set. Call once near the
/// top of `main`; later calls are ignored rather than panicking so
/// test binaries can share the helper.
pub fn init() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info")).try_init();
}
