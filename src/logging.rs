//! Diagnostic logging setup

use std::sync::Once;

/// Environment variable holding the log filter (e.g. `casa_split=debug`)
pub const LOG_ENV: &str = "CASA_LOG";

const DEFAULT_FILTER: &str = "casa_split=warn";

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber, writing to stderr
///
/// Safe to call more than once; only the first call has any effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
