use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "DENOTE_MENU_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

/// Install a stderr subscriber filtered by `$DENOTE_MENU_LOG` (default
/// `warn`). Calling it twice is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
