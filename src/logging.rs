use std::sync::Once;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

static INIT: Once = Once::new();

fn filter(verbose: u8) -> EnvFilter {
    let base = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match verbose {
        0 => base,
        1 => base.add_directive(LevelFilter::DEBUG.into()),
        _ => base.add_directive(LevelFilter::TRACE.into()),
    }
}

/// Installs the global fmt subscriber once. Logs go to stderr so `fetch` and
/// `view` keep stdout for JSON.
pub fn init(verbose: u8) {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(filter(verbose))
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_level(true)
            .init();
    });
}
