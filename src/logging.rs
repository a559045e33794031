//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Setup logging of events reported by dnsrender.
///
/// Use the RUST_LOG environment variable to override the defaults.
///
/// E.g. To enable debug level logging:
///   RUST_LOG=DEBUG
///
/// Or to log only the decisions taken by the renderer:
///   RUST_LOG=dnsrender::base::renderer=TRACE
///
/// Or to enable trace level logging but not for TSIG:
///   RUST_LOG=TRACE,dnsrender::tsig=OFF
///
/// Calling the function more than once is harmless; only the first call
/// installs a subscriber.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_thread_ids(true)
        .without_time()
        .try_init()
        .ok();
}

//============ Testing =======================================================
