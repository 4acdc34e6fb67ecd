use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// `RUST_LOG` takes precedence; otherwise `default_filter` applies
/// (`env_logger` filter syntax, e.g. "info" or "tiamat_engine=debug,wgpu=warn").
/// Subsequent calls are ignored. Intended usage is early in `main`.
pub fn init_logging(default_filter: &str) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.parse_filters(default_filter);
        }

        builder.init();

        log::debug!("logging initialized");
    });
}
