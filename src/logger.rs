use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Installs the global logger once. `RUST_LOG` overrides the defaults.
pub fn initialize_logger() {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Warn)
            .filter_module("chained_buckets", LevelFilter::Info)
            .format_timestamp_millis()
            .parse_default_env();

        // another logger may already be installed, e.g. by a test harness
        let _ = builder.try_init();
    });
}
