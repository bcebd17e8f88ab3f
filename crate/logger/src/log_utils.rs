use std::sync::Once;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static LOG_INIT: Once = Once::new();

/// Install the process-wide tracing subscriber, once.
///
/// `RUST_LOG` wins over `default_filter`, which itself defaults to `info`.
/// Calling it again, or after another subscriber was installed, is a no-op.
pub fn log_init(default_filter: Option<&str>) {
    LOG_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter.unwrap_or("info")));
        tracing_setup(filter);
    });
}

fn tracing_setup(filter: EnvFilter) {
    let format = tracing_subscriber::fmt::layer()
        .with_level(true)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(true)
        .compact();

    // a test harness may already own the global subscriber
    let _already_set = tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::log_init;

    #[test]
    fn test_log_init_twice() {
        log_init(Some("debug"));
        log_init(None);
        tracing::debug!("logger initialized");
    }
}
