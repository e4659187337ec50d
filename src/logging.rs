use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Install the global `tracing` subscriber. Logs go to stderr so stdout
/// only carries command output.
///
/// The filter comes from `TOOLKIT_LOG`, then `RUST_LOG`; otherwise `debug`
/// in dev mode and `info` elsewhere. Dev mode also prints source locations.
pub fn init_logging(dev: bool) {
    let filter = std::env::var("TOOLKIT_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| EnvFilter::new(default_level(dev)),
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new("info")),
        );

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(dev)
        .with_file(dev)
        .with_line_number(dev)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

fn default_level(dev: bool) -> &'static str {
    if dev {
        "debug"
    } else {
        "info"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_mode_defaults_to_debug() {
        assert_eq!(default_level(true), "debug");
        assert_eq!(default_level(false), "info");
    }

    #[test]
    fn init_logging_is_idempotent() {
        init_logging(false);
        init_logging(true);
    }
}
