//! Tracing subscriber setup for the `galvan` binary.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber (compact, to stderr).
///
/// `RUST_LOG` always wins. Otherwise the CLI logs at `info` (`debug` when
/// verbose) and the TUI is silent, since any stderr output would tear the
/// alternate screen.
pub fn init_logger(verbose: bool, interactive: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, interactive)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}

fn default_directive(verbose: bool, interactive: bool) -> &'static str {
    match (interactive, verbose) {
        (true, _) => "off",
        (false, true) => "galvan_dashboard=debug,info",
        (false, false) => "galvan_dashboard=info,warn",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tui_is_silent_by_default() {
        assert_eq!(default_directive(false, true), "off");
        assert_eq!(default_directive(true, true), "off");
        assert_eq!(default_directive(true, false), "galvan_dashboard=debug,info");
        assert!(EnvFilter::try_new(default_directive(false, false)).is_ok());
    }
}
