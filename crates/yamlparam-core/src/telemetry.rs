//! Tracing initialisation for yamlparam binaries.
//!
//! The filter is taken from `YAMLPARAM_LOG`, then `RUST_LOG`, then the
//! level passed by the caller.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable consulted before `RUST_LOG`.
pub const LOG_ENV: &str = "YAMLPARAM_LOG";

fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

/// Install the global subscriber. Log lines go to stderr.
///
/// * `json`: newline-delimited JSON log lines instead of text.
/// * `level`: verbosity when neither env variable is set.
pub fn init_tracing(json: bool, level: Level) {
    let text = (!json).then(|| fmt::layer().with_writer(std::io::stderr).with_target(false));
    let lines = json.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .json()
    });

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(text)
        .with(lines)
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_twice_is_harmless() {
        init_tracing(false, Level::WARN);
        init_tracing(true, Level::DEBUG);
    }
}
