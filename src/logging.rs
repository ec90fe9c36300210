//! tracing subscriber set-up.
//!
//! Logs go to stderr; stdout carries answer text only.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber with the given filter directives.
///
/// Invalid directives fall back to `warn`. Returns `false` if a subscriber
/// was already installed, in which case nothing changes.
pub fn init(filter: &str) -> bool {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_noop() {
        init("lexa=debug");
        assert!(!init("not a [valid filter"));
    }
}
