//! Logging setup for Quizroom binaries.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Both the server library crate and the binary log at `default_log_level`
/// unless `RUST_LOG` says otherwise.
///
/// # Examples
///
/// ```no_run
/// use quizroom_shared::logger::setup_logger;
///
/// setup_logger("quizroom-server", "info");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(binary_name, default_log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Build the default filter directive, e.g. `quizroom_server=info,tower_http=info`.
fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    format!(
        "{}={level},tower_http={level}",
        binary_name.replace('-', "_"),
        level = default_log_level
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_normalizes_binary_name() {
        // テスト項目: バイナリ名のハイフンがアンダースコアに変換される
        // given (前提条件):
        let binary_name = "quizroom-server";

        // when (操作):
        let filter = default_filter(binary_name, "debug");

        // then (期待する結果):
        assert_eq!(filter, "quizroom_server=debug,tower_http=debug");
    }
}
