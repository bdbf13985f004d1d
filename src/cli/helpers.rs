//! Shared helpers for CLI commands.

use console::style;

use artsearch::config::Config;
use artsearch::notify::Notifier;
use artsearch::scrapers::{EngineSettings, StrategyKind};

/// Truncate a string for table output.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Engine settings from config with an optional strategy override.
pub fn engine_settings(config: &Config, strategy: Option<StrategyKind>) -> EngineSettings {
    let mut settings = config.engine_settings();
    if let Some(strategy) = strategy {
        settings.strategy = strategy;
    }
    settings
}

/// Prints notices to stderr so they stay out of `--json` output.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{} {}", style("!").yellow(), message);
    }
}
