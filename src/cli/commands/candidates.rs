//! Candidate lookup command.

use console::style;

use artsearch::config::Config;
use artsearch::scrapers::{redact_url, ImageSearchScraper, StrategyKind};

use crate::cli::helpers::engine_settings;

/// Print the candidate a term resolves to.
pub fn cmd_candidates(
    config: &Config,
    term: &str,
    platform: &str,
    strategy: Option<StrategyKind>,
) -> anyhow::Result<()> {
    let scraper = ImageSearchScraper::new(engine_settings(config, strategy))?;
    let candidates = scraper.search_candidates(term, platform)?;

    if candidates.is_empty() {
        println!("{} Nothing to search for", style("!").yellow());
        return Ok(());
    }

    for candidate in candidates {
        println!(
            "\n{} {} ({})",
            style(candidate.order).dim(),
            style(&candidate.display_name).bold(),
            candidate.platform
        );
        for (name, template) in &candidate.query_templates {
            println!("  {:<6} {}", name, redact_url(template));
        }
    }

    if !scraper.is_enabled() {
        println!(
            "\n{} No API key or search engine id configured; image lookups will return nothing",
            style("!").yellow()
        );
    }

    Ok(())
}
