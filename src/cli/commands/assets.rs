//! Asset fetch command.

use std::sync::Arc;

use console::style;

use artsearch::cache::DiskAssetCache;
use artsearch::config::Config;
use artsearch::models::AssetKind;
use artsearch::scrapers::{ImageSearchScraper, ScrapeContext, StrategyKind};

use crate::cli::helpers::{engine_settings, truncate, ConsoleNotifier};

/// Fetch assets of one kind and print them.
pub async fn cmd_assets(
    config: &Config,
    term: &str,
    platform: &str,
    kind: AssetKind,
    strategy: Option<StrategyKind>,
    use_cache: bool,
    json: bool,
) -> anyhow::Result<()> {
    let mut scraper = ImageSearchScraper::new(engine_settings(config, strategy))?
        .with_notifier(Arc::new(ConsoleNotifier));
    if use_cache && config.cache.enabled {
        scraper = scraper.with_cache(Arc::new(DiskAssetCache::new(config.cache_dir())));
    }

    let candidates = scraper.search_candidates(term, platform)?;
    let Some(candidate) = candidates.first() else {
        println!("{} Nothing to search for", style("!").yellow());
        return Ok(());
    };

    let mut ctx = ScrapeContext::new(config.rate_limit_config());
    let assets = scraper.fetch_assets(&mut ctx, candidate, kind).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&assets)?);
        return Ok(());
    }

    if assets.is_empty() {
        println!(
            "{} No {} assets found for '{}'",
            style("!").yellow(),
            kind,
            candidate.display_name
        );
        return Ok(());
    }

    println!(
        "\n{} {} {} assets for '{}'",
        style("✓").green(),
        assets.len(),
        kind,
        candidate.display_name
    );
    println!("{}", "-".repeat(80));
    for asset in &assets {
        let (_, shown_url) = scraper.resolve_asset_url(asset);
        println!(
            "{:<40} {:<5} {}",
            truncate(&asset.display_name, 39),
            scraper.resolve_asset_url_extension(asset),
            shown_url
        );
    }

    Ok(())
}
