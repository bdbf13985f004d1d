//! Walks a strategy's page offsets with quota backoff.

use serde_json::Value;
use tracing::{debug, warn};

use super::fetch::{fetch_page, PageStatus, RawPage};
use super::redact::redact_url;
use super::strategy::ResultStrategy;
use super::{ScrapeContext, ScrapeError};
use crate::http_client::HttpClient;
use crate::models::{AssetKind, AssetQuery};
use crate::notify::Notifier;
use crate::rate_limit::QuotaDecision;

/// Fetch one page, sleeping through quota responses until the retry budget runs out.
///
/// Every attempt goes through the context's limiter, and the same URL is
/// re-issued after each cooldown.
pub async fn fetch_with_backoff(
    client: &HttpClient,
    ctx: &mut ScrapeContext,
    strategy: &dyn ResultStrategy,
    url: &str,
    notifier: &dyn Notifier,
) -> Result<RawPage, ScrapeError> {
    loop {
        ctx.rate.acquire().await;
        let page = fetch_page(client, url, strategy).await;

        if page.status != PageStatus::QuotaExceeded {
            ctx.rate.report_response();
            return Ok(page);
        }

        match ctx.rate.report_quota() {
            QuotaDecision::Exhausted { retries } => {
                return Err(ScrapeError::QuotaExhausted { retries });
            }
            QuotaDecision::Retry {
                wait, resume_at, ..
            } => {
                notifier.notify(&format!(
                    "API limit reached, resuming at {}",
                    resume_at.format("%H:%M:%S")
                ));
                debug!("Retrying {} after {:?}", redact_url(url), wait);
                ctx.rate.cool_down(wait).await;
            }
        }
    }
}

/// Collect raw entries across every page the strategy allows.
///
/// A hard failure on the first page is returned as an error. Later
/// failures stop the walk and keep what was already collected.
pub async fn collect_pages(
    client: &HttpClient,
    ctx: &mut ScrapeContext,
    strategy: &dyn ResultStrategy,
    template: &str,
    kind: AssetKind,
    notifier: &dyn Notifier,
) -> Result<Vec<Value>, ScrapeError> {
    let mut entries = Vec::new();
    let mut next_marker: Option<u32> = None;

    for (page_num, &offset) in strategy.page_offsets().iter().enumerate() {
        if page_num > 0 && next_marker != Some(offset) {
            debug!(
                "No page at offset {} (backend reported {:?}), stopping",
                offset, next_marker
            );
            break;
        }

        let url = AssetQuery::new(kind, offset).render(template);
        let outcome = fetch_with_backoff(client, ctx, strategy, &url, notifier)
            .await
            .and_then(RawPage::into_result);

        match outcome {
            Ok(Some((payload, marker))) => {
                let page_entries = strategy.entries(&payload);
                if page_entries.is_empty() {
                    debug!("Page at offset {} has no entries, stopping", offset);
                    break;
                }
                debug!(
                    "Page at offset {}: {} entries",
                    offset,
                    page_entries.len()
                );
                entries.extend(page_entries.iter().cloned());
                next_marker = marker;
            }
            Ok(None) => {
                if page_num > 0 {
                    warn!(
                        "No data at offset {}, keeping {} entries",
                        offset,
                        entries.len()
                    );
                }
                break;
            }
            Err(e) if page_num == 0 => return Err(e),
            Err(e) => {
                warn!(
                    "Page at offset {} failed ({}), keeping {} entries",
                    offset,
                    e,
                    entries.len()
                );
                break;
            }
        }
    }

    Ok(entries)
}
