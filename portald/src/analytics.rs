use anyhow::Result;
use tracing::info;

/// Receives every dispatched search query, e.g. to feed a recommendation
/// system. Reporting is best effort: the search service logs failures and
/// carries on.
pub trait SearchAnalytics: Send + Sync {
    fn publish_search_query(&self, query: &str, username: &str, organization: &str) -> Result<()>;
}

/// Emits each query as a structured log event on the `analytics` target.
#[derive(Debug, Default)]
pub struct TracingAnalytics;

impl SearchAnalytics for TracingAnalytics {
    fn publish_search_query(&self, query: &str, username: &str, organization: &str) -> Result<()> {
        info!(target: "analytics", query, username, organization, "[analytics] search query");
        Ok(())
    }
}
