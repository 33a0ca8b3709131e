use std::time::Duration;

/// Tunable limits and delays for one discovery run.
///
/// Every component takes its knobs from here instead of module-level
/// constants, so tests can run with short delays and small budgets.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Maximum URLs returned after ranking.
    pub max_urls: usize,
    /// How deep to crawl from the homepage (1 = homepage links only).
    pub crawl_depth: usize,
    /// Hard cap on pages visited during a crawl.
    pub max_pages: usize,
    /// Timeout for GET fetches (sitemaps, crawled pages).
    pub fetch_timeout: Duration,
    /// Timeout for HEAD existence probes.
    pub probe_timeout: Duration,
    /// Politeness delay between consecutive path probes.
    pub probe_delay: Duration,
    /// Politeness delay between consecutive crawl fetches.
    pub crawl_delay: Duration,
    /// How many sub-sitemaps of an index document to fetch.
    pub max_subsitemaps: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            max_urls: 15,
            crawl_depth: 2,
            max_pages: 50,
            fetch_timeout: Duration::from_secs(10),
            probe_timeout: Duration::from_secs(5),
            probe_delay: Duration::from_millis(200),
            crawl_delay: Duration::from_millis(300),
            max_subsitemaps: 10,
        }
    }
}
