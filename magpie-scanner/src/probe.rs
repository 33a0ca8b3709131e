use crate::domain::base_url;
use crate::fetch::Fetcher;
use std::time::Duration;
use tracing::debug;

/// Conventional loyalty-program paths worth probing on any brand site.
const COMMON_LOYALTY_PATHS: &[&str] = &[
    "/rewards",
    "/loyalty",
    "/membership",
    "/points",
    "/rewards/terms",
    "/rewards/faq",
    "/rewards/how-it-works",
    "/rewards/about",
    "/rewards/earn",
    "/rewards/redeem",
    "/rewards/tiers",
    "/rewards/benefits",
    "/loyalty-program",
    "/loyalty/terms",
    "/loyalty/faq",
    "/member-rewards",
    "/member/rewards",
    "/club",
    "/perks",
    "/vip",
    "/plus",
    "/advantage",
    "/myrewards",
    "/my-rewards",
    "/terms",
    "/terms-and-conditions",
    "/legal/rewards-terms",
];

/// Injectable catalog of paths for the prober.
#[derive(Debug, Clone)]
pub struct PathCatalog(Vec<String>);

impl PathCatalog {
    pub fn new(paths: Vec<String>) -> Self {
        Self(paths)
    }

    pub fn paths(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for PathCatalog {
    fn default() -> Self {
        Self(COMMON_LOYALTY_PATHS.iter().map(|s| s.to_string()).collect())
    }
}

/// Probes a fixed catalog of conventional paths for existence.
///
/// Each path gets a HEAD check against `base_url + path`; a path is
/// accepted when the final status after redirects is 200. Network errors
/// count as not-found for that path only, and a politeness delay runs
/// between consecutive probes.
pub struct PathProber<'a> {
    fetcher: &'a Fetcher,
    catalog: PathCatalog,
    delay: Duration,
}

impl<'a> PathProber<'a> {
    pub fn new(fetcher: &'a Fetcher) -> Self {
        Self {
            fetcher,
            catalog: PathCatalog::default(),
            delay: Duration::from_millis(200),
        }
    }

    pub fn with_catalog(mut self, catalog: PathCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Probe every catalog path on the domain, returning the accepted
    /// absolute URLs in catalog order.
    pub async fn probe(&self, domain: &str) -> Vec<String> {
        self.probe_from(&base_url(domain)).await
    }

    /// Same as [`probe`](Self::probe), rooted at an explicit base URL.
    pub async fn probe_from(&self, base: &str) -> Vec<String> {
        let mut valid_urls = Vec::new();

        for path in self.catalog.paths() {
            let url = format!("{base}{path}");
            if self.fetcher.probe(&url).await {
                debug!("probe hit: {}", path);
                valid_urls.push(url);
            }
            tokio::time::sleep(self.delay).await;
        }

        valid_urls
    }
}
