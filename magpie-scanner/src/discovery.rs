use crate::config::DiscoveryConfig;
use crate::crawler::LinkCrawler;
use crate::domain::{base_url, normalize_domain};
use crate::error::{DiscoverError, Result};
use crate::fetch::Fetcher;
use crate::probe::{PathCatalog, PathProber};
use crate::rank::rank_candidates;
use crate::relevance::RelevanceMatcher;
use crate::result::{CandidateUrl, DiscoveryResult, DiscoverySource};
use crate::sitemap::SitemapHarvester;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// Reports phase transitions and per-phase outcomes to the caller.
pub type ProgressCallback = Arc<dyn Fn(DiscoveryPhase, String) + Send + Sync>;

/// The three discovery signals, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryPhase {
    Sitemap,
    Probe,
    Crawl,
}

impl DiscoveryPhase {
    pub fn label(&self) -> &'static str {
        match self {
            DiscoveryPhase::Sitemap => "sitemap",
            DiscoveryPhase::Probe => "probe",
            DiscoveryPhase::Crawl => "crawl",
        }
    }
}

/// Runs the full discovery pass for one domain: sitemap harvest, path
/// probing and a homepage crawl, merged into one ranked candidate list.
///
/// The three signals run sequentially and share nothing but the fetcher,
/// so concurrent discoveries for different brands are safe with separate
/// `Discoverer` values (or the same one - per-call state is local).
pub struct Discoverer {
    config: DiscoveryConfig,
    matcher: RelevanceMatcher,
    catalog: PathCatalog,
    progress_callback: Option<ProgressCallback>,
}

impl Discoverer {
    pub fn new() -> Self {
        Self {
            config: DiscoveryConfig::default(),
            matcher: RelevanceMatcher::default(),
            catalog: PathCatalog::default(),
            progress_callback: None,
        }
    }

    pub fn with_config(mut self, config: DiscoveryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_matcher(mut self, matcher: RelevanceMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn with_catalog(mut self, catalog: PathCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Discover loyalty URLs for a domain, using the domain itself as
    /// the brand label.
    pub async fn discover(&self, domain: &str) -> Result<DiscoveryResult> {
        self.discover_for_brand(domain, domain).await
    }

    /// Discover loyalty URLs for a brand's domain.
    ///
    /// The only failure is a domain that cannot produce a usable base
    /// URL; every downstream network or parse problem degrades to a
    /// smaller (possibly empty) result instead.
    pub async fn discover_for_brand(&self, brand: &str, domain: &str) -> Result<DiscoveryResult> {
        let normalized = normalize_domain(domain);
        if normalized.is_empty() {
            return Err(DiscoverError::InvalidDomain(domain.to_string()));
        }
        let base = base_url(&normalized);
        Url::parse(&base).map_err(|_| DiscoverError::InvalidDomain(domain.to_string()))?;

        Ok(self.discover_at(brand, &normalized, &base).await)
    }

    /// Run the three phases against an explicit base URL. Exposed so the
    /// engine can be pointed at a stub server.
    pub async fn discover_at(&self, brand: &str, domain: &str, base: &str) -> DiscoveryResult {
        let fetcher = Fetcher::from_config(&self.config);
        let mut candidates: Vec<CandidateUrl> = Vec::new();

        // Signal 1: sitemaps. Only relevance-matching entries survive;
        // sorted so tie-breaking stays deterministic across runs.
        self.emit(DiscoveryPhase::Sitemap, "Checking sitemap...");
        let harvester =
            SitemapHarvester::new(&fetcher).with_max_subsitemaps(self.config.max_subsitemaps);
        let mut sitemap_urls: Vec<String> = harvester
            .harvest_from(base)
            .await
            .into_iter()
            .filter(|url| self.matcher.matches(url))
            .collect();
        sitemap_urls.sort();
        self.emit(
            DiscoveryPhase::Sitemap,
            &format!("Found {} loyalty URLs in sitemap", sitemap_urls.len()),
        );
        candidates.extend(
            sitemap_urls
                .into_iter()
                .map(|url| CandidateUrl::new(url, DiscoverySource::Sitemap)),
        );

        // Signal 2: conventional path probing
        self.emit(DiscoveryPhase::Probe, "Probing common paths...");
        let prober = PathProber::new(&fetcher)
            .with_catalog(self.catalog.clone())
            .with_delay(self.config.probe_delay);
        let probed = prober.probe_from(base).await;
        self.emit(
            DiscoveryPhase::Probe,
            &format!("Found {} valid common paths", probed.len()),
        );
        candidates.extend(
            probed
                .into_iter()
                .map(|url| CandidateUrl::new(url, DiscoverySource::Probe)),
        );

        // Signal 3: homepage crawl
        self.emit(
            DiscoveryPhase::Crawl,
            &format!("Crawling homepage (depth {})...", self.config.crawl_depth),
        );
        let crawler = LinkCrawler::new(&fetcher, &self.matcher)
            .with_max_depth(self.config.crawl_depth)
            .with_max_pages(self.config.max_pages)
            .with_delay(self.config.crawl_delay);
        let mut crawled: Vec<String> = crawler.crawl(base, domain).await.into_iter().collect();
        crawled.sort();
        self.emit(
            DiscoveryPhase::Crawl,
            &format!("Found {} URLs from crawling", crawled.len()),
        );
        candidates.extend(
            crawled
                .into_iter()
                .map(|url| CandidateUrl::new(url, DiscoverySource::Crawl)),
        );

        let ranked = rank_candidates(candidates, &self.matcher, self.config.max_urls);
        info!(
            "discovery for {} complete: {} ranked URLs",
            domain,
            ranked.len()
        );

        DiscoveryResult::new(
            brand.to_string(),
            domain.to_string(),
            ranked.into_iter().map(|c| c.url).collect(),
        )
    }

    fn emit(&self, phase: DiscoveryPhase, message: &str) {
        debug!("{}: {}", phase.label(), message);
        if let Some(ref callback) = self.progress_callback {
            callback(phase, message.to_string());
        }
    }
}

impl Default for Discoverer {
    fn default() -> Self {
        Self::new()
    }
}
