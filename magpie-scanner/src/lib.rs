pub mod config;
pub mod crawler;
pub mod discovery;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod probe;
pub mod rank;
pub mod relevance;
pub mod result;
pub mod sitemap;

pub use config::DiscoveryConfig;
pub use crawler::LinkCrawler;
pub use discovery::Discoverer;
pub use error::DiscoverError;
pub use fetch::{FetchOutcome, Fetcher, SkipReason};
pub use probe::{PathCatalog, PathProber};
pub use relevance::RelevanceMatcher;
pub use result::{CandidateUrl, DiscoveryResult, DiscoverySource};
pub use sitemap::SitemapHarvester;
