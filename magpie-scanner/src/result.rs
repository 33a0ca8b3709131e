use serde::{Deserialize, Serialize};

/// Which discovery signal produced a candidate. Used during aggregation
/// and reporting only; identity is the URL string itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoverySource {
    Sitemap,
    Probe,
    Crawl,
}

/// An absolute URL with its relevance score and provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateUrl {
    pub url: String,
    pub score: f64,
    pub source: DiscoverySource,
}

impl CandidateUrl {
    pub fn new(url: String, source: DiscoverySource) -> Self {
        Self {
            url,
            score: 0.0,
            source,
        }
    }
}

/// Final artifact of one discovery invocation: the ranked, truncated URL
/// list for a brand domain. Immutable once returned; persisting it is the
/// caller's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryResult {
    pub brand: String,
    pub domain: String,
    pub urls: Vec<String>,
    pub count: usize,
}

impl DiscoveryResult {
    pub fn new(brand: String, domain: String, urls: Vec<String>) -> Self {
        let count = urls.len();
        Self {
            brand,
            domain,
            urls,
            count,
        }
    }
}
