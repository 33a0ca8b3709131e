use url::Url;

/// Keyword-based classifier and scorer for loyalty-related URLs.
///
/// The vocabulary is injected data rather than a module constant so
/// alternate keyword sets can be tested or supplied by callers. Matching
/// and scoring both read only the URL path; query strings and fragments
/// are ignored. This is the single source of truth for inclusion
/// filtering and final ranking.
#[derive(Debug, Clone)]
pub struct RelevanceMatcher {
    keywords: Vec<String>,
    primary: Vec<String>,
}

/// Terms that identify loyalty-program content in a URL path.
const LOYALTY_KEYWORDS: &[&str] = &[
    // Primary loyalty terms
    "reward", "rewards", "loyalty", "points", "member", "membership",
    // Tier/status terms
    "tier", "tiers", "level", "levels", "status", "gold", "silver",
    "platinum", "bronze", "vip", "elite", "premier", "plus",
    // Action terms
    "earn", "earning", "redeem", "redemption", "collect", "spend",
    // Program terms
    "program", "club", "perks", "benefits", "bonus", "advantage",
    // Info pages
    "terms", "conditions", "faq", "how-it-works", "about-rewards",
    "terms-and-conditions", "terms-of-use",
];

/// Subset of the vocabulary that earns a scoring bonus.
const PRIMARY_KEYWORDS: &[&str] = &["reward", "rewards", "loyalty", "membership", "points"];

impl RelevanceMatcher {
    pub fn new(keywords: Vec<String>, primary: Vec<String>) -> Self {
        Self { keywords, primary }
    }

    /// True if the URL path contains any vocabulary keyword.
    pub fn matches(&self, url: &str) -> bool {
        let path = url_path(url);
        self.keywords.iter().any(|kw| path.contains(kw.as_str()))
    }

    /// Additive relevance score: 1.0 per keyword found in the path, plus
    /// 0.5 for each match drawn from the primary subset.
    pub fn score(&self, url: &str) -> f64 {
        let path = url_path(url);
        let mut score = 0.0;
        for keyword in &self.keywords {
            if path.contains(keyword.as_str()) {
                score += 1.0;
                if self.primary.iter().any(|p| p == keyword) {
                    score += 0.5;
                }
            }
        }
        score
    }
}

impl Default for RelevanceMatcher {
    fn default() -> Self {
        Self {
            keywords: LOYALTY_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            primary: PRIMARY_KEYWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Case-folded path component of a URL. A bare path (no scheme) is used
/// as-is, so matching also works on relative links.
fn url_path(url: &str) -> String {
    Url::parse(url)
        .map(|u| u.path().to_string())
        .unwrap_or_else(|_| url.to_string())
        .to_lowercase()
}
