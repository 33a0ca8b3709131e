use crate::relevance::RelevanceMatcher;
use crate::result::CandidateUrl;
use std::collections::HashSet;

/// Merge candidate URLs into a ranked, truncated list.
///
/// Exact-string deduplication keeps the first occurrence, so provenance
/// of a URL found by several signals is whichever signal ran first.
/// Scores come from the matcher; the sort is stable and descending, so
/// ties resolve to insertion order.
pub fn rank_candidates(
    candidates: Vec<CandidateUrl>,
    matcher: &RelevanceMatcher,
    max_urls: usize,
) -> Vec<CandidateUrl> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut ranked: Vec<CandidateUrl> = Vec::new();

    for mut candidate in candidates {
        if seen.insert(candidate.url.clone()) {
            candidate.score = matcher.score(&candidate.url);
            ranked.push(candidate);
        }
    }

    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(max_urls);
    ranked
}
