use crate::domain::is_same_domain;
use crate::fetch::{FetchOutcome, Fetcher};
use crate::relevance::RelevanceMatcher;
use scraper::{Html, Selector};
use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Bounded, same-domain, depth-limited, relevance-biased traversal from
/// a homepage.
///
/// Every URL moves through three states: unvisited, queued in the
/// frontier, and visited once dequeued and fetched - regardless of the
/// fetch outcome it never re-enters the queue. Relevance-matching links
/// jump to the front of the frontier so loyalty pages are explored
/// before generic navigation; non-matching links only queue at the back
/// while the depth budget leaves room for one further hop.
pub struct LinkCrawler<'a> {
    fetcher: &'a Fetcher,
    matcher: &'a RelevanceMatcher,
    max_depth: usize,
    max_pages: usize,
    delay: Duration,
}

impl<'a> LinkCrawler<'a> {
    pub fn new(fetcher: &'a Fetcher, matcher: &'a RelevanceMatcher) -> Self {
        Self {
            fetcher,
            matcher,
            max_depth: 2,
            max_pages: 50,
            delay: Duration::from_millis(300),
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Crawl from `start_url`, returning the relevance-matching URLs
    /// discovered. Per-page fetch failures abandon that node only; an
    /// empty result is a valid terminal state.
    pub async fn crawl(&self, start_url: &str, domain: &str) -> HashSet<String> {
        let mut visited: HashSet<String> = HashSet::new();
        let mut frontier: VecDeque<(String, usize)> = VecDeque::new();
        let mut discovered: HashSet<String> = HashSet::new();

        frontier.push_back((start_url.to_string(), 0));

        while let Some((url, depth)) = frontier.pop_front() {
            if visited.contains(&url) {
                continue;
            }
            visited.insert(url.clone());

            match self.fetcher.get(&url).await {
                FetchOutcome::Success { body, .. } => {
                    let links = extract_links(&body, &url, domain);
                    debug!("crawled {} ({} links, depth {})", url, links.len(), depth);

                    for link in links {
                        let relevant = self.matcher.matches(&link);
                        if relevant {
                            discovered.insert(link.clone());
                        }
                        if visited.contains(&link) {
                            continue;
                        }
                        if relevant {
                            if depth < self.max_depth {
                                frontier.push_front((link, depth + 1));
                            }
                        } else if depth + 1 < self.max_depth {
                            frontier.push_back((link, depth + 1));
                        }
                    }
                }
                FetchOutcome::Skipped(reason) => {
                    debug!("crawl skipped {}: {}", url, reason);
                }
            }

            if visited.len() >= self.max_pages {
                debug!("page cap reached after {} visits", visited.len());
                break;
            }
            tokio::time::sleep(self.delay).await;
        }

        discovered
    }
}

/// Extract absolute, same-domain, fragment-stripped links from an HTML
/// body. Query strings are kept.
pub fn extract_links(html: &str, current_url: &str, domain: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let link_selector = Selector::parse("a[href]").unwrap();

    let mut links = Vec::new();
    for element in document.select(&link_selector) {
        if let Some(href) = element.value().attr("href")
            && let Some(absolute_url) = resolve_url(current_url, href)
            && is_same_domain(&absolute_url, domain)
            && !links.contains(&absolute_url)
        {
            links.push(absolute_url);
        }
    }

    links
}

fn resolve_url(base: &str, href: &str) -> Option<String> {
    // Skip empty, javascript:, mailto:, tel:, fragment-only
    if href.is_empty()
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with('#')
    {
        return None;
    }

    let base_url = Url::parse(base).ok()?;
    let mut resolved = base_url.join(href).ok()?;
    resolved.set_fragment(None);

    Some(resolved.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn html_page(links: &[String]) -> String {
        let anchors: String = links
            .iter()
            .map(|l| format!(r#"<a href="{l}">link</a>"#))
            .collect();
        format!("<html><body>{anchors}</body></html>")
    }

    async fn mount_html(server: &MockServer, at: &str, body: String) {
        Mock::given(method("GET"))
            .and(path(at))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_string(body),
            )
            .mount(server)
            .await;
    }

    fn host_of(server: &MockServer) -> String {
        Url::parse(&server.uri()).unwrap().host_str().unwrap().to_string()
    }

    fn test_crawler<'a>(fetcher: &'a Fetcher, matcher: &'a RelevanceMatcher) -> LinkCrawler<'a> {
        LinkCrawler::new(fetcher, matcher).with_delay(Duration::from_millis(1))
    }

    #[test]
    fn extract_links_keeps_same_domain_only() {
        let html = r##"<html><body>
            <a href="/rewards">rewards</a>
            <a href="https://www.example.com/about">about</a>
            <a href="https://other.com/rewards">external</a>
            <a href="#section">fragment</a>
            <a href="javascript:void(0)">js</a>
            <a href="mailto:hi@example.com">mail</a>
        </body></html>"##;

        let links = extract_links(html, "https://www.example.com/", "example.com");
        assert_eq!(
            links,
            vec![
                "https://www.example.com/rewards".to_string(),
                "https://www.example.com/about".to_string(),
            ]
        );
    }

    #[test]
    fn extract_links_strips_fragments_keeps_queries() {
        let html = r#"<a href="/rewards?tab=earn#top">x</a>"#;
        let links = extract_links(html, "https://www.example.com/", "example.com");
        assert_eq!(links, vec!["https://www.example.com/rewards?tab=earn".to_string()]);
    }

    #[tokio::test]
    async fn discovers_relevant_links_at_depth_one() {
        let mock_server = MockServer::start().await;
        let base = mock_server.uri();
        mount_html(
            &mock_server,
            "/",
            html_page(&[format!("{base}/about"), format!("{base}/rewards/tiers")]),
        )
        .await;
        mount_html(&mock_server, "/rewards/tiers", html_page(&[])).await;
        mount_html(&mock_server, "/about", html_page(&[])).await;

        let fetcher = Fetcher::new();
        let matcher = RelevanceMatcher::default();
        let crawler = test_crawler(&fetcher, &matcher).with_max_depth(1);
        let discovered = crawler.crawl(&base, &host_of(&mock_server)).await;

        assert_eq!(
            discovered,
            HashSet::from([format!("{base}/rewards/tiers")])
        );
    }

    #[tokio::test]
    async fn relevant_links_are_fetched_before_non_relevant() {
        let mock_server = MockServer::start().await;
        let base = mock_server.uri();
        mount_html(
            &mock_server,
            "/",
            html_page(&[
                format!("{base}/a"),
                format!("{base}/b"),
                format!("{base}/rewards"),
            ]),
        )
        .await;
        mount_html(
            &mock_server,
            "/rewards",
            html_page(&[format!("{base}/rewards/earn")]),
        )
        .await;
        mount_html(&mock_server, "/a", html_page(&[])).await;
        mount_html(&mock_server, "/b", html_page(&[])).await;
        mount_html(&mock_server, "/rewards/earn", html_page(&[])).await;

        let fetcher = Fetcher::new();
        let matcher = RelevanceMatcher::default();
        // Page cap of 2: only the homepage and one more page get fetched.
        // Front-insertion means that page must be /rewards.
        let crawler = test_crawler(&fetcher, &matcher)
            .with_max_depth(2)
            .with_max_pages(2);
        let discovered = crawler.crawl(&base, &host_of(&mock_server)).await;

        assert!(discovered.contains(&format!("{base}/rewards")));
        assert!(discovered.contains(&format!("{base}/rewards/earn")));
    }

    #[tokio::test]
    async fn never_visits_more_than_page_cap() {
        let mock_server = MockServer::start().await;
        let base = mock_server.uri();

        // A fully-connected relevant cluster that would crawl forever
        let page_urls: Vec<String> = (0..20).map(|i| format!("{base}/rewards-{i}")).collect();
        mount_html(&mock_server, "/", html_page(&page_urls)).await;
        for i in 0..20 {
            mount_html(&mock_server, &format!("/rewards-{i}"), html_page(&page_urls)).await;
        }

        let fetcher = Fetcher::new();
        let matcher = RelevanceMatcher::default();
        let crawler = test_crawler(&fetcher, &matcher)
            .with_max_depth(5)
            .with_max_pages(5);
        let discovered = crawler.crawl(&base, &host_of(&mock_server)).await;

        // All 20 relevant URLs are discovered from the first pages, but
        // only 5 pages were ever fetched
        assert_eq!(discovered.len(), 20);
        let requests = mock_server.received_requests().await.unwrap();
        assert!(requests.len() <= 5, "visited {} pages", requests.len());
    }

    #[tokio::test]
    async fn never_fetches_a_url_twice() {
        let mock_server = MockServer::start().await;
        let base = mock_server.uri();

        // Homepage and /rewards link to each other
        mount_html(&mock_server, "/", html_page(&[format!("{base}/rewards")])).await;
        mount_html(&mock_server, "/rewards", html_page(&[format!("{base}/")])).await;

        let fetcher = Fetcher::new();
        let matcher = RelevanceMatcher::default();
        let crawler = test_crawler(&fetcher, &matcher).with_max_depth(3);
        crawler.crawl(&base, &host_of(&mock_server)).await;

        let requests = mock_server.received_requests().await.unwrap();
        let rewards_fetches = requests
            .iter()
            .filter(|r| r.url.path() == "/rewards")
            .count();
        assert_eq!(rewards_fetches, 1);
    }

    #[tokio::test]
    async fn fetch_failures_are_not_fatal() {
        let mock_server = MockServer::start().await;
        let base = mock_server.uri();
        mount_html(
            &mock_server,
            "/",
            html_page(&[format!("{base}/rewards"), format!("{base}/loyalty")]),
        )
        .await;
        // /rewards 500s, /loyalty resolves fine
        Mock::given(method("GET"))
            .and(path("/rewards"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;
        mount_html(&mock_server, "/loyalty", html_page(&[])).await;

        let fetcher = Fetcher::new();
        let matcher = RelevanceMatcher::default();
        let crawler = test_crawler(&fetcher, &matcher).with_max_depth(2);
        let discovered = crawler.crawl(&base, &host_of(&mock_server)).await;

        // Both links were discovered from the homepage even though one
        // page could not be expanded
        assert!(discovered.contains(&format!("{base}/rewards")));
        assert!(discovered.contains(&format!("{base}/loyalty")));
    }

    #[tokio::test]
    async fn unreachable_start_url_yields_empty_set() {
        let fetcher = Fetcher::new();
        let matcher = RelevanceMatcher::default();
        let crawler = test_crawler(&fetcher, &matcher);
        let discovered = crawler.crawl("http://127.0.0.1:1/", "127.0.0.1").await;
        assert!(discovered.is_empty());
    }
}
