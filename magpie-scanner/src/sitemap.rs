use crate::domain::base_url;
use crate::fetch::{FetchOutcome, Fetcher};
use std::collections::HashSet;
use tracing::debug;

/// Discovers and parses sitemap documents for a domain.
///
/// Tries a fixed list of conventional locations, follows one level of
/// sitemap-index indirection (capped at `max_subsitemaps` referenced
/// documents) and unions every `<loc>` entry collected along the way.
/// Relevance filtering is the caller's job.
pub struct SitemapHarvester<'a> {
    fetcher: &'a Fetcher,
    max_subsitemaps: usize,
}

/// Parsed `<loc>` entries of one sitemap document, split by whether the
/// entry sat inside a `<sitemap>` element (index entry) or not.
#[derive(Debug, Default)]
struct SitemapDoc {
    sitemap_locs: Vec<String>,
    url_locs: Vec<String>,
}

impl SitemapDoc {
    fn is_index(&self) -> bool {
        !self.sitemap_locs.is_empty()
    }

    fn into_all_locs(self) -> Vec<String> {
        let mut locs = self.url_locs;
        locs.extend(self.sitemap_locs);
        locs
    }
}

impl<'a> SitemapHarvester<'a> {
    pub fn new(fetcher: &'a Fetcher) -> Self {
        Self {
            fetcher,
            max_subsitemaps: 10,
        }
    }

    pub fn with_max_subsitemaps(mut self, max_subsitemaps: usize) -> Self {
        self.max_subsitemaps = max_subsitemaps;
        self
    }

    /// Harvest page URLs from the domain's sitemaps.
    ///
    /// A fetch or parse failure on one candidate location skips that
    /// location only; no sitemap at all yields an empty set.
    pub async fn harvest(&self, domain: &str) -> HashSet<String> {
        self.harvest_from(&base_url(domain)).await
    }

    /// Same as [`harvest`](Self::harvest), rooted at an explicit base URL.
    pub async fn harvest_from(&self, base: &str) -> HashSet<String> {
        let locations = [
            format!("{base}/sitemap.xml"),
            format!("{base}/sitemap_index.xml"),
            format!("{base}/sitemap/sitemap.xml"),
            format!("{base}/sitemaps/sitemap.xml"),
        ];

        let mut all_urls = HashSet::new();

        for location in &locations {
            let body = match self.fetcher.get(location).await {
                FetchOutcome::Success { body, .. } => body,
                FetchOutcome::Skipped(reason) => {
                    debug!("sitemap {} skipped: {}", location, reason);
                    continue;
                }
            };

            let doc = parse_sitemap(&body);
            if doc.is_index() {
                // One level of indirection: fetch the first N referenced
                // sub-sitemaps. Entries of a nested index are collected
                // as-is, never fetched.
                for sub_loc in doc.sitemap_locs.iter().take(self.max_subsitemaps) {
                    if let FetchOutcome::Success { body, .. } = self.fetcher.get(sub_loc).await {
                        all_urls.extend(parse_sitemap(&body).into_all_locs());
                    }
                }
            } else {
                all_urls.extend(doc.url_locs);
            }
        }

        all_urls
    }
}

/// Event-based parse of a sitemap document. Tolerates malformed XML by
/// keeping whatever was collected before the first parse error.
fn parse_sitemap(xml: &str) -> SitemapDoc {
    use quick_xml::events::Event;

    let mut doc = SitemapDoc::default();
    let mut in_sitemap = false;
    let mut current_tag = String::new();

    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = local_name(e.name().as_ref());
                if name == "sitemap" {
                    in_sitemap = true;
                }
                current_tag = name;
            }
            Ok(Event::Text(ref e)) => {
                if current_tag == "loc" {
                    let text = e.unescape().unwrap_or_default().trim().to_string();
                    if !text.is_empty() {
                        if in_sitemap {
                            doc.sitemap_locs.push(text);
                        } else {
                            doc.url_locs.push(text);
                        }
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                if local_name(e.name().as_ref()) == "sitemap" {
                    in_sitemap = false;
                }
                current_tag.clear();
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    doc
}

/// Tag name with any namespace prefix stripped; some sites emit
/// `<sm:loc>` style prefixes, most rely on a default namespace.
fn local_name(raw: &[u8]) -> String {
    let name = String::from_utf8_lossy(raw).to_string();
    match name.rsplit_once(':') {
        Some((_, local)) => local.to_string(),
        None => name,
    }
}
