use url::Url;

/// Canonicalize a raw domain string: lowercase, no scheme, no trailing slash.
///
/// Normalization is idempotent - feeding the output back in returns the
/// same value. Malformed input degrades to best-effort string cleanup.
pub fn normalize_domain(raw: &str) -> String {
    let mut domain = raw.trim().to_lowercase();
    for scheme in ["https://", "http://"] {
        if let Some(stripped) = domain.strip_prefix(scheme) {
            domain = stripped.to_string();
            break;
        }
    }
    domain.trim_end_matches('/').to_string()
}

/// Derive the canonical base URL for a domain.
///
/// Prefixes `https://www.` unless the domain already starts with `www.`.
pub fn base_url(domain: &str) -> String {
    let domain = normalize_domain(domain);
    if domain.starts_with("www.") {
        format!("https://{}", domain)
    } else {
        format!("https://www.{}", domain)
    }
}

/// True if `url` belongs to `domain`, tolerating a leading `www.` on
/// either side.
pub fn is_same_domain(url: &str, domain: &str) -> bool {
    let domain = normalize_domain(domain);
    if let Ok(parsed) = Url::parse(url)
        && let Some(host) = parsed.host_str()
    {
        let host = host.to_lowercase();
        return host == domain || strip_www(&host) == strip_www(&domain);
    }
    false
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}
