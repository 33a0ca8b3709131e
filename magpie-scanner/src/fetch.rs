use crate::config::DiscoveryConfig;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Typed result of a single fetch. Skips carry a reason so callers can
/// log and count them without control-flow exceptions.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Success { status: u16, body: String },
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Timeout,
    Connect,
    Status(u16),
    Other(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Timeout => write!(f, "timeout"),
            SkipReason::Connect => write!(f, "connection error"),
            SkipReason::Status(code) => write!(f, "status {}", code),
            SkipReason::Other(msg) => write!(f, "{}", msg),
        }
    }
}

/// The single funnel for network access during discovery.
///
/// Follows redirects (up to 5 hops) and never errors out of a caller's
/// loop: every failure becomes a `FetchOutcome::Skipped` or a `false`
/// probe result.
pub struct Fetcher {
    client: Client,
    fetch_timeout: Duration,
    probe_timeout: Duration,
}

impl Fetcher {
    pub fn new() -> Self {
        Self::from_config(&DiscoveryConfig::default())
    }

    pub fn from_config(config: &DiscoveryConfig) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(5))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            fetch_timeout: config.fetch_timeout,
            probe_timeout: config.probe_timeout,
        }
    }

    /// GET a URL and return its body text on a 200 response.
    pub async fn get(&self, url: &str) -> FetchOutcome {
        let response = match self
            .client
            .get(url)
            .timeout(self.fetch_timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                let reason = skip_reason(&e);
                debug!("GET {} skipped: {}", url, reason);
                return FetchOutcome::Skipped(reason);
            }
        };

        let status = response.status().as_u16();
        if status != 200 {
            debug!("GET {} skipped: status {}", url, status);
            return FetchOutcome::Skipped(SkipReason::Status(status));
        }

        match response.text().await {
            Ok(body) => FetchOutcome::Success { status, body },
            Err(e) => FetchOutcome::Skipped(skip_reason(&e)),
        }
    }

    /// HEAD-style existence check: true iff the final response after
    /// redirects is a 200.
    pub async fn probe(&self, url: &str) -> bool {
        match self
            .client
            .head(url)
            .timeout(self.probe_timeout)
            .send()
            .await
        {
            Ok(response) => response.status().as_u16() == 200,
            Err(e) => {
                debug!("HEAD {} skipped: {}", url, skip_reason(&e));
                false
            }
        }
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

fn skip_reason(e: &reqwest::Error) -> SkipReason {
    if e.is_timeout() {
        SkipReason::Timeout
    } else if e.is_connect() {
        SkipReason::Connect
    } else if let Some(status) = e.status() {
        SkipReason::Status(status.as_u16())
    } else {
        SkipReason::Other(e.to_string())
    }
}
