use indicatif::{ProgressBar, ProgressStyle};
use magpie_scanner::Discoverer;
use magpie_scanner::config::DiscoveryConfig;
use magpie_scanner::discovery::DiscoveryPhase;
use magpie_scanner::result::DiscoveryResult;
use std::sync::Arc;
use url::Url;

/// Options for configuring a discovery run
pub struct DiscoverOptions {
    pub brand: String,
    pub domain: String,
    pub max_urls: usize,
    pub show_progress_bars: bool,
}

impl DiscoverOptions {
    pub fn new(brand: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            domain: domain.into(),
            max_urls: 15,
            show_progress_bars: true,
        }
    }
}

/// Callback for reporting discovery progress lines
pub type DiscoverProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Extract the path component from a URL
pub fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            let path = u.path().to_string();
            if path.is_empty() || path == "/" {
                "/".to_string()
            } else {
                path
            }
        })
        .unwrap_or_else(|| url.to_string())
}

/// Execute discovery with the given options.
/// Returns the ranked discovery result.
pub async fn execute_discovery(
    options: DiscoverOptions,
    progress_callback: Option<DiscoverProgressCallback>,
) -> Result<DiscoveryResult, String> {
    let DiscoverOptions {
        brand,
        domain,
        max_urls,
        show_progress_bars,
    } = options;

    // Single spinner for the whole three-phase pass (only if enabled)
    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.set_message(format!("Discovering loyalty URLs for {}", domain));
        Some(Arc::new(pb))
    } else {
        None
    };

    // Bridge the scanner's phase callback onto the spinner and the
    // caller's line callback
    let phase_callback: magpie_scanner::discovery::ProgressCallback = {
        let pb_clone = progress_bar.clone();
        let line_cb = progress_callback.clone();
        Arc::new(move |phase: DiscoveryPhase, message: String| {
            let step = match phase {
                DiscoveryPhase::Sitemap => "1/3",
                DiscoveryPhase::Probe => "2/3",
                DiscoveryPhase::Crawl => "3/3",
            };
            let line = format!("[{}] {}", step, message);
            if let Some(ref pb) = pb_clone {
                pb.set_message(line.clone());
                pb.tick();
            }
            if let Some(ref cb) = line_cb {
                cb(line);
            }
        })
    };

    let config = DiscoveryConfig {
        max_urls,
        ..DiscoveryConfig::default()
    };
    let discoverer = Discoverer::new()
        .with_config(config)
        .with_progress_callback(phase_callback);

    let result = discoverer
        .discover_for_brand(&brand, &domain)
        .await
        .map_err(|e| e.to_string())?;

    if let Some(ref pb) = progress_bar {
        pb.finish_with_message(format!(
            "Discovery complete! {} loyalty URLs for {}",
            result.count, result.domain
        ));
    }

    Ok(result)
}
