// Report generation for discovery results

use crate::discover::extract_url_path;
use magpie_scanner::result::DiscoveryResult;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

pub fn generate_text_report(result: &DiscoveryResult) -> String {
    let mut report = String::new();

    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Discovery summary:\n");
    report.push_str(&format!("  Brand:      {}\n", result.brand));
    report.push_str(&format!("  Domain:     {}\n", result.domain));
    report.push_str(&format!("  URLs found: {}\n", result.count));
    report.push_str(&format!(
        "  Generated:  {}\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    if result.urls.is_empty() {
        report.push_str("  No loyalty content discovered.\n");
    } else {
        report.push_str("# Ranked URLs:\n");
        for (idx, url) in result.urls.iter().enumerate() {
            report.push_str(&format!(
                "  {:2}. {}  \x1b[90m{}\x1b[0m\n",
                idx + 1,
                url,
                extract_url_path(url)
            ));
        }
    }
    report.push('\n');

    report
}

/// Serialize the result as the canonical discovery object:
/// `{ "brand", "domain", "urls", "count" }`.
pub fn generate_json_report(result: &DiscoveryResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> DiscoveryResult {
        DiscoveryResult::new(
            "Acme".to_string(),
            "acme.com".to_string(),
            vec![
                "https://www.acme.com/rewards".to_string(),
                "https://www.acme.com/loyalty/terms".to_string(),
            ],
        )
    }

    #[test]
    fn report_format_from_str() {
        assert!(matches!(ReportFormat::from_str("text"), Some(ReportFormat::Text)));
        assert!(matches!(ReportFormat::from_str("JSON"), Some(ReportFormat::Json)));
        assert!(ReportFormat::from_str("yaml").is_none());
    }

    #[test]
    fn text_report_lists_urls_in_order() {
        let report = generate_text_report(&sample_result());
        assert!(report.contains("Brand:      Acme"));
        assert!(report.contains("URLs found: 2"));
        let rewards = report.find("https://www.acme.com/rewards").unwrap();
        let terms = report.find("https://www.acme.com/loyalty/terms").unwrap();
        assert!(rewards < terms);
    }

    #[test]
    fn text_report_handles_empty_result() {
        let result = DiscoveryResult::new("Ghost".to_string(), "ghost.com".to_string(), vec![]);
        let report = generate_text_report(&result);
        assert!(report.contains("No loyalty content discovered"));
    }

    #[test]
    fn json_report_has_canonical_shape() {
        let json = generate_json_report(&sample_result()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["brand"], "Acme");
        assert_eq!(value["domain"], "acme.com");
        assert_eq!(value["count"], 2);
        assert_eq!(value["urls"].as_array().unwrap().len(), 2);
    }
}
