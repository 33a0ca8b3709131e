pub mod discover;
pub mod report;

use colored::Colorize;

pub use discover::{DiscoverOptions, DiscoverProgressCallback, execute_discovery};
pub use report::{ReportFormat, generate_json_report, generate_text_report, save_report};

pub fn print_banner() {
    let banner = r#"
                          _
  _ __ ___   __ _  __ _ _ __ (_) ___
 | '_ ` _ \ / _` |/ _` | '_ \| |/ _ \
 | | | | | | (_| | (_| | |_) | |  __/
 |_| |_| |_|\__,_|\__, | .__/|_|\___|
                  |___/|_|
"#;
    println!("{}", banner.cyan());
    println!(
        "  {} v{} - loyalty page discovery\n",
        "magpie".bold(),
        env!("CARGO_PKG_VERSION")
    );
}
