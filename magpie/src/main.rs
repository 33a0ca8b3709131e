use clap::ArgMatches;
use commands::command_argument_builder;
use magpie_core::discover::{DiscoverOptions, execute_discovery};
use magpie_core::print_banner;
use magpie_core::report::{ReportFormat, generate_json_report, generate_text_report, save_report};

mod commands;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    if chosen_command.subcommand().is_none() {
        // No subcommand provided, just show the banner
        return;
    }

    match chosen_command.subcommand() {
        Some(("discover", primary_command)) => handle_discover(primary_command, quiet).await,
        _ => unreachable!("clap should ensure we don't get here"),
    }
}

async fn handle_discover(sub_matches: &ArgMatches, quiet: bool) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let domain = sub_matches.get_one::<String>("domain").unwrap();
    let brand = sub_matches
        .get_one::<String>("brand")
        .cloned()
        .unwrap_or_else(|| domain.clone());
    let max_urls = *sub_matches.get_one::<usize>("max-urls").unwrap_or(&15);
    let output = sub_matches.get_one::<std::path::PathBuf>("output");
    let format = sub_matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");

    if !quiet {
        println!("Discovering loyalty URLs for: {}", domain);
        println!("Max URLs: {}\n", max_urls);
    }

    let mut options = DiscoverOptions::new(brand, domain.clone());
    options.max_urls = max_urls;
    options.show_progress_bars = !quiet;

    match execute_discovery(options, None).await {
        Ok(result) => {
            let report = match ReportFormat::from_str(format).unwrap_or(ReportFormat::Text) {
                ReportFormat::Json => match generate_json_report(&result) {
                    Ok(json) => json,
                    Err(e) => {
                        eprintln!("[!] Failed to serialize report: {}", e);
                        std::process::exit(1);
                    }
                },
                ReportFormat::Text => generate_text_report(&result),
            };

            match output {
                Some(path) => {
                    if let Err(e) = save_report(&report, path) {
                        eprintln!("[!] Failed to save report to {}: {}", path.display(), e);
                        std::process::exit(1);
                    }
                    if !quiet {
                        println!("Report saved to {}", path.display());
                    }
                }
                None => print!("{}", report),
            }
        }
        Err(e) => {
            eprintln!("[!] Discovery failed: {}", e);
            std::process::exit(1);
        }
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
