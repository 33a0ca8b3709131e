use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("magpie")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("magpie")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and progress output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("discover")
                .about(
                    "Discover loyalty program URLs for a brand domain. Combines sitemap \
                inspection, path probing and a homepage crawl into one ranked list.",
                )
                .arg(
                    arg!(-d --"domain" <DOMAIN>)
                        .required(true)
                        .help("The brand's root domain, e.g. acme.com"),
                )
                .arg(
                    arg!(-b --"brand" <NAME>)
                        .required(false)
                        .help("Brand label for the report (defaults to the domain)"),
                )
                .arg(
                    arg!(-m --"max-urls" <NUM>)
                        .required(false)
                        .help("Maximum URLs to return after ranking")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("15"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                ),
        )
}
