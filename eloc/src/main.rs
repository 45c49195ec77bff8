//! # eloc
//!
//! A CLI tool that walks a directory tree and reports LOC and effective LOC
//! (eLOC) per file, with totals, rankings and per-language summaries.
//!
//! ## Usage
//!
//! ```bash
//! # Count the current directory
//! eloc
//!
//! # Count a project, skipping the extensions listed in a file
//! eloc ~/src/project --exclude-file ~/.config/eloc/exclude.txt
//!
//! # Shorter ranked lists
//! eloc . --top-eloc 10 --latest 5 --top-lang 3 --top-files-per-lang 5
//!
//! # Skip generated code
//! eloc . --exclude "generated/**" --exclude "**/*.min.js"
//!
//! # Machine-readable output
//! eloc . --json
//! ```
//!
//! The exclusion file lists one extension per line; `#` starts a comment line.

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::builder::RangedU64ValueParser;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use eloclib::data::FileMetrics;
use eloclib::{
    count_directory, walk, ElocError, ExclusionSet, FilterConfig, Rankings, ReportOptions,
    TextReport, TreePrinter, WalkOptions,
};
use serde::Serialize;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Exit code for a root path that is missing or not a directory
const EXIT_INVALID_ROOT: u8 = 2;

const DEFAULT_EXCLUDE_FILE: &str = "exclude_extensions.txt";

/// JSON document printed with `--json`
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    root: &'a Path,
    files_counted: u64,
    total_eloc: u64,
    total_loc: u64,
    files: &'a [FileMetrics],
    rankings: Rankings<'a>,
}

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("eloc")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Measure eLOC and LOC per file under a directory")
        .arg(
            Arg::new("path")
                .help("Target directory (defaults to current directory)")
                .default_value("."),
        )
        .arg(
            Arg::new("exclude-file")
                .long("exclude-file")
                .value_name("FILE")
                .default_value(DEFAULT_EXCLUDE_FILE)
                .help("Text file listing file extensions to exclude"),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .value_name("GLOB")
                .action(ArgAction::Append)
                .help("Exclude paths matching glob pattern (relative to the target)"),
        )
        .arg(
            Arg::new("top-eloc")
                .long("top-eloc")
                .value_name("N")
                .value_parser(RangedU64ValueParser::<usize>::new().range(1..))
                .default_value("30")
                .help("Number of files in the top-by-eLOC list"),
        )
        .arg(
            Arg::new("latest")
                .long("latest")
                .value_name("N")
                .value_parser(RangedU64ValueParser::<usize>::new().range(1..))
                .default_value("10")
                .help("Number of most recently modified files to list"),
        )
        .arg(
            Arg::new("top-lang")
                .long("top-lang")
                .value_name("N")
                .value_parser(RangedU64ValueParser::<usize>::new().range(1..))
                .default_value("5")
                .help("Number of languages that get their own top list"),
        )
        .arg(
            Arg::new("top-files-per-lang")
                .long("top-files-per-lang")
                .value_name("N")
                .value_parser(RangedU64ValueParser::<usize>::new().range(1..))
                .default_value("20")
                .help("Number of files in each per-language top list"),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .default_value("0")
                .help("Worker threads for classification (0 = one per core)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the results as JSON instead of text"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log skipped and unreadable files to stderr"),
        )
}

/// Set up stderr logging; `RUST_LOG` wins over `--verbose`
fn init_logging(verbose: bool) {
    let directives = if verbose {
        "eloclib=debug,eloc=debug,warn"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn get_count(matches: &ArgMatches, id: &str) -> usize {
    matches.get_one::<usize>(id).copied().unwrap_or(1)
}

fn report_options(matches: &ArgMatches) -> ReportOptions {
    ReportOptions::new()
        .with_top_eloc(get_count(matches, "top-eloc"))
        .with_latest(get_count(matches, "latest"))
        .with_top_languages(get_count(matches, "top-lang"))
        .with_top_files_per_language(get_count(matches, "top-files-per-lang"))
}

/// Build filter config from matches
fn build_filter(matches: &ArgMatches) -> Result<FilterConfig, anyhow::Error> {
    let mut filter = FilterConfig::new();

    if let Some(excludes) = matches.get_many::<String>("exclude") {
        for pattern in excludes {
            filter = filter.exclude(pattern)?;
        }
    }

    Ok(filter)
}

/// Load the extension exclusion list, noting when the file is absent
fn load_exclusions(matches: &ArgMatches) -> Result<ExclusionSet, anyhow::Error> {
    let Some(file) = matches.get_one::<String>("exclude-file") else {
        return Ok(ExclusionSet::new());
    };
    let path = Path::new(file);
    if !path.exists() {
        eprintln!("Note: exclude file '{file}' not found; counting all extensions.");
        return Ok(ExclusionSet::new());
    }

    let exclusions = ExclusionSet::load(path)
        .with_context(|| format!("failed to load exclude file '{file}'"))?;
    tracing::debug!(
        count = exclusions.len(),
        extensions = ?exclusions.iter().collect::<Vec<_>>(),
        "loaded excluded extensions"
    );
    Ok(exclusions)
}

fn run(matches: &ArgMatches, root: &Path) -> Result<(), anyhow::Error> {
    let options = WalkOptions::new()
        .exclusions(load_exclusions(matches)?)
        .filter(build_filter(matches)?)
        .jobs(matches.get_one::<usize>("jobs").copied().unwrap_or(0));
    let report = report_options(matches);

    let stdout = io::stdout();

    if matches.get_flag("json") {
        let stats = count_directory(root, &options)?;
        let doc = JsonReport {
            root: &stats.root,
            files_counted: stats.files_counted,
            total_eloc: stats.total_eloc,
            total_loc: stats.total_loc,
            files: &stats.files,
            rankings: Rankings::build(&stats, &report),
        };
        let mut out = stdout.lock();
        serde_json::to_writer_pretty(&mut out, &doc)?;
        writeln!(out)?;
        return Ok(());
    }

    let mut printer = TreePrinter::new(stdout.lock());
    let stats = walk(root, &options, &mut printer)?;
    let mut out = printer.into_inner();

    TextReport::new(report)
        .styled(console::colors_enabled())
        .render(&stats, &mut out)?;
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(matches.get_flag("verbose"));

    let path = matches
        .get_one::<String>("path")
        .map(|s| s.as_str())
        .unwrap_or(".");
    let root = Path::new(path);

    if !root.is_dir() {
        eprintln!("Error: '{path}' is not a directory");
        return ExitCode::from(EXIT_INVALID_ROOT);
    }

    match run(&matches, root) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            if matches!(e.downcast_ref::<ElocError>(), Some(ElocError::InvalidRoot(_))) {
                ExitCode::from(EXIT_INVALID_ROOT)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
