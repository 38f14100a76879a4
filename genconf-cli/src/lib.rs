//! fc-genconf CLI

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use tracing::level_filters::LevelFilter;
use tracing::warn;

use genconf_core::discovery::{FilesystemScanner, FontRecord, FontScanner};
use genconf_core::generate::{generate, GenerationRequest};
use genconf_core::generic::GenericFamily;
use genconf_core::lang::{LanguageSet, LanguageTag};
use genconf_core::output::{write_document, write_json_pretty, write_ndjson, write_plain, Sink};

/// CLI entrypoint for fc-genconf.
#[derive(Debug, Parser)]
#[command(
    name = "fc-genconf",
    version,
    about = "Generate fontconfig rules that prefer locally installed fonts"
)]
pub struct Cli {
    /// More diagnostics on stderr (repeat for more)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only report errors
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write a configuration fragment for the fonts under a path
    Generate(GenerateArgs),
    /// List family and generic family of every font under the given paths
    Scan(ScanArgs),
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Font file or directory to scan
    #[arg(value_hint = ValueHint::AnyPath)]
    font_path: PathBuf,

    /// Use NAME as the family
    #[arg(short = 'f', long = "family", value_name = "NAME")]
    family: Option<String>,

    /// Generic family for fonts that do not declare one (name or constant value)
    #[arg(short = 'g', long = "generic", value_name = "NAME")]
    generic: Option<GenericFamily>,

    /// Only apply the rules to these languages
    #[arg(short = 'l', long = "lang", value_name = "LANG", value_delimiter = ',')]
    langs: Vec<LanguageTag>,

    /// Write the configuration to FILE instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE", value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Follow symlinks while walking directories
    #[arg(long = "follow-symlinks", action = ArgAction::SetTrue)]
    follow_symlinks: bool,
}

#[derive(Debug, Args)]
struct ScanArgs {
    /// Paths to scan (directories or files); `-` reads paths from STDIN
    #[arg(value_hint = ValueHint::AnyPath, required = true)]
    paths: Vec<PathBuf>,

    /// Follow symlinks while walking directories
    #[arg(long = "follow-symlinks", action = ArgAction::SetTrue)]
    follow_symlinks: bool,

    /// Emit a single JSON array
    #[arg(long = "json", action = ArgAction::SetTrue, conflicts_with = "ndjson")]
    json: bool,

    /// Emit newline-delimited JSON
    #[arg(long = "ndjson", action = ArgAction::SetTrue)]
    ndjson: bool,
}

/// Parse CLI args and execute the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(log_level(cli.verbose, cli.quiet));

    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Scan(args) => run_scan(args),
    }
}

fn log_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn init_logging(level: LevelFilter) {
    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let request = build_request(&args);
    let scanner = FilesystemScanner::new().follow_symlinks(args.follow_symlinks);

    let generation = generate(&request, &scanner)?;
    let sink = match &args.output {
        Some(path) => Sink::File(path.clone()),
        None => Sink::Stdout,
    };
    write_document(&generation.render(), &sink)?;

    if !generation.skipped.is_empty() {
        warn!(
            "{} of {} fonts were skipped",
            generation.skipped.len(),
            generation.fonts_scanned
        );
    }

    Ok(())
}

fn build_request(args: &GenerateArgs) -> GenerationRequest {
    GenerationRequest::new(&args.font_path)
        .with_family(args.family.clone())
        .with_generic_family(args.generic)
        .with_languages(args.langs.iter().cloned().collect::<LanguageSet>())
}

fn run_scan(args: ScanArgs) -> Result<()> {
    let stdin = io::stdin();
    let paths = gather_paths(&args.paths, stdin.lock())?;
    let records = scan_all(
        &paths,
        &FilesystemScanner::new().follow_symlinks(args.follow_symlinks),
    )?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if args.ndjson {
        write_ndjson(&records, &mut handle)?;
    } else if args.json {
        write_json_pretty(&records, &mut handle)?;
    } else {
        write_plain(&records, &mut handle)?;
    }

    Ok(())
}

fn scan_all(paths: &[PathBuf], scanner: &impl FontScanner) -> Result<Vec<FontRecord>> {
    let mut records = Vec::new();
    for path in paths {
        records.extend(scanner.scan(path)?);
    }
    Ok(records)
}

fn gather_paths(raw_paths: &[PathBuf], mut stdin: impl BufRead) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for path in raw_paths {
        if path == Path::new("-") {
            paths.extend(read_paths_from(&mut stdin)?);
        } else {
            paths.push(path.clone());
        }
    }

    if paths.is_empty() {
        return Err(anyhow!("no scan paths provided"));
    }

    Ok(paths)
}

fn read_paths_from(reader: &mut impl BufRead) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            paths.push(PathBuf::from(trimmed));
        }
    }
    Ok(paths)
}
