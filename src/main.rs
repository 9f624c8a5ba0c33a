//! CLI entry point for extmods

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use extmods::subset::DEFAULT_DIRECTORY_NAME;
use extmods::tree::DEFAULT_SOURCE_PATTERN;
use extmods::{
    OutputConfig, ReportFormatter, SubsetConfig, WalkerConfig, generate_subset, print_json,
    scan_external_modules,
};
use tracing_subscriber::EnvFilter;

/// Scan root used when `--root` is not given, relative to the project directory
const DEFAULT_SCAN_ROOT: &str = "backend/src";

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "extmods")]
#[command(about = "List the external modules a TypeScript source tree imports")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    scan: ScanArgs,

    /// Log filter used when RUST_LOG is not set (e.g. "debug", "extmods=trace")
    #[arg(long = "log-level", global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan the source tree and report external modules (default)
    Scan(ScanArgs),
    /// Write a package.json with only the backend run-time dependencies and install it
    Subset(SubsetArgs),
}

#[derive(Args, Debug)]
struct ScanArgs {
    /// Project directory the default scan root is resolved against
    #[arg(long = "project", default_value = ".")]
    project: PathBuf,

    /// Directory to scan (default: <project>/backend/src)
    #[arg(long = "root")]
    root: Option<PathBuf>,

    /// Only read files whose name matches this glob
    #[arg(long = "pattern", default_value = DEFAULT_SOURCE_PATTERN)]
    pattern: String,

    /// Skip files and directories matching pattern (can be used multiple times)
    #[arg(short = 'I', long = "ignore")]
    ignore: Vec<String>,

    /// Number of parallel workers (0 = auto-detect, N = use N workers)
    #[arg(short = 'j', long = "jobs", default_value = "0")]
    jobs: usize,

    /// Skip source files larger than SIZE. Use suffixes: K, M, G (e.g., 5M for 5MB)
    #[arg(long = "max-file-size", value_name = "SIZE")]
    max_file_size: Option<String>,

    /// Print the aggregated entries as JSON
    #[arg(long = "json")]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,
}

#[derive(Args, Debug)]
struct SubsetArgs {
    /// Project directory holding package.json and package-lock.json
    #[arg(long = "project", default_value = ".")]
    project: PathBuf,

    /// Name of the directory created inside the project
    #[arg(long = "dir-name", env = "DIRECTORY_NAME", default_value = DEFAULT_DIRECTORY_NAME)]
    dir_name: String,

    /// Installer command run inside the new directory
    #[arg(long = "installer", default_value = "npm i")]
    installer: String,
}

/// Parse a file size string like "5M", "100K", "1G" into bytes.
/// Supports suffixes: K/KB (1024), M/MB (1024^2), G/GB (1024^3)
/// Without suffix, interprets as bytes.
fn parse_file_size(s: &str) -> Result<u64, String> {
    let s = s.trim().to_uppercase();
    let (num_str, multiplier) = if let Some(n) = s.strip_suffix("GB") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('G') {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("MB") {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('M') {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("KB") {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('K') {
        (n, 1024)
    } else {
        (s.as_str(), 1)
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", num_str))?;

    num.checked_mul(multiplier)
        .ok_or_else(|| format!("size too large: {}", s))
}

fn init_logging(level: &str) {
    // Logs go to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();
}

fn main() {
    let Cli {
        command,
        scan,
        log_level,
    } = Cli::parse();
    init_logging(&log_level);

    match command.unwrap_or(Command::Scan(scan)) {
        Command::Scan(args) => run_scan(args),
        Command::Subset(args) => run_subset(args),
    }
}

fn run_scan(args: ScanArgs) {
    let max_file_size = args.max_file_size.as_ref().map(|size_str| {
        parse_file_size(size_str).unwrap_or_else(|e| {
            eprintln!("extmods: invalid --max-file-size '{}': {}", size_str, e);
            process::exit(1);
        })
    });

    let walker_config = WalkerConfig {
        source_pattern: args.pattern.clone(),
        ignore_patterns: args.ignore.clone(),
        parallel_workers: args.jobs,
        max_file_size,
    };

    let root = args
        .root
        .clone()
        .unwrap_or_else(|| args.project.join(DEFAULT_SCAN_ROOT));

    let entries = match scan_external_modules(&root, walker_config) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("extmods: {}", e);
            process::exit(1);
        }
    };

    let result = if args.json {
        print_json(&entries)
    } else {
        ReportFormatter::new(OutputConfig {
            use_color: should_use_color(args.color),
        })
        .print(&entries)
    };

    if let Err(e) = result {
        eprintln!("extmods: error writing output: {}", e);
        process::exit(1);
    }
}

fn run_subset(args: SubsetArgs) {
    let config = SubsetConfig {
        project_dir: args.project,
        directory_name: args.dir_name,
        installer: args
            .installer
            .split_whitespace()
            .map(str::to_string)
            .collect(),
    };

    if let Err(e) = generate_subset(&config) {
        eprintln!("extmods: {}", e);
        process::exit(e.exit_code());
    }
}
