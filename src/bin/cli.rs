//! archive_tools CLI - sandboxed archive listing and extraction
//!
//! # Examples
//!
//! ```bash
//! # List everything under a working directory
//! archive_tools --workdir /srv/archives list release.tar.gz
//!
//! # Top-level entries only, text files only
//! archive_tools list release.tar.xz --depth 1 --include '\.txt$'
//!
//! # Print the content of specific entries
//! archive_tools extract app.zip README.md LICENSE
//!
//! # Raise the extraction limit
//! archive_tools --max-extract-size 1M extract initrd.cpio etc/os-release
//!
//! # Generate shell completions
//! archive_tools --completions bash > ~/.bash_completion.d/archive_tools
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use archive_tools::{Archiver, CallContext, Error, ExtractArgs, Limits, ListArgs};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "archive_tools",
    about = "Sandboxed archive listing and extraction (cpio, tar.gz, tar.bz2, tar.xz, zip)",
    version,
    after_help = "EXAMPLES:
    archive_tools list release.tar.gz --depth 1
    archive_tools list app.zip --include '\\.rs$' --exclude '^vendor/'
    archive_tools extract app.zip README.md"
)]
struct Cli {
    /// Working directory; archive paths must resolve beneath it
    #[arg(short, long, default_value = ".", global = true)]
    workdir: PathBuf,

    /// Maximum size of an extracted entry (e.g., 100K, 1M)
    #[arg(long, value_parser = parse_size, global = true)]
    max_extract_size: Option<u64>,

    /// Session identifier recorded in log events
    #[arg(long, global = true)]
    session: Option<String>,

    /// Verbose mode - log each call to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Generate shell completions for the specified shell
    #[arg(long, value_enum)]
    completions: Option<Shell>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List the entries of an archive
    List {
        /// Archive path, relative to the working directory
        path: String,

        /// Depth of the directory tree to list (0 = unlimited)
        #[arg(long, default_value_t = 0)]
        depth: usize,

        /// Maximum number of entries to print (0 = default of 100)
        #[arg(long, default_value_t = 0)]
        limit: usize,

        /// Only list entries matching this regular expression
        #[arg(long, value_name = "REGEX")]
        include: Option<String>,

        /// Drop entries matching this regular expression
        #[arg(long, value_name = "REGEX")]
        exclude: Option<String>,
    },
    /// Print the content of named entries
    Extract {
        /// Archive path, relative to the working directory
        path: String,

        /// Exact entry names to extract
        #[arg(required = true)]
        files: Vec<String>,
    },
}

fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim().to_uppercase();
    let (num, multiplier) = if s.ends_with("G") || s.ends_with("GB") {
        let num_str = s.trim_end_matches("GB").trim_end_matches('G');
        (num_str, 1024 * 1024 * 1024)
    } else if s.ends_with("M") || s.ends_with("MB") {
        let num_str = s.trim_end_matches("MB").trim_end_matches('M');
        (num_str, 1024 * 1024)
    } else if s.ends_with("K") || s.ends_with("KB") {
        let num_str = s.trim_end_matches("KB").trim_end_matches('K');
        (num_str, 1024)
    } else {
        (s.as_str(), 1)
    };

    num.parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(multiplier))
        .ok_or_else(|| format!("Invalid size: {}", s))
}

fn init_logging(verbose: bool) {
    let default = if verbose { "archive_tools=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Handle completions generation
    if let Some(shell) = cli.completions {
        generate(shell, &mut Cli::command(), "archive_tools", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    let Some(command) = cli.command else {
        eprintln!("Error: a subcommand is required (list or extract)");
        return ExitCode::FAILURE;
    };

    init_logging(cli.verbose);

    let limits = Limits {
        max_extract_size: cli
            .max_extract_size
            .unwrap_or(Limits::default().max_extract_size),
        ..Limits::default()
    };
    let ctx = CallContext {
        session: cli.session,
    };

    if let Err(e) = run(&cli.workdir, limits, &ctx, command) {
        eprintln!("Error: {}", format_error(&e));
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run(workdir: &Path, limits: Limits, ctx: &CallContext, command: Command) -> Result<(), Error> {
    let archiver = Archiver::new(workdir)?.limits(limits);

    match command {
        Command::List {
            path,
            depth,
            limit,
            include,
            exclude,
        } => {
            let args = ListArgs {
                path,
                depth,
                limit,
                include,
                exclude,
            };
            print_json(&archiver.list_archive_files(ctx, &args)?)
        }
        Command::Extract { path, files } => {
            let args = ExtractArgs { path, files };
            print_json(&archiver.extract_archive_files(ctx, &args)?)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Error> {
    let out = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    println!("{}", out);
    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes >= 1024 * 1024 * 1024 {
        format!("{:.1}G", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    } else if bytes >= 1024 * 1024 {
        format!("{:.1}M", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1}K", bytes as f64 / 1024.0)
    } else {
        format!("{}B", bytes)
    }
}

fn format_error(e: &Error) -> String {
    match e {
        Error::OutsideSandbox { path, .. } => {
            format!("Path '{}' is outside of the working directory", path)
        }
        Error::FileTooLarge { entry, size, limit } => {
            format!(
                "File '{}' too large: {} (limit: {})",
                entry,
                format_bytes(*size),
                format_bytes(*limit)
            )
        }
        Error::UnsupportedFormat { path } => {
            format!(
                "Unsupported archive format: {} (expected .cpio, .tar.gz, .tar.bz2, .tar.xz or .zip)",
                path
            )
        }
        _ => e.to_string(),
    }
}
