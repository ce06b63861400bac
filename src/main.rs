//! CLI entry point for pathlist

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use pathlist::{DEFAULT_OUTPUT_FILE, ListConfig, write_file_list};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pathlist")]
#[command(about = "Write the relative path of every file under a directory to a text file")]
#[command(version)]
struct Args {
    /// Directory to list
    #[arg(default_value = ".")]
    root: PathBuf,

    /// File to write the paths to (relative to the current directory)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Sort entries by name within each directory
    #[arg(short, long)]
    sorted: bool,

    /// Log progress and skipped entries to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = ListConfig::new(args.root)
        .with_output(args.output)
        .with_sorted(args.sorted);

    if let Err(e) = write_file_list(&config) {
        eprintln!("pathlist: {}", e);
        process::exit(1);
    }
}
