//! Memory-hierarchy builder CLI.
//!
//! This binary builds a hierarchy from a JSON option file and reports on it. It performs:
//! 1. **Build:** Construct and wire the hierarchy, then print the topology summary (text
//!    or JSON), optionally followed by the full component and connection listing.
//! 2. **Check:** Validate an option file without printing the summary.
//! 3. **Defaults:** Print the default option bundle as JSON, as a starting point for edits.
//!
//! Log output goes to stderr and is controlled by `RUST_LOG` (e.g. `RUST_LOG=memsys_core=debug`).

use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use memsys_core::{System, TopologyOptions, TopologyStats};

#[derive(Parser, Debug)]
#[command(
    name = "memsys",
    author,
    version,
    about = "Cache hierarchy builder for cycle-level CPU simulators",
    long_about = "Build a memory hierarchy from a JSON option file and print its topology.\n\nExamples:\n  memsys build -o configs/quad_l3.json\n  memsys build -o configs/quad_l3.json --json\n  memsys check -o configs/external.json\n  memsys defaults > my_options.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the hierarchy and print its topology summary.
    Build {
        /// JSON option file.
        #[arg(short, long)]
        options: PathBuf,

        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,

        /// Also list every component and connection.
        #[arg(long)]
        graph: bool,
    },

    /// Validate an option file by building it; prints only the outcome.
    Check {
        /// JSON option file.
        #[arg(short, long)]
        options: PathBuf,
    },

    /// Print the default option bundle as JSON.
    Defaults,
}

/// JSON report of a build.
#[derive(Serialize)]
struct Report<'a> {
    options: &'a TopologyOptions,
    stats: TopologyStats,
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Build {
            options,
            json,
            graph,
        } => cmd_build(&options, json, graph),
        Commands::Check { options } => cmd_check(&options),
        Commands::Defaults => print_json(&TopologyOptions::default()),
    }
}

/// Builds the hierarchy described by `path` and prints the summary.
///
/// # Arguments
///
/// * `path` - JSON option file.
/// * `json` - Print a JSON report instead of the text summary.
/// * `graph` - Append the component and connection listing (text mode only).
fn cmd_build(path: &Path, json: bool, graph: bool) {
    let options = load_options(path);
    let system = build_or_exit(&options);
    let stats = system.stats();

    if json {
        print_json(&Report {
            options: &options,
            stats,
        });
    } else {
        println!("{stats}");
        if graph {
            println!();
            print!("{}", system.graph());
        }
    }
}

fn cmd_check(path: &Path) {
    let options = load_options(path);
    let system = build_or_exit(&options);
    println!(
        "[*] {}: {:?} hierarchy, {} cores, {} components, {} connections",
        path.display(),
        system.shape(),
        system.num_cores(),
        system.graph().len(),
        system.graph().connections().len()
    );
}

/// Reads and parses an option file; exits with code 1 on failure.
fn load_options(path: &Path) -> TopologyOptions {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading options {}: {e}", path.display());
        process::exit(1);
    });
    TopologyOptions::from_json(&text).unwrap_or_else(|e| {
        eprintln!("Error parsing options {}: {e}", path.display());
        process::exit(1);
    })
}

/// Builds `options`; on error prints it and exits with code 1.
fn build_or_exit(options: &TopologyOptions) -> System {
    match System::build(options) {
        Ok(system) => {
            info!(shape = ?system.shape(), "build complete");
            system
        }
        Err(e) => {
            if e.is_defect() {
                eprintln!("[!] internal error: {e}");
            } else {
                eprintln!("[!] invalid configuration: {e}");
            }
            process::exit(1);
        }
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Error serializing output: {e}");
            process::exit(1);
        }
    }
}
