// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Robomsg CLI
//!
//! Command-line tool for working with robomsg message types.
//!
//! ## Usage
//!
//! ```sh
//! # List registered message types
//! robomsg list
//!
//! # Show the fields of a type
//! robomsg schema sensors/Imu
//!
//! # Validate JSON documents
//! robomsg validate sensors/Imu imu1.json imu2.json
//!
//! # Print a document with defaults filled in
//! robomsg normalize sensors/Imu imu1.json
//! ```

mod cmd;
mod common;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use cmd::{ListCmd, NormalizeCmd, SchemaCmd, ValidateCmd};
use common::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Robomsg - robotics message schema toolkit
///
/// Inspect message schemas and validate message documents against them.
#[derive(Parser, Clone)]
#[command(name = "robomsg")]
#[command(about = "Robotics message schema toolkit", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// Runtime configuration file (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// List registered message types
    List(ListCmd),

    /// Show the field descriptors of a message type
    Schema(SchemaCmd),

    /// Validate JSON documents against a message type
    Validate(ValidateCmd),

    /// Validate a JSON document and print its canonical form
    Normalize(NormalizeCmd),
}

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let ctx = Context::load(cli.config.as_deref())?;

    match cli.command {
        Commands::List(cmd) => cmd.run(&ctx),
        Commands::Schema(cmd) => cmd.run(&ctx),
        Commands::Validate(cmd) => cmd.run(&ctx),
        Commands::Normalize(cmd) => cmd.run(&ctx),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
