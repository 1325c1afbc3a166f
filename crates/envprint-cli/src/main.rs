//! envprint CLI - capability fingerprints for recorded host environments
//!
//! This binary runs the graphics and audio probes against host profiles and
//! prints the resulting SHA-256 digests.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use envprint_cli::commands;
use envprint_core::Probe;

/// envprint - Host capability fingerprinting
#[derive(Parser)]
#[command(name = "envprint")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable diagnostic logging on stderr (honours RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect the graphics capability record and print its digest
    Graphics {
        /// Built-in profile name or path to a profile file (.json, .yaml)
        #[arg(short, long)]
        profile: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,

        /// Fail unless the digest equals this value
        #[arg(long)]
        expect: Option<String>,
    },

    /// Collect the audio capability record and print its digest
    Audio {
        /// Built-in profile name or path to a profile file (.json, .yaml)
        #[arg(short, long)]
        profile: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,

        /// Fail unless the digest equals this value
        #[arg(long)]
        expect: Option<String>,
    },

    /// Digest raw text (a file, or stdin when omitted or '-')
    Digest {
        /// Input file
        input: Option<String>,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect host profiles
    Profiles {
        #[command(subcommand)]
        command: ProfilesCommands,
    },
}

#[derive(Subcommand)]
enum ProfilesCommands {
    /// List the built-in profiles
    List {
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a profile as JSON
    Show {
        /// Built-in profile name or path to a profile file
        name: String,
    },
}

fn init_logging(verbose: bool) {
    if verbose {
        let env = env_logger::Env::default().filter_or("RUST_LOG", "info");
        let _ = env_logger::Builder::from_env(env).try_init();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Graphics {
            profile,
            json,
            expect,
        } => commands::probe::run(Probe::Graphics, &profile, json, expect.as_deref()),
        Commands::Audio {
            profile,
            json,
            expect,
        } => commands::probe::run(Probe::Audio, &profile, json, expect.as_deref()),
        Commands::Digest { input, json } => commands::digest::run(input.as_deref(), json),
        Commands::Profiles { command } => match command {
            ProfilesCommands::List { json } => commands::profiles::list(json),
            ProfilesCommands::Show { name } => commands::profiles::show(&name),
        },
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", colored::Colorize::red("Error:"), e);
            ExitCode::from(1)
        }
    }
}
