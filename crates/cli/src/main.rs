//! `cfgkv`: inspect and edit CfgKV configuration files from the shell.
//!
//! ```text
//! cfgkv get settings.cfg screen_width
//! cfgkv get settings.cfg FOV --as float
//! cfgkv set settings.cfg title "Main Menu"
//! cfgkv dump settings.cfg
//! ```
//!
//! Set `RUST_LOG=debug` (or pass `-v`) to see skipped lines and rewrites.

mod commands;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use cfgfile::{Dialect, LoadOptions};
use clap::{Parser, Subcommand};
use hashindex::MIN_CAPACITY;

use crate::commands::Kind;

#[derive(Parser, Debug)]
#[command(name = "cfgkv", version)]
#[command(about = "Inspect and edit key/value configuration files")]
struct Args {
    /// Only accept numbers and quoted strings as values
    #[arg(long, global = true)]
    strict: bool,

    /// Minimum number of index slots to allocate
    #[arg(long, global = true, default_value_t = MIN_CAPACITY)]
    min_capacity: usize,

    /// Log at debug level regardless of RUST_LOG
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the value stored under a key
    Get {
        file: PathBuf,
        key: String,
        /// Require the value to have this type
        #[arg(long = "as", value_enum, default_value_t = Kind::Auto)]
        kind: Kind,
    },
    /// Set a key and rewrite the file in sorted order
    Set {
        file: PathBuf,
        key: String,
        value: String,
    },
    /// List every entry, sorted by key
    Dump { file: PathBuf },
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn run(args: Args) -> Result<String> {
    let options = LoadOptions {
        dialect: if args.strict {
            Dialect::Strict
        } else {
            Dialect::Permissive
        },
        min_capacity: args.min_capacity,
    };

    match args.command {
        Command::Get { file, key, kind } => commands::get(&file, &key, kind, &options),
        Command::Set { file, key, value } => commands::set(&file, &key, &value),
        Command::Dump { file } => commands::dump(&file, &options),
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(out) => {
            if !out.is_empty() {
                println!("{}", out);
            }
        }
        Err(e) => {
            eprintln!("cfgkv: {:#}", e);
            process::exit(1);
        }
    }
}
