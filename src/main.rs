#![allow(non_snake_case)]
use clap::AppSettings::DeriveDisplayOrder;
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;

pub mod database;
pub mod profile;
pub mod repeats;
pub mod suspects;
pub mod utils;

// The arguments end up in the Cli struct
#[derive(Parser, Debug)]
#[structopt(global_settings=&[DeriveDisplayOrder])]
#[clap(author, version, about="Tool to match suspects to a DNA sequence by their STR fingerprint", long_about = None)]
pub struct Cli {
    /// DNA sequence to profile (plain text or fasta, optionally gzipped)
    #[clap(validator=is_file)]
    sequence: String,

    /// CSV database with one STR fingerprint per suspect
    #[clap(validator=is_file)]
    database: String,

    /// Number of parallel threads to use
    #[clap(short, long, value_parser, default_value_t = 1)]
    threads: usize,

    /// Sort output by suspect name
    #[clap(long, value_parser, default_value_t = false)]
    sorted: bool,

    /// Print the observed longest run of every database motif
    #[clap(long, value_parser, default_value_t = false)]
    profile: bool,

    /// Only print suspects matching the sequence
    #[clap(long, value_parser, default_value_t = false)]
    guilty_only: bool,

    /// Convert the sequence to uppercase (for soft-masked input)
    #[clap(long, value_parser, default_value_t = false)]
    uppercase: bool,

    /// Use a plain text sequence file as is, without joining lines
    #[clap(long, value_parser, default_value_t = false)]
    verbatim: bool,
}

fn is_file(pathname: &str) -> Result<(), String> {
    let path = PathBuf::from(pathname);
    if path.is_file() {
        Ok(())
    } else {
        Err(format!("Input file {} is invalid", path.display()))
    }
}

fn main() {
    env_logger::init();
    let args = Cli::parse();
    info!("Collected arguments");
    if let Err(err) = profile::profile_suspects(&args) {
        error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
#[ctor::ctor]
fn init() {
    env_logger::init();
}

#[test]
fn verify_app() {
    use clap::CommandFactory;
    Cli::command().debug_assert()
}
