use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::DEFAULT_PARALLEL;

#[derive(Parser, Debug)]
#[command(name = "comicdl")]
#[command(version, about = "GoComics strip downloader", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the comics the site publishes
    Ls,
    /// Fetch a comic's strips over a date range
    Fetch(FetchArgs),
}

#[derive(clap::Args, Debug)]
pub struct FetchArgs {
    /// Comic identifier, e.g. "calvinandhobbes"
    pub comic: String,

    /// Where to save the strips (defaults to ./<comic>)
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// First date to fetch, YYYY-MM-DD (defaults to the comic's earliest strip)
    #[arg(short = 's', long)]
    pub start_date: Option<String>,

    /// Fetch up to this date, exclusive, YYYY-MM-DD (defaults to today)
    #[arg(short = 'e', long)]
    pub end_date: Option<String>,

    /// How many dates to process at once
    #[arg(long, default_value_t = DEFAULT_PARALLEL)]
    pub max_parallel: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_defaults() {
        let cli = Cli::try_parse_from(["comicdl", "fetch", "calvinandhobbes"]).unwrap();
        let Commands::Fetch(args) = cli.command else {
            panic!("expected fetch");
        };
        assert_eq!(args.comic, "calvinandhobbes");
        assert_eq!(args.max_parallel, DEFAULT_PARALLEL);
        assert!(args.output_dir.is_none());
        assert!(args.start_date.is_none());
        assert!(args.end_date.is_none());
    }

    #[test]
    fn fetch_with_everything_set() {
        let cli = Cli::try_parse_from([
            "comicdl",
            "fetch",
            "crabgrass",
            "-o",
            "strips",
            "-s",
            "2020-01-01",
            "-e",
            "2020-02-01",
            "--max-parallel",
            "8",
        ])
        .unwrap();
        let Commands::Fetch(args) = cli.command else {
            panic!("expected fetch");
        };
        assert_eq!(args.output_dir.as_deref(), Some(std::path::Path::new("strips")));
        assert_eq!(args.start_date.as_deref(), Some("2020-01-01"));
        assert_eq!(args.end_date.as_deref(), Some("2020-02-01"));
        assert_eq!(args.max_parallel, 8);
    }

    #[test]
    fn ls_takes_no_arguments() {
        let cli = Cli::try_parse_from(["comicdl", "ls"]).unwrap();
        assert!(matches!(cli.command, Commands::Ls));
    }
}
