use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scenescape")]
#[command(author, version, about = "Media library client and filename interpreter")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interpret the names of local media files
    Parse {
        /// File or directory to classify
        #[arg(required = true)]
        path: PathBuf,

        /// Descend into subdirectories (overrides the config)
        #[arg(long, conflicts_with = "no_recursive")]
        recursive: bool,

        /// Only look at the top level (overrides the config)
        #[arg(long)]
        no_recursive: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start a library scan on the server and follow it to completion
    Scan {
        /// Directory on the server to scan
        #[arg(required = true)]
        path: String,
    },

    /// Show the status of a scan task
    Status {
        #[arg(required = true)]
        task_id: String,
    },

    /// List movies in the library
    Movies {
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        genre: Option<String>,

        #[arg(long)]
        year: Option<u32>,

        #[arg(long)]
        page: Option<u32>,

        #[arg(long)]
        limit: Option<u32>,
    },

    /// List TV shows in the library
    Shows {
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        genre: Option<String>,

        /// Airing status, e.g. "Ended"
        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        page: Option<u32>,

        #[arg(long)]
        limit: Option<u32>,
    },

    /// Show library totals
    Stats,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

/// Resolve `--recursive` / `--no-recursive` into an override of
/// `media.recursive`.
pub fn recursion_override(recursive: bool, no_recursive: bool) -> Option<bool> {
    match (recursive, no_recursive) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommand() {
        let cli = Cli::try_parse_from(["scenescape", "-v", "parse", "/media", "--json"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Parse { json: true, recursive: false, .. }
        ));
    }

    #[test]
    fn test_recursion_flags() {
        let cli = Cli::try_parse_from(["scenescape", "parse", "/media", "--no-recursive"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Parse { recursive: false, no_recursive: true, .. }
        ));

        let both = Cli::try_parse_from([
            "scenescape",
            "parse",
            "/media",
            "--recursive",
            "--no-recursive",
        ]);
        assert!(both.is_err());
    }

    // `None` keeps the config value.
    #[test]
    fn test_recursion_override() {
        assert_eq!(recursion_override(false, false), None);
        assert_eq!(recursion_override(true, false), Some(true));
        assert_eq!(recursion_override(false, true), Some(false));
    }

    #[test]
    fn test_movies_filters() {
        let cli =
            Cli::try_parse_from(["scenescape", "movies", "--search", "alien", "--year", "1979"])
                .unwrap();
        match cli.command {
            Commands::Movies { search, year, .. } => {
                assert_eq!(search.as_deref(), Some("alien"));
                assert_eq!(year, Some(1979));
            }
            _ => panic!("expected movies"),
        }
    }

    #[test]
    fn test_scan_requires_path() {
        assert!(Cli::try_parse_from(["scenescape", "scan"]).is_err());
    }
}
