//! CLI argument definitions using clap
//!
//! Commands:
//! - quill seed
//! - quill search <query>
//! - quill live
//! - quill format [FILE]
//! - quill hash-password

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Quill - tools for the Quill blog and its data API
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub api: ApiArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Data API connection. Without a URL, commands that only read fall back to
/// the bundled sample posts.
#[derive(Args, Debug, Clone)]
pub struct ApiArgs {
    /// Data API project URL
    #[arg(long, env = "DATA_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Data API key
    #[arg(long, env = "DATA_API_KEY", global = true, hide_env_values = true, default_value = "")]
    pub api_key: String,

    /// Request timeout in seconds
    #[arg(long, env = "DATA_API_TIMEOUT_SECS", global = true, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Retries for transient failures
    #[arg(long, env = "DATA_API_MAX_RETRIES", global = true, default_value_t = 2)]
    pub max_retries: u32,

    /// Delay before the first retry, in milliseconds
    #[arg(long, env = "DATA_API_RETRY_BACKOFF_MS", global = true, default_value_t = 200)]
    pub retry_backoff_ms: u64,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Insert the bundled sample posts through the data API
    Seed,

    /// Search posts once and print the matches
    Search {
        /// Free-text query
        query: String,
    },

    /// Search as you type: one query revision per stdin line
    Live {
        /// Quiet period before a revision is sent
        #[arg(long, env = "SEARCH_DEBOUNCE_MS", default_value_t = 100)]
        debounce_ms: u64,
    },

    /// Format marked-up text from a file or stdin
    Format {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,

        /// Print plain text instead of HTML
        #[arg(long)]
        plain: bool,
    },

    /// Print an Argon2 hash for ADMIN_PASSWORD_HASH
    HashPassword {
        /// Password to hash (read from stdin when omitted)
        password: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_search_with_global_api_flags() {
        let cli = Cli::try_parse_from([
            "quill",
            "search",
            "quantum",
            "--api-url",
            "https://db.example.test",
            "--max-retries",
            "4",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Search { ref query } if query == "quantum"));
        assert_eq!(cli.api.api_url.as_deref(), Some("https://db.example.test"));
        assert_eq!(cli.api.max_retries, 4);
    }

    #[test]
    fn test_format_defaults_to_stdin_and_html() {
        let cli = Cli::try_parse_from(["quill", "format"]).unwrap();
        match cli.command {
            Command::Format { file, plain } => {
                assert!(file.is_none());
                assert!(!plain);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_search_requires_a_query() {
        assert!(Cli::try_parse_from(["quill", "search"]).is_err());
    }
}
