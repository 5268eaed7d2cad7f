//! CLI argument parsing for blogsearch

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bs")]
#[command(author, version, about = "Search a static blog's post index by #tag and title keyword", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to search-index.json (overrides config)
    #[arg(short, long, global = true)]
    pub index: Option<PathBuf>,

    /// URL of a published search-index.json (overrides config and --index)
    #[arg(short, long, global = true)]
    pub url: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search posts; `#word` filters by tag, other words match the title
    Search {
        /// Query tokens, joined with spaces
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        query: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Show at most this many posts
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show how a query is split into tags and keywords
    Parse {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        query: Vec<String>,
    },

    /// Mark keyword occurrences in a piece of text
    Highlight {
        /// Text to mark
        #[arg(required = true)]
        text: String,

        /// Keywords to mark
        keywords: Vec<String>,
    },

    /// Show index statistics
    Stats,
}

/// Output format for search results
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_collects_query_tokens() {
        let cli = Cli::parse_from(["bs", "search", "#rust", "async"]);
        match cli.command {
            Command::Search { query, format, limit } => {
                assert_eq!(query, vec!["#rust", "async"]);
                assert_eq!(format, OutputFormat::Text);
                assert!(limit.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_search_options_before_query() {
        let cli = Cli::parse_from(["bs", "--index", "site/search-index.json", "search", "-f", "json", "-l", "3", "go"]);
        assert_eq!(cli.index, Some(PathBuf::from("site/search-index.json")));
        match cli.command {
            Command::Search { query, format, limit } => {
                assert_eq!(query, vec!["go"]);
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(limit, Some(3));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("plain".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("table".parse::<OutputFormat>().is_err());
    }
}
