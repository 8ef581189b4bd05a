//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - list: print the (filtered) catalog
//! - run: dispatch one tool and print its result
//! - widgets: print the built-in widget registry

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// toolhub - terminal front-end for a catalog of micro tools
#[derive(Parser, Debug)]
#[command(name = "toolhub")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL (overrides config and TOOLHUB_BACKEND_URL)
    #[arg(short, long, global = true)]
    pub backend_url: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List catalog entries matching an optional query
    List {
        /// Case-insensitive filter over name, description and category
        query: Option<String>,
    },

    /// Run one tool from the catalog and print the result
    Run {
        /// Tool slug
        slug: String,

        /// Field value as name=value (repeatable)
        #[arg(short, long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },

    /// List the widgets built into this client
    Widgets,
}

/// Parse a `name=value` field assignment; the value may be empty.
fn parse_field(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected name=value, got '{}'", raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_no_args() {
        // No args should result in None command (TUI mode)
        let cli = Cli::try_parse_from(["toolhub"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
        assert!(cli.backend_url.is_none());
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::try_parse_from(["toolhub", "-v"]).unwrap();
        assert!(cli.is_verbose());
    }

    #[test]
    fn test_cli_config_option() {
        let cli = Cli::try_parse_from(["toolhub", "-c", "/path/to/toolhub.yml"]).unwrap();
        assert_eq!(cli.config.as_ref(), Some(&PathBuf::from("/path/to/toolhub.yml")));
    }

    #[test]
    fn test_cli_backend_url_global() {
        let cli = Cli::try_parse_from(["toolhub", "list", "-b", "http://api:9000"]).unwrap();
        assert_eq!(cli.backend_url.as_deref(), Some("http://api:9000"));
    }

    #[test]
    fn test_list_command() {
        let cli = Cli::try_parse_from(["toolhub", "list"]).unwrap();
        match cli.command {
            Some(Commands::List { query }) => assert!(query.is_none()),
            _ => panic!("Expected list command"),
        }
    }

    #[test]
    fn test_list_with_query() {
        let cli = Cli::try_parse_from(["toolhub", "list", "dev"]).unwrap();
        match cli.command {
            Some(Commands::List { query }) => assert_eq!(query.as_deref(), Some("dev")),
            _ => panic!("Expected list command"),
        }
    }

    #[test]
    fn test_run_command() {
        let cli = Cli::try_parse_from(["toolhub", "run", "uuid"]).unwrap();
        match cli.command {
            Some(Commands::Run { slug, fields }) => {
                assert_eq!(slug, "uuid");
                assert!(fields.is_empty());
            }
            _ => panic!("Expected run command"),
        }
    }

    #[test]
    fn test_run_with_fields() {
        let cli = Cli::try_parse_from([
            "toolhub",
            "run",
            "currency-converter",
            "-f",
            "from=GBP",
            "--field",
            "amount=2.5",
            "-f",
            "to=",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Run { slug, fields }) => {
                assert_eq!(slug, "currency-converter");
                assert_eq!(
                    fields,
                    vec![
                        ("from".to_string(), "GBP".to_string()),
                        ("amount".to_string(), "2.5".to_string()),
                        ("to".to_string(), String::new()),
                    ]
                );
            }
            _ => panic!("Expected run command"),
        }
    }

    #[test]
    fn test_run_rejects_malformed_field() {
        assert!(Cli::try_parse_from(["toolhub", "run", "weather", "-f", "London"]).is_err());
        assert!(Cli::try_parse_from(["toolhub", "run", "weather", "-f", "=London"]).is_err());
    }

    #[test]
    fn test_field_value_may_contain_equals() {
        assert_eq!(
            parse_field("url=https://x.io/?a=b").unwrap(),
            ("url".to_string(), "https://x.io/?a=b".to_string())
        );
    }

    #[test]
    fn test_widgets_command() {
        let cli = Cli::try_parse_from(["toolhub", "widgets"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Widgets)));
    }

    #[test]
    fn test_help_works() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_flag() {
        let result = Cli::try_parse_from(["toolhub", "--version"]);
        // Version flag causes early exit with error (expected)
        assert!(result.is_err());
    }
}
