//! Command-line argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use lullaby_core::Format;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Lullaby - turn a diary entry into a bedtime story or poem
#[derive(Parser, Debug)]
#[command(name = "lullaby")]
#[command(about = "Turn a diary entry into a bedtime story or poem", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// TOML configuration file
        #[arg(short, long, env = "LULLABY_CONFIG")]
        config: Option<PathBuf>,

        /// Address to listen on, overriding the configuration
        #[arg(short, long)]
        bind: Option<SocketAddr>,
    },

    /// Run one pipeline from the terminal and print the result
    Generate {
        /// Diary entry text
        #[arg(short, long)]
        diary: String,

        /// Mood the result should convey
        #[arg(short, long)]
        mood: String,

        /// Main character
        #[arg(short = 'C', long)]
        character: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = FormatArg::Story)]
        format: FormatArg,

        /// Also print the analysis and draft
        #[arg(long)]
        show_stages: bool,

        /// TOML configuration file
        #[arg(short, long, env = "LULLABY_CONFIG")]
        config: Option<PathBuf>,
    },
}

/// Output format accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Bedtime story
    Story,
    /// Short poem
    Poem,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Story => Format::Story,
            FormatArg::Poem => Format::Poem,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_with_bind() {
        let cli = Cli::try_parse_from(["lullaby", "serve", "--bind", "127.0.0.1:9000", "--json-logs"])
            .expect("serve should parse");

        assert!(cli.json_logs);
        match cli.command {
            Commands::Serve { bind, .. } => {
                assert_eq!(bind, Some("127.0.0.1:9000".parse().unwrap()));
            }
            other => panic!("Expected serve, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_generate_defaults_to_story() {
        let cli = Cli::try_parse_from([
            "lullaby",
            "generate",
            "--diary",
            "오늘은 비가 왔다",
            "--mood",
            "잔잔한",
            "--character",
            "토끼",
        ])
        .expect("generate should parse");

        match cli.command {
            Commands::Generate {
                diary,
                format,
                show_stages,
                ..
            } => {
                assert_eq!(diary, "오늘은 비가 왔다");
                assert_eq!(Format::from(format), Format::Story);
                assert!(!show_stages);
            }
            other => panic!("Expected generate, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_generate_poem() {
        let cli = Cli::try_parse_from([
            "lullaby", "generate", "-d", "Snow.", "-m", "calm", "-C", "Cat", "-f", "poem",
            "--show-stages",
        ])
        .expect("generate should parse");

        match cli.command {
            Commands::Generate {
                format, show_stages, ..
            } => {
                assert_eq!(Format::from(format), Format::Poem);
                assert!(show_stages);
            }
            other => panic!("Expected generate, got {other:?}"),
        }
    }

    #[test]
    fn test_generate_requires_character() {
        assert!(
            Cli::try_parse_from(["lullaby", "generate", "--diary", "x", "--mood", "y"]).is_err()
        );
    }
}
