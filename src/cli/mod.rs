//! CLI argument definitions for Emotion Explorer.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Emotion Explorer - browse the feelings wheel and journal how you feel.
///
/// Start with `emx explore` for an interactive session, or `emx log <id>` to
/// record a feeling directly.
#[derive(Parser, Debug)]
#[command(name = "emx")]
#[command(author, version, about = "Browse the feelings wheel and journal how you feel", long_about = None)]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Journal file to use instead of the configured one.
    /// Can also be set via EMX_JOURNAL environment variable.
    #[arg(long = "journal", global = true, value_name = "PATH")]
    pub journal_path: Option<PathBuf>,

    /// Taxonomy document to load instead of the built-in feelings wheel.
    /// Can also be set via EMX_EMOTIONS environment variable.
    #[arg(long = "emotions", global = true, value_name = "PATH")]
    pub emotions_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the primary emotions
    Primary,

    /// List the direct children of an emotion
    Children {
        /// Emotion ID (e.g., happy)
        id: String,
    },

    /// Show one emotion with its parent and children
    Show {
        /// Emotion ID (e.g., playful)
        id: String,
    },

    /// Log a feeling to the journal
    ///
    /// Give the full path from a primary emotion down to a leaf
    /// (e.g., `emx log happy playful cheeky`), or just the leaf id.
    Log {
        /// Emotion IDs from primary to leaf, or a single leaf ID
        #[arg(required = true)]
        path: Vec<String>,
    },

    /// List journal entries
    Journal {
        /// Only show the most recent N entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Interactive session: browse the wheel and log feelings
    Explore,

    /// Check the emotion taxonomy for inconsistencies
    Doctor,

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show resolved configuration values and where they came from
    Show,

    /// Print the path of config.kdl
    Path,
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
    fn test_parse_log_path() {
        let cli = Cli::parse_from(["emx", "log", "happy", "playful", "cheeky"]);
        match cli.command {
            Some(Commands::Log { path }) => assert_eq!(path, vec!["happy", "playful", "cheeky"]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["emx", "journal", "-n", "3", "-H", "--journal", "/tmp/j.json"]);
        assert!(cli.human_readable);
        assert_eq!(cli.journal_path, Some(PathBuf::from("/tmp/j.json")));
        assert!(matches!(cli.command, Some(Commands::Journal { limit: Some(3) })));
    }

    #[test]
    fn test_log_requires_an_id() {
        assert!(Cli::try_parse_from(["emx", "log"]).is_err());
    }
}
