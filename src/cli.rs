//! Command-line interface for mastermind.

use clap::{Parser, Subcommand};

/// Mastermind - code-breaking game server and client
#[derive(Parser, Debug)]
#[command(name = "mastermind")]
#[command(about = "Mastermind game server with a REST API", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to the database file (created if it doesn't exist)
        #[arg(long)]
        db: Option<String>,
    },

    /// Start a new game on a running server
    New {
        /// Seed for a reproducible secret code
        #[arg(long, allow_negative_numbers = true)]
        seed: Option<i64>,

        #[command(flatten)]
        remote: Remote,
    },

    /// Submit a guess
    Guess {
        /// Game id
        game_id: i32,

        /// Six color names, e.g. red blue green yellow purple orange
        #[arg(required = true, num_args = 1..)]
        colors: Vec<String>,

        #[command(flatten)]
        remote: Remote,
    },

    /// Show a game and its guess history
    Show {
        /// Game id
        game_id: i32,

        #[command(flatten)]
        remote: Remote,
    },

    /// List all games
    List {
        #[command(flatten)]
        remote: Remote,
    },

    /// Delete a game
    Delete {
        /// Game id
        game_id: i32,

        #[command(flatten)]
        remote: Remote,
    },

    /// List the available colors
    Colors {
        #[command(flatten)]
        remote: Remote,
    },
}

/// Where to find the game server.
#[derive(clap::Args, Debug, Clone)]
pub struct Remote {
    /// Game server URL
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    pub server_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_guess() {
        let cli = Cli::parse_from([
            "mastermind", "guess", "3", "red", "blue", "green", "yellow", "purple", "orange",
        ]);
        match cli.command {
            Command::Guess {
                game_id, colors, ..
            } => {
                assert_eq!(game_id, 3);
                assert_eq!(colors.len(), 6);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_negative_seed() {
        let cli = Cli::parse_from(["mastermind", "new", "--seed", "-5"]);
        assert!(matches!(cli.command, Command::New { seed: Some(-5), .. }));
    }

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::parse_from(["mastermind", "serve"]);
        assert!(matches!(
            cli.command,
            Command::Serve {
                config: None,
                host: None,
                port: None,
                db: None
            }
        ));
    }
}
