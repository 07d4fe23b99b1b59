//! Mastermind - Unified CLI
//!
//! Runs the game server or talks to a running one.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use mastermind::{
    GameStateResponse, GameStatus, MakeGuessResponse, MastermindClient, ServerConfig,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            db,
        } => run_server(config, host, port, db).await,
        Command::New { seed, remote } => {
            init_tracing("warn");
            let client = MastermindClient::new(remote.server_url);
            let game = client.create_game(seed).await?;
            println!("Started game {} ({})", game.game_id, game.status);
            Ok(())
        }
        Command::Guess {
            game_id,
            colors,
            remote,
        } => {
            init_tracing("warn");
            let client = MastermindClient::new(remote.server_url);
            let result = client.guess(game_id, colors).await?;
            print_guess(&result);
            Ok(())
        }
        Command::Show { game_id, remote } => {
            init_tracing("warn");
            let client = MastermindClient::new(remote.server_url);
            let game = client.get_game(game_id).await?;
            print_game(&game);
            Ok(())
        }
        Command::List { remote } => {
            init_tracing("warn");
            let client = MastermindClient::new(remote.server_url);
            let games = client.list_games().await?;
            if games.is_empty() {
                println!("No games");
            }
            for game in games {
                let secret = game
                    .secret_code
                    .map(|code| format!("  secret: {}", code.join(", ")))
                    .unwrap_or_default();
                println!(
                    "#{:<4} {:<12} {:>2} attempts{}",
                    game.game_id,
                    game.status.to_string(),
                    game.attempts,
                    secret
                );
            }
            Ok(())
        }
        Command::Delete { game_id, remote } => {
            init_tracing("warn");
            let client = MastermindClient::new(remote.server_url);
            client.delete_game(game_id).await?;
            println!("Deleted game {}", game_id);
            Ok(())
        }
        Command::Colors { remote } => {
            init_tracing("warn");
            let client = MastermindClient::new(remote.server_url);
            println!("{}", client.colors().await?.join(", "));
            Ok(())
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over `default_filter`.
fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}

/// Run the HTTP game server
#[instrument(skip_all)]
async fn run_server(
    config_path: Option<std::path::PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    db: Option<String>,
) -> Result<()> {
    let config = match config_path {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    }
    .with_env()?
    .with_overrides(host, port, db);

    init_tracing(config.log_filter());
    info!(?config, "Starting Mastermind server");

    mastermind::run(config).await
}

fn print_guess(result: &MakeGuessResponse) {
    println!(
        "Attempt {}: {}",
        result.attempt_number,
        result.guess.join(", ")
    );
    println!(
        "  exact: {}  position: {}  none: {}",
        result.exact_matches, result.position_matches, result.no_matches
    );
    match result.game_status {
        GameStatus::InProgress => {}
        GameStatus::Won => println!("Solved!"),
        GameStatus::Lost => println!("Out of attempts."),
    }
    if let Some(secret) = &result.secret_code {
        println!("Secret: {}", secret.join(", "));
    }
}

fn print_game(game: &GameStateResponse) {
    println!(
        "Game {} - {} after {} attempts",
        game.game_id, game.status, game.attempts
    );
    for item in &game.guess_history {
        println!(
            "  {:>2}. {:<50} exact {} position {} none {}",
            item.attempt_number,
            item.guess.join(", "),
            item.exact_matches,
            item.position_matches,
            item.no_matches
        );
    }
    if let Some(secret) = &game.secret_code {
        println!("Secret: {}", secret.join(", "));
    }
}
