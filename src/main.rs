//! Tic-tac-toe client - unified CLI
//!
//! One-shot commands for each server operation plus a terminal UI.

#![warn(missing_docs)]

mod cli;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use tictactoe_client::{ClientConfig, GameApi, GameClient, MoveOutcome};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = ClientConfig::load(&cli.config)?;
    if let Some(url) = cli.server_url {
        config = config.with_server_url(url);
    }

    match cli.command {
        Command::Tui => tui::run_tui(config),
        command => {
            initialize_cli_tracing();
            run_command(&config, command)
        }
    }
}

/// Runs one client operation and prints its result.
///
/// `Command::Tui` never reaches here; `main` starts the terminal UI itself.
#[instrument(skip(config), fields(server_url = %config.server_url()))]
fn run_command(config: &ClientConfig, command: Command) -> Result<()> {
    let client = GameClient::new(config)?
        .with_status_sink(|message: &str| eprintln!("{}", message));

    match command {
        Command::CreatePlayer { name } => {
            println!("{}", client.create_player(&name)?);
        }
        Command::CreateRoom { player_id } => {
            println!("{}", client.create_room(&player_id)?);
        }
        Command::AddPlayer { room_id, player_id } => {
            println!("{}", client.add_player(&room_id, &player_id)?);
        }
        Command::Players { room_id } => {
            let players = client.get_players(&room_id)?;
            for player in &players {
                println!("{}\t{}\t{}", player.player_id(), player.name(), player.symbol());
            }
            if players.len() != 2 {
                info!(count = players.len(), "Room is not ready to play");
            }
        }
        Command::Play {
            room_id,
            player_id,
            row,
            col,
        } => {
            let board = client.make_play(&room_id, &player_id, row, col)?;
            print!("{}", board);
        }
        Command::Result { room_id } => match client.decide_result(&room_id)? {
            MoveOutcome::Continue => println!("continue"),
            MoveOutcome::Draw => println!("draw"),
            MoveOutcome::Winner(id) => println!("winner {}", id),
        },
        Command::Tui => unreachable!("the terminal UI is started from main"),
    }

    Ok(())
}

fn initialize_cli_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,tictactoe_client=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
