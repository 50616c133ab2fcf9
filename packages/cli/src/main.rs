//! Command-line front end for the Janggi game client.
//!
//! Every invocation builds a fresh session, so commands that act on a game
//! load it from the server first.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use janggi_client::models::{Coordinate, MoveRequest};
use janggi_client::{
    ApiClient, ClientConfig, ClientStorage, FileClientStorage, GameSessionService,
    HttpGameRepository, HttpPreferencesRepository, PreferencesError, PreferencesService,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser)]
#[command(name = "janggi")]
#[command(about = "Play Janggi against another player through the game server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or set the stored player name and token
    Identity {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        token: Option<String>,
    },

    /// Open a new room and wait for an opponent
    Create {
        /// Room title
        title: String,
    },

    /// Take the blue seat in a waiting game
    Join { game_id: i64 },

    /// Print a game's board and move history
    Show { game_id: i64 },

    /// Resume the stored player's game in progress
    Current,

    /// List games waiting for a second player
    Waiting,

    /// Move a piece: janggi move <game> <from_row> <from_col> <to_row> <to_col>
    Move {
        game_id: i64,
        from_row: i32,
        from_col: i32,
        to_row: i32,
        to_col: i32,
    },

    /// Print the squares a piece could move to
    Hint { game_id: i64, row: i32, col: i32 },

    /// Give up the seat in a game
    Leave { game_id: i64 },

    /// Show the dark mode preference
    DarkMode {
        #[arg(long)]
        toggle: bool,
    },
}

struct App {
    storage: Arc<dyn ClientStorage>,
    session: GameSessionService,
    preferences: PreferencesService,
}

impl App {
    fn new(config: &ClientConfig) -> Result<Self> {
        let storage: Arc<dyn ClientStorage> =
            Arc::new(FileClientStorage::new(config.storage_path.clone()));
        let api = ApiClient::from_config(config, storage.clone())
            .context("Failed to build HTTP client")?;

        let session = GameSessionService::new(
            Arc::new(HttpGameRepository::new(api.clone())),
            storage.clone(),
        );
        let preferences =
            PreferencesService::new(Arc::new(HttpPreferencesRepository::new(api)), storage.clone());

        Ok(Self {
            storage,
            session,
            preferences,
        })
    }

    fn player_name(&self) -> Result<String> {
        match self.session.identity() {
            Some(name) => Ok(name),
            None => bail!("No player name stored. Run `janggi identity --name <name>` first."),
        }
    }

    fn print_game(&self) {
        let Some(game) = self.session.current_game() else {
            println!("No game loaded.");
            return;
        };
        println!("{}", render::game_summary(&game));
        if let Some(board) = self.session.game_board() {
            print!(
                "{}",
                render::board(&board, self.session.selected_piece(), &self.session.valid_moves())
            );
        }
        if let Some(color) = self.session.my_color() {
            let turn = if game.game_status.is_terminal() {
                "game over".normal()
            } else if self.session.is_my_turn() {
                "your turn".green()
            } else {
                let opponent = game.player_name(color.opponent()).unwrap_or("an opponent");
                format!("waiting for {}", opponent).yellow()
            };
            println!("You play {:?}, {}", color, turn);
        }
        if let Some(error) = self.session.error() {
            println!("{}", error.red());
        }
    }

    fn print_history(&self) {
        for entry in self.session.move_history() {
            println!("{}", render::history_line(&entry));
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env().context("Invalid client configuration")?;
    info!(base_url = %config.base_url, "Using game server");
    let app = App::new(&config)?;

    match cli.command {
        Commands::Identity { name, token } => {
            if let Some(name) = name.as_deref() {
                app.storage.set_player_name(Some(name))?;
            }
            if let Some(token) = token.as_deref() {
                app.storage.set_auth_token(Some(token))?;
            }
            let name = app.storage.player_name()?;
            let has_token = app.storage.auth_token()?.is_some();
            println!(
                "Player: {}, token: {}",
                name.as_deref().unwrap_or("(none)"),
                if has_token { "stored" } else { "none" }
            );
        }
        Commands::Create { title } => {
            let player = app.player_name()?;
            app.session.create_game(&player, &title).await?;
            app.print_game();
        }
        Commands::Join { game_id } => {
            let player = app.player_name()?;
            app.session.join_game(game_id, &player).await?;
            app.print_game();
        }
        Commands::Show { game_id } => {
            app.session.load_game(game_id).await?;
            app.print_game();
            app.print_history();
        }
        Commands::Current => {
            app.session.load_current_game().await?;
            app.print_game();
            app.print_history();
        }
        Commands::Waiting => {
            app.session.load_waiting_games().await;
            let games = app.session.waiting_games();
            if games.is_empty() {
                println!("No games are waiting for a player.");
            }
            for game in games {
                println!("{}", render::game_summary(&game));
            }
        }
        Commands::Move {
            game_id,
            from_row,
            from_col,
            to_row,
            to_col,
        } => {
            let player = app.player_name()?;
            app.session.load_game(game_id).await?;
            if !app.session.select_piece(from_row, from_col) {
                bail!("You cannot move the piece at ({}, {}) right now.", from_row, from_col);
            }
            if !app.session.can_move_to(to_row, to_col) {
                bail!("({}, {}) is not a square that piece can move to.", to_row, to_col);
            }
            let request = MoveRequest::new(
                &player,
                Coordinate::new(from_row, from_col),
                Coordinate::new(to_row, to_col),
            );
            app.session.make_move(request).await?;
            app.print_game();
        }
        Commands::Hint { game_id, row, col } => {
            app.session.load_game(game_id).await?;
            if !app.session.select_piece(row, col) {
                bail!("You cannot move the piece at ({}, {}) right now.", row, col);
            }
            app.print_game();
        }
        Commands::Leave { game_id } => {
            let player = app.player_name()?;
            app.session.load_game(game_id).await?;
            app.session.leave_game(&player).await?;
            println!("Left game #{}.", game_id);
        }
        Commands::DarkMode { toggle } => {
            let result = if toggle {
                app.preferences.toggle_dark_mode().await
            } else {
                app.preferences.fetch_dark_mode().await
            };
            match result {
                Ok(dark_mode) => println!("Dark mode: {}", if dark_mode { "on" } else { "off" }),
                Err(PreferencesError::Unauthorized) => {
                    bail!("Not logged in. Store a token with `janggi identity --token <token>`.")
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}
