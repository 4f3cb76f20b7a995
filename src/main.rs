//! Kriegspiel referee CLI.
//!
//! Each command loads a saved game, acts on it and writes it back, so a
//! game can be played one question at a time from the shell.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kriegspiel_referee::models::DEFAULT_REVERSIBLE_MOVE_LIMIT;
use kriegspiel_referee::persistence::{GameDocument, load_game, save_game};
use kriegspiel_referee::{Question, Referee, RefereeConfig};
use shakmaty::{Color, KnownOutcome};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kriegspiel")]
#[command(about = "Referee for Berkeley Kriegspiel games stored as JSON")]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start a new game and save it
    New {
        file: PathBuf,

        /// Play without the any-rule
        #[arg(long)]
        no_any_rule: bool,

        /// Start from this position instead of the initial one
        #[arg(long)]
        fen: Option<String>,

        /// Half-move clock value at which the game is drawn
        #[arg(long, default_value_t = DEFAULT_REVERSIBLE_MOVE_LIMIT)]
        reversible_move_limit: u32,
    },
    /// Ask the referee a question for the side to move: `any` or a move like e2e4
    Ask { file: PathBuf, question: String },
    /// Print the state of a saved game
    Show {
        file: PathBuf,

        /// List every question the side to move may ask
        #[arg(long)]
        possible: bool,
    },
    /// Print the JSON schema of saved games
    Schema,
}

fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "white",
        Color::Black => "black",
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match args.command {
        Command::New {
            file,
            no_any_rule,
            fen,
            reversible_move_limit,
        } => {
            let config = RefereeConfig::default()
                .with_any_rule(!no_any_rule)
                .with_reversible_move_limit(reversible_move_limit);
            let referee = match fen {
                Some(fen) => Referee::from_fen(&fen, config)?,
                None => Referee::new(config),
            };
            save_game(&referee, &file).with_context(|| format!("saving {}", file.display()))?;
            info!(path = %file.display(), "new game created");
            println!("{} to move", color_name(referee.turn()));
        }
        Command::Ask { file, question } => {
            let mut referee = load_game(&file).with_context(|| format!("loading {}", file.display()))?;
            let question: Question = question
                .parse()
                .with_context(|| format!("`{question}` is neither `any` nor a move"))?;
            let answer = referee.ask_for(question);
            println!("{answer}");
            save_game(&referee, &file).with_context(|| format!("saving {}", file.display()))?;
        }
        Command::Show { file, possible } => {
            let referee = load_game(&file).with_context(|| format!("loading {}", file.display()))?;
            println!("fen: {}", referee.board_fen());
            println!("any-rule: {}", referee.any_rule());
            if referee.is_game_over() {
                let result = referee.result().map_or("finished", |r| r.kind().as_str());
                let outcome = match referee.outcome() {
                    Some(KnownOutcome::Decisive { winner }) => format!("{} wins", color_name(winner)),
                    Some(KnownOutcome::Draw) => "draw".to_string(),
                    None => "unknown".to_string(),
                };
                println!("game over: {result} ({outcome})");
            } else {
                println!("to move: {}", color_name(referee.turn()));
                println!("must use pawns: {}", referee.must_use_pawns());
            }
            if possible {
                let questions: Vec<String> = referee.possible_to_ask().iter().map(Question::to_string).collect();
                println!("possible ({}): {}", questions.len(), questions.join(" "));
            }
        }
        Command::Schema => {
            let schema = schemars::schema_for!(GameDocument);
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }

    Ok(())
}
