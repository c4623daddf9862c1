//! Headless Ludo simulator.
//!
//! Plays a seeded match with a random token picker and prints the log feed.
//!
//! Usage: cargo run --bin ludo_sim -- --seed 7 --turns 40 --name Ada --name Bo

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ludo_engine::core::{GameRng, SessionConfig, WinRule};
use ludo_engine::rules::{legal_tokens, Dice};
use ludo_engine::session::{Clock, LudoGame, ManualClock, SessionStatus};

/// Simulate a Ludo match
#[derive(Parser, Debug)]
#[command(name = "ludo_sim")]
#[command(about = "Play a seeded Ludo match with random token choices", long_about = None)]
struct Args {
    /// Session config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many seat advances
    #[arg(long, default_value_t = 100)]
    turns: u32,

    /// Seat names in RED, GREEN, YELLOW, BLUE order (up to four)
    #[arg(long = "name")]
    names: Vec<String>,

    /// Pass over seats nobody has joined
    #[arg(long)]
    skip_unattended: bool,

    /// End the match when a seat brings all four tokens home
    #[arg(long)]
    win: bool,
}

fn load_config(args: &Args) -> Result<SessionConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => SessionConfig::from_toml_str(&std::fs::read_to_string(path)?)?,
        None => SessionConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if args.skip_unattended {
        config = config.skipping_unattended_seats(true);
    }
    if args.win {
        config = config.with_win_rule(WinRule::AllTokensHome);
    }
    config.validate()?;
    Ok(config)
}

fn seat_names(names: &[String]) -> Result<[Option<String>; 4], Box<dyn Error>> {
    if names.len() > 4 {
        return Err(format!("at most 4 names, got {}", names.len()).into());
    }
    Ok(std::array::from_fn(|i| names.get(i).cloned()))
}

fn run<D: Dice, C: Clock>(
    game: &mut LudoGame<D, C>,
    clock: &ManualClock,
    picker: &mut GameRng,
    turns: u32,
) -> Result<(), Box<dyn Error>> {
    while game.session().turn < turns {
        let session = game.session();
        let status = session.status;
        let seat = session.current;
        let legal = legal_tokens(session.active_player(), session.dice_value);

        if status == SessionStatus::Finished {
            break;
        }

        if let Some(deadline) = game.next_deadline() {
            clock.set(deadline);
            game.poll();
        } else if status == SessionStatus::Rolling {
            game.roll(seat)?;
        } else {
            let token = *picker.choose(&legal).ok_or("no legal token while moving")?;
            game.select_token(token)?;
        }

        for line in game.last_events().iter().filter_map(|e| e.log_line(game.session())) {
            println!("{line}");
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let names = seat_names(&args.names)?;
    info!(seed = config.seed, turns = args.turns, "starting simulation");

    let clock = ManualClock::new();
    let dice = GameRng::new(config.seed).for_context("dice");
    let mut picker = GameRng::new(config.seed).for_context("picker");
    let mut game = LudoGame::with_dice_and_clock(config, names, dice, clock.clone());

    println!("{}", ludo_engine::session::WELCOME_LINE);
    run(&mut game, &clock, &mut picker, args.turns)?;

    let session = game.session();
    for player in session.players.values() {
        println!("{:<8} {:<12} finished {}", player.color.name(), player.name, player.finished_count());
    }
    match session.winner {
        Some(seat) => println!("winner: {seat}"),
        None => println!("no winner after {} turns", session.turn),
    }
    Ok(())
}
