//! undercroft: generate a connected dungeon layout
//!
//! Prints a short summary followed by a plain-text dump of the object map,
//! or the whole layout as JSON with `--json`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use log::{LevelFilter, error, info};

use uc_core::{ConfigError, Dungeon, GameRng, GenParams, generate};

/// Connected dungeon layout generator
#[derive(Parser, Debug)]
#[command(name = "undercroft")]
#[command(author, version, about = "Generate a connected dungeon layout", long_about = None)]
struct Args {
    /// Grid width in cells
    #[arg(short = 'W', long = "width")]
    width: Option<i32>,

    /// Grid height in cells
    #[arg(short = 'H', long = "height")]
    height: Option<i32>,

    /// Number of rooms to place
    #[arg(short = 'r', long = "rooms")]
    rooms: Option<usize>,

    /// Odds (1 in N) that a corridor turns
    #[arg(long = "dir-change")]
    dir_change: Option<u32>,

    /// Random seed (drawn from entropy when absent)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// JSON parameter file; flags override its values
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Print the layout as JSON instead of a map dump
    #[arg(long = "json")]
    json: bool,

    /// Verbose output (repeat for more)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn params(&self) -> Result<GenParams, ConfigError> {
        let mut params = match &self.config {
            Some(path) => GenParams::load_from_file(path)?,
            None => GenParams::default(),
        };
        if let Some(width) = self.width {
            params.width = width;
        }
        if let Some(height) = self.height {
            params.height = height;
        }
        if let Some(rooms) = self.rooms {
            params.room_count = rooms;
        }
        if let Some(dir_change) = self.dir_change {
            params.path_dir_change = dir_change;
        }
        // A parameter file keeps its own seed
        if let Some(seed) = self.seed {
            params.seed = seed;
        } else if self.config.is_none() {
            params.seed = GameRng::from_entropy().seed();
        }
        Ok(params)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("undercroft: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), ConfigError> {
    let params = args.params()?;
    info!(
        "generating {} rooms on {}x{} with seed {}",
        params.room_count, params.width, params.height, params.seed
    );
    let dungeon = generate(params)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&dungeon)?);
    } else {
        print_summary(&dungeon);
        print!("{}", dungeon.map);
    }
    Ok(())
}

fn print_summary(dungeon: &Dungeon) {
    println!(
        "seed {}: {}x{}, {} rooms, {} corridors, {} doors",
        dungeon.seed,
        dungeon.grid.width(),
        dungeon.grid.height(),
        dungeon.rooms.len(),
        dungeon.corridors.len(),
        dungeon.doors.len()
    );
    println!(
        "player {} in room {}, exit {}",
        dungeon.player, dungeon.player_room, dungeon.exit
    );
}
