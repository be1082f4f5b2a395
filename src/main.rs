//! Word Cube
//!
//! Builds a letter cube for a goal word and lets you play it from the
//! terminal by typing slice turns. A round is won when enough rows or columns
//! spell the word at once.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use wordcube::surface::format_cube;
use wordcube::{
    AxisPair, Cube, Difficulty, GameParameters, GameSession, Puzzle, SessionEvent, SliceId, WordBank, WordInfo,
};

/// Builds and plays word cubes in the terminal.
#[derive(Parser)]
#[command(name = "wordcube")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    round: RoundArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a cube and print its six sides.
    Show(RoundArgs),
    /// Play a round, reading turns from stdin.
    Play(RoundArgs),
}

#[derive(Args, Clone)]
struct RoundArgs {
    #[arg(short, long, value_enum, default_value_t = Difficulty::Normal)]
    difficulty: Difficulty,

    /// Goal word; its length sets the cube size.
    #[arg(short, long)]
    word: Option<String>,

    /// Seed for letter placement and word choice.
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file with game parameters.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding dict-easy.json, dict-normal.json and dict-hard.json.
    #[arg(long)]
    words: Option<PathBuf>,
}

/// A line of input in play mode.
#[derive(Debug, PartialEq)]
enum PlayCommand {
    Turn { slice: SliceId, degrees: f32 },
    Show,
    Solutions,
    Quit,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "wordcube=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Show(args)) => run_show(&args),
        Some(Command::Play(args)) => run_play(&args),
        None => run_show(&cli.round),
    }
}

/// Builds a session from the command line options.
fn start_session(args: &RoundArgs) -> Result<GameSession> {
    let params = match &args.config {
        Some(path) => GameParameters::load(path)?,
        None => GameParameters::default(),
    };
    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::seed_from_u64(rand::random()),
    };

    let session = match &args.word {
        Some(word) => {
            let info = WordInfo::new(word);
            let mut cube = Cube::new(info.word.chars().count())?;
            let puzzle = Puzzle::new(&mut cube, &info.word, params.density(args.difficulty), &mut rng)?;
            GameSession::new(cube, puzzle, info, params.combo_goal(args.difficulty))
        }
        None => {
            let bank = match &args.words {
                Some(dir) => WordBank::load_dir(dir)
                    .with_context(|| format!("failed to load word lists from {}", dir.display()))?,
                None => WordBank::builtin(),
            };
            GameSession::setup(&params, args.difficulty, &bank, &mut rng)?
        }
    };
    Ok(session)
}

/// Generates a cube and prints it.
fn run_show(args: &RoundArgs) -> Result<()> {
    let session = start_session(args)?;
    println!("Word: {}", session.word().word);
    println!();
    println!("{}", format_cube(session.cube()));
    Ok(())
}

/// Runs the interactive loop until the round is won or input ends.
fn run_play(args: &RoundArgs) -> Result<()> {
    let mut session = start_session(args)?;
    let size = session.cube().size();
    println!(
        "Spell \"{}\" {} times at once. Commands: turn <x|y|z> <layer 0-{}> <degrees>, show, solutions, quit",
        session.word().word,
        session.combo_goal(),
        size - 1
    );
    println!("{}", format_cube(session.cube()));

    session.unpause();
    let mut last_tick = Instant::now();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        let now = Instant::now();
        session.advance(now - last_tick);
        last_tick = now;

        let command = match parse_command(&line, size) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match command {
            PlayCommand::Turn { slice, degrees } => {
                let outcome = session.turn(slice, degrees)?;
                println!("{slice}: {outcome:?}");
                println!("{}", format_cube(session.cube()));
            }
            PlayCommand::Show => println!("{}", format_cube(session.cube())),
            PlayCommand::Solutions => {
                for solution in session.solutions() {
                    println!("{:?} {:?} {:?}", solution.axis(), solution.line(), solution.reading());
                }
                println!("{} of {}", session.combo(), session.combo_goal());
            }
            PlayCommand::Quit => break,
        }

        for event in session.drain_events() {
            match event {
                SessionEvent::ComboChanged { delta, combo } => println!("combo {combo} ({delta:+})"),
                SessionEvent::PuzzleSolved { elapsed, moves, bonus } => {
                    println!(
                        "Solved in {moves} moves and {:.1}s, bonus {bonus}",
                        elapsed.as_secs_f32()
                    );
                }
            }
        }
        if session.is_game_over() {
            break;
        }
        stdout.flush()?;
    }

    Ok(())
}

/// Parses one line of play input. Blank lines yield `None`.
fn parse_command(line: &str, size: usize) -> Result<Option<PlayCommand>> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let command = match parts.as_slice() {
        [] => return Ok(None),
        ["show"] => PlayCommand::Show,
        ["solutions"] => PlayCommand::Solutions,
        ["quit"] | ["q"] => PlayCommand::Quit,
        ["turn", axis, order, degrees] => {
            let pair = match *axis {
                "x" => AxisPair::Col,
                "y" => AxisPair::Row,
                "z" => AxisPair::Depth,
                other => bail!("unknown axis {other:?}, expected x, y or z"),
            };
            let order: usize = order.parse().with_context(|| format!("bad layer {order:?}"))?;
            if order >= size {
                bail!("layer {order} is outside 0-{}", size - 1);
            }
            let degrees: f32 = degrees.parse().with_context(|| format!("bad angle {degrees:?}"))?;
            PlayCommand::Turn {
                slice: SliceId::new(pair, order),
                degrees,
            }
        }
        _ => bail!("unrecognized command {line:?}"),
    };
    Ok(Some(command))
}
