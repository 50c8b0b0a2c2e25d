use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::EnvFilter;

use puzzle_demos::app::{run_fifteen, run_hanoi, FifteenSession, HanoiSession};
use puzzle_demos::hanoi::{HanoiState, DEFAULT_DISKS};
use puzzle_demos::puzzle::PuzzleState;
use puzzle_demos::term::TerminalRenderer;

#[derive(Parser)]
#[command(name = "puzzle-demos", version, about = "Fifteen and Tower of Hanoi in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the 15-puzzle.
    Fifteen {
        #[arg(long, env = "PUZZLE_SEED")]
        seed: Option<u64>,
        /// Starting layout, row-major, `_` for the gap.
        #[arg(long)]
        grid: Option<String>,
    },
    /// Play Tower of Hanoi.
    Hanoi {
        #[arg(long, default_value_t = DEFAULT_DISKS)]
        disks: usize,
    },
    /// Print one solvable 15-puzzle layout and exit.
    Shuffle {
        #[arg(long, env = "PUZZLE_SEED")]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Fifteen { seed, grid } => {
            let mut rng = make_rng(seed);
            let state = match grid {
                Some(grid) => grid
                    .parse::<PuzzleState>()
                    .and_then(PuzzleState::require_solvable)
                    .with_context(|| format!("invalid --grid {:?}", grid))?,
                None => PuzzleState::shuffled(&mut rng),
            };
            let mut session = FifteenSession::new(state, rng);
            with_terminal(|term| run_fifteen(term, &mut session))
        }
        Commands::Hanoi { disks } => {
            let state = HanoiState::new(disks)?;
            let mut session = HanoiSession::new(state);
            with_terminal(|term| run_hanoi(term, &mut session))
        }
        Commands::Shuffle { seed } => {
            let state = PuzzleState::shuffled(&mut make_rng(seed));
            print!("{}", state);
            Ok(())
        }
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn with_terminal(run: impl FnOnce(&mut TerminalRenderer) -> Result<()>) -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
