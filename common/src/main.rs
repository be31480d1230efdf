use clap::Parser;
use minesweeper_ai::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::thread;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "minesweeper-ai")]
#[command(about = "Plays minesweeper by logical inference, guessing only when stuck")]
#[command(version)]
struct Cli {
    /// Number of rows on the board
    #[arg(long, default_value = "8")]
    height: usize,

    /// Number of columns on the board
    #[arg(long, default_value = "8")]
    width: usize,

    /// Number of mines to place
    #[arg(long, default_value = "8")]
    mines: usize,

    /// Seed for mine placement and guesses (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Pause between moves in milliseconds
    #[arg(long, default_value = "0")]
    delay_ms: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let board = Minesweeper::new(cli.height, cli.width, cli.mines, &mut rng)?;
    let mut game = Autoplay::new(board);

    println!("--- Knowledge-Based Minesweeper Player ---");
    println!("Board: {}x{} with {} mines", cli.height, cli.width, cli.mines);
    println!("Strategy: make moves proven safe, guess randomly otherwise.");

    let mut move_count = 0;
    while let Some(turn) = game.step(&mut rng)? {
        move_count += 1;
        match turn.kind {
            MoveKind::Safe => println!("Move #{move_count}: safe move {}", turn.cell),
            MoveKind::Random => {
                println!("Move #{move_count}: no known safe move, guessing {}", turn.cell)
            }
        }

        let ai = game.ai();
        println!(
            "  known mines: {}, known safes: {}, sentences: {}",
            ai.mines().len(),
            ai.safes().len(),
            ai.knowledge().len()
        );

        if cli.delay_ms > 0 {
            thread::sleep(Duration::from_millis(cli.delay_ms));
        }
    }

    println!("\n--- Game Over ---");
    match game.state() {
        GameState::Won => println!("Result: the AI won after {move_count} moves."),
        GameState::Lost => println!("Result: the AI hit a mine and lost."),
        GameState::Playing => println!("Result: no moves left to make."),
    }

    Ok(())
}
