//! Arrow Log Hit entry point
//!
//! Terminal front-end: interactive play, a seeded autoplay demo, and a few
//! storefront inspection commands.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use arrow_log_hit::Session;
use arrow_log_hit::audio::{AudioManager, NullSink, TerminalSink};
use arrow_log_hit::consts::SIM_DT_MS;
use arrow_log_hit::highscores::HighScore;
use arrow_log_hit::persistence::{FileStorage, MemoryStorage, Storage};
use arrow_log_hit::shop::{CatalogSource, JsonCatalog, parse_product_id};
use arrow_log_hit::sim::{FireOutcome, GameState};

#[derive(Parser)]
#[command(name = "arrow-log-hit", about = "Arrow Log Hit mini-game and storefront tools")]
struct Cli {
    /// Directory for settings and the high score
    #[arg(long, global = true, default_value = ".arrow-log-hit")]
    data_dir: PathBuf,

    /// Keep everything in memory (nothing is saved)
    #[arg(long, global = true)]
    no_save: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play in the terminal: Enter fires, `r` resets, `q` quits
    Play {
        /// Seed for pre-placed arrows (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Let the computer throw at random moments
    Demo {
        /// Seed for the run and the tap timing
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Number of throws to attempt
        #[arg(long, default_value_t = 50)]
        shots: u32,
    },

    /// Print the saved high score
    HighScore,

    /// Inspect a product listing document
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
}

#[derive(Subcommand)]
enum CatalogCommands {
    /// List featured products
    List {
        /// Listing JSON (dummyjson `/products` shape)
        #[arg(long)]
        file: PathBuf,
    },

    /// Show one product
    Show {
        #[arg(long)]
        file: PathBuf,

        /// Product id
        #[arg(long)]
        id: String,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { seed } => {
            let session = Session::start(
                seed.unwrap_or_else(rand::random),
                open_storage(&cli.data_dir, cli.no_save),
                AudioManager::new(Box::new(TerminalSink)),
            );
            play(session)
        }
        Commands::Demo { seed, shots } => {
            let session = Session::start(
                seed,
                open_storage(&cli.data_dir, cli.no_save),
                AudioManager::new(Box::new(NullSink)),
            );
            demo(session, seed, shots);
            Ok(())
        }
        Commands::HighScore => {
            let storage = open_storage(&cli.data_dir, cli.no_save);
            let record = HighScore::load(storage.as_ref());
            println!("High score: {}", record.score);
            Ok(())
        }
        Commands::Catalog { command } => catalog(command),
    }
}

fn open_storage(dir: &Path, no_save: bool) -> Box<dyn Storage> {
    if no_save {
        Box::new(MemoryStorage::new())
    } else {
        Box::new(FileStorage::new(dir))
    }
}

fn play(mut session: Session) -> Result<()> {
    let stdin = io::stdin();
    let mut last = Instant::now();
    print_board(&session).context("writing board")?;

    for line in stdin.lock().lines() {
        let line = line.context("reading input")?;
        let now = Instant::now();
        session.tick(now.duration_since(last).as_secs_f32() * 1000.0);
        last = now;

        match line.trim() {
            "q" | "quit" => break,
            "r" | "reset" => {
                session.reset();
                println!("-- new game --");
            }
            _ => match session.tap() {
                FireOutcome::Ignored => println!("Game over. Type `r` to restart."),
                FireOutcome::Stuck { angle } => {
                    if session.settings().show_angles {
                        println!("Thunk! ({angle:.1} deg)");
                    } else {
                        println!("Thunk!");
                    }
                }
                FireOutcome::LevelComplete { level, .. } => {
                    println!("Level complete! Welcome to level {level}.");
                }
                FireOutcome::Collision { new_high_score, .. } => {
                    println!("Game over! Arrow collision detected.");
                    if new_high_score {
                        println!("New high score: {}", session.state().high_score);
                    }
                }
            },
        }
        print_board(&session).context("writing board")?;
    }
    Ok(())
}

fn demo(mut session: Session, seed: u64, shots: u32) {
    let mut rng = Pcg32::seed_from_u64(seed.wrapping_add(1));
    let mut best_level = 1;
    let mut games = 1;

    for _ in 0..shots {
        // Wait a random time, stepping the clock like a frame loop would
        let wait_ms: f32 = rng.random_range(150.0..1200.0);
        let mut waited = 0.0;
        while waited < wait_ms {
            session.tick(SIM_DT_MS);
            waited += SIM_DT_MS;
        }

        if let FireOutcome::Collision { .. } = session.tap() {
            let state = session.state();
            println!(
                "game {games}: score {} on level {}",
                state.score, state.level
            );
            best_level = best_level.max(state.level);
            session.reset();
            games += 1;
        } else {
            best_level = best_level.max(session.state().level);
        }
    }

    let state = session.state();
    println!(
        "{} throws, {} games, best level {}, high score {}",
        shots, games, best_level, state.high_score
    );
}

fn catalog(command: CatalogCommands) -> Result<()> {
    match command {
        CatalogCommands::List { file } => {
            let catalog = JsonCatalog::from_path(&file)
                .with_context(|| format!("loading {}", file.display()))?;
            for product in catalog.featured()? {
                println!("{:>4}  ${:>8.2}  {}", product.id, product.price, product.title);
            }
        }
        CatalogCommands::Show { file, id } => {
            let catalog = JsonCatalog::from_path(&file)
                .with_context(|| format!("loading {}", file.display()))?;
            let product = catalog.product(parse_product_id(&id)?)?;
            println!("{}\n${:.2}\n\n{}", product.title, product.price, product.description);
            if !product.images.is_empty() {
                println!("\n{} image(s)", product.images.len());
            }
        }
    }
    Ok(())
}

/// Grid size of the terminal log view
const VIEW_COLS: usize = 41;
const VIEW_ROWS: usize = 21;

fn print_board(session: &Session) -> io::Result<()> {
    write_board(&mut io::stdout().lock(), session)
}

fn write_board(out: &mut impl Write, session: &Session) -> io::Result<()> {
    let state = session.state();
    writeln!(out, "{}", render_log(state, session.rotation_deg()))?;
    writeln!(
        out,
        "Level {}  Score {}  High Score {}  Arrows Left {}",
        state.level, state.score, state.high_score, state.remaining_arrows
    )?;
    out.flush()
}

/// ASCII view of the log with its stuck arrows; the launcher is at the bottom
fn render_log(state: &GameState, rotation_deg: f32) -> String {
    let mut grid = vec![vec![' '; VIEW_COLS]; VIEW_ROWS];
    let (cx, cy) = (VIEW_COLS as f32 / 2.0, VIEW_ROWS as f32 / 2.0);
    // Terminal cells are about twice as tall as wide
    let radius = VIEW_ROWS as f32 / 2.0 - 2.0;

    for step in 0..72 {
        let p = arrow_log_hit::polar_to_cartesian(radius * 0.6, step as f32 * 5.0);
        put(&mut grid, cx + p.x * 2.0, cy + p.y, 'o');
    }
    for tip in state.arrow_tip_positions(radius, rotation_deg) {
        put(&mut grid, cx + tip.x * 2.0, cy + tip.y, '*');
    }
    put(&mut grid, cx, VIEW_ROWS as f32 - 1.0, '^');

    grid.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn put(grid: &mut [Vec<char>], x: f32, y: f32, c: char) {
    let (x, y) = (x.round(), y.round());
    if x < 0.0 || y < 0.0 {
        return;
    }
    if let Some(cell) = grid.get_mut(y as usize).and_then(|row| row.get_mut(x as usize)) {
        *cell = c;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn quiet_session() -> Session {
        Session::start(
            7,
            Box::new(MemoryStorage::new()),
            AudioManager::new(Box::new(NullSink)),
        )
    }

    #[test]
    fn test_board_reports_status_line() {
        let mut out = Vec::new();
        write_board(&mut out, &quiet_session()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Level 1  Score 0  High Score 0  Arrows Left 5"));
        assert_eq!(text.lines().count(), VIEW_ROWS + 1);
    }

    #[test]
    fn test_board_write_error_propagates() {
        let err = write_board(&mut BrokenPipe, &quiet_session()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
