//! Exploding Atoms terminal driver
//!
//! Plays a two-seat game where each seat is a human (moves read from stdin
//! as `row col`) or the computer (alpha-beta search). Every move is printed
//! wave by wave.

mod cli;
mod render;

use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use atoms_core::{DetailedMove, GameController, PlayerId, PlayerKind};

use crate::cli::Cli;
use crate::render::{parse_pos, player_letter, render_board, render_move};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let seats = cli.seats();
    let mut game = GameController::new(cli.game_config()).context("invalid game settings")?;

    // Stop between moves on SIGINT; a running search is not interrupted.
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .context("failed to install Ctrl-C handler")?;

    info!(
        size = cli.size,
        depth = cli.depth,
        seed = cli.seed,
        player0 = ?seats[0],
        player1 = ?seats[1],
        "starting game"
    );
    print!("{}", render_board(&game.board_snapshot(), None));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut moves = 0;

    while !game.is_game_over() && moves < cli.max_moves {
        if !running.load(Ordering::SeqCst) {
            warn!("interrupted");
            break;
        }

        let player = game.current_player();
        let mov = match seats[player.index()] {
            PlayerKind::Computer => {
                let start = Instant::now();
                let mov = game
                    .perform_ai_move()
                    .context("computer found no legal move")?;
                let stats = game.last_search_stats();
                debug!(
                    nodes = stats.nodes_visited,
                    leaves = stats.leaves_evaluated,
                    pruned = stats.branches_pruned,
                    pruning = %format!("{:.1}%", 100.0 * stats.pruning_ratio()),
                    candidates = stats.root_candidates,
                    tied = stats.tied_candidates,
                    best = stats.best_value,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "search finished"
                );
                mov
            }
            PlayerKind::Human => match read_human_move(&mut game, &mut lines)? {
                Some(mov) => mov,
                None => {
                    info!("input closed");
                    break;
                }
            },
        };

        println!();
        print!("{}", render_move(&mov));
        moves += 1;
    }

    println!();
    let state = game.state();
    match game.winner() {
        Some(winner) => {
            println!("{} wins after {} moves!", player_letter(winner), moves);
            info!(%winner, moves, electrons = state.total_electrons(), "game finished");
        }
        None => {
            let counts: Vec<String> = state
                .electron_counts()
                .iter()
                .enumerate()
                .map(|(idx, count)| format!("{}={}", player_letter(PlayerId(idx as u8)), count))
                .collect();
            println!("Game stopped after {} moves ({}).", moves, counts.join(" "));
        }
    }

    Ok(())
}

/// Prompt until the human enters a legal move. `None` on end of input.
fn read_human_move<B: BufRead>(
    game: &mut GameController,
    lines: &mut io::Lines<B>,
) -> Result<Option<DetailedMove>> {
    let letter = player_letter(game.current_player());
    loop {
        print!("{} to move (row col): ", letter);
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(None);
        };
        let line = line.context("failed to read move")?;

        let Some(target) = parse_pos(&line) else {
            println!("Could not read '{}', expected e.g. `3 4`.", line.trim());
            continue;
        };
        match game.try_perform_move(target) {
            Ok(mov) => return Ok(Some(mov)),
            Err(err) => println!("Illegal move: {}", err),
        }
    }
}
