#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use mimalloc::MiMalloc;
use std::time::Instant;

use crate::board::Board;

pub mod board;
pub mod castling;
pub mod console;
pub mod history;
pub mod move_generator;
pub mod movelist;
pub mod perft;
pub mod piece;
pub mod square;
pub mod state;
mod r#move;

pub use crate::r#move::{Move, MoveFlag};

/// Runs a perft report from the given position, printing one line per depth
pub fn perft_report(depth: u32, fen: Option<String>) {
    let mut board = match fen {
        None => Board::default(),
        Some(f) => match Board::from_fen(&f) {
            Ok(b) => b,
            Err(e) => {
                eprintln!("FEN rejected: {}", e);
                return;
            }
        },
    };
    println!("{}\n", board);
    println!("depth nodes\n--------");
    for d in 0..=depth {
        let start = Instant::now();
        match perft::perft(&mut board, d) {
            Ok(nodes) => {
                let elapsed = start.elapsed();
                println!(
                    "{}     {} ({}s, {} nps)",
                    d,
                    nodes,
                    elapsed.as_secs_f32(),
                    nodes as f32 / elapsed.as_secs_f32()
                );
            }
            Err(e) => {
                eprintln!("perft aborted: {}", e);
                return;
            }
        }
    }
}
