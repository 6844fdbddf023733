use crate::board::Board;
use crate::perft::{perft, perft_divide, PerftRun};
use crate::square;

use regex::Regex;
use rustyline::config::Configurer;
use rustyline::Editor;
use std::time::Instant;

/// Interactive debugging console over a single board: position import,
/// move listing, make/undo, perft counting and a steppable traversal.
pub struct Console {
    board: Board,
    editor: Editor<()>,
    walk: Option<PerftRun>,
}

impl Default for Console {
    fn default() -> Self {
        let mut editor = Editor::<()>::new();
        editor.set_auto_add_history(true);
        editor.set_check_cursor_position(true);
        Console {
            board: Board::default(),
            editor,
            walk: None,
        }
    }
}

impl Console {
    pub fn run(&mut self) {
        println!("type 'help' for the command list, 'quit' to leave");
        while let Ok(line) = self.editor.readline("okapi> ") {
            match self.handle_command(&line) {
                Ok(ConsoleOkCode::ShouldQuit) => break,
                Err(ConsoleErrCode::BadCommand(cmd)) => {
                    eprintln!("Unknown or badly formed command: {}", cmd)
                }
                Err(ConsoleErrCode::BadMove(mv)) => {
                    eprintln!("Badly formatted or illegal move: {}", mv)
                }
                Err(ConsoleErrCode::MissingArg(arg)) => {
                    eprintln!("Missing an argument: {} {} <- here", line.trim(), arg)
                }
                Err(ConsoleErrCode::BadPosition(reason)) => {
                    eprintln!("Position rejected: {}", reason)
                }
                Err(ConsoleErrCode::Failed(reason)) => eprintln!("{}", reason),
                _ => (),
            }
        }
    }

    fn handle_command(&mut self, line: &str) -> Result<ConsoleOkCode, ConsoleErrCode> {
        let args_regex = Self::args_regex();
        let mut args = args_regex.find_iter(line).map(|m| m.as_str());
        let cmd = if let Some(c) = args.next() {
            c
        } else {
            return Err(ConsoleErrCode::NoCommand);
        };
        match cmd {
            "help" => Self::print_help(),
            "position" => {
                let board = match args.next() {
                    Some("startpos") => Board::default(),
                    Some(fen) => Board::from_fen(&fen.replace('"', ""))
                        .map_err(|e| ConsoleErrCode::BadPosition(e.to_string()))?,
                    None => {
                        return Err(ConsoleErrCode::MissingArg(String::from(
                            "<startpos | \"fen\">",
                        )))
                    }
                };
                self.abandon_walk();
                self.board = board;
                for mv in args {
                    if self.board.make_from_str(mv).is_err() {
                        return Err(ConsoleErrCode::BadMove(String::from(mv)));
                    }
                }
            }
            "reset" => {
                self.abandon_walk();
                self.board = Board::default();
            }
            "show" => println!("{}", self.board),
            "fen" => println!("{}", self.board.fen()),
            "moves" => match args.next() {
                Some(square_str) => {
                    let square = square::parse_square(square_str)
                        .ok_or_else(|| ConsoleErrCode::BadCommand(String::from(square_str)))?;
                    let moves = self
                        .board
                        .legal_moves_for_square(square)
                        .map_err(|e| ConsoleErrCode::Failed(e.to_string()))?;
                    self.print_moves(&moves);
                }
                None => {
                    let moves = self.board.legal_moves();
                    self.print_moves(&moves);
                }
            },
            "make" => {
                let mv = args
                    .next()
                    .ok_or_else(|| ConsoleErrCode::MissingArg(String::from("<move>")))?;
                if self.walk.is_some() {
                    return Err(ConsoleErrCode::Failed(String::from(
                        "a walk is in progress, 'halt' it first",
                    )));
                }
                if self.board.make_from_str(mv).is_err() {
                    return Err(ConsoleErrCode::BadMove(String::from(mv)));
                }
            }
            "undo" => {
                if self.walk.is_some() {
                    return Err(ConsoleErrCode::Failed(String::from(
                        "a walk is in progress, 'halt' it first",
                    )));
                }
                if self.board.last_move().is_none() {
                    return Err(ConsoleErrCode::Failed(String::from("nothing to undo")));
                }
                self.board.unmake();
            }
            "history" => {
                for (i, mv) in self.board.move_history().iter().enumerate() {
                    // approximate the mover with whatever now occupies the
                    // destination; good enough for a debugging aid
                    let occupant = self.board.piece_on(mv.destination());
                    println!("{}: {}", i, mv.notation(occupant));
                }
            }
            "perft" => {
                let depth = Self::parse_depth(args.next())?;
                let start = Instant::now();
                match perft(&mut self.board, depth) {
                    Ok(nodes) => {
                        let elapsed = start.elapsed();
                        println!(
                            "{} nodes ({}s, {} nps)",
                            nodes,
                            elapsed.as_secs_f32(),
                            nodes as f32 / elapsed.as_secs_f32()
                        )
                    }
                    Err(e) => return Err(ConsoleErrCode::Failed(e.to_string())),
                }
            }
            "divide" => {
                let depth = Self::parse_depth(args.next())?;
                match perft_divide(&mut self.board, depth) {
                    Ok(divided) => {
                        for (mv, nodes) in &divided {
                            println!("{}: {}", mv, nodes);
                        }
                        println!("total: {}", divided.values().sum::<u64>());
                    }
                    Err(e) => return Err(ConsoleErrCode::Failed(e.to_string())),
                }
            }
            "walk" => {
                let depth = Self::parse_depth(args.next())?;
                self.abandon_walk();
                let run = PerftRun::start(&mut self.board, depth as usize);
                println!(
                    "walking to depth {}, 'step [n]' to advance, 'halt' to abort",
                    run.depth()
                );
                self.walk = Some(run);
            }
            "step" => {
                let count = match args.next() {
                    Some(n) => n
                        .parse::<u32>()
                        .map_err(|_| ConsoleErrCode::BadCommand(String::from(n)))?,
                    None => 1,
                };
                let mut run = match self.walk.take() {
                    Some(run) => run,
                    None => {
                        return Err(ConsoleErrCode::Failed(String::from(
                            "no walk in progress, start one with 'walk <depth>'",
                        )))
                    }
                };
                for _ in 0..count {
                    match run.step(&mut self.board) {
                        Ok(false) => (),
                        Ok(true) => {
                            println!("walk complete: {} leaves", run.leaves());
                            return Ok(ConsoleOkCode::OkCommand);
                        }
                        Err(e) => {
                            run.stop(&mut self.board);
                            return Err(ConsoleErrCode::Failed(e.to_string()));
                        }
                    }
                }
                println!(
                    "{} plies deep, {} leaves so far",
                    run.applied_plies(),
                    run.leaves()
                );
                self.walk = Some(run);
            }
            "halt" => self.abandon_walk(),
            "quit" => {
                self.abandon_walk();
                return Ok(ConsoleOkCode::ShouldQuit);
            }
            _ => return Err(ConsoleErrCode::BadCommand(String::from(cmd))),
        }

        Ok(ConsoleOkCode::OkCommand)
    }

    /// Unwinds and drops the stepped traversal, if one is active
    fn abandon_walk(&mut self) {
        if let Some(mut run) = self.walk.take() {
            run.stop(&mut self.board);
            println!("walk stopped after {} leaves", run.leaves());
        }
    }

    fn print_moves(&self, moves: &crate::movelist::MoveList) {
        if moves.is_empty() {
            println!("(none)");
            return;
        }
        let rendered: Vec<String> = moves
            .iter()
            .map(|m| m.notation(self.board.piece_on(m.start())))
            .collect();
        println!("{}", rendered.join(" "));
    }

    fn parse_depth(arg: Option<&str>) -> Result<u32, ConsoleErrCode> {
        let arg = arg.ok_or_else(|| ConsoleErrCode::MissingArg(String::from("<depth>")))?;
        arg.parse::<u32>()
            .map_err(|_| ConsoleErrCode::BadCommand(String::from(arg)))
    }

    fn print_help() {
        println!("position startpos|\"<fen>\" [moves...]  set up the board");
        println!("reset                                 back to the start position");
        println!("show | fen                            print the board / its FEN");
        println!("moves [square]                        list legal moves");
        println!("make <move>                           play a move (e2e4, e7e8q)");
        println!("undo                                  take the last move back");
        println!("history                               moves played so far");
        println!("perft <depth>                         count leaf nodes");
        println!("divide <depth>                        per-root-move leaf counts");
        println!("walk <depth> / step [n] / halt        steppable traversal");
        println!("quit");
    }

    fn args_regex() -> Regex {
        Regex::new(r#"(".*?"|[^"\s]+)"#).unwrap()
    }
}

enum ConsoleOkCode {
    OkCommand,
    ShouldQuit,
}

enum ConsoleErrCode {
    NoCommand,
    BadCommand(String),
    BadMove(String),
    MissingArg(String),
    BadPosition(String),
    Failed(String),
}
