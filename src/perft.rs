use crate::board::{Board, BoardError};
use crate::movelist::MoveList;
use crate::r#move::Move;
use std::collections::BTreeMap;

/// Counts the leaf positions reachable in exactly `depth` plies, driving the
/// board through make/unmake only. Any mismatch against a known reference
/// count points at a generation or apply/undo defect.
pub fn perft(board: &mut Board, depth: u32) -> Result<u64, BoardError> {
    if depth == 0 {
        return Ok(1);
    }
    let moves = board.legal_moves();
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0;
    for mv in &moves {
        board.make(*mv)?;
        let below = perft(board, depth - 1);
        board.unmake();
        nodes += below?;
    }
    Ok(nodes)
}

/// Per-root-move leaf counts, used to isolate which root move disagrees
/// with a reference count. Keyed by the move's packed value.
pub fn perft_divide(board: &mut Board, depth: u32) -> Result<BTreeMap<Move, u64>, BoardError> {
    let mut divided = BTreeMap::new();
    if depth == 0 {
        return Ok(divided);
    }

    let moves = board.legal_moves();
    for mv in &moves {
        board.make(*mv)?;
        let below = perft(board, depth - 1);
        board.unmake();
        divided.insert(*mv, below?);
    }
    Ok(divided)
}

struct Frame {
    moves: MoveList,
    /// Index of the next move to apply at this level
    next: usize,
    /// Whether `moves[next]` is currently applied on the board
    applied: bool,
}

impl Frame {
    fn new(moves: MoveList) -> Frame {
        Frame {
            moves,
            next: 0,
            applied: false,
        }
    }
}

/// A perft traversal that can be driven one transition at a time by an
/// external loop instead of unwinding through recursion.
///
/// The traversal keeps an explicit stack of (move list, cursor) frames.
/// Every `step` performs exactly one make or unmake on the board; stopping
/// early retracts every outstanding make, so the board always returns to
/// its pre-traversal position.
pub struct PerftRun {
    depth: usize,
    frames: Vec<Frame>,
    leaves: u64,
    finished: bool,
}

impl PerftRun {
    pub fn start(board: &mut Board, depth: usize) -> PerftRun {
        if depth == 0 {
            return PerftRun {
                depth,
                frames: Vec::new(),
                leaves: 1,
                finished: true,
            };
        }
        PerftRun {
            depth,
            frames: vec![Frame::new(board.legal_moves())],
            leaves: 0,
            finished: false,
        }
    }

    /// Advances the traversal by one make-or-unmake transition.
    /// Returns `true` once the run has fully unwound; the board is then
    /// exactly where `start` found it.
    pub fn step(&mut self, board: &mut Board) -> Result<bool, BoardError> {
        if self.finished {
            return Ok(true);
        }
        let at_horizon = self.frames.len() == self.depth;
        let top = self
            .frames
            .last_mut()
            .expect("a running traversal keeps at least one frame");

        if top.applied {
            // only horizon frames stay applied while on top; deeper ones
            // always carry a child frame above them
            board.unmake();
            top.applied = false;
            top.next += 1;
            return Ok(false);
        }

        if let Some(mv) = top.moves.get(top.next).copied() {
            board.make(mv)?;
            top.applied = true;
            if at_horizon {
                self.leaves += 1;
            } else {
                let children = board.legal_moves();
                self.frames.push(Frame::new(children));
            }
            Ok(false)
        } else {
            // this level is exhausted: drop it and retract the parent move
            self.frames.pop();
            match self.frames.last_mut() {
                Some(parent) => {
                    board.unmake();
                    parent.applied = false;
                    parent.next += 1;
                    Ok(false)
                }
                None => {
                    self.finished = true;
                    Ok(true)
                }
            }
        }
    }

    /// Retracts every move the traversal still has applied and discards the
    /// remaining frames
    pub fn stop(&mut self, board: &mut Board) {
        while let Some(frame) = self.frames.pop() {
            if frame.applied {
                board.unmake();
            }
        }
        self.finished = true;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Leaf positions counted so far
    pub fn leaves(&self) -> u64 {
        self.leaves
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// How many moves the traversal currently has applied on the board
    pub fn applied_plies(&self) -> usize {
        self.frames.iter().filter(|f| f.applied).count()
    }
}
