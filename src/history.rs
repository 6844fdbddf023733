use crate::state::State;
use thiserror::Error;

/// Hard bound on game length, in plies. Pushing past it is reported, never
/// silently absorbed.
pub const MAX_GAME_PLIES: usize = 6000;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("state history is full ({limit} plies)")]
pub struct HistoryError {
    pub limit: usize,
}

/// Append-only sequence of per-ply snapshots, one entry per ply, anchored at
/// a configurable starting ply so mid-game positions can be imported.
///
/// The last element is the current state. Popping the initial snapshot is a
/// caller bug and panics.
#[derive(Debug, Clone, PartialEq)]
pub struct StateHistory {
    states: Vec<State>,
    starting_ply: u32,
}

impl StateHistory {
    pub fn new(initial: State, starting_ply: u32) -> StateHistory {
        StateHistory {
            states: vec![initial],
            starting_ply,
        }
    }

    /// Ply of the current state
    pub fn ply(&self) -> u32 {
        self.starting_ply + (self.states.len() - 1) as u32
    }

    pub fn starting_ply(&self) -> u32 {
        self.starting_ply
    }

    pub fn current(&self) -> &State {
        self.states.last().expect("history always holds its initial snapshot")
    }

    /// Number of states on the stack, including the initial snapshot
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_full(&self) -> bool {
        self.states.len() >= MAX_GAME_PLIES
    }

    pub fn push(&mut self, state: State) -> Result<(), HistoryError> {
        if self.is_full() {
            return Err(HistoryError {
                limit: MAX_GAME_PLIES,
            });
        }
        self.states.push(state);
        Ok(())
    }

    /// Retires and returns the current state, leaving its predecessor
    /// current. The returned state carries the move to reverse and the
    /// capture to restore.
    ///
    /// # Panics
    /// Panics when called on the initial snapshot: an unmake without a
    /// matching make is a usage error, not a recoverable condition.
    pub fn pop(&mut self) -> State {
        if self.states.len() == 1 {
            panic!("attempted to pop the initial state snapshot");
        }
        self.states.pop().expect("checked above")
    }

    /// Moves played so far, oldest first
    pub fn moves(&self) -> impl Iterator<Item = crate::r#move::Move> + '_ {
        self.states.iter().filter_map(|s| s.previous_move)
    }
}
