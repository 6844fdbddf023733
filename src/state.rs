use crate::castling::CastlingRights;
use crate::piece::{Color, Piece, PieceType};
use crate::r#move::Move;
use crate::square::{file_of, Square};

/// Immutable bookkeeping snapshot for one ply.
///
/// A `State` describes the position *after* `previous_move` was played; the
/// initial snapshot of a game has no previous move and no capture.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct State {
    pub castling_rights: CastlingRights,
    /// File of a pawn that just double-pushed; valid for exactly one ply
    pub en_passant_file: Option<usize>,
    /// Halfmoves since the last capture or pawn move
    pub fifty_move_counter: u32,
    pub last_capture: Option<Piece>,
    pub previous_move: Option<Move>,
}

impl State {
    pub fn initial(
        castling_rights: CastlingRights,
        en_passant_file: Option<usize>,
        fifty_move_counter: u32,
    ) -> State {
        State {
            castling_rights,
            en_passant_file,
            fifty_move_counter,
            last_capture: None,
            previous_move: None,
        }
    }

    /// Successor state for a move that neither captures nor is special
    pub fn after_quiet(&self, mv: Move, moved: Piece) -> State {
        State {
            castling_rights: rights_after_move(self.castling_rights, moved, mv.start()),
            en_passant_file: None,
            fifty_move_counter: if moved.is(PieceType::Pawn) {
                0
            } else {
                self.fifty_move_counter + 1
            },
            last_capture: None,
            previous_move: Some(mv),
        }
    }

    /// Successor state for a capture. `captured_square` is where the captured
    /// piece stood, which for en passant is not the move's end square.
    pub fn after_capture(
        &self,
        mv: Move,
        moved: Piece,
        captured: Piece,
        captured_square: Square,
    ) -> State {
        let mut rights = rights_after_move(self.castling_rights, moved, mv.start());
        rights = rights_after_capture(rights, captured, captured_square);
        State {
            castling_rights: rights,
            en_passant_file: None,
            fifty_move_counter: 0,
            last_capture: Some(captured),
            previous_move: Some(mv),
        }
    }

    /// Successor state for castling, which clears both rights of the side
    pub fn after_castle(&self, mv: Move, side: Color) -> State {
        let mut rights = self.castling_rights;
        rights.uncastle(side);
        State {
            castling_rights: rights,
            en_passant_file: None,
            fifty_move_counter: self.fifty_move_counter + 1,
            last_capture: None,
            previous_move: Some(mv),
        }
    }

    /// Successor state for a pawn double move, opening the en passant window
    pub fn after_double_push(&self, mv: Move) -> State {
        State {
            castling_rights: self.castling_rights,
            en_passant_file: Some(file_of(mv.end())),
            fifty_move_counter: 0,
            last_capture: None,
            previous_move: Some(mv),
        }
    }
}

/// Rights invalidation from the moving side: a king move clears both of its
/// rights, a rook leaving its home corner clears the matching one.
fn rights_after_move(rights: CastlingRights, moved: Piece, origin: Square) -> CastlingRights {
    let mut rights = rights;
    match moved.piece_type {
        PieceType::King => rights.uncastle(moved.color),
        PieceType::Rook => match (origin, moved.color) {
            (0, Color::White) => rights.uncastle_queenside(Color::White),
            (7, Color::White) => rights.uncastle_kingside(Color::White),
            (56, Color::Black) => rights.uncastle_queenside(Color::Black),
            (63, Color::Black) => rights.uncastle_kingside(Color::Black),
            _ => (),
        },
        _ => (),
    }
    rights
}

/// A rook captured on its home corner takes the matching right of its owner
/// with it.
fn rights_after_capture(
    rights: CastlingRights,
    captured: Piece,
    captured_square: Square,
) -> CastlingRights {
    let mut rights = rights;
    if captured.is(PieceType::Rook) {
        match (captured_square, captured.color) {
            (0, Color::White) => rights.uncastle_queenside(Color::White),
            (7, Color::White) => rights.uncastle_kingside(Color::White),
            (56, Color::Black) => rights.uncastle_queenside(Color::Black),
            (63, Color::Black) => rights.uncastle_kingside(Color::Black),
            _ => (),
        }
    }
    rights
}
