use crate::castling::CastlingRights;
use crate::history::{HistoryError, StateHistory};
use crate::move_generator;
use crate::movelist::MoveList;
use crate::piece::{Color, Piece, PieceType};
use crate::r#move::{Move, MoveFlag};
use crate::square::{file_of, is_valid, parse_square, square_at, Square, BOARD_SQUARES};
use crate::state::State;
use std::fmt::{Display, Formatter};
use thiserror::Error;

pub const STARTING_POSITION_FEN: &str =
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("square index {0} is out of range")]
    SquareOutOfRange(usize),
    #[error("coordinates ({row}, {col}) are out of range")]
    CoordsOutOfRange { row: usize, col: usize },
    #[error(transparent)]
    History(#[from] HistoryError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("missing {0} field")]
    MissingField(&'static str),
    #[error("unknown piece character '{0}'")]
    UnknownPiece(char),
    #[error("malformed piece placement")]
    MalformedPlacement,
    #[error("invalid active color '{0}'")]
    InvalidActiveColor(String),
    #[error("invalid en passant target '{0}'")]
    InvalidEnPassant(String),
    #[error("invalid halfmove clock '{0}'")]
    InvalidHalfmoveClock(String),
    #[error("halfmove clock {0} is out of range")]
    HalfmoveClockOutOfRange(u32),
    #[error("invalid fullmove number '{0}'")]
    InvalidFullmoveNumber(String),
}

/// The root aggregate: a mailbox piece array and the state history that
/// tracks everything the squares alone cannot tell (castling rights, the
/// en passant window, the fifty-move clock, captures to restore on unmake).
///
/// A board has exactly one logical writer; move generation reads the same
/// cells that make/unmake touch.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    pieces: [Option<Piece>; BOARD_SQUARES],
    history: StateHistory,
}

impl Board {
    /// Creates a board from its FEN representation
    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        let mut fields = fen.split_whitespace();
        let placement = fields
            .next()
            .ok_or(FenError::MissingField("piece placement"))?;
        let active = fields.next().ok_or(FenError::MissingField("active color"))?;
        let castling = fields
            .next()
            .ok_or(FenError::MissingField("castling availability"))?;

        // The en passant field may be left out entirely; a digit token in
        // its place is already the halfmove clock.
        let fourth = fields.next().ok_or(FenError::MissingField("en passant"))?;
        let (ep_field, halfmove_field) = if fourth.starts_with(|c: char| c.is_ascii_digit()) {
            ("-", fourth)
        } else {
            (
                fourth,
                fields.next().ok_or(FenError::MissingField("halfmove clock"))?,
            )
        };
        let fullmove_field = fields
            .next()
            .ok_or(FenError::MissingField("fullmove number"))?;

        let mut pieces: [Option<Piece>; BOARD_SQUARES] = [None; BOARD_SQUARES];
        let mut rank: usize = 7;
        let mut file: usize = 0;
        for c in placement.chars() {
            match c {
                '/' => {
                    if file != 8 || rank == 0 {
                        return Err(FenError::MalformedPlacement);
                    }
                    rank -= 1;
                    file = 0;
                }
                '1'..='8' => {
                    file += c.to_digit(10).map(|d| d as usize).unwrap_or(0);
                    if file > 8 {
                        return Err(FenError::MalformedPlacement);
                    }
                }
                _ => {
                    let piece = Piece::from_char(c).ok_or(FenError::UnknownPiece(c))?;
                    if file >= 8 {
                        return Err(FenError::MalformedPlacement);
                    }
                    pieces[rank * 8 + file] = Some(piece);
                    file += 1;
                }
            }
        }
        if rank != 0 || file != 8 {
            return Err(FenError::MalformedPlacement);
        }

        let black_to_move = match active {
            "w" => false,
            "b" => true,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling_rights = CastlingRights::from_str(castling);

        let en_passant_file = if ep_field == "-" {
            None
        } else {
            Some(file_of(
                parse_square(ep_field)
                    .ok_or_else(|| FenError::InvalidEnPassant(ep_field.to_string()))?,
            ))
        };

        let halfmove_clock = halfmove_field
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmoveClock(halfmove_field.to_string()))?;
        if halfmove_clock > 100 {
            return Err(FenError::HalfmoveClockOutOfRange(halfmove_clock));
        }

        let fullmove_number = fullmove_field
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| FenError::InvalidFullmoveNumber(fullmove_field.to_string()))?;

        // Halfmove parity and fullmove number fold into a single ply anchor
        let starting_ply = 2 * (fullmove_number - 1) + black_to_move as u32;
        let initial = State::initial(castling_rights, en_passant_file, halfmove_clock);

        Ok(Board {
            pieces,
            history: StateHistory::new(initial, starting_ply),
        })
    }

    /// Serializes the position back into a FEN string
    pub fn fen(&self) -> String {
        let mut fen = String::new();
        for rank in (0..8).rev() {
            let mut empty_counter = 0;
            for file in 0..8 {
                match self.pieces[rank * 8 + file] {
                    Some(p) => {
                        if empty_counter != 0 {
                            fen.push_str(&empty_counter.to_string());
                        }
                        empty_counter = 0;
                        fen.push_str(&p.to_string());
                    }
                    None => empty_counter += 1,
                }
            }
            if empty_counter != 0 {
                fen.push_str(&empty_counter.to_string());
            }
            if rank != 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push_str(&self.side_to_move().to_string());
        fen.push(' ');
        fen.push_str(&self.castling_rights().to_string());
        fen.push(' ');
        match self.en_passant_file() {
            Some(file) => {
                fen.push((b'a' + file as u8) as char);
                // the vacated square sits behind the pawn that just pushed
                fen.push(if self.side_to_move() == Color::White {
                    '6'
                } else {
                    '3'
                });
            }
            None => fen.push('-'),
        }
        fen.push(' ');
        fen.push_str(&self.fifty_move_counter().to_string());
        fen.push(' ');
        fen.push_str(&(self.ply() / 2 + 1).to_string());
        fen
    }

    /*
    QUERY SURFACE
     */
    pub fn side_to_move(&self) -> Color {
        if self.ply() % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    pub fn ply(&self) -> u32 {
        self.history.ply()
    }

    /// Piece on a square the caller already knows to be in bounds.
    /// Panics on an out-of-range index; use `piece` for untrusted input.
    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        self.pieces[square]
    }

    /// Range-checked piece lookup by square index
    pub fn piece(&self, square: usize) -> Result<Option<Piece>, BoardError> {
        if !is_valid(square) {
            return Err(BoardError::SquareOutOfRange(square));
        }
        Ok(self.pieces[square])
    }

    /// Range-checked piece lookup by (row, col), row 0 being rank 1
    pub fn piece_at(&self, row: usize, col: usize) -> Result<Option<Piece>, BoardError> {
        let square = square_at(row, col).ok_or(BoardError::CoordsOutOfRange { row, col })?;
        Ok(self.pieces[square])
    }

    pub fn current_state(&self) -> &State {
        self.history.current()
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.history.current().castling_rights
    }

    pub fn en_passant_file(&self) -> Option<usize> {
        self.history.current().en_passant_file
    }

    pub fn fifty_move_counter(&self) -> u32 {
        self.history.current().fifty_move_counter
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.current().previous_move
    }

    /// Moves played on this board, oldest first
    pub fn move_history(&self) -> Vec<Move> {
        self.history.moves().collect()
    }

    pub fn in_check(&self, side: Color) -> bool {
        move_generator::in_check(self, side)
    }

    /// Every legal move for the side to move.
    /// Needs `&mut self` because candidates are verified by playing them
    /// out and taking them back; the board is unchanged on return.
    pub fn legal_moves(&mut self) -> MoveList {
        move_generator::legal_moves(self)
    }

    /// Legal moves starting from one square; empty when the square is empty
    /// or holds a piece of the side not on move
    pub fn legal_moves_for_square(&mut self, square: Square) -> Result<MoveList, BoardError> {
        if !is_valid(square) {
            return Err(BoardError::SquareOutOfRange(square));
        }
        Ok(move_generator::legal_moves_for_square(self, square))
    }

    /*
    MUTATION SURFACE
     */

    /// Makes a move on the board. The move is expected to come from the
    /// legal move list; feeding an arbitrary 16 bit value breaks the
    /// position. Fails only when the game has hit the ply capacity, in
    /// which case the board is left untouched.
    pub fn make(&mut self, mv: Move) -> Result<(), BoardError> {
        let start = mv.start();
        let end = mv.end();
        let moved = self.pieces[start].expect("make called with no piece on the start square");
        let state = *self.history.current();

        match mv.flag() {
            MoveFlag::PawnDoubleMove => {
                self.history.push(state.after_double_push(mv))?;
                self.pieces[end] = Some(moved);
                self.pieces[start] = None;
            }
            MoveFlag::CastleKingside | MoveFlag::CastleQueenside => {
                // the end square carries the rook's origin; king and rook
                // relocate in one update
                let king_to = mv.destination();
                let rook_to = if mv.flag() == MoveFlag::CastleKingside {
                    start + 1
                } else {
                    start - 1
                };
                self.history.push(state.after_castle(mv, moved.color))?;
                let rook = self.pieces[end];
                self.pieces[start] = None;
                self.pieces[end] = None;
                self.pieces[king_to] = Some(moved);
                self.pieces[rook_to] = rook;
            }
            MoveFlag::EnPassantCapture => {
                // the captured pawn sits behind the destination, relative to
                // the mover
                let captured_square = if moved.color == Color::White {
                    end - 8
                } else {
                    end + 8
                };
                let captured = self.pieces[captured_square]
                    .expect("en passant capture with no pawn behind the destination");
                self.history
                    .push(state.after_capture(mv, moved, captured, captured_square))?;
                self.pieces[end] = Some(moved);
                self.pieces[start] = None;
                self.pieces[captured_square] = None;
            }
            _ => {
                let landed = match mv.promotion_target() {
                    Some(promotion) => moved.promoted(promotion),
                    None => moved,
                };
                let next = match self.pieces[end] {
                    Some(captured) => state.after_capture(mv, moved, captured, end),
                    None => state.after_quiet(mv, moved),
                };
                self.history.push(next)?;
                self.pieces[end] = Some(landed);
                self.pieces[start] = None;
            }
        }
        Ok(())
    }

    /// Given a string in long algebraic notation, makes the move if it is
    /// legal
    pub fn make_from_str(&mut self, move_str: &str) -> Result<(), String> {
        let (origin, target, promotion_target) = Move::parse(move_str)
            .ok_or_else(|| String::from("Move is not formatted correctly"))?;

        let legal_moves = self.legal_moves();
        let found = legal_moves
            .iter()
            .find(|m| {
                m.start() == origin
                    && (m.destination() == target || m.end() == target)
                    && m.promotion_target() == promotion_target
            })
            .copied();
        match found {
            Some(mv) => self.make(mv).map_err(|e| e.to_string()),
            None => Err(String::from("Illegal move")),
        }
    }

    /// Unmakes the most recent move, restoring the piece array and the
    /// bookkeeping to their exact previous values.
    ///
    /// # Panics
    /// Panics when no move has been made since the board was created, as
    /// the state history does for the same usage error.
    pub fn unmake(&mut self) {
        let retired = self.history.pop();
        let mv = retired
            .previous_move
            .expect("every non-initial state records the move that produced it");
        let start = mv.start();
        let end = mv.end();

        match mv.flag() {
            MoveFlag::CastleKingside | MoveFlag::CastleQueenside => {
                let king_to = mv.destination();
                let rook_to = if mv.flag() == MoveFlag::CastleKingside {
                    start + 1
                } else {
                    start - 1
                };
                let king = self.pieces[king_to].take();
                let rook = self.pieces[rook_to].take();
                self.pieces[start] = king;
                self.pieces[end] = rook;
            }
            MoveFlag::EnPassantCapture => {
                let pawn = self.pieces[end]
                    .take()
                    .expect("unmake found no piece on the destination square");
                let captured_square = if pawn.color == Color::White {
                    end - 8
                } else {
                    end + 8
                };
                self.pieces[start] = Some(pawn);
                self.pieces[captured_square] = retired.last_capture;
            }
            _ => {
                let mut piece = self.pieces[end]
                    .take()
                    .expect("unmake found no piece on the destination square");
                if mv.promotion_target().is_some() {
                    piece = Piece::new(piece.color, PieceType::Pawn);
                }
                self.pieces[start] = Some(piece);
                self.pieces[end] = retired.last_capture;
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::from_fen(STARTING_POSITION_FEN).expect("the starting position always parses")
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for rank in (0..8).rev() {
            let mut line = String::new();
            for file in 0..8 {
                match self.pieces[rank * 8 + file] {
                    None => line.push_str(". "),
                    Some(p) => {
                        line.push_str(&p.to_string());
                        line.push(' ');
                    }
                }
            }
            match rank {
                4 => writeln!(f, "{} side to move: {}", line, self.side_to_move())?,
                3 => writeln!(f, "{} castling rights: {}", line, self.castling_rights())?,
                2 => {
                    let ep = match self.en_passant_file() {
                        Some(file) => ((b'a' + file as u8) as char).to_string(),
                        None => String::from("-"),
                    };
                    writeln!(f, "{} en passant file: {}", line, ep)?
                }
                1 => writeln!(
                    f,
                    "{} ply: {} ({} reversible halfmoves)",
                    line,
                    self.ply(),
                    self.fifty_move_counter()
                )?,
                0 => write!(f, "{} fen: {}", line, self.fen())?,
                _ => writeln!(f, "{}", line)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::parse_square;

    fn sq(name: &str) -> Square {
        parse_square(name).unwrap()
    }

    #[test]
    fn starting_fen_round_trips() {
        let board = Board::default();
        assert_eq!(board.fen(), STARTING_POSITION_FEN);
    }

    #[test]
    fn midgame_fen_round_trips() {
        let fens = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "rnbqkbnr/pppp1ppp/8/4p3/8/5N2/PPPPPPPP/RNBQKB1R w KQkq e6 0 2",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 b - - 7 24",
        ];
        for fen in fens {
            assert_eq!(Board::from_fen(fen).unwrap().fen(), fen);
        }
    }

    #[test]
    fn omitted_en_passant_field_is_accepted() {
        let board =
            Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq 0 1").unwrap();
        assert_eq!(board.en_passant_file(), None);
        assert_eq!(board.fen(), STARTING_POSITION_FEN);

        let black = Board::from_fen("4k3/8/8/8/8/8/8/4K3 b - 3 40").unwrap();
        assert_eq!(black.side_to_move(), Color::Black);
        assert_eq!(black.ply(), 79);
        assert_eq!(black.fifty_move_counter(), 3);
    }

    #[test]
    fn malformed_fens_are_rejected() {
        assert_eq!(
            Board::from_fen("rnbqkbnr/ppp@pppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::UnknownPiece('@'))
        );
        assert_eq!(
            Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1"),
            Err(FenError::InvalidActiveColor(String::from("x")))
        );
        assert_eq!(
            Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1"),
            Err(FenError::InvalidEnPassant(String::from("z9")))
        );
        assert_eq!(
            Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 101 1"),
            Err(FenError::HalfmoveClockOutOfRange(101))
        );
        assert_eq!(
            Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0"),
            Err(FenError::InvalidFullmoveNumber(String::from("0")))
        );
        assert_eq!(
            Board::from_fen("rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::MalformedPlacement)
        );
        assert_eq!(
            Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"),
            Err(FenError::MissingField("castling availability"))
        );
    }

    #[test]
    fn out_of_range_lookups_are_errors() {
        let mut board = Board::default();
        assert_eq!(board.piece(63), Ok(Some(Piece::from_char('r').unwrap())));
        assert_eq!(board.piece(64), Err(BoardError::SquareOutOfRange(64)));
        assert_eq!(board.piece_at(0, 4), Ok(Piece::from_char('K')));
        assert_eq!(
            board.piece_at(8, 0),
            Err(BoardError::CoordsOutOfRange { row: 8, col: 0 })
        );
        assert_eq!(
            board.legal_moves_for_square(64).unwrap_err(),
            BoardError::SquareOutOfRange(64)
        );
    }

    #[test]
    fn make_and_unmake_restore_the_position() {
        let mut board = Board::default();
        let before = board.fen();
        board.make(Move::double_push(sq("e2"), sq("e4"))).unwrap();
        assert_eq!(board.en_passant_file(), Some(4));
        assert_eq!(board.side_to_move(), Color::Black);
        board.unmake();
        assert_eq!(board.fen(), before);
    }

    #[test]
    fn capture_is_recorded_and_restored() {
        let fen = "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2";
        let mut board = Board::from_fen(fen).unwrap();
        board.make(Move::capture(sq("e4"), sq("d5"))).unwrap();
        assert_eq!(
            board.current_state().last_capture,
            Some(Piece::from_char('p').unwrap())
        );
        assert_eq!(board.fifty_move_counter(), 0);
        board.unmake();
        assert_eq!(board.fen(), fen);
    }

    #[test]
    fn en_passant_capture_removes_the_pawn_behind() {
        let fen = "rnbqkbnr/pppp1ppp/8/4pP2/8/8/PPPPP1PP/RNBQKBNR w KQkq e6 0 3";
        let mut board = Board::from_fen(fen).unwrap();
        board.make(Move::en_passant(sq("f5"), sq("e6"))).unwrap();
        assert_eq!(board.piece_on(sq("e6")), Piece::from_char('P'));
        assert_eq!(board.piece_on(sq("e5")), None);
        assert_eq!(board.piece_on(sq("f5")), None);
        board.unmake();
        assert_eq!(board.fen(), fen);
    }

    #[test]
    fn promotion_round_trips_for_every_choice() {
        let fen = "8/P6k/8/8/8/8/8/K7 w - - 0 1";
        for mv in Move::promotions(sq("a7"), sq("a8")) {
            let mut board = Board::from_fen(fen).unwrap();
            board.make(mv).unwrap();
            let promoted = board.piece_on(sq("a8")).unwrap();
            assert_eq!(Some(promoted.piece_type), mv.promotion_target());
            assert_eq!(promoted.color, Color::White);
            board.unmake();
            assert_eq!(board.piece_on(sq("a7")), Piece::from_char('P'));
            assert_eq!(board.piece_on(sq("a8")), None);
            assert_eq!(board.fen(), fen);
        }
    }

    #[test]
    fn promotion_capture_round_trips() {
        let fen = "1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1";
        let mut board = Board::from_fen(fen).unwrap();
        let mv = Move::promotion_captures(sq("a7"), sq("b8"))[3];
        board.make(mv).unwrap();
        assert_eq!(board.piece_on(sq("b8")), Piece::from_char('Q'));
        board.unmake();
        assert_eq!(board.fen(), fen);
    }

    #[test]
    fn castling_relocates_king_and_rook_atomically() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        let mut board = Board::from_fen(fen).unwrap();
        board.make(Move::kingside_castle(sq("e1"))).unwrap();
        assert_eq!(board.piece_on(sq("g1")), Piece::from_char('K'));
        assert_eq!(board.piece_on(sq("f1")), Piece::from_char('R'));
        assert_eq!(board.piece_on(sq("e1")), None);
        assert_eq!(board.piece_on(sq("h1")), None);
        assert_eq!(board.castling_rights().get(Color::White), (false, false));
        board.unmake();
        assert_eq!(board.fen(), fen);

        board.make(Move::queenside_castle(sq("e1"))).unwrap();
        assert_eq!(board.piece_on(sq("c1")), Piece::from_char('K'));
        assert_eq!(board.piece_on(sq("d1")), Piece::from_char('R'));
        board.unmake();
        assert_eq!(board.fen(), fen);
    }

    #[test]
    fn castling_rights_never_come_back() {
        let mut board = Board::default();
        let mut kingside_seen_false = false;
        for mv in ["e2e4", "e7e5", "e1e2", "e8e7", "e2e1", "e7e8"] {
            board.make_from_str(mv).unwrap();
            let (kingside, queenside) = board.castling_rights().get(Color::White);
            if kingside_seen_false {
                assert!(!kingside && !queenside);
            }
            if !kingside {
                kingside_seen_false = true;
            }
        }
        // kings are back home, yet the rights stay gone
        assert!(kingside_seen_false);
        assert_eq!(board.castling_rights().get(Color::White), (false, false));
        assert_eq!(board.castling_rights().get(Color::Black), (false, false));
    }

    #[test]
    fn en_passant_window_lasts_one_ply() {
        let mut board = Board::default();
        board.make_from_str("e2e4").unwrap();
        assert_eq!(board.en_passant_file(), Some(4));
        board.make_from_str("b8c6").unwrap();
        assert_eq!(board.en_passant_file(), None);
    }

    #[test]
    fn make_from_str_accepts_king_destination_for_castles() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        board.make_from_str("e1g1").unwrap();
        assert_eq!(board.piece_on(sq("g1")), Piece::from_char('K'));
        board.unmake();
        board.make_from_str("e1c1").unwrap();
        assert_eq!(board.piece_on(sq("c1")), Piece::from_char('K'));
    }

    #[test]
    fn make_from_str_rejects_garbage_and_illegal_moves() {
        let mut board = Board::default();
        assert!(board.make_from_str("e9e4").is_err());
        assert!(board.make_from_str("e2e5").is_err());
        assert!(board.make_from_str("e7e5").is_err());
    }

    #[test]
    #[should_panic(expected = "initial state snapshot")]
    fn unmake_at_the_root_panics() {
        let mut board = Board::default();
        board.unmake();
    }

    #[test]
    fn random_walk_unwinds_to_the_start() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0x0DD5EED);
        let mut board = Board::default();
        let mut fens = vec![board.fen()];

        for _ in 0..160 {
            let moves = board.legal_moves();
            if moves.is_empty() {
                break;
            }
            let mv = *moves.get(rng.gen_range(0..moves.len())).unwrap();
            board.make(mv).unwrap();
            fens.push(board.fen());
        }

        while fens.len() > 1 {
            fens.pop();
            board.unmake();
            assert_eq!(&board.fen(), fens.last().unwrap());
        }
        assert_eq!(board.fen(), STARTING_POSITION_FEN);
    }
}
