use crate::board::Board;
use crate::movelist::MoveList;
use crate::piece::{Color, Piece, PieceType};
use crate::r#move::Move;
use crate::square::{file_of, rank_of, Square, BOARD_SQUARES};

const ORTHOGONAL_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const KNIGHT_JUMPS: [(i32, i32); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];
const KING_STEPS: [(i32, i32); 8] = [
    (1, -1),
    (1, 0),
    (1, 1),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Steps from a square by a (rank, file) delta, refusing to wrap around the
/// board edge
fn offset_square(sq: Square, dr: i32, dc: i32) -> Option<Square> {
    let rank = rank_of(sq) as i32 + dr;
    let file = file_of(sq) as i32 + dc;
    if (0..8).contains(&rank) && (0..8).contains(&file) {
        Some((rank * 8 + file) as Square)
    } else {
        None
    }
}

/// Every legal move for the side to move
pub fn legal_moves(board: &mut Board) -> MoveList {
    let mut legal = MoveList::default();
    for square in 0..BOARD_SQUARES {
        let candidates = pseudo_legal_for_square(board, square);
        filter_legal(board, &candidates, &mut legal);
    }
    legal
}

/// Legal moves of the piece on one square; empty when the square is empty or
/// the piece belongs to the side not on move
pub fn legal_moves_for_square(board: &mut Board, square: Square) -> MoveList {
    let mut legal = MoveList::default();
    let candidates = pseudo_legal_for_square(board, square);
    filter_legal(board, &candidates, &mut legal);
    legal
}

/// Keeps the candidates that do not leave the mover's own king attacked.
/// Each candidate is played out and taken back; castling additionally
/// requires a safe king on its origin and transit squares.
fn filter_legal(board: &mut Board, candidates: &MoveList, legal: &mut MoveList) {
    let mover = board.side_to_move();
    for mv in candidates {
        if mv.is_castle() && !castle_passage_safe(board, *mv, mover) {
            continue;
        }
        // a failing make means the ply capacity is hit, so nothing can be
        // played from here anyway
        if board.make(*mv).is_ok() {
            if !in_check(board, mover) {
                legal.push(*mv);
            }
            board.unmake();
        }
    }
}

fn castle_passage_safe(board: &Board, mv: Move, side: Color) -> bool {
    let transit = if mv.destination() > mv.start() {
        mv.start() + 1
    } else {
        mv.start() - 1
    };
    !square_attacked(board, mv.start(), side.opposite())
        && !square_attacked(board, transit, side.opposite())
}

/// Moves obeying piece movement and occupancy only, before any king-safety
/// filtering
pub fn pseudo_legal_for_square(board: &Board, square: Square) -> MoveList {
    let mut moves = MoveList::default();
    let piece = match board.piece_on(square) {
        Some(p) if p.color == board.side_to_move() => p,
        _ => return moves,
    };

    match piece.piece_type {
        PieceType::Pawn => pawn_moves(board, square, piece.color, &mut moves),
        PieceType::Knight => step_moves(board, square, piece.color, &KNIGHT_JUMPS, &mut moves),
        PieceType::Bishop => ray_moves(board, square, piece.color, &DIAGONAL_DIRECTIONS, &mut moves),
        PieceType::Rook => ray_moves(board, square, piece.color, &ORTHOGONAL_DIRECTIONS, &mut moves),
        PieceType::Queen => {
            ray_moves(board, square, piece.color, &DIAGONAL_DIRECTIONS, &mut moves);
            ray_moves(board, square, piece.color, &ORTHOGONAL_DIRECTIONS, &mut moves);
        }
        PieceType::King => {
            step_moves(board, square, piece.color, &KING_STEPS, &mut moves);
            castle_moves(board, square, piece.color, &mut moves);
        }
    }
    moves
}

/// Shared ray caster: walk each direction one step at a time, stopping at
/// the first occupied square
fn ray_moves(
    board: &Board,
    origin: Square,
    side: Color,
    directions: &[(i32, i32)],
    moves: &mut MoveList,
) {
    for &(dr, dc) in directions {
        let mut current = origin;
        while let Some(target) = offset_square(current, dr, dc) {
            match board.piece_on(target) {
                None => moves.push(Move::quiet(origin, target)),
                Some(p) => {
                    if p.color != side {
                        moves.push(Move::capture(origin, target));
                    }
                    break;
                }
            }
            current = target;
        }
    }
}

/// Knight jumps and king steps: fixed offsets, each bound-checked on both
/// axes
fn step_moves(
    board: &Board,
    origin: Square,
    side: Color,
    offsets: &[(i32, i32)],
    moves: &mut MoveList,
) {
    for &(dr, dc) in offsets {
        if let Some(target) = offset_square(origin, dr, dc) {
            match board.piece_on(target) {
                None => moves.push(Move::quiet(origin, target)),
                Some(p) if p.color != side => moves.push(Move::capture(origin, target)),
                _ => (),
            }
        }
    }
}

fn pawn_moves(board: &Board, origin: Square, side: Color, moves: &mut MoveList) {
    let (dir, start_rank, promotion_rank, en_passant_rank) = match side {
        Color::White => (1, 1, 7, 4),
        Color::Black => (-1, 6, 0, 3),
    };

    if let Some(one_ahead) = offset_square(origin, dir, 0) {
        if board.piece_on(one_ahead).is_none() {
            if rank_of(one_ahead) == promotion_rank {
                moves.extend(Move::promotions(origin, one_ahead));
            } else {
                moves.push(Move::quiet(origin, one_ahead));
            }
            // the double push needs both squares ahead free
            if rank_of(origin) == start_rank {
                if let Some(two_ahead) = offset_square(origin, 2 * dir, 0) {
                    if board.piece_on(two_ahead).is_none() {
                        moves.push(Move::double_push(origin, two_ahead));
                    }
                }
            }
        }
    }

    for dc in [-1, 1] {
        if let Some(target) = offset_square(origin, dir, dc) {
            if let Some(p) = board.piece_on(target) {
                if p.color != side {
                    if rank_of(target) == promotion_rank {
                        moves.extend(Move::promotion_captures(origin, target));
                    } else {
                        moves.push(Move::capture(origin, target));
                    }
                }
            }
        }
    }

    // holy heck
    if let Some(ep_file) = board.en_passant_file() {
        let dc = ep_file as i32 - file_of(origin) as i32;
        if rank_of(origin) == en_passant_rank && dc.abs() == 1 {
            if let Some(target) = offset_square(origin, dir, dc) {
                moves.push(Move::en_passant(origin, target));
            }
        }
    }
}

/// Castling: the right must still be set, every square strictly between
/// king and rook must be empty, and both pieces must actually stand on
/// their home squares. King safety along the passage is the legality
/// filter's business.
fn castle_moves(board: &Board, king_square: Square, side: Color, moves: &mut MoveList) {
    let home = match side {
        Color::White => 4,
        Color::Black => 60,
    };
    if king_square != home {
        return;
    }
    let own_rook = Some(Piece::new(side, PieceType::Rook));
    let (kingside, queenside) = board.castling_rights().get(side);

    if kingside
        && board.piece_on(home + 1).is_none()
        && board.piece_on(home + 2).is_none()
        && board.piece_on(home + 3) == own_rook
    {
        moves.push(Move::kingside_castle(home));
    }
    if queenside
        && board.piece_on(home - 1).is_none()
        && board.piece_on(home - 2).is_none()
        && board.piece_on(home - 3).is_none()
        && board.piece_on(home - 4) == own_rook
    {
        moves.push(Move::queenside_castle(home));
    }
}

/// Whether `by` attacks the given square, by scanning outward from it:
/// pawn and leaper offsets first, then blocked rays for the sliders
pub fn square_attacked(board: &Board, square: Square, by: Color) -> bool {
    let pawn_dir = match by {
        Color::White => 1,
        Color::Black => -1,
    };
    for dc in [-1, 1] {
        if let Some(from) = offset_square(square, -pawn_dir, dc) {
            if board.piece_on(from) == Some(Piece::new(by, PieceType::Pawn)) {
                return true;
            }
        }
    }
    for &(dr, dc) in &KNIGHT_JUMPS {
        if let Some(from) = offset_square(square, dr, dc) {
            if board.piece_on(from) == Some(Piece::new(by, PieceType::Knight)) {
                return true;
            }
        }
    }
    for &(dr, dc) in &KING_STEPS {
        if let Some(from) = offset_square(square, dr, dc) {
            if board.piece_on(from) == Some(Piece::new(by, PieceType::King)) {
                return true;
            }
        }
    }
    ray_hits(board, square, by, &DIAGONAL_DIRECTIONS, PieceType::Bishop)
        || ray_hits(board, square, by, &ORTHOGONAL_DIRECTIONS, PieceType::Rook)
}

fn ray_hits(
    board: &Board,
    square: Square,
    by: Color,
    directions: &[(i32, i32)],
    slider: PieceType,
) -> bool {
    for &(dr, dc) in directions {
        let mut current = square;
        while let Some(next) = offset_square(current, dr, dc) {
            match board.piece_on(next) {
                None => current = next,
                Some(p) => {
                    if p.color == by && (p.piece_type == slider || p.piece_type == PieceType::Queen)
                    {
                        return true;
                    }
                    break;
                }
            }
        }
    }
    false
}

pub fn in_check(board: &Board, side: Color) -> bool {
    king_square(board, side).map_or(false, |sq| square_attacked(board, sq, side.opposite()))
}

fn king_square(board: &Board, side: Color) -> Option<Square> {
    (0..BOARD_SQUARES).find(|&sq| board.piece_on(sq) == Some(Piece::new(side, PieceType::King)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#move::MoveFlag;
    use crate::square::parse_square;

    fn sq(name: &str) -> Square {
        parse_square(name).unwrap()
    }

    #[test]
    fn twenty_moves_from_the_start_position() {
        let mut board = Board::default();
        assert_eq!(board.legal_moves().len(), 20);
        // a pawn on its start rank: single and double push
        assert_eq!(legal_moves_for_square(&mut board, sq("e2")).len(), 2);
        // empty square and inactive side both yield nothing
        assert!(legal_moves_for_square(&mut board, sq("e4")).is_empty());
        assert!(legal_moves_for_square(&mut board, sq("e7")).is_empty());
    }

    #[test]
    fn rays_stop_at_the_first_occupied_square() {
        let mut board = Board::from_fen("4k3/8/8/2p5/8/2R2P2/8/4K3 w - - 0 1").unwrap();
        let rook_moves = legal_moves_for_square(&mut board, sq("c3"));
        // up the c file until the black pawn, which is a capture
        assert!(rook_moves.iter().any(|m| m.end() == sq("c4")));
        assert!(rook_moves
            .iter()
            .any(|m| m.end() == sq("c5") && m.flag() == MoveFlag::Capture));
        assert!(!rook_moves.iter().any(|m| m.end() == sq("c6")));
        // right along the rank up to, not onto, the own pawn
        assert!(rook_moves.iter().any(|m| m.end() == sq("e3")));
        assert!(!rook_moves.iter().any(|m| m.end() == sq("f3")));
    }

    #[test]
    fn knights_do_not_wrap_around_the_board_edge() {
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/N3K3 w - - 0 1").unwrap();
        let moves = legal_moves_for_square(&mut board, sq("a1"));
        let mut targets: Vec<Square> = moves.iter().map(|m| m.end()).collect();
        targets.sort_unstable();
        assert_eq!(targets, vec![sq("c2"), sq("b3")]);
    }

    #[test]
    fn en_passant_is_offered_for_exactly_one_ply() {
        let mut board = Board::default();
        board.make_from_str("e2e4").unwrap();
        board.make_from_str("a7a6").unwrap();
        board.make_from_str("e4e5").unwrap();
        board.make_from_str("d7d5").unwrap();

        let moves = legal_moves_for_square(&mut board, sq("e5"));
        assert!(moves
            .iter()
            .any(|m| m.flag() == MoveFlag::EnPassantCapture && m.end() == sq("d6")));

        board.make_from_str("h2h3").unwrap();
        board.make_from_str("h7h6").unwrap();
        let moves = legal_moves_for_square(&mut board, sq("e5"));
        assert!(!moves.iter().any(|m| m.flag() == MoveFlag::EnPassantCapture));
    }

    #[test]
    fn castling_requires_empty_passage() {
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        assert!(board
            .legal_moves()
            .iter()
            .any(|m| m.flag() == MoveFlag::CastleKingside));

        let mut blocked = Board::from_fen("4k3/8/8/8/8/8/8/4K1NR w K - 0 1").unwrap();
        assert!(!blocked
            .legal_moves()
            .iter()
            .any(|m| m.flag() == MoveFlag::CastleKingside));
    }

    #[test]
    fn castling_is_refused_through_or_out_of_check() {
        // rook on f7 covers the transit square f1
        let mut through = Board::from_fen("4k3/5r2/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        assert!(!through
            .legal_moves()
            .iter()
            .any(|m| m.flag() == MoveFlag::CastleKingside));

        // rook on e7 gives check
        let mut out_of = Board::from_fen("4k3/4r3/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        assert!(!out_of
            .legal_moves()
            .iter()
            .any(|m| m.flag() == MoveFlag::CastleKingside));
    }

    #[test]
    fn moves_leaving_the_king_attacked_are_filtered() {
        // the d2 rook is pinned by the d8 rook
        let mut board = Board::from_fen("3rk3/8/8/8/8/8/3R4/3K4 w - - 0 1").unwrap();
        let pinned = legal_moves_for_square(&mut board, sq("d2"));
        assert!(pinned.iter().all(|m| file_of(m.end()) == 3));

        // in check, only evasions remain
        let mut checked = Board::from_fen("4k3/8/8/8/8/8/4r3/4K3 w - - 0 1").unwrap();
        let evasions = checked.legal_moves();
        assert!(evasions
            .iter()
            .all(|m| m.end() == sq("e2") || !square_attacked(&checked, m.end(), Color::Black)));
        assert!(checked.in_check(Color::White));
    }
}
