use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    /// Uppercase letter used in algebraic notation, `None` for pawns
    pub fn notation_letter(&self) -> Option<char> {
        match self {
            PieceType::Pawn => None,
            PieceType::Knight => Some('N'),
            PieceType::Bishop => Some('B'),
            PieceType::Rook => Some('R'),
            PieceType::Queen => Some('Q'),
            PieceType::King => Some('K'),
        }
    }
}

impl Display for PieceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PieceType::Pawn => "p",
                PieceType::Knight => "n",
                PieceType::Bishop => "b",
                PieceType::Rook => "r",
                PieceType::Queen => "q",
                PieceType::King => "k",
            }
        )
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", if self == &Color::Black { "b" } else { "w" })
    }
}

impl Piece {
    pub fn new(color: Color, piece_type: PieceType) -> Piece {
        Piece { piece_type, color }
    }

    /// Promotion constructor: same color, new type
    pub fn promoted(self, to: PieceType) -> Piece {
        Piece {
            piece_type: to,
            color: self.color,
        }
    }

    pub fn is(&self, piece_type: PieceType) -> bool {
        self.piece_type == piece_type
    }

    pub fn from_char(c: char) -> Option<Piece> {
        let piece_type = match c.to_lowercase().next().unwrap_or('_') {
            'p' => PieceType::Pawn,
            'n' => PieceType::Knight,
            'b' => PieceType::Bishop,
            'r' => PieceType::Rook,
            'q' => PieceType::Queen,
            'k' => PieceType::King,
            _ => return None,
        };
        let color = if c.is_lowercase() {
            Color::Black
        } else {
            Color::White
        };
        Some(Piece { piece_type, color })
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = self.piece_type.to_string();
        write!(
            f,
            "{}",
            if self.color == Color::White {
                s.to_uppercase()
            } else {
                s
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_codec_round_trips() {
        for c in ['p', 'n', 'b', 'r', 'q', 'k', 'P', 'N', 'B', 'R', 'Q', 'K'] {
            let piece = Piece::from_char(c).unwrap();
            assert_eq!(piece.to_string(), c.to_string());
        }
        assert_eq!(Piece::from_char('x'), None);
        assert_eq!(Piece::from_char('1'), None);
    }

    #[test]
    fn promotion_preserves_color() {
        let pawn = Piece::new(Color::Black, PieceType::Pawn);
        let queen = pawn.promoted(PieceType::Queen);
        assert_eq!(queen.color, Color::Black);
        assert_eq!(queen.piece_type, PieceType::Queen);
    }
}
