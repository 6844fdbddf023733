use crate::piece::Color;
use std::fmt::{Display, Formatter};

/// The four castling rights, one named flag each. Rights only ever go from
/// `true` to `false` over the course of a game.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub fn all() -> CastlingRights {
        CastlingRights {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }

    pub fn none() -> CastlingRights {
        CastlingRights {
            white_kingside: false,
            white_queenside: false,
            black_kingside: false,
            black_queenside: false,
        }
    }

    pub fn from_str(s: &str) -> CastlingRights {
        let mut res = CastlingRights::none();
        if s.contains('K') {
            res.white_kingside = true;
        }
        if s.contains('Q') {
            res.white_queenside = true;
        }
        if s.contains('k') {
            res.black_kingside = true;
        }
        if s.contains('q') {
            res.black_queenside = true;
        }
        res
    }

    /// Returns the (kingside, queenside) rights of a given color
    pub fn get(&self, side: Color) -> (bool, bool) {
        match side {
            Color::White => (self.white_kingside, self.white_queenside),
            Color::Black => (self.black_kingside, self.black_queenside),
        }
    }

    /// Marks the given side as unable to castle
    pub fn uncastle(&mut self, side: Color) {
        self.uncastle_kingside(side);
        self.uncastle_queenside(side);
    }
    /// Marks the given side as unable to castle kingside
    pub fn uncastle_kingside(&mut self, side: Color) {
        match side {
            Color::White => self.white_kingside = false,
            Color::Black => self.black_kingside = false,
        }
    }
    /// Marks the given side as unable to castle queenside
    pub fn uncastle_queenside(&mut self, side: Color) {
        match side {
            Color::White => self.white_queenside = false,
            Color::Black => self.black_queenside = false,
        }
    }
}

impl Display for CastlingRights {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if *self == CastlingRights::none() {
            return write!(f, "-");
        }
        write!(
            f,
            "{}{}{}{}",
            if self.white_kingside { "K" } else { "" },
            if self.white_queenside { "Q" } else { "" },
            if self.black_kingside { "k" } else { "" },
            if self.black_queenside { "q" } else { "" }
        )
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::all()
    }
}
