//! Face-turn notation (`R U R' U2 ...`) and its application to a state.

use std::fmt;
use std::str::FromStr;

use crate::cube::{Color, CubeState};
use crate::geometry::turn;
use crate::input::InputError;

/// A clockwise turn of one layer by one to three quarters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    /// Face index in U R F D L B order.
    pub face: usize,
    pub quarters: usize,
}

impl Move {
    pub fn inverse(self) -> Self {
        Self {
            face: self.face,
            quarters: (4 - self.quarters % 4) % 4,
        }
    }

    pub fn apply(self, state: &CubeState) -> CubeState {
        turn(state, self.face, self.quarters)
    }
}

impl FromStr for Move {
    type Err = InputError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let invalid = || InputError::InvalidMove {
            token: token.to_string(),
        };

        let mut chars = token.chars();
        let face = chars
            .next()
            .and_then(Color::from_face_letter)
            .and_then(Color::face_index)
            .ok_or_else(invalid)?;
        let quarters = match chars.as_str() {
            "" => 1,
            "2" => 2,
            "'" => 3,
            _ => return Err(invalid()),
        };
        Ok(Self { face, quarters })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let letter = Color::FACES[self.face].face_letter().unwrap_or('?');
        match self.quarters % 4 {
            2 => write!(f, "{letter}2"),
            3 => write!(f, "{letter}'"),
            _ => write!(f, "{letter}"),
        }
    }
}

/// Parses whitespace-separated moves.
pub fn parse_moves(text: &str) -> Result<Vec<Move>, InputError> {
    text.split_whitespace().map(str::parse).collect()
}

/// Applies moves left to right.
pub fn apply_moves(state: &CubeState, moves: &[Move]) -> CubeState {
    moves
        .iter()
        .fold(*state, |state, &next| next.apply(&state))
}
