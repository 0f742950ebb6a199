//! Rubik's Cube State Validation and Repair
//!
//! Decides whether 54 captured sticker colors form a solvable 3x3x3 cube and,
//! when the capture only has faces in the wrong order or rotation, finds the
//! reordering and per-face rotations that make it solvable.
//!
//! Stickers are stored face by face in White, Red, Green, Yellow, Orange,
//! Blue order (U R F D L B in face notation), each face row-major as seen
//! from outside the cube.

pub mod config;
pub mod cube;
pub mod geometry;
pub mod input;
pub mod moves;
pub mod parity;
pub mod pieces;
pub mod repair;
pub mod report;
pub mod validate;

pub use cube::{Color, CubeState};
pub use repair::{repair, Repair, RepairConfig};
pub use validate::{validate, validate_labels, Failure, Verdict};

/// The state in 54-letter face notation (`UUUUUUUUURRR...`), as consumed by
/// move solvers. Returns `None` if any sticker is `Unknown`.
pub fn to_face_letters(state: &CubeState) -> Option<String> {
    state
        .stickers()
        .iter()
        .map(|color| color.face_letter())
        .collect()
}
