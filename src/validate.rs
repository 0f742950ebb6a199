//! Structural validation and the combined validity verdict.
//!
//! Checks run in a fixed order and stop at the first violation, so the
//! reported reason is always the earliest rule that failed:
//!
//! 1. length is 54
//! 2. no `Unknown` stickers
//! 3. nine stickers of each face color
//! 4. centers in White, Red, Green, Yellow, Orange, Blue order
//! 5. edges: two different, non-opposite colors; all twelve distinct
//! 6. corners: three different, pairwise non-opposite colors; all eight distinct
//!
//! followed by the parity checks in [`crate::parity`].

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::cube::{Color, CubeState, NUM_FACES, STICKER_COUNT};
use crate::parity;
use crate::pieces::{
    extract_corners, extract_edges, format_colors, CORNER_SLOTS, EDGE_SLOTS, NUM_CORNERS,
    NUM_EDGES,
};

/// Reason reported for a state that passes every check.
pub const VALID_MESSAGE: &str = "Cube is valid";

/// Broad class of a failure, which decides whether repair is worth trying.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    /// Wrong length or a label that is not a color.
    MalformedInput,
    /// `Unknown` stickers or a wrong color census; no rotation can fix it.
    Detection,
    /// Impossible or duplicated edge/corner.
    Structural,
    /// Twist, flip, permutation or chirality invariant violated.
    Parity,
}

/// The first rule a state violates. `Display` gives the diagnostic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    #[error("Invalid cube state length: {found} (expected 54)")]
    Length { found: usize },
    #[error("Unexpected color detected: {label}")]
    UnexpectedColor { label: String },
    #[error("Cube contains {count} undetected stickers (Unknown)")]
    UnknownStickers { count: usize },
    #[error("Wrong color counts: {} (expected 9 each)", format_counts(.counts))]
    ColorCounts { counts: Vec<(Color, usize)> },
    #[error("Wrong center on {face} face: found {found}")]
    WrongCenter { face: Color, found: Color },
    #[error("Impossible edge {}: {} repeats a color", edge_label(.slot), format_colors(.colors))]
    EdgeRepeatedColor { slot: usize, colors: [Color; 2] },
    #[error("Impossible edge {}: {} are opposite colors", edge_label(.slot), format_colors(.colors))]
    EdgeOppositeColors { slot: usize, colors: [Color; 2] },
    #[error("Duplicate edge {}: {}", edge_label(.slot), format_colors(.colors))]
    DuplicateEdge { slot: usize, colors: [Color; 2] },
    #[error("Expected 12 unique edges, found {found}")]
    EdgeCount { found: usize },
    #[error("Corner {} has repeated colors: {}", corner_label(.slot), format_colors(.colors))]
    CornerRepeatedColor { slot: usize, colors: [Color; 3] },
    #[error("Corner {} has opposite colors: {}", corner_label(.slot), format_colors(.colors))]
    CornerOppositeColors { slot: usize, colors: [Color; 3] },
    #[error("Duplicate corner {}: {}", corner_label(.slot), format_colors(.colors))]
    DuplicateCorner { slot: usize, colors: [Color; 3] },
    #[error("Expected 8 unique corners, found {found}")]
    CornerCount { found: usize },
    #[error("Pieces do not match a real cube's edges and corners")]
    UnmatchedPieces,
    #[error("Invalid corner twist: twist sum {sum} is not divisible by 3")]
    CornerTwist { sum: i32 },
    #[error("Invalid edge orientation: {flipped} flipped edges (must be even)")]
    EdgeFlip { flipped: usize },
    #[error(
        "Invalid permutation parity: {corner_swaps} corner swaps + {edge_swaps} edge swaps is odd"
    )]
    PermutationParity {
        corner_swaps: usize,
        edge_swaps: usize,
    },
    #[error("Corner {} is mirrored: {} cannot be assembled", corner_label(.slot), format_colors(.colors))]
    MirroredCorner { slot: usize, colors: [Color; 3] },
}

impl Failure {
    pub fn category(&self) -> Category {
        match self {
            Failure::Length { .. } | Failure::UnexpectedColor { .. } => Category::MalformedInput,
            Failure::UnknownStickers { .. } | Failure::ColorCounts { .. } => Category::Detection,
            Failure::WrongCenter { .. }
            | Failure::EdgeRepeatedColor { .. }
            | Failure::EdgeOppositeColors { .. }
            | Failure::DuplicateEdge { .. }
            | Failure::EdgeCount { .. }
            | Failure::CornerRepeatedColor { .. }
            | Failure::CornerOppositeColors { .. }
            | Failure::DuplicateCorner { .. }
            | Failure::CornerCount { .. }
            | Failure::UnmatchedPieces => Category::Structural,
            Failure::CornerTwist { .. }
            | Failure::EdgeFlip { .. }
            | Failure::PermutationParity { .. }
            | Failure::MirroredCorner { .. } => Category::Parity,
        }
    }
}

fn format_counts(counts: &[(Color, usize)]) -> String {
    counts
        .iter()
        .map(|(color, count)| format!("{color}: {count}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn edge_label(slot: &usize) -> String {
    format!("{} ({})", slot + 1, EDGE_SLOTS[*slot].name)
}

fn corner_label(slot: &usize) -> String {
    format!("{} ({})", slot + 1, CORNER_SLOTS[*slot].name)
}

/// Outcome of validating one state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    failure: Option<Failure>,
}

impl Verdict {
    pub fn valid() -> Self {
        Self { failure: None }
    }

    pub fn invalid(failure: Failure) -> Self {
        Self {
            failure: Some(failure),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.failure.is_none()
    }

    pub fn failure(&self) -> Option<&Failure> {
        self.failure.as_ref()
    }

    /// `"Cube is valid"`, or the description of the first violated rule.
    pub fn reason(&self) -> String {
        match &self.failure {
            None => VALID_MESSAGE.to_string(),
            Some(failure) => failure.to_string(),
        }
    }
}

impl From<Result<(), Failure>> for Verdict {
    fn from(result: Result<(), Failure>) -> Self {
        match result {
            Ok(()) => Verdict::valid(),
            Err(failure) => Verdict::invalid(failure),
        }
    }
}

/// Checks 2 and 3: every sticker detected and nine of each face color.
///
/// A state passing this is "theoretically fixable": any remaining problem
/// could come from faces captured in the wrong order or orientation.
pub fn check_census(state: &CubeState) -> Result<(), Failure> {
    let counts = state.color_counts();

    let unknown = counts.get(Color::Unknown);
    if unknown > 0 {
        return Err(Failure::UnknownStickers { count: unknown });
    }

    let unbalanced = counts.unbalanced();
    if !unbalanced.is_empty() {
        return Err(Failure::ColorCounts { counts: unbalanced });
    }
    Ok(())
}

/// Check 4: each face's center is that face's identity color.
pub fn check_centers(state: &CubeState) -> Result<(), Failure> {
    for face in 0..NUM_FACES {
        let expected = Color::FACES[face];
        let found = state.center(face);
        if found != expected {
            return Err(Failure::WrongCenter {
                face: expected,
                found,
            });
        }
    }
    Ok(())
}

/// Check 5: every edge is a real, distinct edge piece.
pub fn check_edges(state: &CubeState) -> Result<(), Failure> {
    let mut seen_edges: FxHashSet<[Color; 2]> = FxHashSet::default();

    for (slot, edge) in extract_edges(state).iter().enumerate() {
        let colors = edge.colors;
        if edge.has_repeated_color() {
            return Err(Failure::EdgeRepeatedColor { slot, colors });
        }
        if edge.has_opposite_colors() {
            return Err(Failure::EdgeOppositeColors { slot, colors });
        }
        if !seen_edges.insert(edge.key()) {
            return Err(Failure::DuplicateEdge { slot, colors });
        }
    }

    if seen_edges.len() != NUM_EDGES {
        return Err(Failure::EdgeCount {
            found: seen_edges.len(),
        });
    }
    Ok(())
}

/// Check 6: every corner is a real, distinct corner piece.
pub fn check_corners(state: &CubeState) -> Result<(), Failure> {
    let mut seen_corners: FxHashSet<[Color; 3]> = FxHashSet::default();

    for (slot, corner) in extract_corners(state).iter().enumerate() {
        let colors = corner.colors;
        if corner.has_repeated_color() {
            return Err(Failure::CornerRepeatedColor { slot, colors });
        }
        if corner.has_opposite_colors() {
            return Err(Failure::CornerOppositeColors { slot, colors });
        }
        if !seen_corners.insert(corner.key()) {
            return Err(Failure::DuplicateCorner { slot, colors });
        }
    }

    if seen_corners.len() != NUM_CORNERS {
        return Err(Failure::CornerCount {
            found: seen_corners.len(),
        });
    }
    Ok(())
}

/// All structural checks (2 to 6) in order.
pub fn check_structure(state: &CubeState) -> Result<(), Failure> {
    check_census(state)?;
    check_centers(state)?;
    check_edges(state)?;
    check_corners(state)
}

/// Full validation: structure, then parity.
pub fn validate(state: &CubeState) -> Verdict {
    check_structure(state)
        .and_then(|()| parity::check_parity(state))
        .into()
}

/// Full validation starting from raw color names.
///
/// Adds the boundary checks a typed [`CubeState`] cannot fail: the sticker
/// count and labels outside the canonical spelling.
pub fn validate_labels<S: AsRef<str>>(labels: &[S]) -> Verdict {
    if labels.len() != STICKER_COUNT {
        return Verdict::invalid(Failure::Length {
            found: labels.len(),
        });
    }

    let unknown = labels
        .iter()
        .filter(|label| label.as_ref() == Color::Unknown.name())
        .count();
    if unknown > 0 {
        return Verdict::invalid(Failure::UnknownStickers { count: unknown });
    }

    let mut colors = Vec::with_capacity(STICKER_COUNT);
    for label in labels {
        match label.as_ref().parse::<Color>() {
            Ok(color) => colors.push(color),
            Err(_) => {
                return Verdict::invalid(Failure::UnexpectedColor {
                    label: label.as_ref().to_string(),
                })
            }
        }
    }

    match CubeState::from_colors(&colors) {
        Ok(state) => validate(&state),
        Err(_) => Verdict::invalid(Failure::Length {
            found: colors.len(),
        }),
    }
}
