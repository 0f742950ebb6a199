//! Edge and corner pieces and the fixed tables that locate their stickers.
//!
//! The tables are the geometric ground truth of the whole crate: each slot
//! lists the global sticker indices that sit on one physical edge or corner
//! cubie. Corner stickers are listed clockwise (seen from outside the
//! corner) starting on the White or Yellow face; edge stickers start on the
//! White or Yellow face, or on the Green or Blue face for the four edges of
//! the middle layer. Twist and flip are measured against that first sticker.

use crate::cube::{Color, CubeState, FACE_SIZE};

/// Number of edge pieces.
pub const NUM_EDGES: usize = 12;

/// Number of corner pieces.
pub const NUM_CORNERS: usize = 8;

/// The stickers of one edge position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeSlot {
    /// Face-notation name, e.g. `UF`.
    pub name: &'static str,
    pub stickers: [usize; 2],
}

/// The stickers of one corner position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CornerSlot {
    /// Face-notation name, e.g. `URF`.
    pub name: &'static str,
    pub stickers: [usize; 3],
}

/// The twelve edge positions.
pub const EDGE_SLOTS: [EdgeSlot; NUM_EDGES] = [
    EdgeSlot { name: "UR", stickers: [5, 10] },
    EdgeSlot { name: "UF", stickers: [7, 19] },
    EdgeSlot { name: "UL", stickers: [3, 37] },
    EdgeSlot { name: "UB", stickers: [1, 46] },
    EdgeSlot { name: "DR", stickers: [32, 16] },
    EdgeSlot { name: "DF", stickers: [28, 25] },
    EdgeSlot { name: "DL", stickers: [30, 43] },
    EdgeSlot { name: "DB", stickers: [34, 52] },
    EdgeSlot { name: "FR", stickers: [23, 12] },
    EdgeSlot { name: "FL", stickers: [21, 41] },
    EdgeSlot { name: "BL", stickers: [50, 39] },
    EdgeSlot { name: "BR", stickers: [48, 14] },
];

/// The eight corner positions.
pub const CORNER_SLOTS: [CornerSlot; NUM_CORNERS] = [
    CornerSlot { name: "URF", stickers: [8, 9, 20] },
    CornerSlot { name: "UFL", stickers: [6, 18, 38] },
    CornerSlot { name: "ULB", stickers: [0, 36, 47] },
    CornerSlot { name: "UBR", stickers: [2, 45, 11] },
    CornerSlot { name: "DFR", stickers: [29, 26, 15] },
    CornerSlot { name: "DLF", stickers: [27, 44, 24] },
    CornerSlot { name: "DBL", stickers: [33, 53, 42] },
    CornerSlot { name: "DRB", stickers: [35, 17, 51] },
];

/// Color of the face a sticker index belongs to in the solved cube.
#[inline]
const fn home_color(index: usize) -> Color {
    Color::FACES[index / FACE_SIZE]
}

/// The two stickers of an edge, in slot order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgePiece {
    pub colors: [Color; 2],
}

impl EdgePiece {
    /// The piece that belongs in `slot` on a solved cube.
    pub const fn home(slot: usize) -> Self {
        let [a, b] = EDGE_SLOTS[slot].stickers;
        Self {
            colors: [home_color(a), home_color(b)],
        }
    }

    /// Unordered identity of the piece.
    pub fn key(&self) -> [Color; 2] {
        let mut key = self.colors;
        key.sort_unstable();
        key
    }

    pub fn has_repeated_color(&self) -> bool {
        self.colors[0] == self.colors[1]
    }

    pub fn has_opposite_colors(&self) -> bool {
        self.colors[0].is_opposite(self.colors[1])
    }
}

/// The three stickers of a corner, in slot order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CornerPiece {
    pub colors: [Color; 3],
}

impl CornerPiece {
    /// The piece that belongs in `slot` on a solved cube.
    pub const fn home(slot: usize) -> Self {
        let [a, b, c] = CORNER_SLOTS[slot].stickers;
        Self {
            colors: [home_color(a), home_color(b), home_color(c)],
        }
    }

    /// Unordered identity of the piece.
    pub fn key(&self) -> [Color; 3] {
        let mut key = self.colors;
        key.sort_unstable();
        key
    }

    pub fn has_repeated_color(&self) -> bool {
        let [a, b, c] = self.colors;
        a == b || b == c || a == c
    }

    pub fn has_opposite_colors(&self) -> bool {
        let [a, b, c] = self.colors;
        a.is_opposite(b) || b.is_opposite(c) || a.is_opposite(c)
    }

    /// Position (0..3) of the White or Yellow sticker, if any.
    pub fn up_down_position(&self) -> Option<usize> {
        self.colors.iter().position(|color| color.is_up_down())
    }
}

/// Reads the twelve edges of a state in slot order.
pub fn extract_edges(state: &CubeState) -> [EdgePiece; NUM_EDGES] {
    std::array::from_fn(|slot| EdgePiece {
        colors: EDGE_SLOTS[slot].stickers.map(|index| state.sticker(index)),
    })
}

/// Reads the eight corners of a state in slot order.
pub fn extract_corners(state: &CubeState) -> [CornerPiece; NUM_CORNERS] {
    std::array::from_fn(|slot| CornerPiece {
        colors: CORNER_SLOTS[slot].stickers.map(|index| state.sticker(index)),
    })
}

/// Colors joined with dashes, e.g. `White-Red-Green`.
pub fn format_colors(colors: &[Color]) -> String {
    colors
        .iter()
        .map(|color| color.name())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::STICKER_COUNT;
    use crate::geometry::{Coord, STICKER_PLACEMENTS};

    fn determinant(a: Coord, b: Coord, c: Coord) -> i32 {
        a.0 * (b.1 * c.2 - b.2 * c.1) - a.1 * (b.0 * c.2 - b.2 * c.0)
            + a.2 * (b.0 * c.1 - b.1 * c.0)
    }

    #[test]
    fn test_slots_cover_every_non_center_sticker_once() {
        let mut seen = [0u8; STICKER_COUNT];
        for slot in &EDGE_SLOTS {
            for &index in &slot.stickers {
                seen[index] += 1;
            }
        }
        for slot in &CORNER_SLOTS {
            for &index in &slot.stickers {
                seen[index] += 1;
            }
        }
        for (index, &count) in seen.iter().enumerate() {
            let expected = u8::from(index % FACE_SIZE != 4);
            assert_eq!(count, expected, "Sticker {index} used {count} times");
        }
    }

    #[test]
    fn test_edge_stickers_share_one_cubie() {
        let mut cubies = Vec::new();
        for slot in &EDGE_SLOTS {
            let [a, b] = slot.stickers.map(|index| STICKER_PLACEMENTS[index]);
            assert_eq!(a.cubie, b.cubie, "Edge {} spans two cubies", slot.name);
            let (x, y, z) = a.cubie;
            assert_eq!([x, y, z].iter().filter(|&&c| c != 0).count(), 2);
            assert!(!cubies.contains(&a.cubie), "Edge {} repeats a cubie", slot.name);
            cubies.push(a.cubie);
        }
    }

    #[test]
    fn test_corner_stickers_share_one_cubie() {
        let mut cubies = Vec::new();
        for slot in &CORNER_SLOTS {
            let [a, b, c] = slot.stickers.map(|index| STICKER_PLACEMENTS[index]);
            assert_eq!(a.cubie, b.cubie, "Corner {} spans two cubies", slot.name);
            assert_eq!(a.cubie, c.cubie, "Corner {} spans two cubies", slot.name);
            assert!(!cubies.contains(&a.cubie), "Corner {} repeats a cubie", slot.name);
            cubies.push(a.cubie);
        }
    }

    #[test]
    fn test_corner_stickers_listed_with_same_handedness() {
        for slot in &CORNER_SLOTS {
            let [a, b, c] = slot.stickers.map(|index| STICKER_PLACEMENTS[index].normal);
            assert_eq!(
                determinant(a, b, c),
                -1,
                "Corner {} is not listed clockwise",
                slot.name
            );
        }
    }

    #[test]
    fn test_slot_names_match_sticker_faces() {
        for (index, slot) in EDGE_SLOTS.iter().enumerate() {
            let letters: String = EdgePiece::home(index)
                .colors
                .iter()
                .map(|color| color.face_letter().unwrap())
                .collect();
            assert_eq!(letters, slot.name);
        }
        for (index, slot) in CORNER_SLOTS.iter().enumerate() {
            let letters: String = CornerPiece::home(index)
                .colors
                .iter()
                .map(|color| color.face_letter().unwrap())
                .collect();
            assert_eq!(letters, slot.name);
        }
    }

    #[test]
    fn test_reference_sticker_comes_first() {
        for slot in 0..NUM_EDGES {
            let [first, _] = EdgePiece::home(slot).colors;
            assert!(
                first.is_up_down() || matches!(first, Color::Green | Color::Blue),
                "Edge {} starts on {first}",
                EDGE_SLOTS[slot].name
            );
        }
        for slot in 0..NUM_CORNERS {
            assert_eq!(CornerPiece::home(slot).up_down_position(), Some(0));
        }
    }

    #[test]
    fn test_extract_solved_pieces_are_home() {
        let state = CubeState::solved();
        let edges = extract_edges(&state);
        let corners = extract_corners(&state);
        for (slot, edge) in edges.iter().enumerate() {
            assert_eq!(*edge, EdgePiece::home(slot));
            assert!(!edge.has_repeated_color() && !edge.has_opposite_colors());
        }
        for (slot, corner) in corners.iter().enumerate() {
            assert_eq!(*corner, CornerPiece::home(slot));
            assert!(!corner.has_repeated_color() && !corner.has_opposite_colors());
        }
    }

    #[test]
    fn test_piece_keys_ignore_sticker_order() {
        let a = EdgePiece { colors: [Color::Red, Color::White] };
        let b = EdgePiece { colors: [Color::White, Color::Red] };
        assert_eq!(a.key(), b.key());

        let c = CornerPiece { colors: [Color::Green, Color::White, Color::Red] };
        assert_eq!(c.key(), CornerPiece::home(0).key());
        assert_eq!(c.up_down_position(), Some(1));
    }

    #[test]
    fn test_format_colors() {
        assert_eq!(format_colors(&CornerPiece::home(0).colors), "White-Red-Green");
    }
}
