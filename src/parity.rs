//! Solvability invariants of a structurally valid cube.
//!
//! A state with twelve distinct legal edges and eight distinct legal corners
//! can still be impossible to assemble. Three classical invariants decide it:
//!
//! - corner twist: the White/Yellow sticker of each corner sits 0, 1 or 2
//!   steps clockwise from the slot's White/Yellow position; the total must be
//!   a multiple of 3
//! - edge flip: an edge is flipped when its reference color (White/Yellow, or
//!   Green/Blue for middle-layer edges) is off the slot's reference sticker;
//!   the number of flipped edges must be even
//! - permutation: the swaps needed to bring corners home plus the swaps
//!   needed to bring edges home must be even
//!
//! A fourth check rejects mirrored corners, whose two side colors run
//! counter-clockwise; twist alone cannot see them.

use crate::cube::CubeState;
use crate::pieces::{
    extract_corners, extract_edges, CornerPiece, EdgePiece, NUM_CORNERS, NUM_EDGES,
};
use crate::validate::Failure;

/// For each slot, the home slot of the piece found there.
///
/// Returns `None` unless every piece is a real cube piece and each appears
/// exactly once, which structural validation guarantees.
fn home_slots<const N: usize, K: PartialEq>(
    observed: [K; N],
    home: impl Fn(usize) -> K,
) -> Option<[usize; N]> {
    let homes: Vec<K> = (0..N).map(home).collect();
    let mut slots = [0usize; N];
    let mut taken = [false; N];

    for (slot, key) in observed.iter().enumerate() {
        let target = homes.iter().position(|home_key| home_key == key)?;
        if taken[target] {
            return None;
        }
        taken[target] = true;
        slots[slot] = target;
    }
    Some(slots)
}

/// Home slot of every corner piece, by slot.
pub fn corner_permutation(state: &CubeState) -> Option<[usize; NUM_CORNERS]> {
    home_slots(extract_corners(state).map(|corner| corner.key()), |slot| {
        CornerPiece::home(slot).key()
    })
}

/// Home slot of every edge piece, by slot.
pub fn edge_permutation(state: &CubeState) -> Option<[usize; NUM_EDGES]> {
    home_slots(extract_edges(state).map(|edge| edge.key()), |slot| {
        EdgePiece::home(slot).key()
    })
}

/// Minimum number of transpositions that sorts a permutation.
///
/// Repeatedly swaps the occupant of each slot into its target slot until
/// every slot holds its own index. `permutation` must be a bijection on
/// `0..len`.
pub fn count_swaps(permutation: &[usize]) -> usize {
    let mut slots = permutation.to_vec();
    let mut swaps = 0;

    for slot in 0..slots.len() {
        while slots[slot] != slot {
            let target = slots[slot];
            slots.swap(slot, target);
            swaps += 1;
        }
    }
    swaps
}

/// Twist of each corner: 0 when the White/Yellow sticker is on the first
/// slot sticker, +1 one step clockwise, -1 one step counter-clockwise.
pub fn corner_twists(state: &CubeState) -> [i32; NUM_CORNERS] {
    extract_corners(state).map(|corner| match corner.up_down_position() {
        Some(1) => 1,
        Some(2) => -1,
        _ => 0,
    })
}

/// Whether each edge is flipped relative to its slot.
///
/// The piece's reference color is the first color of its home slot, so
/// this needs the edge permutation.
pub fn edge_flips(state: &CubeState, homes: &[usize; NUM_EDGES]) -> [bool; NUM_EDGES] {
    let edges = extract_edges(state);
    std::array::from_fn(|slot| {
        let reference = EdgePiece::home(homes[slot]).colors[0];
        edges[slot].colors[0] != reference
    })
}

/// The first corner whose side colors run the wrong way round.
fn find_mirrored_corner(state: &CubeState, homes: &[usize; NUM_CORNERS]) -> Option<usize> {
    let corners = extract_corners(state);
    (0..NUM_CORNERS).find(|&slot| {
        let observed = corners[slot].colors;
        let expected = CornerPiece::home(homes[slot]).colors;
        let start = corners[slot].up_down_position().unwrap_or(0);
        (0..3).any(|step| observed[(start + step) % 3] != expected[step])
    })
}

/// Checks the parity invariants in order: corner twist, edge flip,
/// permutation parity, then corner chirality.
///
/// Meant for states that passed [`crate::validate::check_structure`];
/// anything else fails with [`Failure::UnmatchedPieces`].
pub fn check_parity(state: &CubeState) -> Result<(), Failure> {
    let (Some(corner_homes), Some(edge_homes)) =
        (corner_permutation(state), edge_permutation(state))
    else {
        return Err(Failure::UnmatchedPieces);
    };

    let sum: i32 = corner_twists(state).iter().sum();
    if sum.rem_euclid(3) != 0 {
        return Err(Failure::CornerTwist { sum });
    }

    let flipped = edge_flips(state, &edge_homes)
        .iter()
        .filter(|&&flipped| flipped)
        .count();
    if flipped % 2 != 0 {
        return Err(Failure::EdgeFlip { flipped });
    }

    let corner_swaps = count_swaps(&corner_homes);
    let edge_swaps = count_swaps(&edge_homes);
    if (corner_swaps + edge_swaps) % 2 != 0 {
        return Err(Failure::PermutationParity {
            corner_swaps,
            edge_swaps,
        });
    }

    if let Some(slot) = find_mirrored_corner(state, &corner_homes) {
        return Err(Failure::MirroredCorner {
            slot,
            colors: extract_corners(state)[slot].colors,
        });
    }
    Ok(())
}
