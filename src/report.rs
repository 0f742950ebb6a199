//! Human-readable breakdown of a state: what every check sees, not just the
//! first failure.

use crate::cube::{Color, CubeState, NUM_FACES};
use crate::parity::{corner_permutation, corner_twists, count_swaps, edge_flips, edge_permutation};
use crate::pieces::{extract_corners, extract_edges, format_colors, CORNER_SLOTS, EDGE_SLOTS};
use crate::repair::quality_score;
use crate::validate::{check_census, validate};

/// Multi-line analysis of `state`.
pub fn analyze(state: &CubeState) -> String {
    let mut output = String::new();

    let counts = state.color_counts();
    output.push_str("Colors:\n");
    for color in Color::FACES {
        output.push_str(&format!("  {}: {}\n", color, counts.get(color)));
    }
    let unknown = counts.get(Color::Unknown);
    if unknown > 0 {
        output.push_str(&format!("  Unknown: {unknown}\n"));
    }

    output.push_str("Centers:\n");
    for face in 0..NUM_FACES {
        let expected = Color::FACES[face];
        let found = state.center(face);
        let letter = expected.face_letter().unwrap_or('?');
        if found == expected {
            output.push_str(&format!("  {letter}: {found}\n"));
        } else {
            output.push_str(&format!("  {letter}: {found} (expected {expected})\n"));
        }
    }

    let edge_homes = edge_permutation(state);
    let flips = edge_homes.map(|homes| edge_flips(state, &homes));
    output.push_str("Edges:\n");
    for (slot, edge) in extract_edges(state).iter().enumerate() {
        let flipped = flips.is_some_and(|flips| flips[slot]);
        output.push_str(&format!(
            "  {} ({}): {}{}\n",
            slot + 1,
            EDGE_SLOTS[slot].name,
            format_colors(&edge.colors),
            if flipped { ", flipped" } else { "" }
        ));
    }

    let twists = corner_twists(state);
    output.push_str("Corners:\n");
    for (slot, corner) in extract_corners(state).iter().enumerate() {
        output.push_str(&format!(
            "  {} ({}): {}, twist {}\n",
            slot + 1,
            CORNER_SLOTS[slot].name,
            format_colors(&corner.colors),
            twists[slot]
        ));
    }

    output.push_str(&format!(
        "Corner twist sum: {}\n",
        twists.iter().sum::<i32>()
    ));
    match flips {
        Some(flips) => output.push_str(&format!(
            "Flipped edges: {}\n",
            flips.iter().filter(|&&flipped| flipped).count()
        )),
        None => output.push_str("Flipped edges: unavailable (edges do not match a cube)\n"),
    }
    match (corner_permutation(state), edge_homes) {
        (Some(corners), Some(edges)) => output.push_str(&format!(
            "Permutation swaps: {} corners, {} edges\n",
            count_swaps(&corners),
            count_swaps(&edges)
        )),
        _ => output.push_str("Permutation swaps: unavailable (pieces do not match a cube)\n"),
    }

    output.push_str(&format!("Quality score: {}\n", quality_score(state)));

    let verdict = validate(state);
    output.push_str(&format!("Verdict: {}\n", verdict.reason()));
    let suggestion = if verdict.is_valid() {
        "not needed"
    } else if check_census(state).is_err() {
        "not possible, sticker detection must be fixed first"
    } else {
        "may help, faces could be misordered or rotated"
    };
    output.push_str(&format!("Repair: {suggestion}\n"));

    output
}
