//! Repair of captures whose faces were read in the wrong order or rotation.
//!
//! Repair runs in two stages. First the faces are put in canonical order by
//! their center colors. Then every combination of per-face rotations is tried
//! until one passes full validation. Combination `k` gives face `f` the
//! rotation in base-4 digit `5 - f` of `k`, so White is the slowest-varying
//! face and Blue the fastest. The first valid combination in that order wins,
//! with or without parallel search.

use log::{debug, info, trace};
use rayon::prelude::*;
use serde::Deserialize;

use crate::cube::{Color, CubeState, FACE_SIZE, NUM_FACES};
use crate::geometry::{face_rotations, Rotation};
use crate::validate::{check_census, validate, Verdict};

/// Number of per-face rotation combinations (4^6).
pub const COMBINATIONS: usize = 4096;

/// Maps each captured face slot to the canonical slot it was moved to.
pub type FacePermutation = [usize; NUM_FACES];

/// The permutation that leaves every face in place.
pub const IDENTITY: FacePermutation = [0, 1, 2, 3, 4, 5];

/// How often the sequential search reports progress.
const PROGRESS_INTERVAL: usize = 1024;

/// Search settings, read from the `[repair]` table of the config file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RepairConfig {
    /// Test combinations on the rayon thread pool.
    pub parallel: bool,
    /// Stop after this many combinations.
    pub max_combinations: Option<usize>,
}

impl RepairConfig {
    /// Number of combinations the search will try at most.
    pub fn limit(&self) -> usize {
        self.max_combinations
            .map_or(COMBINATIONS, |cap| cap.min(COMBINATIONS))
    }
}

/// Result of a repair attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Repair {
    /// The repaired state, or the reordered but unrotated state on failure.
    pub fixed_state: CubeState,
    pub face_permutation: FacePermutation,
    /// Rotation applied to each canonical face after reordering.
    pub rotations: [Rotation; NUM_FACES],
    pub succeeded: bool,
    pub combinations_tried: usize,
    /// Verdict on `fixed_state`.
    pub verdict: Verdict,
}

impl Repair {
    pub fn rotation_degrees(&self) -> [u16; NUM_FACES] {
        self.rotations.map(Rotation::degrees)
    }
}

/// Puts faces in canonical order by center color.
///
/// A face whose center is `Unknown`, or repeats a center already placed,
/// fills the first canonical slot left over, in capture order.
pub fn reorder_faces(state: &CubeState) -> (CubeState, FacePermutation) {
    let mut permutation = [usize::MAX; NUM_FACES];
    let mut placed = [false; NUM_FACES];
    let mut deferred = Vec::new();

    for (slot, target) in permutation.iter_mut().enumerate() {
        match state.center(slot).face_index() {
            Some(canonical) if !placed[canonical] => {
                placed[canonical] = true;
                *target = canonical;
            }
            _ => deferred.push(slot),
        }
    }

    let leftover = (0..NUM_FACES).filter(|&canonical| !placed[canonical]);
    for (slot, canonical) in deferred.into_iter().zip(leftover) {
        permutation[slot] = canonical;
    }

    let mut faces = [[Color::Unknown; FACE_SIZE]; NUM_FACES];
    for (slot, &canonical) in permutation.iter().enumerate() {
        faces[canonical] = state.face(slot);
    }
    (CubeState::from_faces(&faces), permutation)
}

/// Per-face rotations of combination `combination`.
pub fn combination_rotations(combination: usize) -> [Rotation; NUM_FACES] {
    std::array::from_fn(|face| {
        Rotation::from_quarters((combination >> (2 * (NUM_FACES - 1 - face))) & 3)
    })
}

/// Index of the combination that applies `rotations`.
pub fn combination_index(rotations: &[Rotation; NUM_FACES]) -> usize {
    rotations
        .iter()
        .fold(0, |index, rotation| (index << 2) | rotation.quarters())
}

/// Heuristic capture quality from 0 to 100.
///
/// Up to 10 points per face color for a count near 9, 5 per correct center
/// and 10 when every sticker was detected.
pub fn quality_score(state: &CubeState) -> u32 {
    let counts = state.color_counts();
    let count_points: u32 = Color::FACES
        .iter()
        .map(|&color| {
            let off_by = counts.get(color).abs_diff(9) as u32;
            10u32.saturating_sub(off_by)
        })
        .sum();
    let center_points = 5 * state
        .centers()
        .iter()
        .zip(Color::FACES)
        .filter(|&(&center, color)| center == color)
        .count() as u32;
    let detection_points = if counts.get(Color::Unknown) == 0 { 10 } else { 0 };

    count_points + center_points + detection_points
}

/// Face contents for every rotation, indexed by `[face][quarters]`.
type RotatedFaces = [[[Color; FACE_SIZE]; 4]; NUM_FACES];

fn candidate(rotated: &RotatedFaces, combination: usize) -> CubeState {
    let rotations = combination_rotations(combination);
    let faces = std::array::from_fn(|face| rotated[face][rotations[face].quarters()]);
    CubeState::from_faces(&faces)
}

/// Reorders and rotates faces until the state validates.
///
/// A state with `Unknown` stickers or a wrong color census is returned
/// unchanged with zero combinations tried.
pub fn repair(state: &CubeState, config: &RepairConfig) -> Repair {
    if let Err(failure) = check_census(state) {
        debug!("Not repairing, capture is not fixable: {failure}");
        return Repair {
            fixed_state: *state,
            face_permutation: IDENTITY,
            rotations: [Rotation::Deg0; NUM_FACES],
            succeeded: false,
            combinations_tried: 0,
            verdict: Verdict::invalid(failure),
        };
    }

    let (reordered, face_permutation) = reorder_faces(state);
    debug!("Reordered faces with permutation {face_permutation:?}");

    let rotated: RotatedFaces = std::array::from_fn(|face| face_rotations(reordered.face(face)));
    let limit = config.limit();
    debug!(
        "Searching {limit} rotation combinations{}",
        if config.parallel { " in parallel" } else { "" }
    );

    let found = if config.parallel {
        (0..limit)
            .into_par_iter()
            .find_first(|&combination| validate(&candidate(&rotated, combination)).is_valid())
    } else {
        (0..limit).find(|&combination| {
            if combination > 0 && combination % PROGRESS_INTERVAL == 0 {
                trace!("Tried {combination} of {limit} combinations");
            }
            validate(&candidate(&rotated, combination)).is_valid()
        })
    };

    match found {
        Some(combination) => {
            let rotations = combination_rotations(combination);
            info!(
                "Repaired after {} combinations, rotations {:?}",
                combination + 1,
                rotations.map(Rotation::degrees)
            );
            Repair {
                fixed_state: candidate(&rotated, combination),
                face_permutation,
                rotations,
                succeeded: true,
                combinations_tried: combination + 1,
                verdict: Verdict::valid(),
            }
        }
        None => {
            let verdict = validate(&reordered);
            info!(
                "No valid rotation among {limit} combinations: {}",
                verdict.reason()
            );
            Repair {
                fixed_state: reordered,
                face_permutation,
                rotations: [Rotation::Deg0; NUM_FACES],
                succeeded: false,
                combinations_tried: limit,
                verdict,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::rotate_faces;
    use crate::moves::{apply_moves, parse_moves};
    use crate::validate::Category;

    fn after(moves: &str) -> CubeState {
        apply_moves(&CubeState::solved(), &parse_moves(moves).unwrap())
    }

    fn inverse(rotations: &[Rotation; NUM_FACES]) -> [Rotation; NUM_FACES] {
        rotations.map(|rotation| Rotation::from_quarters((4 - rotation.quarters()) % 4))
    }

    fn with_faces_swapped(state: &CubeState, a: usize, b: usize) -> CubeState {
        let mut faces: [[Color; FACE_SIZE]; NUM_FACES] = std::array::from_fn(|f| state.face(f));
        faces.swap(a, b);
        CubeState::from_faces(&faces)
    }

    #[test]
    fn test_combination_order_varies_blue_fastest() {
        use Rotation::*;
        assert_eq!(combination_rotations(0), [Deg0; NUM_FACES]);
        assert_eq!(
            combination_rotations(1),
            [Deg0, Deg0, Deg0, Deg0, Deg0, Deg90]
        );
        assert_eq!(
            combination_rotations(1024),
            [Deg90, Deg0, Deg0, Deg0, Deg0, Deg0]
        );
        assert_eq!(combination_rotations(COMBINATIONS - 1), [Deg270; NUM_FACES]);

        for combination in [0, 7, 1000, 2049, 4095] {
            assert_eq!(
                combination_index(&combination_rotations(combination)),
                combination
            );
        }
    }

    #[test]
    fn test_reorder_faces_by_center() {
        let swapped = with_faces_swapped(&CubeState::solved(), 1, 2);
        let (reordered, permutation) = reorder_faces(&swapped);
        assert_eq!(reordered, CubeState::solved());
        assert_eq!(permutation, [0, 2, 1, 3, 4, 5]);
    }

    #[test]
    fn test_reorder_defers_repeated_center() {
        // slot 0 holds the Red face, slot 1 the White face with an Orange center
        let swapped = with_faces_swapped(&CubeState::solved(), 0, 1);
        let mut stickers = *swapped.stickers();
        stickers[13] = Color::Orange;
        let (_, permutation) = reorder_faces(&CubeState::new(stickers));
        assert_eq!(permutation, [1, 4, 2, 3, 0, 5]);
    }

    #[test]
    fn test_quality_score() {
        assert_eq!(quality_score(&CubeState::solved()), 100);

        let mut stickers = *CubeState::solved().stickers();
        stickers[0] = Color::Unknown;
        assert_eq!(quality_score(&CubeState::new(stickers)), 89);

        let swapped = with_faces_swapped(&CubeState::solved(), 0, 1);
        assert_eq!(quality_score(&swapped), 90);
    }

    #[test]
    fn test_valid_state_is_left_alone() {
        let state = after("F R' U2 L D' B");
        let repair = repair(&state, &RepairConfig::default());
        assert!(repair.succeeded);
        assert_eq!(repair.fixed_state, state);
        assert_eq!(repair.face_permutation, IDENTITY);
        assert_eq!(repair.rotation_degrees(), [0; NUM_FACES]);
        assert_eq!(repair.combinations_tried, 1);
        assert!(repair.verdict.is_valid());
    }

    #[test]
    fn test_wrong_counts_are_refused() {
        let mut stickers = *CubeState::solved().stickers();
        stickers[0] = Color::Red;
        let state = CubeState::new(stickers);

        let repair = repair(&state, &RepairConfig::default());
        assert!(!repair.succeeded);
        assert_eq!(repair.combinations_tried, 0);
        assert_eq!(repair.fixed_state, state);
        assert_eq!(repair.face_permutation, IDENTITY);
        assert_eq!(
            repair.verdict.failure().map(|failure| failure.category()),
            Some(Category::Detection)
        );
        assert_eq!(
            repair.verdict.reason(),
            "Wrong color counts: White: 8, Red: 10 (expected 9 each)"
        );
    }

    #[test]
    fn test_unknown_stickers_are_refused() {
        let mut stickers = *after("R U").stickers();
        stickers[30] = Color::Unknown;
        let repair = repair(&CubeState::new(stickers), &RepairConfig::default());
        assert!(!repair.succeeded);
        assert_eq!(repair.combinations_tried, 0);
    }

    #[test]
    fn test_rotated_faces_are_repaired() {
        let state = after("R U R' U' F2 D L' B2 U R2 F' L D2 B");
        let scramble = [
            Rotation::Deg90,
            Rotation::Deg0,
            Rotation::Deg270,
            Rotation::Deg0,
            Rotation::Deg180,
            Rotation::Deg90,
        ];
        let captured = rotate_faces(&state, &scramble);

        let repair = repair(&captured, &RepairConfig::default());
        assert!(repair.succeeded, "Repair failed: {}", repair.verdict.reason());
        assert!(validate(&repair.fixed_state).is_valid());
        assert!(repair.combinations_tried <= combination_index(&inverse(&scramble)) + 1);
        assert_eq!(
            rotate_faces(&captured, &repair.rotations),
            repair.fixed_state
        );
    }

    #[test]
    fn test_shuffled_faces_are_repaired() {
        let state = after("L2 F U' R B D2");
        let captured = with_faces_swapped(&state, 0, 3);

        let repair = repair(&captured, &RepairConfig::default());
        assert!(repair.succeeded);
        assert_eq!(repair.face_permutation, [3, 1, 2, 0, 4, 5]);
        assert_eq!(repair.fixed_state, state);
        assert_eq!(repair.combinations_tried, 1);
    }

    #[test]
    fn test_parallel_search_matches_sequential() {
        let state = after("B' D R2 F L' U2 R");
        let captured = rotate_faces(
            &state,
            &[
                Rotation::Deg180,
                Rotation::Deg90,
                Rotation::Deg0,
                Rotation::Deg270,
                Rotation::Deg0,
                Rotation::Deg90,
            ],
        );

        let sequential = repair(&captured, &RepairConfig::default());
        let parallel = repair(
            &captured,
            &RepairConfig {
                parallel: true,
                ..RepairConfig::default()
            },
        );
        assert!(sequential.succeeded);
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_combination_cap_falls_back_to_reordered_state() {
        // U turned a quarter after R leaves a Green-Green edge on UF
        let captured = rotate_faces(
            &after("R"),
            &[
                Rotation::Deg90,
                Rotation::Deg0,
                Rotation::Deg0,
                Rotation::Deg0,
                Rotation::Deg0,
                Rotation::Deg0,
            ],
        );
        assert!(!validate(&captured).is_valid());

        let config = RepairConfig {
            max_combinations: Some(1),
            ..RepairConfig::default()
        };
        let repair = repair(&captured, &config);
        assert!(!repair.succeeded);
        assert_eq!(repair.combinations_tried, 1);
        assert_eq!(repair.fixed_state, captured);
        assert_eq!(repair.verdict, validate(&captured));

        let uncapped = super::repair(&captured, &RepairConfig::default());
        assert!(uncapped.succeeded);
    }

    #[test]
    fn test_exhausted_search_reports_reordered_state() {
        // a mirrored corner survives every face rotation
        let mut stickers = *CubeState::solved().stickers();
        stickers.swap(9, 20);
        let state = CubeState::new(stickers);

        let repair = repair(&state, &RepairConfig::default());
        assert!(!repair.succeeded);
        assert_eq!(repair.combinations_tried, COMBINATIONS);
        assert_eq!(repair.fixed_state, state);
        assert_eq!(repair.rotation_degrees(), [0; NUM_FACES]);
        assert_eq!(
            repair.verdict.failure().map(|failure| failure.category()),
            Some(Category::Parity)
        );
    }

    #[test]
    fn test_config_limit() {
        assert_eq!(RepairConfig::default().limit(), COMBINATIONS);
        let capped = RepairConfig {
            max_combinations: Some(10),
            ..RepairConfig::default()
        };
        assert_eq!(capped.limit(), 10);
        let oversized = RepairConfig {
            max_combinations: Some(1 << 20),
            ..RepairConfig::default()
        };
        assert_eq!(oversized.limit(), COMBINATIONS);
    }
}
