//! Face rotations and 3D sticker placement.
//!
//! Face rotations permute the nine stickers of one face around its center;
//! they are what the repair search tries when a face was captured with the
//! camera held at the wrong angle.
//!
//! Sticker placement maps each of the 54 stickers to the cubie it sits on
//! and the outward normal of its face, in a right-handed frame with x
//! pointing right, y up and z towards the viewer (Green face). The edge and
//! corner tables in `pieces` are checked against it, and physical quarter
//! turns are derived from it.

use crate::cube::{sticker_address, Color, CubeState, FACE_SIZE, NUM_FACES, STICKER_COUNT};

/// An integer 3D vector.
pub type Coord = (i32, i32, i32);

/// A 90° clockwise face rotation: sticker `i` of the rotated face is taken
/// from sticker `QUARTER_TURN[i]` of the unrotated face.
///
/// ```text
/// 0 1 2      6 3 0
/// 3 4 5  ->  7 4 1
/// 6 7 8      8 5 2
/// ```
pub const QUARTER_TURN: [usize; FACE_SIZE] = [6, 3, 0, 7, 4, 1, 8, 5, 2];

/// How far a face is rotated clockwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    pub const fn from_quarters(quarters: usize) -> Self {
        Self::ALL[quarters % 4]
    }

    pub const fn quarters(self) -> usize {
        self as usize
    }

    pub const fn degrees(self) -> u16 {
        self as u16 * 90
    }
}

/// Builds the four face rotation tables by composing [`QUARTER_TURN`].
const fn build_face_rotation_table() -> [[usize; FACE_SIZE]; 4] {
    let mut table = [[0usize; FACE_SIZE]; 4];

    let mut local = 0;
    while local < FACE_SIZE {
        table[0][local] = local;
        local += 1;
    }

    let mut quarters = 1;
    while quarters < 4 {
        let mut local = 0;
        while local < FACE_SIZE {
            table[quarters][local] = table[quarters - 1][QUARTER_TURN[local]];
            local += 1;
        }
        quarters += 1;
    }
    table
}

/// Source sticker for every (rotation, local index) pair.
pub const FACE_ROTATIONS: [[usize; FACE_SIZE]; 4] = build_face_rotation_table();

/// Rotates one face clockwise, leaving the center in place.
#[inline]
pub fn rotate_face(face: [Color; FACE_SIZE], rotation: Rotation) -> [Color; FACE_SIZE] {
    let sources = &FACE_ROTATIONS[rotation.quarters()];
    std::array::from_fn(|local| face[sources[local]])
}

/// All four rotations of a face, indexed by quarter turns.
pub fn face_rotations(face: [Color; FACE_SIZE]) -> [[Color; FACE_SIZE]; 4] {
    Rotation::ALL.map(|rotation| rotate_face(face, rotation))
}

/// Applies an independent rotation to every face.
pub fn rotate_faces(state: &CubeState, rotations: &[Rotation; NUM_FACES]) -> CubeState {
    let faces: [[Color; FACE_SIZE]; NUM_FACES] =
        std::array::from_fn(|face| rotate_face(state.face(face), rotations[face]));
    CubeState::from_faces(&faces)
}

/// Where a sticker sits: its cubie (coordinates in -1..=1) and the outward
/// normal of its face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StickerPlacement {
    pub cubie: Coord,
    pub normal: Coord,
}

/// Outward normal, column direction and row direction of each face, in face
/// order. Rows and columns follow the net as seen from outside the cube.
const FACE_FRAMES: [(Coord, Coord, Coord); NUM_FACES] = [
    // U: columns run left to right, rows back to front
    ((0, 1, 0), (1, 0, 0), (0, 0, 1)),
    // R: columns run front to back
    ((1, 0, 0), (0, 0, -1), (0, -1, 0)),
    // F
    ((0, 0, 1), (1, 0, 0), (0, -1, 0)),
    // D: rows run front to back
    ((0, -1, 0), (1, 0, 0), (0, 0, -1)),
    // L: columns run back to front
    ((-1, 0, 0), (0, 0, 1), (0, -1, 0)),
    // B: columns run right to left
    ((0, 0, -1), (-1, 0, 0), (0, -1, 0)),
];

const fn build_sticker_placements() -> [StickerPlacement; STICKER_COUNT] {
    let mut placements = [StickerPlacement {
        cubie: (0, 0, 0),
        normal: (0, 0, 0),
    }; STICKER_COUNT];

    let mut index = 0;
    while index < STICKER_COUNT {
        let (face, local) = sticker_address(index);
        let (normal, col_dir, row_dir) = FACE_FRAMES[face];
        let col = (local % 3) as i32 - 1;
        let row = (local / 3) as i32 - 1;
        placements[index] = StickerPlacement {
            cubie: (
                normal.0 + col * col_dir.0 + row * row_dir.0,
                normal.1 + col * col_dir.1 + row * row_dir.1,
                normal.2 + col * col_dir.2 + row * row_dir.2,
            ),
            normal,
        };
        index += 1;
    }
    placements
}

/// Placement of every sticker, indexed by global sticker index.
pub const STICKER_PLACEMENTS: [StickerPlacement; STICKER_COUNT] = build_sticker_placements();

#[inline(always)]
const fn coord_eq(a: Coord, b: Coord) -> bool {
    a.0 == b.0 && a.1 == b.1 && a.2 == b.2
}

#[inline(always)]
const fn dot(a: Coord, b: Coord) -> i32 {
    a.0 * b.0 + a.1 * b.1 + a.2 * b.2
}

/// Rotates `point` a quarter turn clockwise as seen looking at `axis` from
/// outside, i.e. by -90° about the unit vector `axis`.
const fn rotate_clockwise(point: Coord, axis: Coord) -> Coord {
    let cross = (
        axis.1 * point.2 - axis.2 * point.1,
        axis.2 * point.0 - axis.0 * point.2,
        axis.0 * point.1 - axis.1 * point.0,
    );
    let along = dot(axis, point);
    (
        -cross.0 + axis.0 * along,
        -cross.1 + axis.1 * along,
        -cross.2 + axis.2 * along,
    )
}

const fn find_sticker(cubie: Coord, normal: Coord) -> usize {
    let mut index = 0;
    while index < STICKER_COUNT {
        let placement = STICKER_PLACEMENTS[index];
        if coord_eq(placement.cubie, cubie) && coord_eq(placement.normal, normal) {
            return index;
        }
        index += 1;
    }
    panic!("no sticker at rotated placement");
}

/// Builds, for one face, the sticker permutation of a clockwise quarter turn
/// of its layer: `table[dest]` is the sticker that moves into `dest`.
const fn build_turn_table(face: usize) -> [usize; STICKER_COUNT] {
    let (axis, _, _) = FACE_FRAMES[face];
    let mut table = [0usize; STICKER_COUNT];

    let mut index = 0;
    while index < STICKER_COUNT {
        table[index] = index;
        index += 1;
    }

    let mut source = 0;
    while source < STICKER_COUNT {
        let placement = STICKER_PLACEMENTS[source];
        // every sticker on a cubie of the turning layer moves
        if dot(placement.cubie, axis) == 1 {
            let dest = find_sticker(
                rotate_clockwise(placement.cubie, axis),
                rotate_clockwise(placement.normal, axis),
            );
            table[dest] = source;
        }
        source += 1;
    }
    table
}

/// Layer quarter-turn permutations, one per face.
pub const TURN_TABLES: [[usize; STICKER_COUNT]; NUM_FACES] = [
    build_turn_table(0),
    build_turn_table(1),
    build_turn_table(2),
    build_turn_table(3),
    build_turn_table(4),
    build_turn_table(5),
];

/// Physically turns the layer of `face` clockwise by `quarters` quarter turns.
///
/// Unlike [`rotate_face`], this also carries the adjacent stickers of the
/// four neighbouring faces along, so a solvable state stays solvable.
pub fn turn(state: &CubeState, face: usize, quarters: usize) -> CubeState {
    let table = &TURN_TABLES[face];
    let mut stickers = *state.stickers();
    for _ in 0..quarters % 4 {
        let previous = stickers;
        for (dest, &source) in table.iter().enumerate() {
            stickers[dest] = previous[source];
        }
    }
    CubeState::new(stickers)
}
