//! Cube state representation and addressing.
//!
//! A state is a flat array of 54 stickers: six faces of nine, in the fixed
//! face order White, Red, Green, Yellow, Orange, Blue (U R F D L B in face
//! notation). Each face is stored row-major as seen from outside the cube:
//!
//! ```text
//! 0 1 2
//! 3 4 5
//! 6 7 8
//! ```
//!
//! so sticker `local` of face `face` lives at `face * 9 + local`.

use std::fmt;
use std::str::FromStr;

use crate::input::InputError;

/// Stickers per face.
pub const FACE_SIZE: usize = 9;

/// Faces per cube.
pub const NUM_FACES: usize = 6;

/// Stickers per cube.
pub const STICKER_COUNT: usize = NUM_FACES * FACE_SIZE;

/// Local index of the center sticker on every face.
pub const CENTER: usize = 4;

/// A sticker color, or `Unknown` when detection could not classify it.
///
/// Variant order is the canonical face order, so `color as usize` is the
/// face index for the six real colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Color {
    White,
    Red,
    Green,
    Yellow,
    Orange,
    Blue,
    Unknown,
}

impl Color {
    /// The six face colors in canonical face order.
    pub const FACES: [Color; NUM_FACES] = [
        Color::White,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Orange,
        Color::Blue,
    ];

    /// Canonical, case-sensitive spelling.
    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Red => "Red",
            Color::Green => "Green",
            Color::Yellow => "Yellow",
            Color::Orange => "Orange",
            Color::Blue => "Blue",
            Color::Unknown => "Unknown",
        }
    }

    /// Index of the face this color identifies, `None` for `Unknown`.
    pub const fn face_index(self) -> Option<usize> {
        match self {
            Color::Unknown => None,
            color => Some(color as usize),
        }
    }

    /// The color of the face on the other side of the cube.
    pub const fn opposite(self) -> Option<Color> {
        match self {
            Color::White => Some(Color::Yellow),
            Color::Yellow => Some(Color::White),
            Color::Red => Some(Color::Orange),
            Color::Orange => Some(Color::Red),
            Color::Green => Some(Color::Blue),
            Color::Blue => Some(Color::Green),
            Color::Unknown => None,
        }
    }

    /// Whether `other` sits on the opposite face.
    pub fn is_opposite(self, other: Color) -> bool {
        self.opposite() == Some(other)
    }

    /// Face notation letter consumed by move solvers (White→U, Red→R,
    /// Green→F, Yellow→D, Orange→L, Blue→B).
    pub const fn face_letter(self) -> Option<char> {
        match self {
            Color::White => Some('U'),
            Color::Red => Some('R'),
            Color::Green => Some('F'),
            Color::Yellow => Some('D'),
            Color::Orange => Some('L'),
            Color::Blue => Some('B'),
            Color::Unknown => None,
        }
    }

    /// Inverse of [`Color::face_letter`].
    pub const fn from_face_letter(letter: char) -> Option<Color> {
        match letter {
            'U' => Some(Color::White),
            'R' => Some(Color::Red),
            'F' => Some(Color::Green),
            'D' => Some(Color::Yellow),
            'L' => Some(Color::Orange),
            'B' => Some(Color::Blue),
            _ => None,
        }
    }

    /// Single-letter initial used in nets; `X` for `Unknown`.
    pub const fn initial(self) -> char {
        match self {
            Color::White => 'W',
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Yellow => 'Y',
            Color::Orange => 'O',
            Color::Blue => 'B',
            Color::Unknown => 'X',
        }
    }

    /// Inverse of [`Color::initial`].
    pub const fn from_initial(letter: char) -> Option<Color> {
        match letter {
            'W' => Some(Color::White),
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            'Y' => Some(Color::Yellow),
            'O' => Some(Color::Orange),
            'B' => Some(Color::Blue),
            'X' => Some(Color::Unknown),
            _ => None,
        }
    }

    /// White or Yellow: the colors that fix corner twist and edge flip.
    pub const fn is_up_down(self) -> bool {
        matches!(self, Color::White | Color::Yellow)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "White" => Ok(Color::White),
            "Red" => Ok(Color::Red),
            "Green" => Ok(Color::Green),
            "Yellow" => Ok(Color::Yellow),
            "Orange" => Ok(Color::Orange),
            "Blue" => Ok(Color::Blue),
            "Unknown" => Ok(Color::Unknown),
            other => Err(InputError::UnexpectedColor {
                label: other.to_string(),
            }),
        }
    }
}

/// Converts a (face, local) address to a global sticker index.
#[inline(always)]
pub const fn sticker_index(face: usize, local: usize) -> usize {
    face * FACE_SIZE + local
}

/// Converts a global sticker index to its (face, local) address.
#[inline(always)]
pub const fn sticker_address(index: usize) -> (usize, usize) {
    (index / FACE_SIZE, index % FACE_SIZE)
}

/// Number of stickers of each color, indexed by `Color as usize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorCounts([usize; NUM_FACES + 1]);

impl ColorCounts {
    pub fn get(&self, color: Color) -> usize {
        self.0[color as usize]
    }

    /// Face colors whose count is not exactly nine, in face order.
    pub fn unbalanced(&self) -> Vec<(Color, usize)> {
        Color::FACES
            .iter()
            .map(|&color| (color, self.get(color)))
            .filter(|&(_, count)| count != FACE_SIZE)
            .collect()
    }
}

/// The 54 stickers of a captured cube.
///
/// Never mutated in place: rotations and reorderings build new states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CubeState {
    stickers: [Color; STICKER_COUNT],
}

impl CubeState {
    pub const fn new(stickers: [Color; STICKER_COUNT]) -> Self {
        Self { stickers }
    }

    /// Every face uniformly its own color.
    pub const fn solved() -> Self {
        let mut stickers = [Color::Unknown; STICKER_COUNT];
        let mut index = 0;
        while index < STICKER_COUNT {
            stickers[index] = Color::FACES[index / FACE_SIZE];
            index += 1;
        }
        Self { stickers }
    }

    /// Builds a state from a slice, rejecting anything but 54 stickers.
    pub fn from_colors(colors: &[Color]) -> Result<Self, InputError> {
        let stickers: [Color; STICKER_COUNT] =
            colors.try_into().map_err(|_| InputError::WrongLength {
                found: colors.len(),
            })?;
        Ok(Self { stickers })
    }

    /// Parses canonical color names (`White`, ..., `Unknown`).
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Result<Self, InputError> {
        if labels.len() != STICKER_COUNT {
            return Err(InputError::WrongLength {
                found: labels.len(),
            });
        }
        let colors = labels
            .iter()
            .map(|label| label.as_ref().parse())
            .collect::<Result<Vec<Color>, _>>()?;
        Self::from_colors(&colors)
    }

    pub fn stickers(&self) -> &[Color; STICKER_COUNT] {
        &self.stickers
    }

    #[inline]
    pub fn sticker(&self, index: usize) -> Color {
        self.stickers[index]
    }

    /// The nine stickers of one face, row-major.
    pub fn face(&self, face: usize) -> [Color; FACE_SIZE] {
        std::array::from_fn(|local| self.stickers[sticker_index(face, local)])
    }

    pub fn center(&self, face: usize) -> Color {
        self.stickers[sticker_index(face, CENTER)]
    }

    pub fn centers(&self) -> [Color; NUM_FACES] {
        std::array::from_fn(|face| self.center(face))
    }

    /// Returns a copy with one face replaced.
    pub fn with_face(&self, face: usize, stickers: [Color; FACE_SIZE]) -> Self {
        let mut next = *self;
        next.stickers[sticker_index(face, 0)..sticker_index(face + 1, 0)]
            .copy_from_slice(&stickers);
        next
    }

    /// Assembles a state from six faces in face order.
    pub fn from_faces(faces: &[[Color; FACE_SIZE]; NUM_FACES]) -> Self {
        Self {
            stickers: std::array::from_fn(|index| {
                let (face, local) = sticker_address(index);
                faces[face][local]
            }),
        }
    }

    pub fn color_counts(&self) -> ColorCounts {
        let mut counts = [0usize; NUM_FACES + 1];
        for &color in &self.stickers {
            counts[color as usize] += 1;
        }
        ColorCounts(counts)
    }

    /// Canonical names of all 54 stickers.
    pub fn labels(&self) -> Vec<&'static str> {
        self.stickers.iter().map(|color| color.name()).collect()
    }
}

impl Default for CubeState {
    fn default() -> Self {
        Self::solved()
    }
}

/// Formats a state as an unfolded net with color initials.
///
/// White on top, Orange/Green/Red/Blue across the middle, Yellow below:
///
/// ```text
///       W W W
///       W W W
///       W W W
/// O O O G G G R R R B B B
/// ...
/// ```
pub fn format_net(state: &CubeState) -> String {
    // face indices in net layout
    const UP: usize = 0;
    const RIGHT: usize = 1;
    const FRONT: usize = 2;
    const DOWN: usize = 3;
    const LEFT: usize = 4;
    const BACK: usize = 5;

    let row_text = |face: usize, row: usize| -> String {
        (0..3)
            .map(|col| state.sticker(sticker_index(face, row * 3 + col)).initial().to_string())
            .collect::<Vec<_>>()
            .join(" ")
    };

    let mut output = String::new();
    for row in 0..3 {
        output.push_str("      ");
        output.push_str(&row_text(UP, row));
        output.push('\n');
    }
    for row in 0..3 {
        let band: Vec<String> = [LEFT, FRONT, RIGHT, BACK]
            .iter()
            .map(|&face| row_text(face, row))
            .collect();
        output.push_str(&band.join(" "));
        output.push('\n');
    }
    for row in 0..3 {
        output.push_str("      ");
        output.push_str(&row_text(DOWN, row));
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sticker_address_roundtrip() {
        for index in 0..STICKER_COUNT {
            let (face, local) = sticker_address(index);
            assert!(face < NUM_FACES && local < FACE_SIZE);
            assert_eq!(
                sticker_index(face, local),
                index,
                "Roundtrip failed for index {index}"
            );
        }
    }

    #[test]
    fn test_solved_faces_are_uniform() {
        let state = CubeState::solved();
        for (face, &color) in Color::FACES.iter().enumerate() {
            assert_eq!(state.face(face), [color; FACE_SIZE]);
            assert_eq!(state.center(face), color);
        }
    }

    #[test]
    fn test_color_letters_roundtrip() {
        for color in Color::FACES {
            let letter = color.face_letter().unwrap();
            assert_eq!(Color::from_face_letter(letter), Some(color));
            assert_eq!(Color::from_initial(color.initial()), Some(color));
            assert_eq!(color.name().parse::<Color>().unwrap(), color);
            let opposite = color.opposite().unwrap();
            assert_eq!(opposite.opposite(), Some(color));
            assert!(color.is_opposite(opposite));
        }
        assert_eq!(Color::Unknown.face_letter(), None);
        assert_eq!(Color::from_initial('X'), Some(Color::Unknown));
    }

    #[test]
    fn test_face_letters_match_notation() {
        let letters: String = Color::FACES
            .iter()
            .map(|color| color.face_letter().unwrap())
            .collect();
        assert_eq!(letters, "URFDLB");
    }

    #[test]
    fn test_color_names_are_case_sensitive() {
        assert!(matches!(
            "white".parse::<Color>(),
            Err(InputError::UnexpectedColor { label }) if label == "white"
        ));
        assert!("Purple".parse::<Color>().is_err());
    }

    #[test]
    fn test_from_labels_rejects_wrong_length() {
        let labels = vec!["White"; 53];
        assert!(matches!(
            CubeState::from_labels(&labels),
            Err(InputError::WrongLength { found: 53 })
        ));
    }

    #[test]
    fn test_from_labels_matches_solved() {
        let state = CubeState::solved();
        let parsed = CubeState::from_labels(&state.labels()).unwrap();
        assert_eq!(parsed, state);
    }

    #[test]
    fn test_with_face_replaces_only_that_face() {
        let state = CubeState::solved().with_face(2, [Color::Unknown; FACE_SIZE]);
        assert_eq!(state.face(2), [Color::Unknown; FACE_SIZE]);
        assert_eq!(state.face(1), [Color::Red; FACE_SIZE]);
        assert_eq!(state.face(3), [Color::Yellow; FACE_SIZE]);
    }

    #[test]
    fn test_color_counts_report_unbalanced_colors() {
        let mut stickers = *CubeState::solved().stickers();
        stickers[0] = Color::Red;
        stickers[1] = Color::Unknown;
        let counts = CubeState::new(stickers).color_counts();
        assert_eq!(counts.get(Color::Unknown), 1);
        assert_eq!(
            counts.unbalanced(),
            vec![(Color::White, 7), (Color::Red, 10)]
        );
    }

    #[test]
    fn test_format_net_snapshot() {
        let mut stickers = *CubeState::solved().stickers();
        stickers[0] = Color::Unknown;
        let net = format_net(&CubeState::new(stickers));
        insta::assert_snapshot!(net, @r"
              X W W
              W W W
              W W W
        O O O G G G R R R B B B
        O O O G G G R R R B B B
        O O O G G G R R R B B B
              Y Y Y
              Y Y Y
              Y Y Y
        ");
    }
}
