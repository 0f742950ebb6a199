//! Text input for cube states.
//!
//! Accepted forms, all normalised to canonical color names:
//! - color names separated by whitespace or commas (`White Red ...`)
//! - 54 face-notation letters (`UUUUUUUUURRR...`, U/R/F/D/L/B)
//! - 54 color initials (`WWWWWWWWWRRR...`, W/R/G/Y/O/B)
//!
//! `X` stands for an undetected sticker in every form. A letter string made
//! only of `R` and `B` is read as face notation.

use std::fs;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crate::cube::{Color, CubeState};

/// A cube state that could not be turned into 54 known stickers.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Invalid cube state length: {found} (expected 54)")]
    WrongLength { found: usize },
    #[error("Unexpected color detected: {label}")]
    UnexpectedColor { label: String },
    #[error("Invalid move: {token}")]
    InvalidMove { token: String },
    #[error("Failed to read cube state: {0}")]
    Io(#[from] std::io::Error),
}

/// Splits text into canonical color names without checking the count.
pub fn split_labels(text: &str) -> Vec<String> {
    let text = text.trim();

    let tokens: Vec<&str> = if text.contains(',') {
        text.split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect()
    } else {
        text.split_whitespace().collect()
    };

    if let [token] = tokens.as_slice() {
        if let Some(labels) = decode_letters(token) {
            return labels;
        }
    }

    tokens.into_iter().map(normalize_label).collect()
}

/// Decodes a run of face-notation letters or color initials.
fn decode_letters(token: &str) -> Option<Vec<String>> {
    // a lone letter is a (possibly bad) label, not a one-sticker cube
    if token.chars().count() < 2 {
        return None;
    }
    let letters: Vec<char> = token.chars().map(|c| c.to_ascii_uppercase()).collect();

    let decode = |lookup: fn(char) -> Option<Color>| -> Option<Vec<String>> {
        letters
            .iter()
            .map(|&letter| match letter {
                'X' => Some(Color::Unknown),
                letter => lookup(letter),
            })
            .map(|color| color.map(|color| color.name().to_string()))
            .collect()
    };

    decode(Color::from_face_letter).or_else(|| decode(Color::from_initial))
}

fn normalize_label(token: &str) -> String {
    match token {
        "X" => Color::Unknown.name().to_string(),
        other => other.to_string(),
    }
}

/// Parses text into a state, failing on the wrong count or unknown labels.
pub fn parse_state(text: &str) -> Result<CubeState, InputError> {
    CubeState::from_labels(&split_labels(text))
}

/// Reads labels from a file, or from stdin when the path is `-`.
pub fn read_labels(path: &Path) -> Result<Vec<String>, InputError> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        text
    } else {
        fs::read_to_string(path)?
    };
    Ok(split_labels(&text))
}
