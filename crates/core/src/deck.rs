//! Deck module - builds the tile layout for a session
//!
//! Every catalog icon is duplicated, the faces are shuffled, and each tile takes
//! its final board position as its `index`.

use thiserror::Error;

use crate::rng::SimpleRng;
use crate::types::Icon;

/// A tile on the board
///
/// `index` is the board position and never changes during a session. Matched
/// tiles keep `is_flipped` set and stay face up for the rest of the session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tile {
    pub index: usize,
    pub pair_id: &'static str,
    pub emoji: &'static str,
    pub label: &'static str,
    pub is_flipped: bool,
    pub is_matched: bool,
}

impl Tile {
    /// Create a face-down tile for `icon` at `index`
    pub fn new(index: usize, icon: &Icon) -> Self {
        Self {
            index,
            pair_id: icon.id,
            emoji: icon.emoji,
            label: icon.label,
            is_flipped: false,
            is_matched: false,
        }
    }

    /// Face up, either pending or matched
    pub fn is_face_up(&self) -> bool {
        self.is_flipped || self.is_matched
    }

    /// Whether this tile forms a pair with `other`
    pub fn pairs_with(&self, other: &Tile) -> bool {
        self.index != other.index && self.pair_id == other.pair_id
    }
}

/// Rejected fixed layouts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("layout has {actual} tiles, expected {expected}")]
    WrongLength { expected: usize, actual: usize },
    #[error("layout references unknown icon `{0}`")]
    UnknownIcon(String),
    #[error("icon `{id}` appears {count} times, expected 2")]
    NotAPair { id: &'static str, count: usize },
}

/// Build a freshly shuffled deck: two tiles per catalog icon
pub fn generate_deck(catalog: &[Icon], rng: &mut SimpleRng) -> Vec<Tile> {
    let mut faces: Vec<&Icon> = catalog.iter().flat_map(|icon| [icon, icon]).collect();
    rng.shuffle(&mut faces);

    faces
        .into_iter()
        .enumerate()
        .map(|(index, icon)| Tile::new(index, icon))
        .collect()
}

/// Build a deck in a fixed order, given as one icon id per board position
///
/// Used for scripted sessions and tests that need to know where pairs are.
pub fn deck_from_layout(catalog: &[Icon], layout: &[&str]) -> Result<Vec<Tile>, DeckError> {
    let expected = catalog.len() * 2;
    if layout.len() != expected {
        return Err(DeckError::WrongLength {
            expected,
            actual: layout.len(),
        });
    }

    let mut tiles = Vec::with_capacity(expected);
    for (index, id) in layout.iter().enumerate() {
        let icon = catalog
            .iter()
            .find(|icon| icon.id == *id)
            .ok_or_else(|| DeckError::UnknownIcon((*id).to_string()))?;
        tiles.push(Tile::new(index, icon));
    }

    for icon in catalog {
        let count = tiles.iter().filter(|t| t.pair_id == icon.id).count();
        if count != 2 {
            return Err(DeckError::NotAPair { id: icon.id, count });
        }
    }

    Ok(tiles)
}
