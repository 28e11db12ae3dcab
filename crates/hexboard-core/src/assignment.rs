//! Token tables and the assignment of numbers and resources to board slots.
//!
//! The number table holds one roll per slot plus a single robber sentinel;
//! the resource table holds one resource per non-desert slot. Both are
//! shuffled independently, then zipped slot by slot. The slot where the
//! robber lands becomes the desert, and resource consumption skips it.

use crate::geometry::Vec2;
use crate::hex::HexCoord;
use crate::layout::{Layout, TilePath};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Resource types produced by tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Resource {
    Sheep,
    Wheat,
    Wood,
    Brick,
    Ore,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Sheep,
        Resource::Wheat,
        Resource::Wood,
        Resource::Brick,
        Resource::Ore,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Resource::Sheep => "Sheep",
            Resource::Wheat => "Wheat",
            Resource::Wood => "Wood",
            Resource::Brick => "Brick",
            Resource::Ore => "Ore",
        }
    }
}

/// Dice number printed on a tile, or the robber sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawToken", into = "RawToken")]
pub enum NumberToken {
    Roll(u8),
    Robber,
}

impl NumberToken {
    pub fn roll(&self) -> Option<u8> {
        match self {
            NumberToken::Roll(n) => Some(*n),
            NumberToken::Robber => None,
        }
    }

    pub fn is_robber(&self) -> bool {
        matches!(self, NumberToken::Robber)
    }

    /// Number of two-dice combinations producing this roll
    pub fn pips(&self) -> u8 {
        match self {
            NumberToken::Roll(n @ 2..=12) => 6 - (7 - *n as i8).unsigned_abs(),
            _ => 0,
        }
    }
}

impl fmt::Display for NumberToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberToken::Roll(n) => write!(f, "{}", n),
            NumberToken::Robber => f.write_str("Robber"),
        }
    }
}

/// Wire form of a number token: a bare integer or the sentinel label.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawToken {
    Roll(u8),
    Label(String),
}

impl TryFrom<RawToken> for NumberToken {
    type Error = String;

    fn try_from(raw: RawToken) -> Result<Self, Self::Error> {
        match raw {
            RawToken::Roll(n) => Ok(NumberToken::Roll(n)),
            RawToken::Label(label) if label == "Robber" || label == "Blank" => {
                Ok(NumberToken::Robber)
            }
            RawToken::Label(label) => Err(format!("unknown number token {:?}", label)),
        }
    }
}

impl From<NumberToken> for RawToken {
    fn from(token: NumberToken) -> Self {
        match token {
            NumberToken::Roll(n) => RawToken::Roll(n),
            NumberToken::Robber => RawToken::Label("Robber".to_string()),
        }
    }
}

/// What a tile is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    /// Produces a resource when its number is rolled
    Resource(Resource),
    /// The robber's tile - no production
    Desert,
}

/// A single hex tile on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Index into the movement table
    pub slot: usize,
    /// The walk that placed this tile
    pub path: TilePath,
    /// Canonical axial coordinate
    pub hex: HexCoord,
    /// Planar center
    pub position: Vec2,
    pub number: NumberToken,
    pub tile_type: TileType,
}

impl Tile {
    pub fn is_robber(&self) -> bool {
        self.number.is_robber()
    }

    pub fn resource(&self) -> Option<Resource> {
        match self.tile_type {
            TileType::Resource(r) => Some(r),
            TileType::Desert => None,
        }
    }
}

/// Malformed token tables, caught before any tile is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("number table has {numbers} entries but the board has {slots} slots")]
    NumberCount { numbers: usize, slots: usize },

    #[error("resource table has {resources} entries, expected {expected}")]
    ResourceCount { resources: usize, expected: usize },

    #[error("number table must hold exactly one robber, found {0}")]
    RobberCount(usize),

    #[error("{0} is not a valid tile number")]
    InvalidRoll(u8),

    #[error("length factor must be positive and finite, got {0}")]
    InvalidLength(f64),
}

/// Standard resource mix: 4 sheep, 4 wheat, 4 wood, 3 brick, 3 ore
pub const STANDARD_RESOURCES: [Resource; 18] = [
    Resource::Sheep,
    Resource::Sheep,
    Resource::Sheep,
    Resource::Sheep,
    Resource::Wheat,
    Resource::Wheat,
    Resource::Wheat,
    Resource::Wheat,
    Resource::Wood,
    Resource::Wood,
    Resource::Wood,
    Resource::Wood,
    Resource::Brick,
    Resource::Brick,
    Resource::Brick,
    Resource::Ore,
    Resource::Ore,
    Resource::Ore,
];

const fn roll(n: u8) -> NumberToken {
    NumberToken::Roll(n)
}

const ROBBER: NumberToken = NumberToken::Robber;

/// Number table of the corner-addressed board
pub const STANDARD_NUMBERS: [NumberToken; 19] = [
    roll(10), roll(2), roll(9), roll(12), roll(6), roll(4), roll(10), roll(9), roll(11), ROBBER,
    roll(3), roll(8), roll(8), roll(3), roll(4), roll(5), roll(5), roll(6), roll(11),
];

/// Number table of the prism board, in its hand-authored order.
///
/// The authored list stopped one roll short of the board (no 12); the 12 is
/// appended so the table fills all 19 slots.
pub const LEGACY_NUMBERS: [NumberToken; 19] = [
    roll(9), roll(8), roll(10), roll(2), roll(9), roll(4), roll(6), roll(11), roll(10), roll(8),
    roll(3), roll(5), roll(4), roll(3), roll(5), roll(6), roll(11), ROBBER, roll(12),
];

/// Check table sizes and contents against the number of board slots.
pub fn validate_tables(
    slots: usize,
    numbers: &[NumberToken],
    resources: &[Resource],
) -> Result<(), LayoutError> {
    if numbers.len() != slots {
        return Err(LayoutError::NumberCount {
            numbers: numbers.len(),
            slots,
        });
    }
    let expected = slots.saturating_sub(1);
    if resources.len() != expected {
        return Err(LayoutError::ResourceCount {
            resources: resources.len(),
            expected,
        });
    }
    let robbers = numbers.iter().filter(|n| n.is_robber()).count();
    if robbers != 1 {
        return Err(LayoutError::RobberCount(robbers));
    }
    if let Some(bad) = numbers
        .iter()
        .filter_map(NumberToken::roll)
        .find(|n| !(2..=12).contains(n) || *n == 7)
    {
        return Err(LayoutError::InvalidRoll(bad));
    }
    Ok(())
}

/// Position of the robber sentinel in a number table
pub fn sentinel_index(numbers: &[NumberToken]) -> Option<usize> {
    numbers.iter().position(NumberToken::is_robber)
}

/// Zip already-shuffled tables onto the board slots.
///
/// Slot `i` takes `numbers[i]`. Its resource is `resources[i]` before the
/// robber's slot and `resources[i - 1]` after it; the robber's slot itself
/// becomes the desert.
pub fn assign(
    paths: &[TilePath],
    layout: &Layout,
    numbers: &[NumberToken],
    resources: &[Resource],
) -> Result<Vec<Tile>, LayoutError> {
    validate_tables(paths.len(), numbers, resources)?;
    let robber = sentinel_index(numbers).ok_or(LayoutError::RobberCount(0))?;

    let tiles = paths
        .iter()
        .zip(numbers)
        .enumerate()
        .map(|(slot, (path, number))| {
            let tile_type = if slot == robber {
                TileType::Desert
            } else if slot > robber {
                TileType::Resource(resources[slot - 1])
            } else {
                TileType::Resource(resources[slot])
            };
            Tile {
                slot,
                path: path.clone(),
                hex: path.hex(),
                position: layout.center(path),
                number: *number,
                tile_type,
            }
        })
        .collect();

    Ok(tiles)
}

/// Shuffle both tables (numbers first, then resources) and assign them.
pub fn shuffle_and_assign<R: Rng + ?Sized>(
    paths: &[TilePath],
    layout: &Layout,
    numbers: &[NumberToken],
    resources: &[Resource],
    rng: &mut R,
) -> Result<Vec<Tile>, LayoutError> {
    let mut numbers = numbers.to_vec();
    numbers.shuffle(rng);
    let mut resources = resources.to_vec();
    resources.shuffle(rng);

    assign(paths, layout, &numbers, &resources)
}
