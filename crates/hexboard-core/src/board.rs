//! The generated board and its configuration.
//!
//! A [`Board`] is produced once from a [`BoardConfig`] and never changes
//! afterwards. Two built-in variants exist:
//! - `Prism`: the extruded-prism board, unit scale, legacy number order
//! - `Corners`: the corner-addressed board used for roads and settlements,
//!   slightly larger scale
//!
//! Either variant's tables can be overridden through the config.

use crate::assignment::{
    shuffle_and_assign, validate_tables, LayoutError, NumberToken, Resource, Tile, TileType,
    LEGACY_NUMBERS, STANDARD_NUMBERS, STANDARD_RESOURCES,
};
use crate::geometry::Vec2;
use crate::hex::{CornerKey, HexCoord};
use crate::layout::{standard_paths, Layout, TilePath};
use crate::vertex::VertexCoordinate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Built-in board presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardVariant {
    Prism,
    #[default]
    Corners,
}

impl BoardVariant {
    pub const ALL: [BoardVariant; 2] = [BoardVariant::Prism, BoardVariant::Corners];

    /// Tile circumradius
    pub fn length(&self) -> f64 {
        match self {
            BoardVariant::Prism => 1.0,
            BoardVariant::Corners => 1.08,
        }
    }

    pub fn numbers(&self) -> &'static [NumberToken] {
        match self {
            BoardVariant::Prism => &LEGACY_NUMBERS,
            BoardVariant::Corners => &STANDARD_NUMBERS,
        }
    }

    pub fn resources(&self) -> &'static [Resource] {
        &STANDARD_RESOURCES
    }

    pub fn name(&self) -> &'static str {
        match self {
            BoardVariant::Prism => "prism",
            BoardVariant::Corners => "corners",
        }
    }
}

/// Board generation settings.
///
/// Deserialises from JSON such as
/// `{"variant": "prism", "numbers": [9, 8, "Robber", ...], "length": 1.2}`;
/// every field is optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    pub variant: BoardVariant,
    pub numbers: Option<Vec<NumberToken>>,
    pub resources: Option<Vec<Resource>>,
    pub length: Option<f64>,
}

impl BoardConfig {
    pub fn new(variant: BoardVariant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn numbers(&self) -> &[NumberToken] {
        self.numbers.as_deref().unwrap_or(self.variant.numbers())
    }

    pub fn resources(&self) -> &[Resource] {
        self.resources.as_deref().unwrap_or(self.variant.resources())
    }

    pub fn length(&self) -> f64 {
        self.length.unwrap_or(self.variant.length())
    }

    pub fn layout(&self) -> Layout {
        Layout::new(self.length())
    }

    /// Check the config against the standard movement table.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let length = self.length();
        if !(length.is_finite() && length > 0.0) {
            return Err(LayoutError::InvalidLength(length));
        }
        validate_tables(standard_paths().len(), self.numbers(), self.resources())
    }
}

/// The complete generated board.
///
/// Only built through [`Board::generate`] or [`Board::from_tiles`], so the
/// robber slot and hex index always agree with the tiles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Board {
    variant: BoardVariant,
    layout: Layout,
    /// Tiles in slot order
    tiles: Vec<Tile>,
    /// Index of the robber's tile in `tiles`
    robber_slot: usize,
    #[serde(skip)]
    by_hex: HashMap<HexCoord, usize>,
}

impl Board {
    /// Generate a board with freshly shuffled tokens
    pub fn generate(config: &BoardConfig) -> Result<Self, LayoutError> {
        let mut rng = rand::thread_rng();
        Self::generate_with_rng(config, &mut rng)
    }

    /// Generate a board with a provided RNG.
    /// This allows for deterministic board generation when needed
    pub fn generate_with_rng<R: Rng + ?Sized>(
        config: &BoardConfig,
        rng: &mut R,
    ) -> Result<Self, LayoutError> {
        config.validate()?;
        let layout = config.layout();
        let tiles = shuffle_and_assign(
            &standard_paths(),
            &layout,
            config.numbers(),
            config.resources(),
            rng,
        )?;
        Self::from_tiles(config.variant, layout, tiles)
    }

    /// Build a board from tiles that were already assigned
    pub fn from_tiles(
        variant: BoardVariant,
        layout: Layout,
        tiles: Vec<Tile>,
    ) -> Result<Self, LayoutError> {
        let robbers: Vec<usize> = tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_robber() || t.tile_type == TileType::Desert)
            .map(|(i, _)| i)
            .collect();
        let robber_slot = match robbers.as_slice() {
            [i] if tiles[*i].is_robber() && tiles[*i].tile_type == TileType::Desert => *i,
            _ => return Err(LayoutError::RobberCount(robbers.len())),
        };
        let by_hex = tiles.iter().enumerate().map(|(i, t)| (t.hex, i)).collect();

        Ok(Self {
            variant,
            layout,
            tiles,
            robber_slot,
            by_hex,
        })
    }

    pub fn variant(&self) -> BoardVariant {
        self.variant
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// All tiles in slot order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, slot: usize) -> Option<&Tile> {
        self.tiles.get(slot)
    }

    /// Tile at an axial coordinate
    pub fn tile_at(&self, hex: &HexCoord) -> Option<&Tile> {
        self.by_hex.get(hex).and_then(|slot| self.tiles.get(*slot))
    }

    /// Tile reached by a walk from the center, if it is on the board
    pub fn tile_for_path(&self, path: &TilePath) -> Option<&Tile> {
        self.tile_at(&path.hex())
    }

    /// The desert tile the robber starts on
    pub fn robber_tile(&self) -> &Tile {
        &self.tiles[self.robber_slot]
    }

    pub fn robber_slot(&self) -> usize {
        self.robber_slot
    }

    /// Tiles showing a given roll
    pub fn tiles_for_roll(&self, roll: u8) -> impl Iterator<Item = &Tile> {
        self.tiles
            .iter()
            .filter(move |t| t.number == NumberToken::Roll(roll))
    }

    /// Whether a corner touches at least one board tile
    pub fn has_corner(&self, key: &CornerKey) -> bool {
        key.touching_hexes().iter().any(|hex| self.tile_at(hex).is_some())
    }

    /// Every corner of every tile, deduplicated
    pub fn corners(&self) -> BTreeSet<CornerKey> {
        self.tiles.iter().flat_map(|t| t.hex.corners()).collect()
    }

    /// Planar position of a corner
    pub fn resolve(&self, vertex: &VertexCoordinate) -> Vec2 {
        vertex.resolve(&self.layout)
    }

    /// Planar position of a canonical corner
    pub fn corner_point(&self, key: &CornerKey) -> Vec2 {
        self.layout
            .corner_at(self.layout.hex_center(key.hex), key.corner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::assign;
    use crate::hex::{Corner, Direction};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded(variant: BoardVariant, seed: u64) -> Board {
        let mut rng = StdRng::seed_from_u64(seed);
        Board::generate_with_rng(&BoardConfig::new(variant), &mut rng).unwrap()
    }

    #[test]
    fn test_board_has_19_tiles() {
        for variant in BoardVariant::ALL {
            assert_eq!(seeded(variant, 1).tiles().len(), 19);
        }
    }

    #[test]
    fn test_board_has_one_desert() {
        let board = seeded(BoardVariant::Corners, 2);
        let deserts = board
            .tiles()
            .iter()
            .filter(|t| t.tile_type == TileType::Desert)
            .count();
        assert_eq!(deserts, 1);
        assert!(board.robber_tile().is_robber());
        assert_eq!(board.robber_tile().slot, board.robber_slot());
    }

    #[test]
    fn test_same_seed_same_board() {
        assert_eq!(seeded(BoardVariant::Prism, 42), seeded(BoardVariant::Prism, 42));
    }

    #[test]
    fn test_variant_scale_applies_to_positions() {
        let prism = seeded(BoardVariant::Prism, 3);
        let corners = seeded(BoardVariant::Corners, 3);
        for (a, b) in prism.tiles().iter().zip(corners.tiles()) {
            assert!((a.position * 1.08).approx_eq(b.position));
        }
    }

    #[test]
    fn test_tile_lookup_by_path() {
        let board = seeded(BoardVariant::Corners, 4);
        let tile = board.tile_for_path(&TilePath::new([Direction::N, Direction::N]));
        assert_eq!(tile.map(|t| t.slot), Some(7));
        let off_board = TilePath::new([Direction::N; 3]);
        assert!(board.tile_for_path(&off_board).is_none());
    }

    #[test]
    fn test_corner_count() {
        // 19-hex board has 54 distinct corners
        assert_eq!(seeded(BoardVariant::Corners, 5).corners().len(), 54);
    }

    #[test]
    fn test_has_corner() {
        let board = seeded(BoardVariant::Corners, 6);
        let outside = CornerKey::new(HexCoord::new(5, 0), Corner::wrapping(0));
        assert!(!board.has_corner(&outside));
        assert!(board.has_corner(&CornerKey::new(HexCoord::new(2, 0), Corner::wrapping(0))));
    }

    #[test]
    fn test_config_overrides() {
        let config = BoardConfig::from_json(r#"{"variant": "prism", "length": 2.5}"#).unwrap();
        assert_eq!(config.variant, BoardVariant::Prism);
        assert_eq!(config.length(), 2.5);
        assert_eq!(config.numbers(), &LEGACY_NUMBERS[..]);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_config_rejects_bad_length() {
        let config = BoardConfig {
            length: Some(0.0),
            ..BoardConfig::default()
        };
        assert_eq!(config.validate(), Err(LayoutError::InvalidLength(0.0)));
    }

    #[test]
    fn test_config_rejects_short_numbers() {
        let config = BoardConfig {
            numbers: Some(LEGACY_NUMBERS[..18].to_vec()),
            ..BoardConfig::new(BoardVariant::Prism)
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            Board::generate_with_rng(&config, &mut rng),
            Err(LayoutError::NumberCount { numbers: 18, slots: 19 })
        ));
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        assert!(BoardConfig::from_json(r#"{"colour": "red"}"#).is_err());
    }

    #[test]
    fn test_from_tiles_rejects_robber_without_desert() {
        let layout = Layout::default();
        let mut tiles = assign(&standard_paths(), &layout, &STANDARD_NUMBERS, &STANDARD_RESOURCES)
            .unwrap();
        tiles[9].tile_type = TileType::Resource(Resource::Ore);
        assert_eq!(
            Board::from_tiles(BoardVariant::Corners, layout, tiles),
            Err(LayoutError::RobberCount(1))
        );
    }

    #[test]
    fn test_board_json_leaves_out_the_index() {
        let board = seeded(BoardVariant::Corners, 9);
        let json = serde_json::to_value(&board).unwrap();
        assert!(json.get("by_hex").is_none());
        assert_eq!(json["robber_slot"], board.robber_slot());
        assert_eq!(json["tiles"].as_array().map(Vec::len), Some(19));
        for tile in board.tiles() {
            assert_eq!(board.tile_at(&tile.hex).map(|t| t.slot), Some(tile.slot));
        }
    }

    #[test]
    fn test_tiles_for_roll() {
        let board = seeded(BoardVariant::Corners, 8);
        assert_eq!(board.tiles_for_roll(2).count(), 1);
        assert_eq!(board.tiles_for_roll(6).count(), 2);
        assert_eq!(board.tiles_for_roll(7).count(), 0);
    }
}
