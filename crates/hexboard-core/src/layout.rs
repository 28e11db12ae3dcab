//! Board layout: where each of the 19 tiles sits.
//!
//! Tiles are addressed by a [`TilePath`], a walk of neighbour steps from the
//! center tile. The standard board is a hand-authored table of such walks:
//! the center, the inner ring of 6, then the outer ring of 12 going
//! clockwise from due north.

use crate::geometry::{compose_translations, translate, Vec2};
use crate::hex::{Corner, Direction, HexCoord};
use serde::{Deserialize, Serialize};
use std::fmt;

use Direction::{N, NE, NW, S, SE, SW};

/// Number of tiles on a standard board
pub const SLOT_COUNT: usize = 19;

/// Walks from the center tile to every tile of the standard board, in slot order.
pub const STANDARD_MOVEMENTS: [&[Direction]; SLOT_COUNT] = [
    &[],
    &[N],
    &[NE],
    &[NW],
    &[SW],
    &[S],
    &[SE],
    &[N, N],
    &[N, NE],
    &[NE, NE],
    &[NE, SE],
    &[SE, SE],
    &[SE, S],
    &[S, S],
    &[S, SW],
    &[SW, SW],
    &[SW, NW],
    &[NW, NW],
    &[NW, N],
];

/// A walk of neighbour steps from the board origin.
///
/// Different paths may reach the same tile (`[N, SE]` and `[NE]`);
/// use [`TilePath::hex`] when identity matters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TilePath(Vec<Direction>);

impl TilePath {
    pub fn new(steps: impl Into<Vec<Direction>>) -> Self {
        Self(steps.into())
    }

    /// The empty walk, addressing the center tile
    pub fn origin() -> Self {
        Self(Vec::new())
    }

    pub fn steps(&self) -> &[Direction] {
        &self.0
    }

    /// Extend the walk by one step
    pub fn then(mut self, direction: Direction) -> Self {
        self.0.push(direction);
        self
    }

    /// Unscaled planar offset of the tile center from the origin
    pub fn offset(&self) -> Vec2 {
        compose_translations(self.0.iter().map(|dir| dir.offset()))
    }

    /// Canonical axial coordinate of the tile this walk ends on
    pub fn hex(&self) -> HexCoord {
        self.0
            .iter()
            .fold(HexCoord::ORIGIN, |hex, dir| hex.neighbor(*dir))
    }
}

impl From<&[Direction]> for TilePath {
    fn from(steps: &[Direction]) -> Self {
        Self(steps.to_vec())
    }
}

impl fmt::Display for TilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, dir) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", dir)?;
        }
        write!(f, "]")
    }
}

/// The standard 19 walks as owned paths
pub fn standard_paths() -> Vec<TilePath> {
    STANDARD_MOVEMENTS.iter().map(|steps| TilePath::from(*steps)).collect()
}

/// Scale of a rendered board.
///
/// `length` is the tile circumradius; it scales tile centers and corner
/// positions together so neighbouring tiles keep sharing corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub origin: Vec2,
    pub length: f64,
}

impl Layout {
    pub const fn new(length: f64) -> Self {
        Self {
            origin: Vec2::ZERO,
            length,
        }
    }

    /// Planar center of the tile a path leads to
    pub fn center(&self, path: &TilePath) -> Vec2 {
        translate(self.origin, path.offset() * self.length)
    }

    /// Planar centers for a sequence of paths, in order
    pub fn centers(&self, paths: &[TilePath]) -> Vec<Vec2> {
        paths.iter().map(|path| self.center(path)).collect()
    }

    /// Planar center of a hex by its axial coordinate
    pub fn hex_center(&self, hex: HexCoord) -> Vec2 {
        translate(self.origin, hex.to_point(self.length))
    }

    /// Planar position of one corner of the tile at `center`
    pub fn corner_at(&self, center: Vec2, corner: Corner) -> Vec2 {
        translate(center, corner.offset(self.length))
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_origin_path_is_centered() {
        assert_eq!(Layout::default().center(&TilePath::origin()), Vec2::ZERO);
        assert_eq!(TilePath::origin().hex(), HexCoord::ORIGIN);
    }

    #[test]
    fn test_double_step_is_twice_the_offset() {
        let path = TilePath::new([NE, NE]);
        let expected = translate(NE.offset(), NE.offset());
        assert!(Layout::default().center(&path).approx_eq(expected));
        assert!(Layout::default().center(&path).approx_eq(NE.offset() * 2.0));
    }

    #[test]
    fn test_standard_paths_cover_radius_two() {
        let hexes: HashSet<HexCoord> = standard_paths().iter().map(TilePath::hex).collect();
        assert_eq!(hexes.len(), SLOT_COUNT);
        assert!(hexes
            .iter()
            .all(|hex| hex.distance_to(&HexCoord::ORIGIN) <= 2));
    }

    #[test]
    fn test_ring_sizes() {
        let rings = standard_paths().iter().fold([0; 3], |mut rings, path| {
            rings[path.hex().distance_to(&HexCoord::ORIGIN) as usize] += 1;
            rings
        });
        assert_eq!(rings, [1, 6, 12]);
    }

    #[test]
    fn test_path_center_matches_axial_center() {
        let layout = Layout::new(1.08);
        for path in standard_paths() {
            assert!(
                layout.center(&path).approx_eq(layout.hex_center(path.hex())),
                "path {} disagrees with its axial coordinate",
                path
            );
        }
    }

    #[test]
    fn test_equivalent_paths_share_a_hex() {
        let direct = TilePath::new([NE]);
        let detour = TilePath::new([N, SE]);
        assert_ne!(direct, detour);
        assert_eq!(direct.hex(), detour.hex());
        assert!(direct.offset().approx_eq(detour.offset()));
    }

    #[test]
    fn test_display() {
        assert_eq!(TilePath::new([NW, N]).to_string(), "[NW,N]");
        assert_eq!(TilePath::origin().then(S).to_string(), "[S]");
    }

    #[test]
    fn test_path_json_is_a_list_of_labels() {
        let path: TilePath = serde_json::from_str(r#"["NE","SE"]"#).unwrap();
        assert_eq!(path, TilePath::new([NE, SE]));
    }
}
