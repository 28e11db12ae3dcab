//! Addressing tile corners for roads and settlements.
//!
//! A [`VertexCoordinate`] names a corner by the walk to one of its tiles and
//! the corner index on that tile. Adjacent tiles share corners, so several
//! coordinates resolve to the same point; [`VertexCoordinate::key`] maps
//! them all to one [`CornerKey`].

use crate::geometry::Vec2;
use crate::hex::{Corner, CornerKey};
use crate::layout::{Layout, TilePath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VertexCoordinate {
    pub path: TilePath,
    pub corner: Corner,
}

impl VertexCoordinate {
    pub fn new(path: TilePath, corner: Corner) -> Self {
        Self { path, corner }
    }

    /// Planar position of this corner
    pub fn resolve(&self, layout: &Layout) -> Vec2 {
        resolve(&self.path, self.corner, layout)
    }

    /// Canonical identity of this corner
    pub fn key(&self) -> CornerKey {
        CornerKey::new(self.path.hex(), self.corner)
    }

    /// Whether two coordinates name the same physical corner
    pub fn same_place(&self, other: &VertexCoordinate) -> bool {
        self.key() == other.key()
    }
}

/// Planar position of corner `corner` of the tile reached by `path`.
pub fn resolve(path: &TilePath, corner: Corner, layout: &Layout) -> Vec2 {
    layout.corner_at(layout.center(path), corner)
}
