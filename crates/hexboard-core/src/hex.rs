//! Hex coordinate system using axial coordinates (q, r).
//!
//! Tiles are flat-topped: a tile has neighbours due north and due south, and
//! its six corners sit at multiples of 60° from the east axis.
//!
//! This module provides:
//! - `Direction`: the six neighbour steps, with their planar offsets
//! - `HexCoord`: canonical identity of a tile
//! - `Corner`: a closed corner index 0..=5
//! - `CornerKey`: canonical identity of a corner shared by up to 3 tiles
//! - `EdgeKey`: canonical identity of a side shared by up to 2 tiles
//!
//! Corner `c` of a tile lies between its sides `c - 1` and `c`, where side
//! `k` faces the neighbour at angle `60k + 30` degrees.

use crate::geometry::{polar_to_cartesian, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_3;
use std::fmt;
use thiserror::Error;

/// Step from a tile to one of its six neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    N,
    S,
    NE,
    NW,
    SE,
    SW,
}

impl Direction {
    /// All directions, counter-clockwise starting from NE (side order)
    pub const ALL: [Direction; 6] = [
        Direction::NE,
        Direction::N,
        Direction::NW,
        Direction::SW,
        Direction::S,
        Direction::SE,
    ];

    /// Side index of this direction; the neighbour lies at `60 * side + 30` degrees.
    pub const fn side(self) -> usize {
        match self {
            Direction::NE => 0,
            Direction::N => 1,
            Direction::NW => 2,
            Direction::SW => 3,
            Direction::S => 4,
            Direction::SE => 5,
        }
    }

    /// Direction facing side `side % 6`
    pub const fn from_side(side: usize) -> Direction {
        Direction::ALL[side % 6]
    }

    pub const fn opposite(self) -> Direction {
        Direction::from_side(self.side() + 3)
    }

    /// Planar offset from one tile center to its neighbour in this direction.
    ///
    /// Neighbouring centers of unit-radius tiles are `2 sin(π/3)` apart.
    pub fn offset(self) -> Vec2 {
        let dist = 2.0 * FRAC_PI_3.sin();
        let across = dist * FRAC_PI_3.sin();
        let up = dist * FRAC_PI_3.cos();
        match self {
            Direction::NE => Vec2::new(across, up),
            Direction::SE => Vec2::new(across, -up),
            Direction::NW => Vec2::new(-across, up),
            Direction::SW => Vec2::new(-across, -up),
            Direction::N => Vec2::new(0.0, dist),
            Direction::S => Vec2::new(0.0, -dist),
        }
    }

    /// Axial step `(dq, dr)` for this direction
    pub const fn axial(self) -> (i32, i32) {
        match self {
            Direction::N => (0, -1),
            Direction::NE => (1, -1),
            Direction::SE => (1, 0),
            Direction::S => (0, 1),
            Direction::SW => (-1, 1),
            Direction::NW => (-1, 0),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Direction::N => "N",
            Direction::S => "S",
            Direction::NE => "NE",
            Direction::NW => "NW",
            Direction::SE => "SE",
            Direction::SW => "SW",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Axial coordinate for a flat-topped hex grid.
///
/// In axial coordinates:
/// - `q` increases going east (toward SE)
/// - `r` increases going south
/// - The third coordinate `s` (not stored) satisfies: q + r + s = 0
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    pub const ORIGIN: HexCoord = HexCoord::new(0, 0);

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The implicit third coordinate (s = -q - r)
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    pub fn neighbor(&self, direction: Direction) -> HexCoord {
        let (dq, dr) = direction.axial();
        HexCoord::new(self.q + dq, self.r + dr)
    }

    /// The six neighbouring hexes in side order
    pub fn neighbors(&self) -> [HexCoord; 6] {
        Direction::ALL.map(|dir| self.neighbor(dir))
    }

    /// Distance to another hex (in hex steps)
    pub fn distance_to(&self, other: &HexCoord) -> u32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s() - other.s()).abs();
        ((dq + dr + ds) / 2) as u32
    }

    /// Planar center of this hex for tiles of circumradius `length`
    pub fn to_point(&self, length: f64) -> Vec2 {
        let x = 1.5 * self.q as f64;
        let y = -(3.0_f64.sqrt()) * (self.r as f64 + self.q as f64 / 2.0);
        Vec2::new(x * length, y * length)
    }

    /// Hex containing a planar point
    pub fn from_point(point: Vec2, length: f64) -> Self {
        let q = (2.0 / 3.0 * point.x) / length;
        let r = (-point.y / 3.0_f64.sqrt() - point.x / 3.0) / length;
        Self::axial_round(q, r)
    }

    /// Round fractional axial coordinates to nearest hex
    fn axial_round(q: f64, r: f64) -> Self {
        let s = -q - r;

        let mut rq = q.round();
        let mut rr = r.round();
        let rs = s.round();

        let q_diff = (rq - q).abs();
        let r_diff = (rr - r).abs();
        let s_diff = (rs - s).abs();

        if q_diff > r_diff && q_diff > s_diff {
            rq = -rr - rs;
        } else if r_diff > s_diff {
            rr = -rq - rs;
        }

        Self::new(rq as i32, rr as i32)
    }

    /// All six corners of this hex, canonicalised
    pub fn corners(&self) -> [CornerKey; 6] {
        Corner::ALL.map(|corner| CornerKey::new(*self, corner))
    }

    /// All six sides of this hex, canonicalised
    pub fn edges(&self) -> [EdgeKey; 6] {
        Direction::ALL.map(|dir| EdgeKey::new(*self, dir))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("corner index {0} is outside 0..=5")]
pub struct InvalidCorner(pub u8);

/// One of the six corners of a tile, at `index * 60°` from the east axis.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Corner(u8);

impl Corner {
    pub const ALL: [Corner; 6] = [
        Corner(0),
        Corner(1),
        Corner(2),
        Corner(3),
        Corner(4),
        Corner(5),
    ];

    pub const fn new(index: u8) -> Option<Corner> {
        if index < 6 {
            Some(Corner(index))
        } else {
            None
        }
    }

    /// Corner for any integer index, reduced modulo 6
    pub const fn wrapping(index: i64) -> Corner {
        Corner(index.rem_euclid(6) as u8)
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// Corner `steps` positions counter-clockwise from this one
    pub const fn rotate(self, steps: i64) -> Corner {
        Corner::wrapping(self.0 as i64 + steps)
    }

    pub fn angle(self) -> f64 {
        self.0 as f64 * FRAC_PI_3
    }

    /// Offset from a tile center to this corner for tiles of circumradius `radius`
    pub fn offset(self, radius: f64) -> Vec2 {
        polar_to_cartesian(self.angle()) * radius
    }

    /// Corner nearest to an offset measured from a tile center
    pub fn nearest(offset: Vec2) -> Corner {
        let sixths = (offset.angle() / FRAC_PI_3).round() as i64;
        Corner::wrapping(sixths)
    }
}

impl TryFrom<u8> for Corner {
    type Error = InvalidCorner;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Corner::new(index).ok_or(InvalidCorner(index))
    }
}

impl From<Corner> for u8 {
    fn from(corner: Corner) -> u8 {
        corner.0
    }
}

/// Corner identity - a point where up to 3 hexes meet.
///
/// Each corner can be described from 3 different hexes. `new` always picks
/// the representation with the smallest `(q, r, corner)` tuple, so equal
/// keys mean the same physical corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CornerKey {
    pub hex: HexCoord,
    pub corner: Corner,
}

impl CornerKey {
    /// Create a corner key (automatically canonicalised)
    pub fn new(hex: HexCoord, corner: Corner) -> Self {
        Self::representations(hex, corner)
            .into_iter()
            .min_by_key(|key| (key.hex.q, key.hex.r, key.corner))
            .unwrap_or(Self { hex, corner })
    }

    /// The three `(hex, corner)` pairs naming the same point
    fn representations(hex: HexCoord, corner: Corner) -> [CornerKey; 3] {
        let c = corner.index() as usize;
        [
            Self { hex, corner },
            Self {
                hex: hex.neighbor(Direction::from_side(c)),
                corner: corner.rotate(4),
            },
            Self {
                hex: hex.neighbor(Direction::from_side(c + 5)),
                corner: corner.rotate(2),
            },
        ]
    }

    /// The 3 hexes that touch this corner
    pub fn touching_hexes(&self) -> [HexCoord; 3] {
        Self::representations(self.hex, self.corner).map(|key| key.hex)
    }

    /// The 3 edges that meet at this corner
    pub fn edges(&self) -> [EdgeKey; 3] {
        let c = self.corner.index() as usize;
        [
            EdgeKey::new(self.hex, Direction::from_side(c)),
            EdgeKey::new(self.hex, Direction::from_side(c + 5)),
            EdgeKey::new(
                self.hex.neighbor(Direction::from_side(c)),
                Direction::from_side(c + 4),
            ),
        ]
    }

    /// The 3 corners one edge away
    pub fn adjacent(&self) -> [CornerKey; 3] {
        self.edges().map(|edge| {
            let [a, b] = edge.endpoints();
            if a == *self {
                b
            } else {
                a
            }
        })
    }

    /// Planar position for tiles of circumradius `length`
    pub fn to_point(&self, length: f64) -> Vec2 {
        self.hex.to_point(length) + self.corner.offset(length)
    }
}

/// Edge identity - a side shared by up to 2 hexes, where roads are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey {
    pub hex: HexCoord,
    pub side: Direction,
}

impl EdgeKey {
    /// Create an edge key (automatically canonicalised to the smaller hex)
    pub fn new(hex: HexCoord, side: Direction) -> Self {
        let other = hex.neighbor(side);
        if (hex.q, hex.r) <= (other.q, other.r) {
            Self { hex, side }
        } else {
            Self {
                hex: other,
                side: side.opposite(),
            }
        }
    }

    /// The edge joining two corners, if they are one edge apart
    pub fn between(a: CornerKey, b: CornerKey) -> Option<EdgeKey> {
        if a == b {
            return None;
        }
        a.edges()
            .into_iter()
            .find(|edge| edge.endpoints().contains(&b))
    }

    /// The 2 hexes that share this edge
    pub fn touching_hexes(&self) -> [HexCoord; 2] {
        [self.hex, self.hex.neighbor(self.side)]
    }

    /// The 2 corners at the ends of this edge
    pub fn endpoints(&self) -> [CornerKey; 2] {
        let first = Corner::wrapping(self.side.side() as i64);
        [
            CornerKey::new(self.hex, first),
            CornerKey::new(self.hex, first.rotate(1)),
        ]
    }

    /// Planar midpoint for tiles of circumradius `length`
    pub fn to_point(&self, length: f64) -> Vec2 {
        let [a, b] = self.endpoints();
        a.to_point(length).midpoint(b.to_point(length))
    }
}
