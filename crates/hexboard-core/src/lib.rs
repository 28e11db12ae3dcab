//! Hexboard - a Catan-style hex board generator
//!
//! This crate provides the board logic behind the map renderer, including:
//! - Planar geometry helpers and the six hex directions
//! - Canonical axial coordinates for tiles, corners and edges
//! - The standard 19-tile layout, addressed by walks from the center tile
//! - Shuffled assignment of dice numbers and resources, with a robber/desert slot
//! - Resolution of tile corners for roads and settlements
//! - Draw-command emission to a pluggable renderer
//!
//! # Architecture
//!
//! The crate never draws anything itself. Every position is resolved to a
//! planar point and handed to a [`Renderer`]. It can be compiled to:
//! - Native Rust, driven by the WebSocket server
//! - WebAssembly, driven directly by the browser page
//!
//! # Modules
//!
//! - [`geometry`]: vectors, translation, polar conversion
//! - [`hex`]: directions and canonical coordinates
//! - [`layout`]: tile paths and the standard movement table
//! - [`assignment`]: token tables and slot assignment
//! - [`vertex`]: corner addressing
//! - [`board`]: the generated board and its configuration
//! - [`render`]: the renderer interface
//! - [`scene`]: viewer state, key handling and redraw

pub mod assignment;
pub mod board;
pub mod geometry;
pub mod hex;
pub mod layout;
pub mod render;
pub mod scene;
pub mod vertex;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use assignment::{LayoutError, NumberToken, Resource, Tile, TileType};
pub use board::{Board, BoardConfig, BoardVariant};
pub use geometry::{cartesian_to_polar, compose_translations, polar_to_cartesian, translate, Vec2};
pub use hex::{Corner, CornerKey, Direction, EdgeKey, HexCoord};
pub use layout::{Layout, TilePath};
pub use render::{Color, CommandRecorder, DrawCommand, LabelStyle, Renderer};
pub use scene::{KeyAction, Scene, SceneError};
pub use vertex::VertexCoordinate;
