//! WebSocket protocol messages for the board viewer.

use hexboard_core::{BoardVariant, Color, DrawCommand, Tile, VertexCoordinate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Messages sent from client to server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ClientMessage {
    /// Throw away the current board and deal a new one
    NewBoard { variant: Option<BoardVariant> },

    /// A key was pressed in the viewer
    KeyPress { key: char },

    /// Put a settlement on a corner
    PlaceSettlement {
        vertex: VertexCoordinate,
        color: Color,
    },

    /// Put a road between two corners
    PlaceRoad {
        from: VertexCoordinate,
        to: VertexCoordinate,
        color: Color,
    },

    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ServerMessage {
    /// Welcome message with the assigned session ID
    Welcome { session_id: Uuid },

    /// The board behind the session, tile by tile
    Board {
        variant: BoardVariant,
        tiles: Vec<Tile>,
    },

    /// Everything to draw, in order
    Frame { commands: Vec<DrawCommand> },

    /// Error occurred
    Error { message: String },

    /// Pong response
    Pong,
}
