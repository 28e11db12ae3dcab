//! Per-connection board sessions.
//!
//! Each WebSocket connection gets one session: a board dealt when the
//! connection opens, plus the scene state the viewer mutates.

use crate::protocol::{ClientMessage, ServerMessage};
use hexboard_core::{BoardConfig, BoardVariant, LayoutError, Scene, SceneError};
use rand::Rng;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Board generation failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Invalid placement: {0}")]
    Scene(#[from] SceneError),
}

/// A viewer's board and scene.
#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    config: BoardConfig,
    scene: Scene,
}

impl Session {
    pub fn new(id: Uuid, config: BoardConfig) -> Result<Self, SessionError> {
        let mut rng = rand::thread_rng();
        Self::with_rng(id, config, &mut rng)
    }

    pub fn with_rng<R: Rng + ?Sized>(
        id: Uuid,
        config: BoardConfig,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let scene = Scene::generate(&config, rng)?;
        Ok(Self { id, config, scene })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Deal a new board, optionally switching variant. Placed pieces are dropped.
    pub fn regenerate<R: Rng + ?Sized>(
        &mut self,
        variant: Option<BoardVariant>,
        rng: &mut R,
    ) -> Result<(), SessionError> {
        let mut config = self.config.clone();
        if let Some(variant) = variant {
            config.variant = variant;
        }
        self.scene = Scene::generate(&config, rng)?;
        self.config = config;
        Ok(())
    }

    pub fn board_message(&self) -> ServerMessage {
        let board = self.scene.board();
        ServerMessage::Board {
            variant: board.variant(),
            tiles: board.tiles().to_vec(),
        }
    }

    pub fn frame_message(&self) -> ServerMessage {
        ServerMessage::Frame {
            commands: self.scene.frame(),
        }
    }

    /// Apply a client message and return the replies to send back.
    pub fn handle<R: Rng + ?Sized>(
        &mut self,
        msg: ClientMessage,
        rng: &mut R,
    ) -> Result<Vec<ServerMessage>, SessionError> {
        match msg {
            ClientMessage::NewBoard { variant } => {
                self.regenerate(variant, rng)?;
                Ok(vec![self.board_message(), self.frame_message()])
            }
            ClientMessage::KeyPress { key } => {
                if self.scene.handle_key(key) {
                    Ok(vec![self.frame_message()])
                } else {
                    debug!("Session {} ignored key {:?}", self.id, key);
                    Ok(Vec::new())
                }
            }
            ClientMessage::PlaceSettlement { vertex, color } => {
                let corner = self.scene.place_settlement(&vertex, color)?;
                debug!("Session {} settlement at {:?}", self.id, corner);
                Ok(vec![self.frame_message()])
            }
            ClientMessage::PlaceRoad { from, to, color } => {
                let edge = self.scene.place_road(&from, &to, color)?;
                debug!("Session {} road on {:?}", self.id, edge);
                Ok(vec![self.frame_message()])
            }
            ClientMessage::Ping => Ok(vec![ServerMessage::Pong]),
        }
    }
}
