//! Server configuration from the environment.
//!
//! - `SERVER_ADDR`: listen address, default `0.0.0.0:8080`
//! - `BOARD_CONFIG`: optional path to a JSON board config

use hexboard_core::{BoardConfig, LayoutError};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid SERVER_ADDR {0:?}")]
    InvalidAddr(String),

    #[error("cannot read board config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse board config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid board config: {0}")]
    Board(#[from] LayoutError),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub board: BoardConfig,
}

impl ServerConfig {
    /// Read and validate the configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = std::env::var("SERVER_ADDR").ok();
        let board_path = std::env::var_os("BOARD_CONFIG").map(PathBuf::from);
        Self::from_parts(addr.as_deref(), board_path.as_deref())
    }

    pub fn from_parts(addr: Option<&str>, board_path: Option<&Path>) -> Result<Self, ConfigError> {
        let addr = addr.unwrap_or(DEFAULT_ADDR);
        let addr = addr
            .parse()
            .map_err(|_| ConfigError::InvalidAddr(addr.to_string()))?;

        let board = match board_path {
            Some(path) => load_board_config(path)?,
            None => BoardConfig::default(),
        };
        board.validate()?;

        Ok(Self { addr, board })
    }
}

fn load_board_config(path: &Path) -> Result<BoardConfig, ConfigError> {
    let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    BoardConfig::from_json(&json).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
