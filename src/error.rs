//! Errors from the outer shell (terminal, config files)
//!
//! The simulation itself never fails; collisions, expiry and game over are
//! ordinary state transitions.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
