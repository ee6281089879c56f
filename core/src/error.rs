use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid grid configuration, width and height must be positive")]
    InvalidConfig,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Unknown difficulty, expected one of: easy, medium, hard")]
    UnknownDifficulty,
}

pub type Result<T> = core::result::Result<T, GameError>;
