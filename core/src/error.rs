use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Grid dimensions and block type count must be positive")]
    InvalidDimensions,
    #[error("Invalid coordinates")]
    InvalidCoordinate,
    #[error("No block at the given coordinates")]
    EmptyCell,
    #[error("Block type is outside the configured type count")]
    InvalidBlockType,
}

pub type Result<T> = core::result::Result<T, GameError>;
