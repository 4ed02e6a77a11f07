use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("slot index out of range")]
    InvalidSlot,
    #[error("tile count must be a perfect square of at least 4")]
    InvalidTileCount,
    #[error("arrangement is not a permutation of the tile indices")]
    InvalidArrangement,
}

pub type Result<T> = core::result::Result<T, PuzzleError>;
