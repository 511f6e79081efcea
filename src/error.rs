use thiserror::Error;

/// Failures the game engine can report.
///
/// Everything else (redundant turns, ticking a finished game) is a no-op.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum GameError {
    #[error("grid {width}x{height} is too small to play on")]
    InvalidGeometry { width: u16, height: u16 },
    #[error("no free cell left to place food")]
    NoSpaceAvailable,
}
