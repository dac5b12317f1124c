use thiserror::Error;

/// Result type for the checked convenience operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by parameter validation at the convenience surface.
///
/// The scanline core itself never fails: degenerate input produces degenerate output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("sizing values must not have opposite signs (dx = {dx}, dy = {dy})")]
    InconsistentSizing { dx: i32, dy: i32 },

    #[error("invalid bit set mask: {0}")]
    InvalidBitSetMask(String),
}
