//! Construction-time validation errors.

use thiserror::Error;

/// Why a puzzle could not be built from its configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("rows must be greater than zero")]
    ZeroRows,
    #[error("columns must be greater than zero")]
    ZeroCols,
    #[error("no image reference supplied")]
    MissingImage,
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("sliding puzzle needs at least 2 rows and 2 columns (got {rows}x{cols})")]
    TooSmallForSlide { rows: u16, cols: u16 },
}
