use thiserror::Error;
use tui_jigsaw_core::ConfigError;

/// Fatal engine construction failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid puzzle configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("primary image could not be loaded: {url}")]
    MissingPrimaryImage { url: String },
    #[error("not entitled to start a puzzle")]
    NotEntitled,
}
