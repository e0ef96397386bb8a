use crate::tessellation::TessellationError;

use thiserror::Error;

/// The error type of this crate.
#[derive(Error, Debug)]
pub enum BraceError {
    /// A pointing direction other than `left` or `right`.
    #[error("invalid pointing direction {0:?}, expected \"left\" or \"right\"")]
    InvalidPointing(String),
    #[error("invalid color {0:?}")]
    InvalidColor(String),
    /// A style option with a value that could not be interpreted.
    #[error("invalid value {value:?} for style option {key:?}")]
    InvalidStyle { key: String, value: String },
    #[error("unknown style option {0:?}")]
    UnknownStyleKey(String),
    #[error("stroke tessellation failed: {0:?}")]
    Tessellation(#[from] TessellationError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
