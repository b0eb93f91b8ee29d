//! Crate-level error type.

use crate::config::ConfigError;
use crate::parser::ParsingError;
use crate::substitution::TraversalError;
use thiserror::Error;

/// Any error of this crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed Newick string
    #[error(transparent)]
    Parsing(#[from] ParsingError),
    /// Failed traversal
    #[error(transparent)]
    Traversal(#[from] TraversalError),
    /// Unusable configuration
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result with the crate-level [Error].
pub type Result<T> = std::result::Result<T, Error>;
