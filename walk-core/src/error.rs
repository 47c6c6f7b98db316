use thiserror::Error;

use crate::grid::GridKind;

/// Errors raised while validating configuration or building a grid.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("invalid config value for `{field}`: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },

    #[error("{kind} grid has no nodes inside the canvas")]
    EmptyGrid { kind: GridKind },
}

pub type Result<T> = std::result::Result<T, Error>;
