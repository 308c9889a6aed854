// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for floor plan parsing, layout configuration and scene export.

/// Result type alias for floor plan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Malformed floor plan text. Rows and columns are zero-based in the value
/// and reported one-based in the message. For parsed text a row is the line
/// index in the source, blank lines included.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// No rows, or rows without tokens.
    #[error("floor plan is empty")]
    Empty,

    /// A row's token count differs from the first row's.
    #[error("row {} has {found} columns, expected {expected}", .row + 1)]
    IrregularShape {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A token outside `{-1, 0, 1}`.
    #[error("invalid symbol '{token}' at row {}, column {}", .row + 1, .column + 1)]
    InvalidSymbol {
        row: usize,
        column: usize,
        token: String,
    },
}

/// Invalid layout configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The panel primitive's nominal length is not a positive finite number.
    #[error("panel length must be positive, got {length}")]
    InvalidPanel { length: f64 },

    /// The grid spacing is not a positive finite number.
    #[error("grid spacing must be positive, got {0}")]
    InvalidSpacing(f64),

    /// An environment override could not be read as the expected type.
    #[error("{name}={value:?} is not valid")]
    InvalidEnv { name: &'static str, value: String },

    /// The direction priority is not a permutation of up, down, left, right.
    #[error("invalid direction priority: {0}")]
    InvalidPriority(String),
}

/// Errors surfaced by the floor plan pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("geometry error: {0}")]
    Geometry(#[from] wallkit_geometry::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
