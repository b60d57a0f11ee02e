//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlatformError {
    /// Grid has no cells
    #[error("Invalid grid: {cols}x{rows}")]
    InvalidGrid { cols: usize, rows: usize },

    /// Grid has a non-positive or non-finite size
    #[error("Invalid grid size: {width}x{height}")]
    InvalidSize { width: f32, height: f32 },

    /// A scripted key has no cell binding
    #[error("No cell bound to key {0:?}")]
    UnboundKey(char),

    /// Cell index outside the grid
    #[error("Cell {cell} out of range (grid has {count} cells)")]
    CellOutOfRange { cell: usize, count: usize },
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
