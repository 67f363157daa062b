use grid_util::point::Point;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Violations of the input contract. An unreachable goal is not an error and is reported as
/// [None] by the search functions instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A row of the collision map does not match the grid width
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// An ASCII map contained a character that is not a collision marker
    #[error("unknown collision marker {marker:?} at line {line}, column {column}")]
    UnknownMarker {
        line: usize,
        column: usize,
        marker: char,
    },

    /// Start or goal lies outside the grid
    #[error("position {position} lies outside the {width}x{height} grid")]
    OutOfBounds {
        position: Point,
        width: usize,
        height: usize,
    },
}
