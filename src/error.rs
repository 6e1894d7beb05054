//! Precondition errors reported before a search starts.
//!
//! Running out of candidates is not an error: it is reported as
//! [SearchOutcome::NotFound](crate::SearchOutcome::NotFound).

use grid_util::Point;
use thiserror::Error;

/// Reasons a search or obstacle generation request is rejected before doing any work.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The start lies outside the grid.
    #[error("Start {0} is outside the grid")]
    StartOutOfBounds(Point),

    /// The goal lies outside the grid.
    #[error("Goal {0} is outside the grid")]
    GoalOutOfBounds(Point),

    /// The start is a blocked cell, so no search can begin there.
    #[error("Start {0} is blocked")]
    StartBlocked(Point),

    /// The goal is a blocked cell, so no search can terminate there.
    #[error("Goal {0} is blocked")]
    GoalBlocked(Point),

    /// The heuristic factor must be finite and not negative.
    #[error("Heuristic factor {0} is not a finite non-negative number")]
    InvalidHeuristicFactor(f32),

    /// Obstacle density must be a probability in `[0, 1]`.
    #[error("Obstacle density {0} is not within [0, 1]")]
    InvalidDensity(f64),
}

impl SearchError {
    /// Short error code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::StartOutOfBounds(_) => "START_OUT_OF_BOUNDS",
            Self::GoalOutOfBounds(_) => "GOAL_OUT_OF_BOUNDS",
            Self::StartBlocked(_) => "START_BLOCKED",
            Self::GoalBlocked(_) => "GOAL_BLOCKED",
            Self::InvalidHeuristicFactor(_) => "INVALID_HEURISTIC_FACTOR",
            Self::InvalidDensity(_) => "INVALID_DENSITY",
        }
    }
}

/// Result type alias for search operations.
pub type SearchResult<T> = std::result::Result<T, SearchError>;
