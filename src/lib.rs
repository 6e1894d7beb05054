//! # grid_astar
//!
//! Single-shot shortest paths on a four-connected grid using
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm). Movement is restricted to the four
//! orthogonal directions with unit step cost, for which the default
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) heuristic is admissible
//! and consistent, so the first time the goal is extracted from the open set the path is optimal.
//!
//! The open set is a binary min-heap with a caller-supplied comparator
//! ([PriorityQueue](queue::PriorityQueue)); an indexed variant
//! ([IndexedPriorityQueue](queue::IndexedPriorityQueue)) trades a position map for
//! logarithmic priority updates on large grids.
//!
//! ```
//! use grid_astar::{run_search, PathingGrid, SearchOutcome};
//! use grid_util::{Point, ValueGrid};
//!
//! let mut grid = PathingGrid::new(3, 3, false);
//! grid.set(1, 1, true);
//! let outcome = run_search(&mut grid, Point::new(0, 0), Point::new(2, 2)).unwrap();
//! assert_eq!(outcome.path().map(|p| p.len()), Some(5));
//! ```
mod astar;
pub mod error;
pub mod obstacles;
pub mod path;
pub mod pathing_grid;
pub mod queue;
pub mod solver;

pub use error::{SearchError, SearchResult};
pub use obstacles::{generate_obstacles, scatter_obstacles};
pub use path::{Path, SearchOutcome};
pub use pathing_grid::{CellState, PathingGrid};
pub use solver::{AstarSolver, Heuristic, OpenSetKind, SearchStats};

use grid_util::Point;

/// Cost of a single orthogonal step.
pub const C: i32 = 1;

/// Inline capacity of neighbour lists; a cell has at most four orthogonal neighbours.
pub const N_SMALLVEC_SIZE: usize = 4;

/// Computes a shortest path from `start` to `end` with the default [AstarSolver]: Manhattan
/// heuristic and a linear-scan decrease-key open set.
///
/// Blocked cells must already be marked on `grid`. Precondition violations are reported as
/// [SearchError]; an exhausted search is the normal outcome [SearchOutcome::NotFound].
pub fn run_search(
    grid: &mut PathingGrid,
    start: Point,
    end: Point,
) -> SearchResult<SearchOutcome> {
    AstarSolver::default().get_path_single_goal(grid, start, end)
}
