use core::fmt;
use grid_util::{Point, SimpleValueGrid, ValueGrid};
use log::{debug, warn};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::N_SMALLVEC_SIZE;

/// Orthogonal offsets in up, down, left, right order.
const NEUMANN_OFFSETS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// State of a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Free,
    Blocked,
    /// Discovered by the running search and waiting in the open set.
    Open,
    /// Expanded by the running search; its cost from the start is final.
    Closed,
}

impl CellState {
    pub fn is_blocked(self) -> bool {
        self == CellState::Blocked
    }

    /// True for the marks a search leaves behind.
    pub fn is_search_mark(self) -> bool {
        matches!(self, CellState::Open | CellState::Closed)
    }
}

/// [PathingGrid] holds the [CellState] of every cell and maintains connected components of the
/// non-blocked cells in a [UnionFind] structure. Points use `x` for the column and `y` for the
/// row, so the width is the number of columns and the height the number of rows.
///
/// Implements [ValueGrid] over [bool], where `true` means blocked, so obstacles can be placed
/// with [set](ValueGrid::set), [set_point](ValueGrid::set_point) and
/// [set_rect](ValueGrid::set_rect).
#[derive(Clone, Debug)]
pub struct PathingGrid {
    pub grid: SimpleValueGrid<CellState>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Default for PathingGrid {
    fn default() -> PathingGrid {
        PathingGrid {
            grid: SimpleValueGrid::new(0, 0, CellState::Free),
            components: UnionFind::new(0),
            components_dirty: false,
        }
    }
}

impl PathingGrid {
    pub fn num_rows(&self) -> usize {
        self.height()
    }

    pub fn num_columns(&self) -> usize {
        self.width()
    }

    pub fn in_bounds(&self, point: &Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width()
            && (point.y as usize) < self.height()
    }

    /// State of the cell at `point`, or [None] outside the grid.
    pub fn state(&self, point: &Point) -> Option<CellState> {
        if self.in_bounds(point) {
            Some(self.grid.get_point(*point))
        } else {
            None
        }
    }

    pub fn is_blocked(&self, point: &Point) -> bool {
        self.state(point) == Some(CellState::Blocked)
    }

    pub fn can_move_to(&self, point: Point) -> bool {
        matches!(self.state(&point), Some(s) if !s.is_blocked())
    }

    /// Records search progress on a cell. Blocking goes through [ValueGrid::set] so that the
    /// components stay consistent.
    pub(crate) fn mark(&mut self, point: Point, state: CellState) {
        debug_assert!(state.is_search_mark());
        debug_assert!(self.can_move_to(point));
        self.grid.set_point(point, state);
    }

    /// Resets cells left `Open` or `Closed` by an earlier search to `Free`.
    pub fn clear_search_marks(&mut self) {
        for y in 0..self.height() as i32 {
            for x in 0..self.width() as i32 {
                if self.grid.get(x, y).is_search_mark() {
                    self.grid.set(x, y, CellState::Free);
                }
            }
        }
    }

    /// Orthogonal neighbours of `point` that are inside the grid and not blocked.
    pub fn neighborhood_points(&self, point: &Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        NEUMANN_OFFSETS
            .iter()
            .map(|&(dx, dy)| Point::new(point.x + dx, point.y + dy))
            .filter(|p| self.can_move_to(*p))
            .collect()
    }

    pub fn blocked_count(&self) -> usize {
        (0..self.height() as i32)
            .flat_map(|y| (0..self.width() as i32).map(move |x| (x, y)))
            .filter(|&(x, y)| self.grid.get(x, y).is_blocked())
            .count()
    }

    fn get_ix(&self, point: &Point) -> usize {
        point.y as usize * self.width() + point.x as usize
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.get_ix(point))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component. Points outside the grid are
    /// unreachable.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.in_bounds(start) && self.in_bounds(goal) {
            !self
                .components
                .equiv(self.get_ix(start), self.get_ix(goal))
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up orthogonal grid neighbours to the
    /// same components.
    pub fn generate_components(&mut self) {
        debug!(
            "Generating connected components for {}x{} grid",
            self.width(),
            self.height()
        );
        let w = self.width();
        let h = self.height();
        self.components = UnionFind::new(w * h);
        self.components_dirty = false;
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                let point = Point::new(x, y);
                if !self.can_move_to(point) {
                    continue;
                }
                let parent_ix = self.get_ix(&point);
                for p in [Point::new(x + 1, y), Point::new(x, y + 1)] {
                    if self.can_move_to(p) {
                        let ix = self.get_ix(&p);
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height() as i32 {
            let row = (0..self.width() as i32)
                .map(|x| match self.grid.get(x, y) {
                    CellState::Free => '.',
                    CellState::Blocked => '#',
                    CellState::Open => 'o',
                    CellState::Closed => 'x',
                })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

impl ValueGrid<bool> for PathingGrid {
    fn new(width: usize, height: usize, default_value: bool) -> Self {
        let state = if default_value {
            CellState::Blocked
        } else {
            CellState::Free
        };
        PathingGrid {
            grid: SimpleValueGrid::new(width, height, state),
            components: UnionFind::new(width * height),
            // Components are only known after the first generation.
            components_dirty: true,
        }
    }
    /// Cells outside the grid count as blocked.
    fn get(&self, x: i32, y: i32) -> bool {
        self.state(&Point::new(x, y)).map_or(true, CellState::is_blocked)
    }
    /// Blocks or frees a cell. Joins newly connected components and flags the components as
    /// dirty if components are (potentially) broken apart into multiple. Points outside the
    /// grid are ignored.
    fn set(&mut self, x: i32, y: i32, blocked: bool) {
        let p = Point::new(x, y);
        if !self.in_bounds(&p) {
            warn!("Ignoring update of {} outside the {}x{} grid", p, self.width(), self.height());
            return;
        }
        let was_blocked = self.grid.get(x, y).is_blocked();
        if blocked {
            if !was_blocked {
                self.components_dirty = true;
            }
            self.grid.set(x, y, CellState::Blocked);
        } else {
            if was_blocked {
                self.grid.set(x, y, CellState::Free);
            }
            let p_ix = self.get_ix(&p);
            for n in self.neighborhood_points(&p) {
                let n_ix = self.get_ix(&n);
                self.components.union(p_ix, n_ix);
            }
        }
    }
    fn width(&self) -> usize {
        self.grid.width()
    }
    fn height(&self) -> usize {
        self.grid.height()
    }
}
