//! The A* run over a [PathingGrid]. The cost tables live in a single insertion-ordered map from
//! point to `(predecessor index, g-score)`, which lets the path be rebuilt by following indices.
use fxhash::FxBuildHasher;
use grid_util::{Point, ValueGrid};
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::{debug, warn};

use crate::path::{Path, SearchOutcome};
use crate::pathing_grid::{CellState, PathingGrid};
use crate::queue::{OpenSet, SearchNode};
use crate::C;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Counters collected during a single run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes taken from the open set and closed.
    pub expanded: usize,
    /// Nodes that entered the open set.
    pub discovered: usize,
    /// Improvements applied to nodes already in the open set.
    pub updated: usize,
}

fn reverse_path(parents: &FxIndexMap<Point, (usize, i32)>, start: usize) -> Path {
    let mut ix = start;
    let mut steps: Vec<(Point, i32)> = std::iter::from_fn(|| {
        parents.get_index(ix).map(|(&node, &(parent, cost))| {
            ix = parent;
            (node, cost)
        })
    })
    .collect();
    steps.reverse();
    let (points, g_scores) = steps.into_iter().unzip();
    Path::new(points, g_scores)
}

/// Runs A* from `start` to `goal`, marking cells `Open` and `Closed` on `grid` as it goes.
///
/// `cancelled` is polled before every extraction from the open set. Both endpoints must be in
/// bounds and not blocked.
pub(crate) fn astar<Q, FH, FC>(
    grid: &mut PathingGrid,
    start: Point,
    goal: Point,
    mut heuristic: FH,
    mut cancelled: FC,
) -> (SearchOutcome, SearchStats)
where
    Q: OpenSet<Point, i32>,
    FH: FnMut(&Point) -> i32,
    FC: FnMut() -> bool,
{
    let mut stats = SearchStats::default();
    let mut to_see = Q::with_capacity(grid.width().max(grid.height()) * 2);
    let mut parents: FxIndexMap<Point, (usize, i32)> = FxIndexMap::default();
    parents.insert(start, (usize::MAX, 0));
    to_see.push(SearchNode::new(start, heuristic(&start), 0));
    grid.mark(start, CellState::Open);
    stats.discovered += 1;

    loop {
        if cancelled() {
            debug!("Search cancelled after expanding {} nodes", stats.expanded);
            return (SearchOutcome::Cancelled, stats);
        }
        let Some(SearchNode { node: current, .. }) = to_see.pop() else {
            break;
        };
        let Some((index, _, &(_, cost))) = parents.get_full(&current) else {
            warn!("{} left the open set without a recorded cost", current);
            continue;
        };
        if current == goal {
            debug!(
                "Reached {} at cost {} after expanding {} nodes",
                goal, cost, stats.expanded
            );
            return (SearchOutcome::Found(reverse_path(&parents, index)), stats);
        }
        grid.mark(current, CellState::Closed);
        stats.expanded += 1;

        for neighbour in grid.neighborhood_points(&current) {
            // The cost of closed cells is final.
            if grid.state(&neighbour) == Some(CellState::Closed) {
                continue;
            }
            let new_cost = cost + C;
            match parents.entry(neighbour) {
                Vacant(e) => {
                    e.insert((index, new_cost));
                    to_see.push(SearchNode::new(
                        neighbour,
                        new_cost.saturating_add(heuristic(&neighbour)),
                        new_cost,
                    ));
                    grid.mark(neighbour, CellState::Open);
                    stats.discovered += 1;
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        e.insert((index, new_cost));
                        to_see.update(SearchNode::new(
                            neighbour,
                            new_cost.saturating_add(heuristic(&neighbour)),
                            new_cost,
                        ));
                        stats.updated += 1;
                    }
                }
            }
        }
    }
    debug!(
        "Open set exhausted after expanding {} nodes without reaching {}",
        stats.expanded, goal
    );
    (SearchOutcome::NotFound, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::{IndexedOpenSet, LinearOpenSet};
    use fxhash::FxHashSet;

    fn manhattan(goal: Point) -> impl FnMut(&Point) -> i32 {
        move |p| p.manhattan_distance(&goal) * C
    }

    /// Open set that fails when a node is inserted a second time.
    struct UniquePushes<Q> {
        inner: Q,
        seen: FxHashSet<Point>,
    }

    impl<Q: OpenSet<Point, i32>> OpenSet<Point, i32> for UniquePushes<Q> {
        fn with_capacity(capacity: usize) -> Self {
            UniquePushes {
                inner: Q::with_capacity(capacity),
                seen: FxHashSet::default(),
            }
        }
        fn push(&mut self, node: SearchNode<Point, i32>) {
            assert!(self.seen.insert(node.node), "{} pushed twice", node.node);
            self.inner.push(node);
        }
        fn pop(&mut self) -> Option<SearchNode<Point, i32>> {
            self.inner.pop()
        }
        fn update(&mut self, node: SearchNode<Point, i32>) {
            assert!(self.seen.contains(&node.node));
            self.inner.update(node);
        }
        fn len(&self) -> usize {
            self.inner.len()
        }
    }

    fn search_marks(grid: &PathingGrid) -> (usize, usize) {
        let mut open = 0;
        let mut closed = 0;
        for y in 0..grid.height() as i32 {
            for x in 0..grid.width() as i32 {
                match grid.state(&Point::new(x, y)) {
                    Some(CellState::Open) => open += 1,
                    Some(CellState::Closed) => closed += 1,
                    _ => {}
                }
            }
        }
        (open, closed)
    }

    /// Ring around a blocked center. The heuristic sends the search the long way round to the
    /// goal at (0, 2) first, so the goal is later reached more cheaply through (0, 1).
    fn detour<Q: OpenSet<Point, i32>>() -> (PathingGrid, SearchOutcome, SearchStats) {
        let mut grid = PathingGrid::new(3, 3, false);
        grid.set(1, 1, true);
        let (outcome, stats) = astar::<UniquePushes<Q>, _, _>(
            &mut grid,
            Point::new(0, 0),
            Point::new(0, 2),
            |p| match (p.x, p.y) {
                (0, 1) => 100,
                (0, 2) => 1000,
                _ => 0,
            },
            || false,
        );
        (grid, outcome, stats)
    }

    #[test]
    fn marks_cells_while_searching() {
        let mut grid = PathingGrid::new(3, 1, false);
        let goal = Point::new(2, 0);
        let (outcome, stats) = astar::<LinearOpenSet<Point, i32>, _, _>(
            &mut grid,
            Point::new(0, 0),
            goal,
            manhattan(goal),
            || false,
        );
        assert_eq!(outcome.path().map(Path::len), Some(3));
        assert_eq!(stats.expanded, 2);
        // The goal is discovered but never closed.
        assert_eq!(grid.to_string(), "xxo\n");
    }

    #[test]
    fn exhausts_enclosed_start() {
        let mut grid = PathingGrid::new(3, 3, false);
        grid.set(1, 0, true);
        grid.set(0, 1, true);
        let goal = Point::new(2, 2);
        let (outcome, stats) = astar::<IndexedOpenSet<Point, i32>, _, _>(
            &mut grid,
            Point::new(0, 0),
            goal,
            manhattan(goal),
            || false,
        );
        assert_eq!(outcome, SearchOutcome::NotFound);
        assert_eq!(stats.expanded, 1);
    }

    #[test]
    fn cancellation_is_checked_before_each_expansion() {
        let mut grid = PathingGrid::new(5, 5, false);
        let goal = Point::new(4, 4);
        let mut polls = 0;
        let (outcome, stats) = astar::<LinearOpenSet<Point, i32>, _, _>(
            &mut grid,
            Point::new(0, 0),
            goal,
            manhattan(goal),
            || {
                polls += 1;
                polls > 3
            },
        );
        assert_eq!(outcome, SearchOutcome::Cancelled);
        assert_eq!(stats.expanded, 3);
    }

    #[test]
    fn improved_cost_updates_open_node() {
        for (grid, outcome, stats) in [
            detour::<LinearOpenSet<Point, i32>>(),
            detour::<IndexedOpenSet<Point, i32>>(),
        ] {
            assert_eq!(stats.updated, 1);
            assert_eq!(stats.discovered, 8);
            assert_eq!(stats.expanded, 7);
            let path = outcome.into_path().unwrap();
            assert_eq!(
                path.points(),
                &[Point::new(0, 0), Point::new(0, 1), Point::new(0, 2)]
            );
            assert_eq!(path.g_scores(), &[0, 1, 2]);
            assert!(path.is_contiguous());
            assert!(path.iter().all(|p| !grid.is_blocked(p)));
            assert_eq!(grid.to_string(), "xxx\nx#x\noxx\n");
        }
    }

    /// Every discovered cell carries exactly one search mark and entered the open set once.
    #[test]
    fn cells_are_discovered_once() {
        let mut grid = PathingGrid::new(8, 8, false);
        for (x, y) in [(2, 0), (2, 1), (2, 2), (2, 3), (5, 7), (5, 6), (5, 5), (4, 3), (6, 3)] {
            grid.set(x, y, true);
        }
        let goal = Point::new(7, 6);
        for factor in [0, 1, 3] {
            grid.clear_search_marks();
            let (outcome, stats) = astar::<UniquePushes<LinearOpenSet<Point, i32>>, _, _>(
                &mut grid,
                Point::new(0, 0),
                goal,
                |p| p.manhattan_distance(&goal) * factor,
                || false,
            );
            assert!(outcome.is_found());
            let (open, closed) = search_marks(&grid);
            assert_eq!(open + closed, stats.discovered);
            assert_eq!(closed, stats.expanded);
        }
    }

    #[test]
    fn reconstructs_g_scores_along_path() {
        let mut grid = PathingGrid::new(4, 4, false);
        let goal = Point::new(3, 3);
        let (outcome, _) = astar::<IndexedOpenSet<Point, i32>, _, _>(
            &mut grid,
            Point::new(0, 0),
            goal,
            |_| 0,
            || false,
        );
        let path = outcome.into_path().unwrap();
        assert_eq!(path.g_scores(), &[0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(path.start(), Point::new(0, 0));
        assert_eq!(path.goal(), goal);
    }
}
