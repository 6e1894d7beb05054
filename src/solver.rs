use grid_util::Point;
use itertools::Itertools;
use log::{info, warn};

use crate::astar::astar;
use crate::error::{SearchError, SearchResult};
use crate::path::{Path, SearchOutcome};
use crate::pathing_grid::PathingGrid;
use crate::queue::{IndexedOpenSet, LinearOpenSet};
use crate::C;

pub use crate::astar::SearchStats;

/// Estimate of the remaining cost to the goal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Heuristic {
    /// `|dx| + |dy|`. Admissible and consistent for four-directional unit moves.
    #[default]
    Manhattan,
    /// Straight-line distance, truncated to whole steps. Never larger than the Manhattan
    /// distance, so it stays admissible, but it is less informed and expands more nodes.
    Euclidean,
    /// No estimate at all, which turns the search into Dijkstra's algorithm.
    Zero,
}

impl Heuristic {
    pub fn estimate(self, p1: &Point, p2: &Point) -> f32 {
        match self {
            Heuristic::Manhattan => (p1.manhattan_distance(p2) * C) as f32,
            Heuristic::Euclidean => {
                let dx = (p1.x - p2.x) as f32;
                let dy = (p1.y - p2.y) as f32;
                (dx * dx + dy * dy).sqrt() * C as f32
            }
            Heuristic::Zero => 0.0,
        }
    }
}

/// Priority queue implementation used for the open set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpenSetKind {
    /// [PriorityQueue](crate::queue::PriorityQueue); priority updates scan the heap linearly.
    #[default]
    LinearScan,
    /// [IndexedPriorityQueue](crate::queue::IndexedPriorityQueue); logarithmic updates.
    Indexed,
}

/// A* over a [PathingGrid] with orthogonal unit-cost moves.
#[derive(Clone, Debug)]
pub struct AstarSolver {
    pub heuristic: Heuristic,
    /// Multiplies the heuristic. Values above 1 make the search greedier and the found paths
    /// possibly longer than optimal. Must be finite and not negative.
    pub heuristic_factor: f32,
    pub open_set: OpenSetKind,
    /// Refresh the grid's connected components and answer unreachable goals with
    /// [SearchOutcome::NotFound] without searching.
    pub component_check: bool,
}

impl Default for AstarSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic: Heuristic::Manhattan,
            heuristic_factor: 1.0,
            open_set: OpenSetKind::LinearScan,
            component_check: false,
        }
    }

    /// The heuristic scaled by the heuristic factor, saturating at [i32::MAX].
    pub fn heuristic(&self, p1: &Point, p2: &Point) -> i32 {
        (self.heuristic.estimate(p1, p2) * self.heuristic_factor) as i32
    }

    /// Sum of the step costs along `path`.
    pub fn get_path_cost(&self, path: &[Point]) -> i32 {
        path.iter()
            .tuple_windows()
            .map(|(a, b)| a.manhattan_distance(b) * C)
            .sum()
    }

    /// Rejects an unusable heuristic factor and endpoints that lie outside the grid or on
    /// blocked cells.
    pub fn validate(&self, grid: &PathingGrid, start: Point, goal: Point) -> SearchResult<()> {
        if !self.heuristic_factor.is_finite() || self.heuristic_factor < 0.0 {
            return Err(SearchError::InvalidHeuristicFactor(self.heuristic_factor));
        }
        if !grid.in_bounds(&start) {
            return Err(SearchError::StartOutOfBounds(start));
        }
        if !grid.in_bounds(&goal) {
            return Err(SearchError::GoalOutOfBounds(goal));
        }
        if grid.is_blocked(&start) {
            return Err(SearchError::StartBlocked(start));
        }
        if grid.is_blocked(&goal) {
            return Err(SearchError::GoalBlocked(goal));
        }
        Ok(())
    }

    /// Computes a shortest path from `start` to `goal`.
    pub fn get_path_single_goal(
        &self,
        grid: &mut PathingGrid,
        start: Point,
        goal: Point,
    ) -> SearchResult<SearchOutcome> {
        self.search(grid, start, goal, || false).map(|(outcome, _)| outcome)
    }

    /// Like [get_path_single_goal](Self::get_path_single_goal), but stops with
    /// [SearchOutcome::Cancelled] as soon as `cancelled` returns true. It is polled once per
    /// expansion.
    pub fn get_path_cancellable<FC>(
        &self,
        grid: &mut PathingGrid,
        start: Point,
        goal: Point,
        cancelled: FC,
    ) -> SearchResult<SearchOutcome>
    where
        FC: FnMut() -> bool,
    {
        self.search(grid, start, goal, cancelled).map(|(outcome, _)| outcome)
    }

    /// Runs a search and also returns its [SearchStats].
    ///
    /// Preconditions are checked before the grid is touched. Marks left by an earlier search
    /// are cleared before starting.
    pub fn search<FC>(
        &self,
        grid: &mut PathingGrid,
        start: Point,
        goal: Point,
        cancelled: FC,
    ) -> SearchResult<(SearchOutcome, SearchStats)>
    where
        FC: FnMut() -> bool,
    {
        if let Err(e) = self.validate(grid, start, goal) {
            warn!("Rejected search from {} to {}: {} ({})", start, goal, e, e.code());
            return Err(e);
        }
        if start == goal {
            return Ok((
                SearchOutcome::Found(Path::single(start)),
                SearchStats::default(),
            ));
        }
        grid.clear_search_marks();
        if self.component_check {
            grid.update();
            if grid.unreachable(&start, &goal) {
                info!("{} is not reachable from {}", goal, start);
                return Ok((SearchOutcome::NotFound, SearchStats::default()));
            }
        }
        info!("Computing path from {} to {}", start, goal);
        let heuristic = |point: &Point| self.heuristic(point, &goal);
        let (outcome, stats) = match self.open_set {
            OpenSetKind::LinearScan => {
                astar::<LinearOpenSet<Point, i32>, _, _>(grid, start, goal, heuristic, cancelled)
            }
            OpenSetKind::Indexed => {
                astar::<IndexedOpenSet<Point, i32>, _, _>(grid, start, goal, heuristic, cancelled)
            }
        };
        match &outcome {
            SearchOutcome::Found(path) => info!(
                "Found path of {} steps after expanding {} nodes",
                path.steps(),
                stats.expanded
            ),
            SearchOutcome::NotFound if self.component_check => {
                warn!("Reachable goal could not be pathed to, is reachable graph correct?")
            }
            SearchOutcome::NotFound => info!("{} is not reachable from {}", goal, start),
            SearchOutcome::Cancelled => info!("Search from {} to {} cancelled", start, goal),
        }
        Ok((outcome, stats))
    }
}
