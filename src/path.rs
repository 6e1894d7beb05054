use grid_util::Point;
use itertools::Itertools;

/// A path from start to goal with the cost from the start of every point on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    points: Vec<Point>,
    g_scores: Vec<i32>,
}

impl Path {
    pub(crate) fn new(points: Vec<Point>, g_scores: Vec<i32>) -> Path {
        debug_assert_eq!(points.len(), g_scores.len());
        debug_assert!(!points.is_empty());
        Path { points, g_scores }
    }

    /// The path consisting only of `point`.
    pub(crate) fn single(point: Point) -> Path {
        Path::new(vec![point], vec![0])
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Cost from the start of each point, in path order.
    pub fn g_scores(&self) -> &[i32] {
        &self.g_scores
    }

    /// Number of cells on the path, including start and goal.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false, a path holds at least its start.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of moves, one less than the number of cells.
    pub fn steps(&self) -> usize {
        self.points.len() - 1
    }

    pub fn cost(&self) -> i32 {
        self.g_scores.last().copied().unwrap_or(0)
    }

    pub fn start(&self) -> Point {
        self.points[0]
    }

    pub fn goal(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Checks that consecutive points differ by one unit along exactly one axis.
    pub fn is_contiguous(&self) -> bool {
        self.points
            .iter()
            .tuple_windows()
            .all(|(a, b)| (a.x - b.x).abs() + (a.y - b.y).abs() == 1)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// How a search ended. Precondition failures are reported separately as
/// [SearchError](crate::SearchError).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The goal was reached; the path runs from start to goal.
    Found(Path),
    /// The open set was exhausted without reaching the goal.
    NotFound,
    /// The caller asked the search to stop before it finished.
    Cancelled,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            _ => None,
        }
    }

    pub fn into_path(self) -> Option<Path> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            _ => None,
        }
    }
}
