use grid_astar::{run_search, AstarSolver, PathingGrid, SearchError, SearchOutcome};
use grid_util::{Point, Rect, ValueGrid};

fn found(outcome: SearchOutcome) -> grid_astar::Path {
    match outcome {
        SearchOutcome::Found(path) => path,
        other => panic!("expected a path, got {:?}", other),
    }
}

#[test]
fn open_grid_path_matches_manhattan_distance() {
    for (w, h) in [(1, 7), (5, 5), (9, 4), (12, 12)] {
        let start = Point::new(0, h as i32 - 1);
        let end = Point::new(w as i32 - 1, 0);
        let mut grid = PathingGrid::new(w, h, false);
        let path = found(run_search(&mut grid, start, end).unwrap());
        assert_eq!(path.steps() as i32, start.manhattan_distance(&end));
        assert!(path.is_contiguous());
    }
}

#[test]
fn five_by_five_corner_to_corner() {
    let mut grid = PathingGrid::new(5, 5, false);
    let path = found(run_search(&mut grid, Point::new(0, 0), Point::new(4, 4)).unwrap());
    assert_eq!(path.len(), 9);
    assert_eq!(path.steps(), 8);
    assert_eq!(path.g_scores().first(), Some(&0));
    assert_eq!(path.g_scores().last(), Some(&8));
    assert!(path.g_scores().windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn routes_around_blocked_center() {
    let mut grid = PathingGrid::new(3, 3, false);
    grid.set(1, 1, true);
    let path = found(run_search(&mut grid, Point::new(0, 0), Point::new(2, 2)).unwrap());
    assert_eq!(path.len(), 5);
    assert!(!path.points().contains(&Point::new(1, 1)));
    assert!(path.is_contiguous());
}

#[test]
fn start_equals_end() {
    let mut grid = PathingGrid::new(4, 4, false);
    let p = Point::new(2, 1);
    let path = found(run_search(&mut grid, p, p).unwrap());
    assert_eq!(path.points(), &[p]);
}

#[test]
fn enclosed_goal_is_not_found() {
    let mut grid = PathingGrid::new(5, 5, false);
    let goal = Point::new(2, 2);
    for p in [(2, 1), (2, 3), (1, 2), (3, 2)] {
        grid.set(p.0, p.1, true);
    }
    let outcome = run_search(&mut grid, Point::new(0, 0), goal).unwrap();
    assert_eq!(outcome, SearchOutcome::NotFound);
}

#[test]
fn wall_splits_grid() {
    let mut grid = PathingGrid::new(7, 4, false);
    // Rect corners are inclusive, so this is column 3, rows 0 to 3.
    grid.set_rect(Rect::new(3, 0, 0, 3), true);
    let outcome = run_search(&mut grid, Point::new(0, 0), Point::new(6, 3)).unwrap();
    assert_eq!(outcome, SearchOutcome::NotFound);
    // Everything on the start side was expanded, nothing on the other side was touched.
    assert_eq!(grid.to_string(), "xxx#...\nxxx#...\nxxx#...\nxxx#...\n");
}

#[test]
fn identical_grids_give_identical_lengths() {
    let build = || {
        let mut grid = PathingGrid::new(8, 6, false);
        grid.set_rect(Rect::new(2, 0, 0, 3), true);
        grid.set_rect(Rect::new(5, 2, 0, 3), true);
        grid
    };
    let (mut a, mut b) = (build(), build());
    let start = Point::new(0, 0);
    let end = Point::new(7, 5);
    let first = found(run_search(&mut a, start, end).unwrap());
    let second = found(run_search(&mut b, start, end).unwrap());
    assert_eq!(first.len(), second.len());
    assert_eq!(first.steps(), 18);
}

#[test]
fn preconditions_are_errors_not_outcomes() {
    let mut grid = PathingGrid::new(3, 3, false);
    grid.set(0, 0, true);
    assert_eq!(
        run_search(&mut grid, Point::new(0, 0), Point::new(2, 2)),
        Err(SearchError::StartBlocked(Point::new(0, 0)))
    );
    assert_eq!(
        run_search(&mut grid, Point::new(1, 1), Point::new(9, 9)),
        Err(SearchError::GoalOutOfBounds(Point::new(9, 9)))
    );
}

#[test]
fn weighted_heuristic_still_finds_a_path() {
    let mut grid = PathingGrid::new(10, 10, false);
    grid.set_rect(Rect::new(2, 2, 5, 0), true);
    let solver = AstarSolver {
        heuristic_factor: 3.0,
        ..AstarSolver::new()
    };
    let outcome = solver
        .get_path_single_goal(&mut grid, Point::new(4, 0), Point::new(4, 9))
        .unwrap();
    let path = found(outcome);
    assert!(path.is_contiguous());
    assert!(path.steps() >= 9);
}
