//! Random obstacle placement for building test grids. Obstacles are placed on grid indices only;
//! converting screen coordinates to cells is up to whoever draws the grid.
use grid_util::{Point, ValueGrid};
use log::debug;
use rand::Rng;

use crate::error::{SearchError, SearchResult};
use crate::pathing_grid::PathingGrid;

/// Blocks every cell other than `start` and `end` independently with probability `density`.
/// Returns the number of cells that became blocked.
pub fn generate_obstacles<R: Rng + ?Sized>(
    grid: &mut PathingGrid,
    start: Point,
    end: Point,
    density: f64,
    rng: &mut R,
) -> SearchResult<usize> {
    if !(0.0..=1.0).contains(&density) {
        return Err(SearchError::InvalidDensity(density));
    }
    let mut blocked = 0;
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let p = Point::new(x, y);
            if p == start || p == end || grid.get(x, y) {
                continue;
            }
            if rng.gen_bool(density) {
                grid.set(x, y, true);
                blocked += 1;
            }
        }
    }
    debug!("Generated {} obstacles at density {}", blocked, density);
    Ok(blocked)
}

/// Picks `attempts` cells uniformly at random, with repetition, and blocks each one that is
/// neither `start` nor `end`. Returns the number of cells that became blocked.
pub fn scatter_obstacles<R: Rng + ?Sized>(
    grid: &mut PathingGrid,
    start: Point,
    end: Point,
    attempts: usize,
    rng: &mut R,
) -> usize {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    if w == 0 || h == 0 {
        return 0;
    }
    let mut blocked = 0;
    for _ in 0..attempts {
        let p = Point::new(rng.gen_range(0..w), rng.gen_range(0..h));
        if p == start || p == end || grid.get_point(p) {
            continue;
        }
        grid.set_point(p, true);
        blocked += 1;
    }
    debug!("Scattered {} obstacles in {} attempts", blocked, attempts);
    blocked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    #[test]
    fn density_bounds() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut grid = PathingGrid::new(4, 4, false);
        let start = Point::new(0, 0);
        let end = Point::new(3, 3);
        assert_eq!(
            generate_obstacles(&mut grid, start, end, 1.5, &mut rng),
            Err(SearchError::InvalidDensity(1.5))
        );
        assert!(generate_obstacles(&mut grid, start, end, f64::NAN, &mut rng).is_err());
        assert_eq!(generate_obstacles(&mut grid, start, end, 0.0, &mut rng), Ok(0));
        assert_eq!(grid.blocked_count(), 0);
    }

    #[test]
    fn full_density_spares_endpoints() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut grid = PathingGrid::new(4, 3, false);
        let start = Point::new(0, 0);
        let end = Point::new(3, 2);
        assert_eq!(generate_obstacles(&mut grid, start, end, 1.0, &mut rng), Ok(10));
        assert!(!grid.is_blocked(&start));
        assert!(!grid.is_blocked(&end));
        assert!(grid.components_dirty);
    }

    #[test]
    fn scatter_spares_endpoints() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut grid = PathingGrid::new(5, 5, false);
        let start = Point::new(2, 2);
        let end = Point::new(4, 0);
        let blocked = scatter_obstacles(&mut grid, start, end, 400, &mut rng);
        assert_eq!(blocked, grid.blocked_count());
        assert_eq!(blocked, 23);
        assert!(!grid.is_blocked(&start));
        assert!(!grid.is_blocked(&end));
        assert_eq!(
            scatter_obstacles(&mut PathingGrid::default(), start, end, 10, &mut rng),
            0
        );
    }
}
