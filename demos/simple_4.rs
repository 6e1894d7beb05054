use grid_astar::{run_search, PathingGrid, SearchOutcome};
use grid_util::grid::ValueGrid;
use grid_util::point::Point;

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

fn main() {
    let mut pathing_grid = PathingGrid::new(3, 3, false);
    pathing_grid.set(1, 1, true);
    let start = Point::new(0, 0);
    let end = Point::new(2, 2);
    match run_search(&mut pathing_grid, start, end) {
        Ok(SearchOutcome::Found(path)) => {
            println!("{}", pathing_grid);
            println!("Path:");
            for (p, g) in path.iter().zip(path.g_scores()) {
                println!("{:?} (g = {})", p, g);
            }
        }
        Ok(outcome) => println!("No path: {:?}", outcome),
        Err(e) => eprintln!("{}", e),
    }
}
