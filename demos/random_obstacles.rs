use grid_astar::{generate_obstacles, AstarSolver, OpenSetKind, PathingGrid, SearchOutcome};
use grid_util::grid::ValueGrid;
use grid_util::point::Point;
use rand::{rngs::StdRng, SeedableRng};

// Fills a 40x20 grid with random obstacles and searches from the top left to the bottom right
// corner. The seed can be given as first argument.

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0);
    let mut rng = StdRng::seed_from_u64(seed);
    let (w, h) = (40, 20);
    let start = Point::new(0, 0);
    let end = Point::new(w as i32 - 1, h as i32 - 1);
    let mut pathing_grid = PathingGrid::new(w, h, false);
    if let Err(e) = generate_obstacles(&mut pathing_grid, start, end, 0.3, &mut rng) {
        eprintln!("{}", e);
        return;
    }
    let solver = AstarSolver {
        open_set: OpenSetKind::Indexed,
        ..AstarSolver::new()
    };
    match solver.search(&mut pathing_grid, start, end, || false) {
        Ok((outcome, stats)) => {
            println!("{}", pathing_grid);
            match outcome {
                SearchOutcome::Found(path) => println!(
                    "Found path of {} steps, expanded {} nodes",
                    path.steps(),
                    stats.expanded
                ),
                _ => println!("No path, expanded {} nodes", stats.expanded),
            }
        }
        Err(e) => eprintln!("{}", e),
    }
}
