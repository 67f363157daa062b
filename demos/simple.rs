use collision_pathfinding::{calculate_path, CollisionGrid};
use grid_util::point::Point;

// In this example a path is found on a 5x5 grid with shape
//  _____
// |S    |
// |     |
// |  #  |
// |     |
// |    E|
//  _____
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have an 8-neighborhood, so the path steps around the obstacle diagonally.

fn main() {
    let grid: CollisionGrid = "\
        .....
        .....
        ..#..
        .....
        ....."
        .parse()
        .unwrap();
    println!("{}", grid);
    let start = Point::new(0, 0);
    let end = Point::new(4, 4);
    if let Some(result) = calculate_path(&grid, start, end) {
        println!("A path of {} steps with cost {} has been found:", result.length, result.cost);
        for p in result.path {
            println!("{:?}", p);
        }
    }
}
