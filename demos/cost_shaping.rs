use collision_pathfinding::{Collision, CollisionGrid, CostModel, PathFinder};
use grid_util::point::Point;

// Shows how the cost model shapes a path. Monsters ('m') are expensive to walk through and
// cells next to walls ('#') carry a penalty, so the default path takes a wide berth. Dropping
// both lets the path run straight through.

fn render(grid: &CollisionGrid, path: &[Point]) {
    for y in 0..grid.height() as i32 {
        let line = (0..grid.width() as i32)
            .map(|x| {
                if path.contains(&Point::new(x, y)) {
                    '*'
                } else {
                    grid.get(x, y).map_or(' ', Collision::marker)
                }
            })
            .collect::<String>();
        println!("{}", line);
    }
}

fn main() {
    let grid: CollisionGrid = "\
        ..............
        ....#####.....
        ..............
        ......mm......
        ..............
        ....#####.....
        .............."
        .parse()
        .unwrap();
    let start = Point::new(0, 3);
    let end = Point::new(13, 3);

    let shaped = PathFinder::new();
    let flat = PathFinder {
        cost_model: CostModel {
            monster: 1,
            wall_penalty: 0,
            ..CostModel::default()
        },
        ..PathFinder::default()
    };
    for (name, finder) in [("default costs", shaped), ("flat costs", flat)] {
        match finder.calculate_path(&grid, start, end) {
            Some(result) => {
                println!("{}: {} steps, cost {}", name, result.length, result.cost);
                render(&grid, &result.path);
            }
            None => println!("{}: no path", name),
        }
        println!();
    }
}
