use crate::collision_grid::CollisionGrid;
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;

/// Half of the 8-neighbourhood; linking every cell to these covers each pair of neighbours once.
const FORWARD_OFFSETS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (-1, 1)];

fn passable(grid: &CollisionGrid, point: Point) -> bool {
    grid.get_point(point).is_some_and(|collision| !collision.is_impassable())
}

/// Connected components of a [CollisionGrid] under the movement rules of the path finder,
/// maintained in a [UnionFind] structure. Answers whether a path exists without searching. The
/// components describe the grid as it was when they were generated; after the grid changes they
/// have to be generated again.
#[derive(Clone, Debug)]
pub struct Components {
    width: usize,
    height: usize,
    components: UnionFind<usize>,
}

impl Components {
    /// Generates a new [UnionFind] structure and links up grid neighbours to the same components.
    pub fn generate(grid: &CollisionGrid) -> Components {
        info!("Generating connected components");
        let mut components = Components {
            width: grid.width(),
            height: grid.height(),
            components: UnionFind::new(grid.width() * grid.height()),
        };
        for y in 0..grid.height() as i32 {
            for x in 0..grid.width() as i32 {
                let point = Point::new(x, y);
                if !passable(grid, point) {
                    continue;
                }
                let parent_ix = components.get_ix_point(&point);
                for (dx, dy) in FORWARD_OFFSETS {
                    let neighbour = Point::new(x + dx, y + dy);
                    if grid.can_step(point, neighbour) && passable(grid, neighbour) {
                        let ix = components.get_ix_point(&neighbour);
                        components.components.union(parent_ix, ix);
                    }
                }
            }
        }
        components
    }

    fn get_ix_point(&self, point: &Point) -> usize {
        point.y as usize * self.width + point.x as usize
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.get_ix_point(point))
    }

    /// Checks if a path from start to goal exists. Impassable cells form no component of their
    /// own, but a search may still leave an impassable start, so its neighbours are consulted
    /// instead.
    pub fn reachable(&self, grid: &CollisionGrid, start: &Point, goal: &Point) -> bool {
        debug_assert!(grid.width() == self.width && grid.height() == self.height);
        if !grid.point_in_bounds(*start) || !grid.point_in_bounds(*goal) {
            return false;
        }
        if start == goal {
            return true;
        }
        if !passable(grid, *goal) {
            return false;
        }
        let goal_ix = self.get_ix_point(goal);
        if passable(grid, *start) {
            self.components.equiv(self.get_ix_point(start), goal_ix)
        } else {
            grid.neighbours(*start).into_iter().any(|p| {
                grid.can_step(*start, p)
                    && passable(grid, p)
                    && self.components.equiv(self.get_ix_point(&p), goal_ix)
            })
        }
    }

    /// Checks if start and goal are not connected.
    pub fn unreachable(&self, grid: &CollisionGrid, start: &Point, goal: &Point) -> bool {
        !self.reachable(grid, start, goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::Collision;

    /// Tests whether points are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // Corresponds to the following 3x2 grid:
        //  ___
        // |.#.|
        // |.#.|
        //  ___
        let grid: CollisionGrid = ".#.\n.#.".parse().unwrap();
        let components = Components::generate(&grid);
        let p1 = Point::new(0, 0);
        let p3 = Point::new(0, 1);
        let p4 = Point::new(2, 0);
        assert_eq!(components.get_component(&p1), components.get_component(&p3));
        assert_ne!(components.get_component(&p1), components.get_component(&p4));
        assert!(components.reachable(&grid, &p1, &p3));
        assert!(components.unreachable(&grid, &p1, &p4));
        assert!(components.unreachable(&grid, &p1, &Point::new(1, 0)));
    }

    /// Diagonal links are only made where no corner is cut.
    #[test]
    fn diagonal_gap_does_not_connect() {
        //  __
        // |.#|
        // |#.|
        //  __
        let grid: CollisionGrid = ".#\n#.".parse().unwrap();
        let components = Components::generate(&grid);
        assert!(components.unreachable(&grid, &Point::new(0, 0), &Point::new(1, 1)));

        let open: CollisionGrid = "..\n..".parse().unwrap();
        let components = Components::generate(&open);
        assert!(components.reachable(&open, &Point::new(0, 0), &Point::new(1, 1)));
        assert!(components.reachable(&open, &Point::new(1, 0), &Point::new(0, 1)));
    }

    /// Heavy cells still connect, they only cost more to cross.
    #[test]
    fn weighted_cells_connect() {
        let grid: CollisionGrid = ".m.\n#o#\n.l.".parse().unwrap();
        let components = Components::generate(&grid);
        assert!(components.reachable(&grid, &Point::new(0, 0), &Point::new(2, 2)));
    }

    #[test]
    fn impassable_start_and_goal() {
        let mut grid = CollisionGrid::new(3, 3, Collision::Walkable);
        grid.set(0, 0, Collision::NonWalkable);
        let components = Components::generate(&grid);
        let blocked = Point::new(0, 0);
        assert!(components.reachable(&grid, &blocked, &Point::new(2, 2)));
        assert!(components.unreachable(&grid, &Point::new(2, 2), &blocked));
        assert!(components.reachable(&grid, &blocked, &blocked));
        assert!(components.unreachable(&grid, &blocked, &Point::new(3, 0)));
    }
}
