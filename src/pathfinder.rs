use crate::astar::astar;
use crate::collision_grid::{CollisionGrid, MOORE_OFFSETS};
use crate::components::Components;
use crate::cost::CostModel;
use crate::error::{Error, Result};
use crate::heuristic::Heuristic;
use grid_util::point::Point;
use itertools::Itertools;
use log::{debug, info, warn};
use smallvec::SmallVec;

pub const N_SMALLVEC_SIZE: usize = 8;

/// A path found by [PathFinder]: every position from start to goal inclusive, the number of
/// positions and the accumulated cost of walking it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathResult {
    pub path: Vec<Point>,
    pub length: usize,
    pub cost: i32,
}

impl PathResult {
    fn new(path: Vec<Point>, cost: i32) -> PathResult {
        PathResult {
            length: path.len(),
            path,
            cost,
        }
    }
}

fn step(from: &Point, to: &Point) -> (i32, i32) {
    (to.x - from.x, to.y - from.y)
}

/// Weighted A* over a [CollisionGrid]. Moves go to any of the 8 neighbours, entering a cell costs
/// what the [CostModel] says and changing direction costs an extra `turn_penalty`, which favours
/// straight runs over zig-zagging among otherwise equal routes.
///
/// A [PathFinder] holds no search state, so one instance can serve any number of grids and
/// threads at the same time.
#[derive(Clone, Debug)]
pub struct PathFinder {
    pub cost_model: CostModel,
    pub heuristic: Heuristic,
    pub heuristic_factor: f32,
    pub turn_penalty: i32,
    /// Gives up after expanding this many nodes.
    pub max_expansions: Option<usize>,
}

impl Default for PathFinder {
    fn default() -> PathFinder {
        PathFinder {
            cost_model: CostModel::default(),
            heuristic: Heuristic::Manhattan,
            heuristic_factor: 1.0,
            turn_penalty: 1,
            max_expansions: None,
        }
    }
}

impl PathFinder {
    pub fn new() -> PathFinder {
        PathFinder::default()
    }

    pub fn heuristic(&self, p1: &Point, p2: &Point) -> i32 {
        self.heuristic.estimate(p1, p2, self.heuristic_factor)
    }

    fn turn_cost(&self, parent: Option<&Point>, node: &Point, next: &Point) -> i32 {
        match parent {
            Some(parent) if step(parent, node) != step(node, next) => self.turn_penalty,
            _ => 0,
        }
    }

    /// Neighbours of `node` that may be entered, together with the cost of the move. The parent
    /// is the node `node` was reached from and decides whether the move counts as a turn.
    pub fn successors(
        &self,
        grid: &CollisionGrid,
        parent: Option<&Point>,
        node: &Point,
    ) -> SmallVec<[(Point, i32); N_SMALLVEC_SIZE]> {
        MOORE_OFFSETS
            .iter()
            .map(|(dx, dy)| Point::new(node.x + dx, node.y + dy))
            .filter(|next| grid.can_step(*node, *next))
            .filter_map(|next| {
                let cost = self.cost_model.cost(grid, next)?;
                Some((next, cost + self.turn_cost(parent, node, &next)))
            })
            .collect()
    }

    /// Computes the cheapest path from start to goal. Returns [None] if no path exists, if start
    /// or goal lie outside the grid, or if `max_expansions` runs out. Neither start nor goal has
    /// to be walkable: a blocked start can still be left, a blocked goal is only reached when it
    /// equals the start.
    pub fn calculate_path(
        &self,
        grid: &CollisionGrid,
        start: Point,
        goal: Point,
    ) -> Option<PathResult> {
        if !grid.point_in_bounds(start) || !grid.point_in_bounds(goal) {
            debug!(
                "Path from {} to {} requested outside the {}x{} grid",
                start,
                goal,
                grid.width(),
                grid.height()
            );
            return None;
        }
        astar(
            &start,
            |parent, node| self.successors(grid, parent, node),
            |point| self.heuristic(point, &goal),
            |point| *point == goal,
            self.max_expansions,
        )
        .map(|(path, cost)| PathResult::new(path, cost))
    }

    /// Like [calculate_path](Self::calculate_path), but positions outside the grid are reported
    /// as [Error::OutOfBounds] instead of as a missing path.
    pub fn try_calculate_path(
        &self,
        grid: &CollisionGrid,
        start: Point,
        goal: Point,
    ) -> Result<Option<PathResult>> {
        for position in [start, goal] {
            if !grid.point_in_bounds(position) {
                return Err(Error::OutOfBounds {
                    position,
                    width: grid.width(),
                    height: grid.height(),
                });
            }
        }
        Ok(self.calculate_path(grid, start, goal))
    }

    /// Consults the connected [Components] of the grid first, which avoids flood-filling the
    /// whole grid when the goal cannot be reached.
    pub fn calculate_path_checked(
        &self,
        grid: &CollisionGrid,
        components: &Components,
        start: Point,
        goal: Point,
    ) -> Option<PathResult> {
        if components.unreachable(grid, &start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return None;
        }
        let result = self.calculate_path(grid, start, goal);
        if result.is_none() && self.max_expansions.is_none() {
            warn!(
                "{} could not be pathed to from {}, are the components up to date?",
                goal, start
            );
        }
        result
    }

    /// Accumulated cost of walking `path` under this configuration, counted the same way the
    /// search counts it. [None] if the path is empty, has a step that is not a legal single move
    /// or enters a blocked cell.
    pub fn path_cost(&self, grid: &CollisionGrid, path: &[Point]) -> Option<i32> {
        if path.is_empty() {
            return None;
        }
        let mut total = 0;
        let mut parent = None;
        for (node, next) in path.iter().tuple_windows() {
            let (dx, dy) = step(node, next);
            let adjacent = dx.abs() <= 1 && dy.abs() <= 1 && (dx, dy) != (0, 0);
            if !adjacent || !grid.can_step(*node, *next) {
                return None;
            }
            total += self.cost_model.cost(grid, *next)? + self.turn_cost(parent, node, next);
            parent = Some(node);
        }
        Some(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::Collision;

    fn open_grid(n: usize) -> CollisionGrid {
        CollisionGrid::new(n, n, Collision::Walkable)
    }

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        let grid = open_grid(1);
        let start = Point::new(0, 0);
        let result = PathFinder::new().calculate_path(&grid, start, start).unwrap();
        assert_eq!(result.path, vec![start]);
        assert_eq!(result.length, 1);
        assert_eq!(result.cost, 0);
    }

    #[test]
    fn straight_diagonal() {
        let grid = open_grid(5);
        let result = PathFinder::new()
            .calculate_path(&grid, Point::new(0, 0), Point::new(4, 4))
            .unwrap();
        let expected = (0..5).map(|i| Point::new(i, i)).collect::<Vec<_>>();
        assert_eq!(result.path, expected);
        assert_eq!(result.length, 5);
        assert_eq!(result.cost, 4);
    }

    #[test]
    fn turns_are_penalised() {
        let grid = open_grid(3);
        let finder = PathFinder::new();
        let origin = Point::new(1, 1);
        let succ = finder.successors(&grid, Some(&Point::new(0, 1)), &origin);
        assert_eq!(succ.len(), 8);
        for (p, cost) in succ {
            let expected = if p == Point::new(2, 1) { 1 } else { 2 };
            assert_eq!(cost, expected, "moving to {p}");
        }
        let no_parent = finder.successors(&grid, None, &origin);
        assert!(no_parent.iter().all(|(_, cost)| *cost == 1));
    }

    #[test]
    fn blocked_cells_are_not_successors() {
        // .#.
        // ...
        // ...
        let grid: CollisionGrid = ".#.\n...\n...".parse().unwrap();
        let finder = PathFinder::new();
        let succ = finder.successors(&grid, None, &Point::new(0, 0));
        let points = succ.iter().map(|(p, _)| *p).collect::<Vec<_>>();
        // (1, 1) would cut past the wall at (1, 0)
        assert_eq!(points, vec![Point::new(0, 1)]);
    }

    #[test]
    fn out_of_bounds_is_not_found() {
        let grid = open_grid(3);
        let finder = PathFinder::new();
        let inside = Point::new(1, 1);
        let outside = Point::new(3, 1);
        assert!(finder.calculate_path(&grid, outside, inside).is_none());
        assert!(finder.calculate_path(&grid, inside, outside).is_none());
        assert_eq!(
            finder.try_calculate_path(&grid, inside, outside),
            Err(Error::OutOfBounds {
                position: outside,
                width: 3,
                height: 3
            })
        );
        assert!(finder
            .try_calculate_path(&grid, inside, Point::new(0, 0))
            .unwrap()
            .is_some());
    }

    #[test]
    fn blocked_goal() {
        let mut grid = open_grid(3);
        grid.set(2, 2, Collision::NonWalkable);
        let finder = PathFinder::new();
        assert!(finder
            .calculate_path(&grid, Point::new(0, 0), Point::new(2, 2))
            .is_none());
        let trivial = finder
            .calculate_path(&grid, Point::new(2, 2), Point::new(2, 2))
            .unwrap();
        assert_eq!(trivial.length, 1);
    }

    #[test]
    fn blocked_start_can_be_left() {
        let mut grid = open_grid(3);
        grid.set(0, 0, Collision::NonWalkable);
        let result = PathFinder::new()
            .calculate_path(&grid, Point::new(0, 0), Point::new(2, 0))
            .unwrap();
        assert_eq!(result.path.first(), Some(&Point::new(0, 0)));
        assert_eq!(result.path.last(), Some(&Point::new(2, 0)));
    }

    #[test]
    fn reported_cost_matches_path() {
        let grid: CollisionGrid = "\
            ......
            .##...
            .#..m.
            ...o..
            ..l..."
            .parse()
            .unwrap();
        let finder = PathFinder::new();
        let result = finder
            .calculate_path(&grid, Point::new(0, 0), Point::new(5, 4))
            .unwrap();
        assert_eq!(finder.path_cost(&grid, &result.path), Some(result.cost));
    }

    #[test]
    fn path_cost_rejects_illegal_paths() {
        let grid: CollisionGrid = ".#\n#.".parse().unwrap();
        let finder = PathFinder::new();
        assert_eq!(finder.path_cost(&grid, &[]), None);
        assert_eq!(finder.path_cost(&grid, &[Point::new(0, 0)]), Some(0));
        // corner cutting
        assert_eq!(
            finder.path_cost(&grid, &[Point::new(0, 0), Point::new(1, 1)]),
            None
        );
        // not adjacent
        let open = open_grid(3);
        assert_eq!(
            finder.path_cost(&open, &[Point::new(0, 0), Point::new(2, 0)]),
            None
        );
        // three cells of cost 1, one turn
        let bent = [Point::new(0, 0), Point::new(1, 0), Point::new(2, 1)];
        assert_eq!(finder.path_cost(&open, &bent), Some(3));
    }

    #[test]
    fn expansion_limit_counts_as_not_found() {
        let grid = open_grid(20);
        let mut finder = PathFinder::new();
        finder.max_expansions = Some(3);
        let start = Point::new(0, 0);
        let goal = Point::new(19, 19);
        assert!(finder.calculate_path(&grid, start, goal).is_none());
        finder.max_expansions = None;
        assert!(finder.calculate_path(&grid, start, goal).is_some());
    }

    #[test]
    fn dijkstra_and_astar_agree_on_accounting() {
        let grid: CollisionGrid = "\
            ........
            .####...
            ....#...
            .m..#...
            ........"
            .parse()
            .unwrap();
        let start = Point::new(0, 4);
        let goal = Point::new(7, 0);
        for finder in [
            PathFinder::new(),
            PathFinder {
                heuristic: Heuristic::Zero,
                ..PathFinder::default()
            },
        ] {
            let result = finder.calculate_path(&grid, start, goal).unwrap();
            assert_eq!(result.path.first(), Some(&start));
            assert_eq!(result.path.last(), Some(&goal));
            assert_eq!(finder.path_cost(&grid, &result.path), Some(result.cost));
        }
    }
}
