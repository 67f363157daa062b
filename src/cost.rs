use crate::collision::Collision;
use crate::collision_grid::CollisionGrid;
use grid_util::point::Point;

/// Cost of entering a cell. The base cost follows the classification of the cell itself, and
/// every impassable cell in its 8-neighbourhood adds `wall_penalty` on top of that, which keeps
/// paths from hugging walls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CostModel {
    pub walkable: i32,
    pub object: i32,
    pub monster: i32,
    pub low_priority: i32,
    pub wall_penalty: i32,
}

impl Default for CostModel {
    fn default() -> CostModel {
        CostModel {
            walkable: 1,
            object: 4,
            monster: 16,
            low_priority: 20,
            wall_penalty: 2,
        }
    }
}

impl CostModel {
    /// Base cost of a classification, [None] if it can never be entered.
    pub fn base_cost(&self, collision: Collision) -> Option<i32> {
        match collision {
            Collision::Walkable => Some(self.walkable),
            Collision::Object => Some(self.object),
            Collision::Monster => Some(self.monster),
            Collision::LowPriority => Some(self.low_priority),
            Collision::NonWalkable => None,
        }
    }

    /// Cost of entering `pos`. [None] means the cell is blocked or lies outside the grid.
    pub fn cost(&self, grid: &CollisionGrid, pos: Point) -> Option<i32> {
        let base = self.base_cost(grid.get_point(pos)?)?;
        let walls = grid
            .neighbours(pos)
            .into_iter()
            .filter(|p| grid.get_point(*p).is_some_and(Collision::is_impassable))
            .count() as i32;
        Some(base + walls * self.wall_penalty)
    }
}
