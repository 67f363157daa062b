//! # collision_pathfinding
//!
//! Weighted [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) pathfinding on a
//! [CollisionGrid]. Cells carry a [Collision] classification that decides what entering them
//! costs, cells next to walls cost extra so that paths keep their distance, diagonal moves may
//! not cut corners and changing direction is penalised to prefer straight runs. Optionally,
//! precomputed [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! avoid flood-filling behaviour if no path exists.
//!
//! ```
//! use collision_pathfinding::{calculate_path, CollisionGrid};
//! use grid_util::point::Point;
//!
//! let grid: CollisionGrid = "\
//!     .....
//!     .....
//!     ..#..
//!     .....
//!     ....."
//!     .parse()
//!     .unwrap();
//! let result = calculate_path(&grid, Point::new(0, 0), Point::new(4, 4)).unwrap();
//! assert!(!result.path.contains(&Point::new(2, 2)));
//! assert!(result.length > 5);
//! ```
pub mod astar;
pub mod collision;
pub mod collision_grid;
pub mod components;
pub mod cost;
pub mod error;
pub mod heuristic;
pub mod pathfinder;

pub use collision::Collision;
pub use collision_grid::CollisionGrid;
pub use components::Components;
pub use cost::CostModel;
pub use error::{Error, Result};
pub use heuristic::Heuristic;
pub use pathfinder::{PathFinder, PathResult};

use grid_util::point::Point;

/// Computes a path from start to goal with the default [PathFinder] configuration. [None] means
/// that no path exists.
pub fn calculate_path(grid: &CollisionGrid, start: Point, goal: Point) -> Option<PathResult> {
    PathFinder::default().calculate_path(grid, start, goal)
}
