use grid_util::point::Point;

/// [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) between two points.
#[inline]
pub fn manhattan(p1: &Point, p2: &Point) -> i32 {
    (p1.x - p2.x).abs() + (p1.y - p2.y).abs()
}

/// Estimate of the remaining cost that guides the search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Heuristic {
    #[default]
    Manhattan,
    /// Always zero, which turns the search into Dijkstra's algorithm.
    Zero,
}

impl Heuristic {
    /// The estimate times a heuristic factor. A factor above 1.0 gives Weighted A*, which
    /// expands fewer nodes at the price of optimality.
    pub fn estimate(&self, p1: &Point, p2: &Point, factor: f32) -> i32 {
        match self {
            Heuristic::Manhattan => (manhattan(p1, p2) as f32 * factor) as i32,
            Heuristic::Zero => 0,
        }
    }
}
