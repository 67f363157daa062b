use crate::collision::Collision;
use crate::error::{Error, Result};
use core::fmt;
use grid_util::point::Point;
use smallvec::SmallVec;
use std::str::FromStr;

/// Offsets of the 8-neighbourhood, orthogonal directions first.
pub const MOORE_OFFSETS: [(i32, i32); 8] = [
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 0),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

/// Rectangular snapshot of a collision map. Cells are stored row-major, `y` selecting the row.
/// A search only ever reads the grid; keeping it unchanged while a search runs is up to the
/// owner.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollisionGrid {
    width: usize,
    height: usize,
    cells: Vec<Collision>,
}

impl CollisionGrid {
    pub fn new(width: usize, height: usize, fill: Collision) -> CollisionGrid {
        CollisionGrid {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    /// Builds a grid from rows of cells. Every row must be as long as the first one.
    pub fn from_rows<R>(rows: impl IntoIterator<Item = R>) -> Result<CollisionGrid>
    where
        R: AsRef<[Collision]>,
    {
        let mut cells = Vec::new();
        let mut width = None;
        let mut height = 0;
        for (row, values) in rows.into_iter().enumerate() {
            let values = values.as_ref();
            let expected = *width.get_or_insert(values.len());
            if values.len() != expected {
                return Err(Error::RaggedRow {
                    row,
                    expected,
                    found: values.len(),
                });
            }
            cells.extend_from_slice(values);
            height += 1;
        }
        Ok(CollisionGrid {
            width: width.unwrap_or(0),
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn point_in_bounds(&self, point: Point) -> bool {
        self.in_bounds(point.x, point.y)
    }

    fn ix(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y).then(|| y as usize * self.width + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Collision> {
        self.ix(x, y).map(|ix| self.cells[ix])
    }

    pub fn get_point(&self, point: Point) -> Option<Collision> {
        self.get(point.x, point.y)
    }

    /// Overwrites a cell and returns its previous classification, or [None] if the position lies
    /// outside the grid.
    pub fn set(&mut self, x: i32, y: i32, collision: Collision) -> Option<Collision> {
        let ix = self.ix(x, y)?;
        Some(std::mem::replace(&mut self.cells[ix], collision))
    }

    pub fn set_point(&mut self, point: Point, collision: Collision) -> Option<Collision> {
        self.set(point.x, point.y, collision)
    }

    /// The in-bounds part of the 8-neighbourhood of a point.
    pub fn neighbours(&self, point: Point) -> SmallVec<[Point; 8]> {
        MOORE_OFFSETS
            .iter()
            .map(|(dx, dy)| Point::new(point.x + dx, point.y + dy))
            .filter(|p| self.point_in_bounds(*p))
            .collect()
    }

    /// Whether a single step from `from` to the adjacent `to` is geometrically allowed: `to` has
    /// to be on the grid and a diagonal step may not squeeze past a corner cell that is anything
    /// other than walkable. Whether `to` itself may be entered is decided by the cost model.
    pub fn can_step(&self, from: Point, to: Point) -> bool {
        debug_assert!((from.x - to.x).abs() <= 1 && (from.y - to.y).abs() <= 1);
        if !self.point_in_bounds(to) {
            return false;
        }
        if from.x != to.x && from.y != to.y {
            let clear = |x, y| self.get(x, y).is_some_and(|c| !c.obstructs_diagonal());
            clear(to.x, from.y) && clear(from.x, to.y)
        } else {
            true
        }
    }
}

impl FromStr for CollisionGrid {
    type Err = Error;

    /// Parses an ASCII map with one line per row, see [Collision::marker]. Surrounding whitespace
    /// and blank lines are ignored.
    fn from_str(s: &str) -> Result<Self> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(line, text)| {
                text.chars()
                    .enumerate()
                    .map(|(column, marker)| {
                        Collision::from_marker(marker).ok_or(Error::UnknownMarker {
                            line,
                            column,
                            marker,
                        })
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        CollisionGrid::from_rows(rows)
    }
}

impl fmt::Display for CollisionGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            let line = row.iter().map(|c| c.marker()).collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
