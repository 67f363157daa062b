use core::fmt;

/// Traversal classification of a single grid cell. The variants are ordered by severity, so
/// comparisons such as `collision > Collision::Walkable` are meaningful.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Collision {
    #[default]
    Walkable,
    Object,
    Monster,
    LowPriority,
    NonWalkable,
}

impl Collision {
    pub const ALL: [Collision; 5] = [
        Collision::Walkable,
        Collision::Object,
        Collision::Monster,
        Collision::LowPriority,
        Collision::NonWalkable,
    ];

    /// Cells that can never be entered.
    pub fn is_impassable(self) -> bool {
        self == Collision::NonWalkable
    }

    /// Anything worse than [Collision::Walkable] prevents a diagonal step from cutting past it.
    pub fn obstructs_diagonal(self) -> bool {
        self > Collision::Walkable
    }

    /// Character used for this classification in ASCII maps.
    pub fn marker(self) -> char {
        match self {
            Collision::Walkable => '.',
            Collision::Object => 'o',
            Collision::Monster => 'm',
            Collision::LowPriority => 'l',
            Collision::NonWalkable => '#',
        }
    }

    pub fn from_marker(marker: char) -> Option<Collision> {
        Collision::ALL.into_iter().find(|c| c.marker() == marker)
    }
}

/// Raw collision codes as produced by a collision map. Codes outside the known range are
/// treated as blocking.
impl From<u8> for Collision {
    fn from(code: u8) -> Self {
        match code {
            0 => Collision::Walkable,
            1 => Collision::Object,
            2 => Collision::Monster,
            3 => Collision::LowPriority,
            _ => Collision::NonWalkable,
        }
    }
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.marker())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering() {
        assert!(Collision::Walkable < Collision::Object);
        assert!(Collision::Object < Collision::Monster);
        assert!(Collision::Monster < Collision::LowPriority);
        assert!(Collision::LowPriority < Collision::NonWalkable);
    }

    #[test]
    fn unknown_codes_block() {
        assert_eq!(Collision::from(3), Collision::LowPriority);
        assert_eq!(Collision::from(4), Collision::NonWalkable);
        assert_eq!(Collision::from(200), Collision::NonWalkable);
    }

    #[test]
    fn only_walkable_allows_diagonals() {
        let obstructing = Collision::ALL
            .into_iter()
            .filter(|c| c.obstructs_diagonal())
            .count();
        assert_eq!(obstructing, 4);
        assert!(!Collision::Walkable.obstructs_diagonal());
    }

    #[test]
    fn markers_are_unique() {
        for c in Collision::ALL {
            assert_eq!(Collision::from_marker(c.marker()), Some(c));
        }
        assert_eq!(Collision::from_marker('?'), None);
    }
}
