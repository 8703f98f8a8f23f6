use serde::{Deserialize, Serialize};

/// A grid position, 0-indexed, rows top to bottom and columns left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const ORIGIN: Pos = Pos { row: 0, col: 0 };

    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major index into an `n`-wide table.
    #[inline]
    pub fn index(self, n: usize) -> usize {
        self.row * n + self.col
    }

    /// The neighbour one `step` away, if it stays inside an `n`x`n` grid.
    #[inline]
    pub fn step(self, step: Step, n: usize) -> Option<Pos> {
        let (row, col) = match step {
            Step::Right => (self.row, self.col.checked_add(1)?),
            Step::Down => (self.row.checked_add(1)?, self.col),
            Step::Left => (self.row, self.col.checked_sub(1)?),
            Step::Up => (self.row.checked_sub(1)?, self.col),
        };
        if row < n && col < n {
            Some(Pos { row, col })
        } else {
            None
        }
    }
}

/// A unit move between orthogonally adjacent cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    Right,
    Down,
    Left,
    Up,
}

/// Which leg of the round trip is being walked.
///
/// The phase decides the legal steps: right/down on the way out, left/up on the way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Outbound,
    Return,
}

impl Phase {
    /// Legal steps in preference order (horizontal first).
    #[inline]
    pub const fn steps(self) -> [Step; 2] {
        match self {
            Phase::Outbound => [Step::Right, Step::Down],
            Phase::Return => [Step::Left, Step::Up],
        }
    }

    #[inline]
    pub fn allows(self, step: Step) -> bool {
        self.steps().contains(&step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_stay_inside_the_grid() {
        let corner = Pos::new(2, 2);
        assert_eq!(corner.step(Step::Right, 3), None);
        assert_eq!(corner.step(Step::Down, 3), None);
        assert_eq!(corner.step(Step::Left, 3), Some(Pos::new(2, 1)));
        assert_eq!(corner.step(Step::Up, 3), Some(Pos::new(1, 2)));

        assert_eq!(Pos::ORIGIN.step(Step::Left, 3), None);
        assert_eq!(Pos::ORIGIN.step(Step::Up, 3), None);
        assert_eq!(Pos::ORIGIN.step(Step::Right, 1), None);
    }

    #[test]
    fn phases_only_allow_their_own_directions() {
        assert!(Phase::Outbound.allows(Step::Down));
        assert!(!Phase::Outbound.allows(Step::Up));
        assert!(Phase::Return.allows(Step::Left));
        assert!(!Phase::Return.allows(Step::Right));
    }
}
