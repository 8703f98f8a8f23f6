use serde::{Deserialize, Serialize};

/// Contents of a single grid cell.
///
/// The raw integer encoding is `-1` for [`Cell::Blocked`], `0` for [`Cell::Empty`] and `1` for
/// [`Cell::Diamond`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    Blocked,
    #[default]
    Empty,
    Diamond,
}

impl Cell {
    pub const fn raw(self) -> i32 {
        match self {
            Cell::Blocked => -1,
            Cell::Empty => 0,
            Cell::Diamond => 1,
        }
    }

    /// Decode a raw cell value. Anything outside `{-1, 0, 1}` is rejected.
    pub const fn from_raw(raw: i32) -> Option<Cell> {
        match raw {
            -1 => Some(Cell::Blocked),
            0 => Some(Cell::Empty),
            1 => Some(Cell::Diamond),
            _ => None,
        }
    }

    #[inline]
    pub fn is_passable(self) -> bool {
        self != Cell::Blocked
    }

    /// Diamonds a walker gains by stepping here.
    #[inline]
    pub fn gain(self) -> u32 {
        u32::from(self == Cell::Diamond)
    }
}
