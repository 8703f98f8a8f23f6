//! Maximum-diamond round trips on a square grid.
//!
//! A traveler walks from the top-left cell to the bottom-right cell moving only right or down,
//! then back to the top-left moving only left or up, picking up every diamond it steps on once.

pub mod core;
pub mod grid;
pub mod search;
pub mod solve;

pub use crate::core::cell::Cell;
pub use crate::core::coord::{Phase, Pos, Step};
pub use crate::grid::{Grid, GridError};
pub use crate::search::greedy::{max_diamonds, PathSearch, RouteStep, SearchOutcome};
pub use crate::search::resources::{ResourceCounts, SearchError, SearchLimits};
pub use crate::solve::exact::optimal_diamonds;
