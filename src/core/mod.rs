//! Small, copyable primitives shared by the grid and the solvers.
//!
//! - [`coord`]: grid positions, unit steps and the two travel phases.
//! - [`cell`]: the three-valued cell contents and their raw integer encoding.

pub mod cell;
pub mod coord;
