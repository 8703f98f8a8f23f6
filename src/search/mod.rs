//! Round-trip search (first-success-wins backtracking) and its resource budgets.

pub mod greedy;
pub mod resources;
