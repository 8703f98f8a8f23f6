//! Exact solvers, used to judge the backtracking search.

pub mod exact;
