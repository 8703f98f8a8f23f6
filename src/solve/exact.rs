//! Provably maximal round trips.
//!
//! Reversing the return leg turns it into a second right/down walk, so a round trip is a pair of
//! monotone walks from the origin to the bottom-right cell. Both walkers advance one step per
//! layer, which keeps them on the same anti-diagonal `row + col = t`; a layer is therefore indexed
//! by the two rows alone. A cell both walkers stand on is only counted once.
//!
//! Time is O(n³) and memory O(n²) (two layers).

use tracing::debug;

use crate::core::coord::Pos;
use crate::grid::Grid;

/// Maximum diamonds over all legal round trips, or `None` if no round trip exists.
///
/// A 1x1 grid is a trip that never leaves the origin and collects its diamond, if any.
pub fn optimal_diamonds(grid: &Grid) -> Option<u32> {
    let n = grid.size();
    if !grid.get(Pos::ORIGIN).is_passable() || !grid.get(grid.last()).is_passable() {
        debug!(n, "exact solve: start or turn-around cell is blocked");
        return None;
    }

    // Layers store only `r1 <= r2`; the walkers are interchangeable.
    let key = |r1: usize, r2: usize| r1.min(r2) * n + r1.max(r2);

    let mut prev: Vec<Option<u32>> = vec![None; n * n];
    prev[key(0, 0)] = Some(grid.get(Pos::ORIGIN).gain());

    for t in 1..=2 * (n - 1) {
        let mut cur: Vec<Option<u32>> = vec![None; n * n];
        let lo = t.saturating_sub(n - 1);
        let hi = t.min(n - 1);

        for r1 in lo..=hi {
            let a = grid.get(Pos::new(r1, t - r1));
            if !a.is_passable() {
                continue;
            }
            for r2 in r1..=hi {
                let b = grid.get(Pos::new(r2, t - r2));
                if !b.is_passable() {
                    continue;
                }

                // Each walker arrived either from the left (same row) or from above.
                let best = [r1.checked_sub(1), Some(r1)]
                    .into_iter()
                    .flatten()
                    .flat_map(|p1| {
                        [r2.checked_sub(1), Some(r2)]
                            .into_iter()
                            .flatten()
                            .map(move |p2| (p1, p2))
                    })
                    .filter_map(|(p1, p2)| prev[key(p1, p2)])
                    .max();

                let gain = if r1 == r2 {
                    a.gain()
                } else {
                    a.gain() + b.gain()
                };
                cur[key(r1, r2)] = best.map(|v| v + gain);
            }
        }

        prev = cur;
    }

    let best = prev[key(n - 1, n - 1)];
    debug!(n, ?best, "exact solve");
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(rows: &[&[i32]]) -> Option<u32> {
        optimal_diamonds(&Grid::from_rows(rows).unwrap())
    }

    #[test]
    fn shared_cells_count_once() {
        // A single corridor: both legs walk the same cells.
        assert_eq!(solve(&[&[1, 1], &[-1, 1]]), Some(3));
    }

    #[test]
    fn uses_both_legs_for_different_cells() {
        assert_eq!(solve(&[&[0, 1], &[1, 0]]), Some(2));
        assert_eq!(solve(&[&[1, 1, 1], &[1, 1, -1], &[0, 1, 1]]), Some(6));
    }

    #[test]
    fn no_trip_through_walls() {
        assert_eq!(solve(&[&[1, -1], &[-1, 1]]), None);
        assert_eq!(solve(&[&[-1, 0], &[0, 0]]), None);
        assert_eq!(solve(&[&[0, 0], &[0, -1]]), None);
    }

    #[test]
    fn single_cell_trip_keeps_its_diamond() {
        assert_eq!(solve(&[&[1]]), Some(1));
        assert_eq!(solve(&[&[0]]), Some(0));
    }
}
