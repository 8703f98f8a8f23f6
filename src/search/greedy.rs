//! First-success-wins round-trip search.
//!
//! The traversal is a depth-first walk over an explicit frame stack:
//!
//! - entering a blocked cell fails, entering a diamond collects it and leaves the cell empty;
//! - the outbound leg turns into the return leg when it reaches the bottom-right cell;
//! - stepping back onto the origin during the return leg completes the trip;
//! - each frame tries its neighbours in a fixed order and the first neighbour that leads to a
//!   completed trip is accepted, later ones are never explored;
//! - a frame that runs out of neighbours is a dead end and is popped, taking its diamond (if any)
//!   with it.
//!
//! Consumed cells stay consumed for the rest of the run, including on abandoned branches. The
//! search therefore picks *a* good trip quickly but does not guarantee the best one; see
//! [`crate::solve::exact`] for that.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::cell::Cell;
use crate::core::coord::{Phase, Pos, Step};
use crate::grid::Grid;
use crate::search::resources::{ResourceTracker, SearchError, SearchLimits};

const STAGE: &str = "path_search";

/// One cell of an accepted round trip.
///
/// `phase` is the leg in effect when leaving the cell, so the bottom-right cell is reported with
/// [`Phase::Return`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteStep {
    pub pos: Pos,
    pub phase: Phase,
    pub collected: bool,
}

/// Result of a [`PathSearch`] run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Diamonds collected on the accepted trip (0 if there is none).
    pub diamonds: u32,
    /// The accepted trip from origin back to origin; empty if no trip exists.
    pub route: Vec<RouteStep>,
    /// Cells entered, including those on abandoned branches.
    pub steps: u64,
    /// Dead ends popped.
    pub backtracks: u64,
    /// Deepest frame stack observed.
    pub max_depth: u64,
}

impl SearchOutcome {
    pub fn found(&self) -> bool {
        !self.route.is_empty()
    }

    pub fn collected_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.route.iter().filter(|s| s.collected).map(|s| s.pos)
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    pos: Pos,
    phase: Phase,
    collected: bool,
    /// Index of the next candidate to try.
    next: u8,
}

/// Neighbour preference: diamonds before empty cells, horizontal before vertical.
#[inline]
fn candidates(phase: Phase) -> [(Step, Cell); 4] {
    let [horizontal, vertical] = phase.steps();
    [
        (horizontal, Cell::Diamond),
        (vertical, Cell::Diamond),
        (horizontal, Cell::Empty),
        (vertical, Cell::Empty),
    ]
}

/// Configurable round-trip search.
#[derive(Debug, Clone, Copy)]
pub struct PathSearch {
    limits: SearchLimits,
}

impl PathSearch {
    /// A search without budgets.
    pub fn new() -> Self {
        Self {
            limits: SearchLimits::unbounded(),
        }
    }

    pub fn with_limits(limits: SearchLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Run the search, consuming `grid`.
    pub fn run(&self, grid: Grid) -> Result<SearchOutcome, SearchError> {
        let n = grid.size();
        let result = self.search(grid);
        match &result {
            Ok(outcome) if outcome.found() => debug!(
                n,
                diamonds = outcome.diamonds,
                steps = outcome.steps,
                backtracks = outcome.backtracks,
                "round trip found"
            ),
            Ok(outcome) => debug!(
                n,
                steps = outcome.steps,
                backtracks = outcome.backtracks,
                "no round trip"
            ),
            Err(e) => warn!(%e, n, "path search aborted"),
        }
        result
    }

    fn search(&self, grid: Grid) -> Result<SearchOutcome, SearchError> {
        let n = grid.size();
        let last = grid.last();
        let mut cells = grid.into_cells();
        let mut tracker = ResourceTracker::new(self.limits);
        let mut backtracks: u64 = 0;

        let mut stack: Vec<Frame> = Vec::new();
        tracker.try_reserve_vec(STAGE, "frame_stack", &mut stack, 2 * (2 * n - 1))?;

        let origin = enter(&mut cells, n, last, Pos::ORIGIN, Phase::Outbound, &mut tracker)?;
        if let Some(origin) = origin {
            stack.push(origin);
            tracker.observe_depth(STAGE, stack.len())?;
        }

        while let Some(top) = stack.last_mut() {
            let Some(next) = next_candidate(&cells, n, top) else {
                if let Some(dead) = stack.pop() {
                    backtracks += 1;
                    trace!(
                        row = dead.pos.row,
                        col = dead.pos.col,
                        phase = ?dead.phase,
                        uncounted = dead.collected,
                        "dead end"
                    );
                }
                continue;
            };

            let phase = top.phase;
            if phase == Phase::Return && next == Pos::ORIGIN {
                let mut route: Vec<RouteStep> = stack
                    .iter()
                    .map(|f| RouteStep {
                        pos: f.pos,
                        phase: f.phase,
                        collected: f.collected,
                    })
                    .collect();
                route.push(RouteStep {
                    pos: Pos::ORIGIN,
                    phase: Phase::Return,
                    collected: false,
                });

                let counts = tracker.counts();
                return Ok(SearchOutcome {
                    diamonds: stack.iter().filter(|f| f.collected).count() as u32,
                    route,
                    steps: counts.steps,
                    backtracks,
                    max_depth: counts.depth,
                });
            }

            if let Some(frame) = enter(&mut cells, n, last, next, phase, &mut tracker)? {
                stack.push(frame);
                tracker.observe_depth(STAGE, stack.len())?;
            }
        }

        let counts = tracker.counts();
        Ok(SearchOutcome {
            diamonds: 0,
            route: Vec::new(),
            steps: counts.steps,
            backtracks,
            max_depth: counts.depth,
        })
    }
}

impl Default for PathSearch {
    fn default() -> Self {
        Self::new()
    }
}

/// Enter `pos`, consuming its diamond. Returns `None` for a blocked cell.
fn enter(
    cells: &mut [Cell],
    n: usize,
    last: Pos,
    pos: Pos,
    phase: Phase,
    tracker: &mut ResourceTracker,
) -> Result<Option<Frame>, SearchError> {
    tracker.bump_steps(STAGE, 1)?;

    let idx = pos.index(n);
    let collected = match cells[idx] {
        Cell::Blocked => return Ok(None),
        Cell::Empty => false,
        Cell::Diamond => true,
    };
    cells[idx] = Cell::Empty;

    let phase = if phase == Phase::Outbound && pos == last {
        Phase::Return
    } else {
        phase
    };

    Ok(Some(Frame {
        pos,
        phase,
        collected,
        next: 0,
    }))
}

/// Advance `frame` to its next viable neighbour.
///
/// Cells are read at the time each candidate is tried: a diamond consumed by an earlier sibling is
/// no longer a diamond candidate but does qualify as an empty one.
fn next_candidate(cells: &[Cell], n: usize, frame: &mut Frame) -> Option<Pos> {
    let order = candidates(frame.phase);
    while let Some(&(step, wanted)) = order.get(frame.next as usize) {
        frame.next += 1;
        if let Some(to) = frame.pos.step(step, n) {
            if cells[to.index(n)] == wanted {
                return Some(to);
            }
        }
    }
    None
}

/// Diamonds collected by an unbounded [`PathSearch`] over `grid`; 0 when no round trip exists.
///
/// The grid is consumed.
pub fn max_diamonds(grid: Grid) -> u32 {
    PathSearch::new()
        .run(grid)
        .map(|outcome| outcome.diamonds)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[i32]]) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn prefers_diamonds_then_horizontal_moves() {
        assert_eq!(
            candidates(Phase::Outbound),
            [
                (Step::Right, Cell::Diamond),
                (Step::Down, Cell::Diamond),
                (Step::Right, Cell::Empty),
                (Step::Down, Cell::Empty),
            ]
        );
        assert_eq!(candidates(Phase::Return)[1], (Step::Up, Cell::Diamond));
    }

    #[test]
    fn candidates_skip_blocked_and_mismatched_cells() {
        let cells = [Cell::Empty, Cell::Empty, Cell::Blocked, Cell::Empty];
        let mut frame = Frame {
            pos: Pos::ORIGIN,
            phase: Phase::Outbound,
            collected: false,
            next: 0,
        };
        assert_eq!(next_candidate(&cells, 2, &mut frame), Some(Pos::new(0, 1)));
        assert_eq!(frame.next, 3);
        assert_eq!(next_candidate(&cells, 2, &mut frame), None);
    }

    #[test]
    fn route_starts_and_ends_at_origin() {
        let outcome = PathSearch::new()
            .run(grid(&[&[0, 1], &[1, 0]]))
            .unwrap();
        assert_eq!(outcome.diamonds, 2);
        assert_eq!(outcome.route.first().map(|s| s.pos), Some(Pos::ORIGIN));
        assert_eq!(outcome.route.last().map(|s| s.pos), Some(Pos::ORIGIN));
        assert_eq!(outcome.collected_cells().count(), 2);
        assert_eq!(outcome.backtracks, 0);
    }

    #[test]
    fn dead_ends_give_back_their_diamonds() {
        // The top row collects two diamonds and then hits a wall. The consumed cells are retried
        // as empty ones (and fail again) before the search drops down the left column.
        let outcome = PathSearch::new()
            .run(grid(&[&[0, 1, 1], &[0, -1, -1], &[0, 0, 0]]))
            .unwrap();
        assert!(outcome.found());
        assert_eq!(outcome.diamonds, 0);
        assert_eq!(outcome.backtracks, 5);
    }

    #[test]
    fn return_leg_dead_ends_are_uncounted_too() {
        // Outbound goes right along the top then down the last column. On the way back the
        // diamond at (2,0) is a detour into a dead end: its column is walled off above.
        let outcome = PathSearch::new()
            .run(grid(&[&[0, 0, 0], &[-1, 0, 0], &[1, 0, 0]]))
            .unwrap();
        assert!(outcome.found());
        assert_eq!(outcome.diamonds, 0);
        assert_eq!(outcome.backtracks, 2);
    }

    #[test]
    fn step_budget_aborts_the_search() {
        let limits = SearchLimits::unbounded().with_max_steps(3);
        let err = PathSearch::with_limits(limits)
            .run(Grid::filled(4, Cell::Empty).unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            SearchError::LimitExceeded {
                metric: "steps",
                limit: 3,
                ..
            }
        ));
    }
}
