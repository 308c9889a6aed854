// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall run discovery
//!
//! The tracer scans the grid once in row-major order. Every marker cell is a
//! candidate origin. An origin probes its four neighbors in the configured
//! priority order; the first neighbor that is a `Start` not yet claimed along
//! that direction's axis fixes the run's direction, and the run then extends
//! straight ahead until the next cell is empty, a restart, off-grid or already
//! claimed along the same axis. Runs shorter than two cells are dropped.
//!
//! Claims are kept per `(cell, orientation)`: a cell belongs to at most one
//! horizontal and at most one vertical run. After a run is emitted the origin
//! keeps probing the remaining directions, so a corner or junction cell
//! originates both of its walls and L- and T-junctions close without gaps.
//!
//! A restart never links back toward cells the scan has already passed: it
//! seals the wall approaching it and begins a new one on its far side, leaving
//! the opening in between.

use crate::config::DirectionPriority;
use crate::grid::Grid;
use crate::types::{CellState, Direction, GridCoord, Orientation, WallRun};
use rustc_hash::FxHashSet;
use tracing::debug;

/// Cell membership along one axis, local to a single `trace` call
type Claims = FxHashSet<(GridCoord, Orientation)>;

/// Discovers wall runs on a parsed grid
#[derive(Debug, Clone, Copy, Default)]
pub struct WallTracer {
    priority: DirectionPriority,
}

impl WallTracer {
    pub fn new(priority: DirectionPriority) -> Self {
        Self { priority }
    }

    pub fn priority(&self) -> DirectionPriority {
        self.priority
    }

    /// All runs implied by the grid's markers, in discovery order
    pub fn trace(&self, grid: &Grid) -> Vec<WallRun> {
        let mut claims = Claims::default();
        let mut runs = Vec::new();
        let mut isolated = 0usize;

        for origin in grid.coords() {
            let state = match grid.get(origin) {
                Some(state) if state.is_marker() => state,
                _ => continue,
            };

            for &direction in self.priority.directions() {
                let axis = direction.axis();
                if claims.contains(&(origin, axis)) {
                    continue;
                }
                if state == CellState::Restart && direction.is_backward() {
                    continue;
                }

                let cells = extend(grid, &claims, origin, direction);
                if cells.len() < 2 {
                    continue;
                }

                claims.extend(cells.iter().map(|&cell| (cell, axis)));

                debug!(
                    origin = %origin,
                    direction = ?direction,
                    cells = cells.len(),
                    "Sealed wall run"
                );
                runs.push(WallRun::new(axis, cells));
            }

            let in_any_run = claims.contains(&(origin, Orientation::Horizontal))
                || claims.contains(&(origin, Orientation::Vertical));
            if !in_any_run {
                isolated += 1;
            }
        }

        debug!(
            runs = runs.len(),
            isolated_markers = isolated,
            "Traced wall runs"
        );

        runs
    }
}

/// Walk from `origin` in `direction` while the next cell continues the wall
fn extend(grid: &Grid, claims: &Claims, origin: GridCoord, direction: Direction) -> Vec<GridCoord> {
    let axis = direction.axis();
    let mut cells = vec![origin];
    let mut head = origin;

    while let Some(next) = grid.neighbor(head, direction) {
        let continues =
            grid.get(next) == Some(CellState::Start) && !claims.contains(&(next, axis));
        if !continues {
            break;
        }
        cells.push(next);
        head = next;
    }

    cells
}
