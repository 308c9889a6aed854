// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property tests: traced runs cover exactly the wall adjacencies the grid implies

use proptest::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use wallkit_floorplan::{
    CellState, Direction, DirectionPriority, Grid, GridCoord, Orientation, WallTracer,
};

fn grid_text() -> impl Strategy<Value = String> {
    (1usize..9, 1usize..9)
        .prop_flat_map(|(rows, columns)| {
            let token = prop_oneof![Just("1"), Just("-1"), Just("0")];
            prop::collection::vec(prop::collection::vec(token, columns), rows)
        })
        .prop_map(|rows| {
            rows.iter()
                .map(|row| row.join(" "))
                .collect::<Vec<_>>()
                .join("\n")
        })
}

fn priority() -> impl Strategy<Value = DirectionPriority> {
    Just(Direction::ALL.to_vec())
        .prop_shuffle()
        .prop_map(|order| DirectionPriority::try_from(order).unwrap())
}

/// A wall joins `a` to its right or lower neighbor `b` iff `a` carries a
/// marker and `b` is a Start
fn implied_walls(grid: &Grid) -> FxHashSet<(GridCoord, GridCoord)> {
    let mut walls = FxHashSet::default();
    for a in grid.coords() {
        if !grid.get(a).is_some_and(CellState::is_marker) {
            continue;
        }
        for direction in [Direction::Right, Direction::Down] {
            if let Some(b) = grid.neighbor(a, direction) {
                if grid.get(b) == Some(CellState::Start) {
                    walls.insert((a, b));
                }
            }
        }
    }
    walls
}

proptest! {
    #[test]
    fn runs_cover_exactly_the_implied_walls(text in grid_text(), priority in priority()) {
        let grid = Grid::parse(&text).unwrap();
        let runs = WallTracer::new(priority).trace(&grid);

        let mut covered = FxHashSet::default();
        for run in &runs {
            for (a, b) in run.adjacencies() {
                // Runs always advance right or down
                prop_assert!(a < b, "run steps backwards from {} to {}", a, b);
                prop_assert!(covered.insert((a, b)), "{} - {} covered twice", a, b);
            }
        }

        prop_assert_eq!(covered, implied_walls(&grid));
    }

    #[test]
    fn runs_are_well_formed(text in grid_text(), priority in priority()) {
        let grid = Grid::parse(&text).unwrap();
        let runs = WallTracer::new(priority).trace(&grid);

        let mut membership: FxHashMap<(GridCoord, Orientation), usize> = FxHashMap::default();
        for run in &runs {
            prop_assert!(run.len() >= 2);
            prop_assert!(grid.get(run.origin()).is_some_and(CellState::is_marker));
            for &cell in &run.cells()[1..] {
                prop_assert_eq!(grid.get(cell), Some(CellState::Start));
            }
            for &cell in run.cells() {
                *membership.entry((cell, run.orientation())).or_default() += 1;
            }
        }
        prop_assert!(membership.values().all(|&count| count == 1));
    }

    #[test]
    fn priority_never_changes_panel_count(text in grid_text(), priority in priority()) {
        let grid = Grid::parse(&text).unwrap();
        let count = |tracer: WallTracer| -> usize {
            tracer.trace(&grid).iter().map(|r| r.panel_count()).sum()
        };
        prop_assert_eq!(count(WallTracer::new(priority)), count(WallTracer::default()));
    }
}
