// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panel placement planning
//!
//! Grid cell `(row, column)` maps to world point `(column * s, -row * s, 0)`
//! with `s` the grid spacing: columns grow along +X, rows grow along -Y and Z
//! points up. One panel covers each adjacent pair of cells in a run. It sits
//! at the pair's midpoint on the floor, turned so its length axis follows the
//! run, and stretched by `s / panel.length` along that axis.

use crate::error::ConfigError;
use crate::types::{
    Facing, GridCoord, LengthAxis, Orientation, PanelDimensions, PanelPlacement, WallRun,
};
use nalgebra::Point3;
use std::iter::FusedIterator;
use std::slice::Windows;

/// Turns wall runs into panel transforms
#[derive(Debug, Clone, Copy)]
pub struct PlacementPlanner {
    panel: PanelDimensions,
    spacing: f64,
}

impl PlacementPlanner {
    /// Fails when the panel length or spacing is zero, negative or not finite
    pub fn new(panel: PanelDimensions, spacing: f64) -> Result<Self, ConfigError> {
        if !(panel.length.is_finite() && panel.length > 0.0) {
            return Err(ConfigError::InvalidPanel {
                length: panel.length,
            });
        }
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(ConfigError::InvalidSpacing(spacing));
        }
        Ok(Self { panel, spacing })
    }

    pub fn panel(&self) -> &PanelDimensions {
        &self.panel
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Stretch applied along the panel's length axis
    pub fn scale(&self) -> f64 {
        self.spacing / self.panel.length
    }

    /// World position of a cell center
    pub fn world_position(&self, coord: GridCoord) -> Point3<f64> {
        Point3::new(
            coord.column as f64 * self.spacing,
            -(coord.row as f64) * self.spacing,
            0.0,
        )
    }

    /// Rotation that lines the panel's length axis up with `orientation`
    pub fn facing(&self, orientation: Orientation) -> Facing {
        match (orientation, self.panel.length_axis) {
            (Orientation::Horizontal, LengthAxis::X) => Facing::North,
            (Orientation::Horizontal, LengthAxis::Y) => Facing::West,
            (Orientation::Vertical, LengthAxis::X) => Facing::East,
            (Orientation::Vertical, LengthAxis::Y) => Facing::North,
        }
    }

    /// Placements for one run, `run.len() - 1` of them in run order
    pub fn plan<'a>(&'a self, run: &'a WallRun) -> Placements<'a> {
        Placements {
            planner: self,
            pairs: run.cells().windows(2),
            rotation: self.facing(run.orientation()),
        }
    }

    /// Placements for every run, concatenated in run order
    pub fn plan_all(&self, runs: &[WallRun]) -> Vec<PanelPlacement> {
        let total = runs.iter().map(WallRun::panel_count).sum();
        let mut placements = Vec::with_capacity(total);
        for run in runs {
            placements.extend(self.plan(run));
        }
        placements
    }
}

/// Lazy placements along one run
#[derive(Debug, Clone)]
pub struct Placements<'a> {
    planner: &'a PlacementPlanner,
    pairs: Windows<'a, GridCoord>,
    rotation: Facing,
}

impl Iterator for Placements<'_> {
    type Item = PanelPlacement;

    fn next(&mut self) -> Option<Self::Item> {
        let pair = self.pairs.next()?;
        let a = self.planner.world_position(pair[0]);
        let b = self.planner.world_position(pair[1]);

        Some(PanelPlacement {
            position: nalgebra::center(&a, &b),
            rotation: self.rotation,
            scale: self.planner.scale(),
            length_axis: self.planner.panel.length_axis,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pairs.size_hint()
    }
}

impl ExactSizeIterator for Placements<'_> {}

impl FusedIterator for Placements<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::tracer::WallTracer;
    use approx::assert_relative_eq;

    fn runs(text: &str) -> Vec<WallRun> {
        WallTracer::default().trace(&Grid::parse(text).unwrap())
    }

    fn assert_position(p: &PanelPlacement, x: f64, y: f64) {
        assert_relative_eq!(p.position.x, x, epsilon = 1e-12);
        assert_relative_eq!(p.position.y, y, epsilon = 1e-12);
        assert_relative_eq!(p.position.z, 0.0);
    }

    #[test]
    fn test_horizontal_run_midpoints() {
        let planner = PlacementPlanner::new(PanelDimensions::default(), 2.0).unwrap();
        let runs = runs("1 1 1");
        let placements: Vec<_> = planner.plan(&runs[0]).collect();

        assert_eq!(placements.len(), 2);
        assert_position(&placements[0], 1.0, 0.0);
        assert_position(&placements[1], 3.0, 0.0);
        for p in &placements {
            assert_eq!(p.rotation, Facing::North);
            assert_relative_eq!(p.scale, 1.0);
            assert_eq!(p.length_axis, LengthAxis::X);
        }
    }

    #[test]
    fn test_vertical_run_goes_down_negative_y() {
        let planner = PlacementPlanner::new(PanelDimensions::default(), 1.5).unwrap();
        let runs = runs("0 1\n0 1\n0 1");
        let placements: Vec<_> = planner.plan(&runs[0]).collect();

        assert_eq!(placements.len(), 2);
        assert_position(&placements[0], 1.5, -0.75);
        assert_position(&placements[1], 1.5, -2.25);
        assert!(placements.iter().all(|p| p.rotation == Facing::East));
    }

    #[test]
    fn test_scale_matches_spacing() {
        let panel = PanelDimensions::new(0.2, 3.0, 2.0);
        let planner = PlacementPlanner::new(panel, 3.0).unwrap();
        assert_relative_eq!(planner.scale(), 1.5);

        let planner = PlacementPlanner::new(panel, 1.0).unwrap();
        let runs = runs("1 1");
        let placement = planner.plan(&runs[0]).next().unwrap();
        assert_relative_eq!(placement.scale, 0.5);
    }

    #[test]
    fn test_facing_follows_length_axis() {
        let x = PlacementPlanner::new(PanelDimensions::default(), 1.0).unwrap();
        assert_eq!(x.facing(Orientation::Horizontal), Facing::North);
        assert_eq!(x.facing(Orientation::Vertical), Facing::East);

        let panel = PanelDimensions::default().with_length_axis(LengthAxis::Y);
        let y = PlacementPlanner::new(panel, 1.0).unwrap();
        assert_eq!(y.facing(Orientation::Horizontal), Facing::West);
        assert_eq!(y.facing(Orientation::Vertical), Facing::North);
    }

    #[test]
    fn test_placements_iterator_is_exact_and_restartable() {
        let planner = PlacementPlanner::new(PanelDimensions::default(), 2.0).unwrap();
        let runs = runs("1 1 1 1 1");
        let placements = planner.plan(&runs[0]);

        assert_eq!(placements.len(), 4);
        let again = placements.clone();
        assert_eq!(placements.collect::<Vec<_>>(), again.collect::<Vec<_>>());
    }

    #[test]
    fn test_plan_all_concatenates_in_run_order() {
        let planner = PlacementPlanner::new(PanelDimensions::default(), 2.0).unwrap();
        let runs = runs("1 1 1 1 1\n1 0 0 0 1\n1 1 0 1 1\n");
        let placements = planner.plan_all(&runs);

        assert_eq!(placements.len(), 10);
        // First run is the left wall, traced downwards
        assert_position(&placements[0], 0.0, -1.0);
        assert_position(&placements[1], 0.0, -3.0);
        // Then the top wall
        assert_position(&placements[2], 1.0, 0.0);
        assert_eq!(placements[2].rotation, Facing::North);
    }

    #[test]
    fn test_rejects_invalid_panel_and_spacing() {
        let bad_panel = PanelDimensions::new(0.2, 3.0, 0.0);
        assert_eq!(
            PlacementPlanner::new(bad_panel, 1.0).unwrap_err(),
            ConfigError::InvalidPanel { length: 0.0 }
        );

        let panel = PanelDimensions::default();
        assert!(matches!(
            PlacementPlanner::new(panel, -1.0),
            Err(ConfigError::InvalidSpacing(_))
        ));
        assert!(matches!(
            PlacementPlanner::new(panel, f64::NAN),
            Err(ConfigError::InvalidSpacing(_))
        ));
        assert!(matches!(
            PlacementPlanner::new(panel, f64::INFINITY),
            Err(ConfigError::InvalidSpacing(_))
        ));
    }
}
