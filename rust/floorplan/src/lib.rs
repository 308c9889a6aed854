// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall panel layouts from plain-text floor plans
//!
//! This crate provides the pipeline behind `floorplan-to-walls`:
//! 1. Parsing a grid of `1` / `-1` / `0` markers into a [`Grid`]
//! 2. Tracing straight wall runs between markers
//! 3. Planning one panel transform per adjacent pair of cells in each run
//! 4. Instantiating a panel primitive at every placement and exporting the
//!    joined model
//!
//! # Usage
//!
//! ```rust,ignore
//! use wallkit_floorplan::{build_scene, plan_floor, LayoutConfig, MeshScene, PanelDimensions};
//!
//! let panel = PanelDimensions::default();
//! let layout = plan_floor("1 1 1\n1 0 1\n1 1 1\n", &panel, &LayoutConfig::default())?;
//!
//! let mut scene = MeshScene::new(&panel)?;
//! build_scene(&layout, &mut scene)?;
//! scene.export(Path::new("walls.obj"))?;
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod planner;
pub mod scene;
pub mod tracer;
pub mod types;

// Re-export commonly used types and functions
pub use config::{DirectionPriority, LayoutConfig};
pub use error::{ConfigError, Error, ParseError, Result};
pub use grid::Grid;
pub use planner::{PlacementPlanner, Placements};
pub use scene::{build_scene, MeshScene, SceneBuilder};
pub use tracer::WallTracer;
pub use types::{
    CellState, Direction, Facing, FloorLayout, GridCoord, LengthAxis, Orientation,
    PanelDimensions, PanelPlacement, WallRun,
};

use std::fs;
use std::path::Path;
use tracing::info;

/// Run the full text-to-placement pipeline
///
/// Parses `text`, traces wall runs with `config.priority` and plans a panel
/// placement for every adjacent pair of run cells. Nothing is instantiated;
/// feed the layout to a [`SceneBuilder`] for that.
pub fn plan_floor(text: &str, panel: &PanelDimensions, config: &LayoutConfig) -> Result<FloorLayout> {
    let grid = Grid::parse(text)?;
    let spacing = config.effective_spacing(panel);
    let planner = PlacementPlanner::new(*panel, spacing)?;

    let runs = WallTracer::new(config.priority).trace(&grid);
    let placements = planner.plan_all(&runs);

    info!(
        rows = grid.rows(),
        columns = grid.columns(),
        markers = grid.marker_count(),
        runs = runs.len(),
        panels = placements.len(),
        spacing,
        "Planned floor layout"
    );

    Ok(FloorLayout {
        rows: grid.rows(),
        columns: grid.columns(),
        grid_spacing: spacing,
        runs,
        placements,
    })
}

/// Read panel dimensions from a JSON descriptor such as
/// `{"thickness": 0.2, "height": 3.0, "length": 2.0, "length_axis": "x"}`
pub fn load_panel(path: &Path) -> Result<PanelDimensions> {
    let raw = fs::read_to_string(path)?;
    let panel: PanelDimensions = serde_json::from_str(&raw)?;
    Ok(panel)
}
