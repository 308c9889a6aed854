// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for floor plan grids, wall runs and panel placements

use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

/// State of one floor plan cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// `0`: no wall
    Empty,
    /// `1`: wall continues through this cell
    Start,
    /// `-1`: wall restarts here after an opening
    Restart,
}

impl CellState {
    /// Start and Restart cells both carry a wall marker
    #[inline]
    pub fn is_marker(self) -> bool {
        matches!(self, CellState::Start | CellState::Restart)
    }

    /// Token used for this state in the floor plan grammar
    pub fn symbol(self) -> &'static str {
        match self {
            CellState::Empty => "0",
            CellState::Start => "1",
            CellState::Restart => "-1",
        }
    }
}

/// Zero-based `(row, column)` position in a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    pub row: usize,
    pub column: usize,
}

impl GridCoord {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Neighbor one step in `direction`, or `None` when it would underflow
    pub fn step(self, direction: Direction) -> Option<GridCoord> {
        let (dr, dc) = direction.offset();
        Some(GridCoord {
            row: self.row.checked_add_signed(dr)?,
            column: self.column.checked_add_signed(dc)?,
        })
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Orthogonal step on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// `(row, column)` delta
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Orientation of a run extending in this direction
    pub fn axis(self) -> Orientation {
        match self {
            Direction::Up | Direction::Down => Orientation::Vertical,
            Direction::Left | Direction::Right => Orientation::Horizontal,
        }
    }

    /// True for steps toward cells a row-major scan has already passed
    pub fn is_backward(self) -> bool {
        matches!(self, Direction::Up | Direction::Left)
    }
}

/// Axis a wall run extends along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Along a row (column index changes)
    Horizontal,
    /// Along a column (row index changes)
    Vertical,
}

/// Cardinal rotation about the vertical axis applied to a panel instance.
///
/// `North` is the identity; the others turn the primitive counter-clockwise
/// (seen from above) by the matching multiple of 90 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    North,
    West,
    South,
    East,
}

impl Facing {
    /// Yaw in radians, counter-clockwise about +Z
    pub fn yaw_radians(self) -> f64 {
        match self {
            Facing::North => 0.0,
            Facing::West => FRAC_PI_2,
            Facing::South => PI,
            Facing::East => -FRAC_PI_2,
        }
    }
}

/// Local horizontal axis of the panel primitive that carries its length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthAxis {
    #[default]
    X,
    Y,
}

/// Nominal dimensions of the panel primitive, trusted as given
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelDimensions {
    /// Extent across the wall
    pub thickness: f64,
    /// Extent along local Z
    pub height: f64,
    /// Extent along `length_axis`
    pub length: f64,
    #[serde(default)]
    pub length_axis: LengthAxis,
}

impl PanelDimensions {
    pub fn new(thickness: f64, height: f64, length: f64) -> Self {
        Self {
            thickness,
            height,
            length,
            length_axis: LengthAxis::X,
        }
    }

    pub fn with_length_axis(mut self, length_axis: LengthAxis) -> Self {
        self.length_axis = length_axis;
        self
    }

    /// Footprint extents along local X and Y
    pub fn footprint(&self) -> (f64, f64) {
        match self.length_axis {
            LengthAxis::X => (self.length, self.thickness),
            LengthAxis::Y => (self.thickness, self.length),
        }
    }
}

impl Default for PanelDimensions {
    /// A 2 m long, 3 m tall, 20 cm thick panel
    fn default() -> Self {
        Self::new(0.2, 3.0, 2.0)
    }
}

/// One continuous straight wall discovered on the grid.
///
/// Holds at least two cells; consecutive cells are orthogonally adjacent along
/// `orientation`. The first cell is a Start or Restart, every later one a Start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WallRun {
    orientation: Orientation,
    cells: Vec<GridCoord>,
}

impl WallRun {
    /// Only the tracer builds runs, so the shape invariants hold by construction
    pub(crate) fn new(orientation: Orientation, cells: Vec<GridCoord>) -> Self {
        debug_assert!(cells.len() >= 2);
        Self { orientation, cells }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn cells(&self) -> &[GridCoord] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn origin(&self) -> GridCoord {
        self.cells[0]
    }

    pub fn terminal(&self) -> GridCoord {
        self.cells[self.cells.len() - 1]
    }

    /// One panel per adjacent pair of cells
    pub fn panel_count(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// Adjacent cell pairs in run order
    pub fn adjacencies(&self) -> impl Iterator<Item = (GridCoord, GridCoord)> + '_ {
        self.cells.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

/// Transform for one panel instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanelPlacement {
    /// World position of the panel's local origin
    pub position: Point3<f64>,
    /// Rotation about the vertical axis
    pub rotation: Facing,
    /// Scale factor along `length_axis`
    pub scale: f64,
    /// Local axis the scale applies to
    pub length_axis: LengthAxis,
}

/// Result of running the full grid-to-placement pipeline
#[derive(Debug, Clone, Serialize)]
pub struct FloorLayout {
    pub rows: usize,
    pub columns: usize,
    /// World units between adjacent cell centers
    pub grid_spacing: f64,
    pub runs: Vec<WallRun>,
    pub placements: Vec<PanelPlacement>,
}

impl FloorLayout {
    pub fn panel_count(&self) -> usize {
        self.placements.len()
    }
}
