// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor plan grid model
//!
//! A floor plan is plain text: one row per line, whitespace-separated tokens
//! `1` (wall start), `-1` (wall restart after an opening) and `0` (no wall).
//! Blank lines are ignored. Row 0 is the first line, column 0 its first token.

use crate::error::ParseError;
use crate::types::{CellState, Direction, GridCoord};
use std::fmt;
use std::str::FromStr;

/// Rectangular, immutable grid of cell states in row-major order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Parse floor plan text
    ///
    /// Rows in errors are line indices of `text`, blank lines included, so a
    /// report points at the line an editor shows.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut columns = None;
        let mut rows = 0;
        let mut cells = Vec::new();

        for (line_index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let before = cells.len();
            for (column, token) in line.split_whitespace().enumerate() {
                cells.push(parse_token(token, line_index, column)?);
            }
            let found = cells.len() - before;

            match columns {
                None => columns = Some(found),
                Some(expected) if expected != found => {
                    return Err(ParseError::IrregularShape {
                        row: line_index,
                        expected,
                        found,
                    });
                }
                Some(_) => {}
            }
            rows += 1;
        }

        let columns = columns.ok_or(ParseError::Empty)?;
        Ok(Self {
            rows,
            columns,
            cells,
        })
    }

    /// Build a grid from already typed rows, validating the shape
    pub fn from_rows(rows: Vec<Vec<CellState>>) -> Result<Self, ParseError> {
        let columns = rows.first().map(Vec::len).unwrap_or(0);
        if columns == 0 {
            return Err(ParseError::Empty);
        }

        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != columns)
        {
            return Err(ParseError::IrregularShape {
                row,
                expected: columns,
                found,
            });
        }

        Ok(Self {
            rows: rows.len(),
            columns,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// State at `coord`, or `None` when off-grid
    #[inline]
    pub fn get(&self, coord: GridCoord) -> Option<CellState> {
        if coord.row < self.rows && coord.column < self.columns {
            Some(self.cells[coord.row * self.columns + coord.column])
        } else {
            None
        }
    }

    /// Neighbor of `coord` one step in `direction`, or `None` when off-grid
    #[inline]
    pub fn neighbor(&self, coord: GridCoord, direction: Direction) -> Option<GridCoord> {
        coord
            .step(direction)
            .filter(|next| next.row < self.rows && next.column < self.columns)
    }

    /// All coordinates, top-to-bottom then left-to-right
    pub fn coords(&self) -> impl Iterator<Item = GridCoord> + '_ {
        let columns = self.columns;
        (0..self.rows)
            .flat_map(move |row| (0..columns).map(move |column| GridCoord::new(row, column)))
    }

    /// Number of Start and Restart cells
    pub fn marker_count(&self) -> usize {
        self.cells.iter().filter(|state| state.is_marker()).count()
    }
}

impl FromStr for Grid {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.columns) {
            let line: Vec<&str> = row.iter().map(|state| state.symbol()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// Map one token to a cell state. Numeric dumps write `1.0` or `-1.000`, so any
/// spelling that parses to exactly -1, 0 or 1 is accepted.
fn parse_token(token: &str, row: usize, column: usize) -> Result<CellState, ParseError> {
    let state = match token {
        "1" => Some(CellState::Start),
        "-1" => Some(CellState::Restart),
        "0" => Some(CellState::Empty),
        _ => match token.parse::<f64>() {
            Ok(v) if v == 1.0 => Some(CellState::Start),
            Ok(v) if v == -1.0 => Some(CellState::Restart),
            Ok(v) if v == 0.0 => Some(CellState::Empty),
            _ => None,
        },
    };

    state.ok_or_else(|| ParseError::InvalidSymbol {
        row,
        column,
        token: token.to_string(),
    })
}
