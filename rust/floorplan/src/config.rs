// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Layout configuration, optionally overridden from environment variables.

use crate::error::ConfigError;
use crate::types::{Direction, PanelDimensions};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Environment variable overriding the grid spacing.
pub const GRID_SPACING_ENV: &str = "WALLKIT_GRID_SPACING";
/// Environment variable overriding the direction priority.
pub const DIRECTION_PRIORITY_ENV: &str = "WALLKIT_DIRECTION_PRIORITY";

/// Order in which a run origin probes its neighbors.
///
/// Always a permutation of the four directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Direction>", into = "Vec<Direction>")]
pub struct DirectionPriority([Direction; 4]);

impl DirectionPriority {
    pub const UP_DOWN_LEFT_RIGHT: Self = Self([
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ]);

    pub const LEFT_RIGHT_UP_DOWN: Self = Self([
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ]);

    /// Validate that `order` names every direction exactly once.
    pub fn new(order: [Direction; 4]) -> Result<Self, ConfigError> {
        let all_present = Direction::ALL.iter().all(|d| order.contains(d));
        if all_present {
            Ok(Self(order))
        } else {
            Err(ConfigError::InvalidPriority(format!(
                "{:?} is not a permutation of up, down, left, right",
                order
            )))
        }
    }

    pub fn directions(&self) -> &[Direction; 4] {
        &self.0
    }
}

impl Default for DirectionPriority {
    fn default() -> Self {
        Self::UP_DOWN_LEFT_RIGHT
    }
}

impl TryFrom<Vec<Direction>> for DirectionPriority {
    type Error = ConfigError;

    fn try_from(order: Vec<Direction>) -> Result<Self, Self::Error> {
        let order: [Direction; 4] = order.try_into().map_err(|v: Vec<Direction>| {
            ConfigError::InvalidPriority(format!("expected 4 directions, got {}", v.len()))
        })?;
        Self::new(order)
    }
}

impl From<DirectionPriority> for Vec<Direction> {
    fn from(priority: DirectionPriority) -> Self {
        priority.0.to_vec()
    }
}

/// Parses comma separated lists such as `up,down,left,right` or `l,r,u,d`.
impl FromStr for DirectionPriority {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let order = s
            .split(',')
            .map(|token| match token.trim().to_ascii_lowercase().as_str() {
                "up" | "u" => Ok(Direction::Up),
                "down" | "d" => Ok(Direction::Down),
                "left" | "l" => Ok(Direction::Left),
                "right" | "r" => Ok(Direction::Right),
                other => Err(ConfigError::InvalidPriority(format!(
                    "unknown direction '{}'",
                    other
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::try_from(order)
    }
}

impl fmt::Display for DirectionPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self
            .0
            .iter()
            .map(|d| match d {
                Direction::Up => "up",
                Direction::Down => "down",
                Direction::Left => "left",
                Direction::Right => "right",
            })
            .collect();
        write!(f, "{}", names.join(","))
    }
}

/// Settings consumed by the tracing and planning stages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// World units between adjacent cell centers. `None` uses the panel's
    /// nominal length so every panel keeps scale 1.0.
    pub grid_spacing: Option<f64>,
    /// Neighbor probing order at run origins.
    pub priority: DirectionPriority,
}

impl LayoutConfig {
    /// Defaults overridden by `WALLKIT_GRID_SPACING` and
    /// `WALLKIT_DIRECTION_PRIORITY` when they are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var(GRID_SPACING_ENV) {
            let spacing = raw
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidEnv {
                    name: GRID_SPACING_ENV,
                    value: raw.clone(),
                })?;
            config.grid_spacing = Some(spacing);
        }

        if let Ok(raw) = std::env::var(DIRECTION_PRIORITY_ENV) {
            config.priority = raw.parse()?;
        }

        Ok(config)
    }

    /// Spacing actually used for `panel`.
    pub fn effective_spacing(&self, panel: &PanelDimensions) -> f64 {
        self.grid_spacing.unwrap_or(panel.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_priority() {
        assert_eq!(
            DirectionPriority::default().directions(),
            &[Direction::Up, Direction::Down, Direction::Left, Direction::Right]
        );
    }

    #[test]
    fn test_rejects_repeated_direction() {
        let err = DirectionPriority::new([
            Direction::Up,
            Direction::Up,
            Direction::Left,
            Direction::Right,
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPriority(_)));
    }

    #[test]
    fn test_parse_priority() {
        let priority: DirectionPriority = "Left, right,u,D".parse().unwrap();
        assert_eq!(priority, DirectionPriority::LEFT_RIGHT_UP_DOWN);
        assert_eq!(priority.to_string(), "left,right,up,down");

        assert!("up,down,left".parse::<DirectionPriority>().is_err());
        assert!("up,down,left,north".parse::<DirectionPriority>().is_err());
    }

    #[test]
    fn test_priority_serde() {
        let json = serde_json::to_string(&DirectionPriority::default()).unwrap();
        assert_eq!(json, r#"["up","down","left","right"]"#);

        let back: DirectionPriority = serde_json::from_str(r#"["left","right","up","down"]"#).unwrap();
        assert_eq!(back, DirectionPriority::LEFT_RIGHT_UP_DOWN);
        assert!(serde_json::from_str::<DirectionPriority>(r#"["up","up","up","up"]"#).is_err());
    }

    // The only test touching these variables, so it cannot race another one
    #[test]
    fn test_from_env_overrides() {
        std::env::set_var(GRID_SPACING_ENV, " 1.5 ");
        std::env::set_var(DIRECTION_PRIORITY_ENV, "l,r,u,d");
        let config = LayoutConfig::from_env().unwrap();
        assert_eq!(config.grid_spacing, Some(1.5));
        assert_eq!(config.priority, DirectionPriority::LEFT_RIGHT_UP_DOWN);

        std::env::set_var(GRID_SPACING_ENV, "wide");
        assert!(matches!(
            LayoutConfig::from_env(),
            Err(ConfigError::InvalidEnv { name: GRID_SPACING_ENV, .. })
        ));

        std::env::remove_var(GRID_SPACING_ENV);
        std::env::remove_var(DIRECTION_PRIORITY_ENV);
        assert_eq!(LayoutConfig::from_env().unwrap(), LayoutConfig::default());
    }

    #[test]
    fn test_effective_spacing_defaults_to_panel_length() {
        let panel = PanelDimensions::new(0.2, 3.0, 2.5);
        assert_eq!(LayoutConfig::default().effective_spacing(&panel), 2.5);

        let config = LayoutConfig {
            grid_spacing: Some(1.0),
            ..Default::default()
        };
        assert_eq!(config.effective_spacing(&panel), 1.0);
    }
}
