//! Color themes and donut palettes handed to the renderer.
//!
//! The core never interprets a theme; it only validates the name and passes
//! it through so the renderer can pick the matching color scale.

use crate::error::DashboardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Continuous color scales offered for the choropleth and heatmap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    Blues,
    Cividis,
    Greens,
    Inferno,
    Magma,
    Plasma,
    Reds,
    Rainbow,
    Turbo,
    Viridis,
}

impl ColorTheme {
    /// All themes in menu order.
    pub const ALL: [Self; 10] = [
        Self::Blues,
        Self::Cividis,
        Self::Greens,
        Self::Inferno,
        Self::Magma,
        Self::Plasma,
        Self::Reds,
        Self::Rainbow,
        Self::Turbo,
        Self::Viridis,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Blues => "blues",
            Self::Cividis => "cividis",
            Self::Greens => "greens",
            Self::Inferno => "inferno",
            Self::Magma => "magma",
            Self::Plasma => "plasma",
            Self::Reds => "reds",
            Self::Rainbow => "rainbow",
            Self::Turbo => "turbo",
            Self::Viridis => "viridis",
        }
    }
}

impl fmt::Display for ColorTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorTheme {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.name() == wanted)
            .ok_or_else(|| DashboardError::UnknownTheme(s.to_owned()))
    }
}

/// Foreground/background pair for a donut ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DonutPalette {
    pub fill: &'static str,
    pub track: &'static str,
}

/// Named donut colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonutColor {
    Blue,
    Green,
    Orange,
    Red,
}

impl DonutColor {
    pub fn palette(self) -> DonutPalette {
        match self {
            Self::Blue => DonutPalette {
                fill: "#29b5e8",
                track: "#155F7A",
            },
            Self::Green => DonutPalette {
                fill: "#27AE60",
                track: "#12783D",
            },
            Self::Orange => DonutPalette {
                fill: "#F39C12",
                track: "#875A12",
            },
            Self::Red => DonutPalette {
                fill: "#E74C3C",
                track: "#781F16",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_names() {
        for theme in ColorTheme::ALL {
            assert_eq!(theme.name().parse::<ColorTheme>().unwrap(), theme);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(" Viridis ".parse::<ColorTheme>().unwrap(), ColorTheme::Viridis);
    }

    #[test]
    fn test_unknown_theme() {
        let err = "sepia".parse::<ColorTheme>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown color theme: sepia");
    }

    #[test]
    fn test_donut_palettes() {
        assert_eq!(DonutColor::Green.palette().fill, "#27AE60");
        assert_eq!(DonutColor::Red.palette().track, "#781F16");
        assert_ne!(DonutColor::Blue.palette(), DonutColor::Orange.palette());
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&ColorTheme::Turbo).unwrap();
        assert_eq!(json, "\"turbo\"");
    }
}
