//! The three comparison arms and their plot styling.

use crate::trajectory::Trajectory;
use serde::{Deserialize, Serialize};

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// matplotlib `'y'`
    pub const YELLOW: Rgb = Rgb(191, 191, 0);
    /// matplotlib `'k'`
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    /// matplotlib `'r'`
    pub const RED: Rgb = Rgb(255, 0, 0);

    /// `#rrggbb` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Comparison condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Simulated with no movement (original head position held)
    Stationary,

    /// Reference head positions the movement simulation replayed
    Original,

    /// Positions re-estimated from the movement-simulated recording
    Simulated,
}

impl Condition {
    /// All conditions in plot order.
    pub const ALL: [Condition; 3] = [
        Condition::Stationary,
        Condition::Original,
        Condition::Simulated,
    ];

    /// Returns the condition name.
    pub fn name(&self) -> &'static str {
        match self {
            Condition::Stationary => "stationary",
            Condition::Original => "original",
            Condition::Simulated => "simulated",
        }
    }

    /// Returns the default plot style.
    pub fn default_style(&self) -> SeriesStyle {
        let (color, marker_size) = match self {
            Condition::Stationary => (Rgb::YELLOW, 5.0),
            Condition::Original => (Rgb::BLACK, 10.0),
            Condition::Simulated => (Rgb::RED, 5.0),
        };
        SeriesStyle {
            label: self.name().to_string(),
            color,
            marker_size,
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stationary" | "stat" => Ok(Condition::Stationary),
            "original" | "orig" => Ok(Condition::Original),
            "simulated" | "move" | "movement" => Ok(Condition::Simulated),
            _ => Err(format!("Unknown condition: {}", s)),
        }
    }
}

/// Styling of one plotted series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    /// Legend label
    pub label: String,

    /// Line and marker color
    pub color: Rgb,

    /// Marker diameter in points
    pub marker_size: f64,
}

/// Partial style overrides, keyed by condition name.
///
/// Deserializes from JSON such as
/// `{"simulated": {"label": "moved", "color": [0, 0, 255], "marker_size": 4}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stationary: Option<SeriesStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<SeriesStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulated: Option<SeriesStyle>,
}

impl StyleOverrides {
    /// Resolves the style for a condition, falling back to its default.
    pub fn style_for(&self, condition: Condition) -> SeriesStyle {
        let custom = match condition {
            Condition::Stationary => &self.stationary,
            Condition::Original => &self.original,
            Condition::Simulated => &self.simulated,
        };
        custom.clone().unwrap_or_else(|| condition.default_style())
    }
}

/// A condition with its trajectory and style.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionSeries {
    pub condition: Condition,
    pub style: SeriesStyle,
    pub trajectory: Trajectory,
}

impl ConditionSeries {
    /// Pairs a trajectory with the condition's default style.
    pub fn new(condition: Condition, trajectory: Trajectory) -> Self {
        Self {
            condition,
            style: condition.default_style(),
            trajectory,
        }
    }

    /// Replaces the style.
    pub fn with_style(mut self, style: SeriesStyle) -> Self {
        self.style = style;
        self
    }
}
