//! Field configuration
//!
//! Ambient settings that define field space: physical size, unit, where the
//! origin sits on the image and how image axes map onto field axes. Robot
//! footprint dimensions travel with the configuration for export metadata
//! and rendering but do not affect coordinate conversion.

use crate::error::{CoreError, Result};
use crate::units::MeasurementUnit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Default field side length (a 12 ft field, in inches).
pub const DEFAULT_FIELD_SIZE: f64 = 144.0;
/// Default robot footprint side length in inches.
pub const DEFAULT_ROBOT_SIZE: f64 = 18.0;

/// Where field `(0, 0)` sits on the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Origin {
    /// Image center
    Center,
    /// Top-left image corner
    #[default]
    TopLeft,
    /// Bottom-left image corner, field Y growing upwards
    BottomLeft,
}

impl Origin {
    /// All origins, in menu order.
    pub const ALL: [Origin; 3] = [Origin::Center, Origin::TopLeft, Origin::BottomLeft];
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Center => write!(f, "center"),
            Self::TopLeft => write!(f, "topLeft"),
            Self::BottomLeft => write!(f, "bottomLeft"),
        }
    }
}

impl FromStr for Origin {
    type Err = CoreError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "center" | "centre" => Ok(Self::Center),
            "topleft" => Ok(Self::TopLeft),
            "bottomleft" => Ok(Self::BottomLeft),
            _ => Err(CoreError::unknown("origin", s)),
        }
    }
}

/// How image axes map to field axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AxisConvention {
    /// Image X is field X, image Y is field Y
    #[default]
    Standard,
    /// Forward is up the image: field X runs up the image, field Y runs left
    RobotForward,
}

impl AxisConvention {
    /// Both conventions.
    pub const ALL: [AxisConvention; 2] = [AxisConvention::Standard, AxisConvention::RobotForward];
}

impl fmt::Display for AxisConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::RobotForward => write!(f, "robotForward"),
        }
    }
}

impl FromStr for AxisConvention {
    type Err = CoreError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "standard" | "image" => Ok(Self::Standard),
            "robotforward" | "rotated" | "ftc" => Ok(Self::RobotForward),
            _ => Err(CoreError::unknown("axis convention", s)),
        }
    }
}

/// Field-space configuration shared by the geometry engine and codecs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Physical side length of the (square) field
    pub field_size: f64,
    /// Unit of `field_size`, robot dimensions and exported coordinates
    pub unit: MeasurementUnit,
    /// Origin placement
    pub origin: Origin,
    /// Axis convention
    pub axes: AxisConvention,
    /// Robot footprint length
    pub robot_length: f64,
    /// Robot footprint width
    pub robot_width: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            field_size: DEFAULT_FIELD_SIZE,
            unit: MeasurementUnit::Inches,
            origin: Origin::TopLeft,
            axes: AxisConvention::Standard,
            robot_length: DEFAULT_ROBOT_SIZE,
            robot_width: DEFAULT_ROBOT_SIZE,
        }
    }
}

impl FieldConfig {
    /// Validate sizes
    pub fn validate(&self) -> Result<()> {
        positive("field size", self.field_size)?;
        positive("robot length", self.robot_length)?;
        positive("robot width", self.robot_width)?;
        Ok(())
    }

    /// Change the unit, converting every length so the physical field is unchanged.
    pub fn convert_unit(&mut self, unit: MeasurementUnit) {
        self.field_size = self.unit.convert(self.field_size, unit);
        self.robot_length = self.unit.convert(self.robot_length, unit);
        self.robot_width = self.unit.convert(self.robot_width, unit);
        self.unit = unit;
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        warn!(name, value, "Field configuration rejected");
        Err(CoreError::InvalidValue {
            name,
            value,
            reason: "must be a positive number",
        })
    }
}
