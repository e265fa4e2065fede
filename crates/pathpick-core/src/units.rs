//! Unit conversion utilities
//!
//! Field dimensions, robot footprint and exported coordinates are all
//! expressed in one user-selected length unit. Conversions between units go
//! through meters.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const METERS_PER_INCH: f64 = 0.0254;
const METERS_PER_FOOT: f64 = 0.3048;

/// Length unit used for field space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MeasurementUnit {
    /// Meters
    #[serde(rename = "m")]
    Meters,
    /// Centimeters
    #[serde(rename = "cm")]
    Centimeters,
    /// Inches
    #[default]
    #[serde(rename = "in")]
    Inches,
    /// Feet
    #[serde(rename = "ft")]
    Feet,
}

impl MeasurementUnit {
    /// All supported units, in menu order.
    pub const ALL: [MeasurementUnit; 4] = [
        MeasurementUnit::Meters,
        MeasurementUnit::Centimeters,
        MeasurementUnit::Inches,
        MeasurementUnit::Feet,
    ];

    /// Short label written into exports ("m", "cm", "in", "ft")
    pub fn label(self) -> &'static str {
        match self {
            Self::Meters => "m",
            Self::Centimeters => "cm",
            Self::Inches => "in",
            Self::Feet => "ft",
        }
    }

    fn meters_per_unit(self) -> f64 {
        match self {
            Self::Meters => 1.0,
            Self::Centimeters => 0.01,
            Self::Inches => METERS_PER_INCH,
            Self::Feet => METERS_PER_FOOT,
        }
    }

    /// Convert a value in this unit to meters
    pub fn to_meters(self, value: f64) -> f64 {
        value * self.meters_per_unit()
    }

    /// Convert a value in meters to this unit
    pub fn from_meters(self, meters: f64) -> f64 {
        meters / self.meters_per_unit()
    }

    /// Convert a value in this unit to `target`
    pub fn convert(self, value: f64, target: MeasurementUnit) -> f64 {
        if self == target {
            return value;
        }
        target.from_meters(self.to_meters(value))
    }
}

impl fmt::Display for MeasurementUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MeasurementUnit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "meter" | "meters" => Ok(Self::Meters),
            "cm" | "centimeter" | "centimeters" => Ok(Self::Centimeters),
            "in" | "inch" | "inches" => Ok(Self::Inches),
            "ft" | "foot" | "feet" => Ok(Self::Feet),
            _ => Err(CoreError::unknown("measurement unit", s)),
        }
    }
}
