//! Heading angle normalization and display
//!
//! Headings are stored in canonical radians in `(-π, π]`. The wrap mode
//! only affects how a heading is shown or exported:
//!
//! ```text
//! Half: degrees in (-180, 180], radians in (-π, π]
//! Full: degrees in [0, 360),    radians in [0, 2π)
//! ```

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

/// Default keyboard rotation step in degrees.
pub const ROTATE_STEP_DEG: f64 = 5.0;
/// Keyboard rotation step with the coarse modifier held.
pub const ROTATE_STEP_COARSE_DEG: f64 = 15.0;
/// Snap increment used when angle snapping is enabled.
pub const SNAP_STEP_DEG: f64 = 15.0;

/// Normalize an angle in radians to `(-π, π]`.
///
/// Inputs many revolutions away are first reduced with a remainder so the
/// adjustment loop runs at most a couple of times. Non-finite input is
/// returned unchanged (as NaN).
pub fn normalize(rad: f64) -> f64 {
    let mut a = if rad.abs() > 2.0 * TAU { rad % TAU } else { rad };
    loop {
        if a <= -PI {
            a += TAU;
        } else if a > PI {
            a -= TAU;
        } else {
            break;
        }
    }
    a
}

/// Normalize an angle in radians to `[0, 2π)`.
pub fn wrap_full(rad: f64) -> f64 {
    let a = normalize(rad);
    let full = if a < 0.0 { a + TAU } else { a };
    // Tiny negatives round up to exactly 2π.
    if full >= TAU {
        0.0
    } else {
        full + 0.0
    }
}

/// Canonical radians from degrees in any range.
pub fn from_degrees(deg: f64) -> f64 {
    normalize(deg.to_radians())
}

/// Round `rad` to the nearest multiple of `step_rad`.
pub fn snap(rad: f64, step_rad: f64) -> f64 {
    if step_rad <= 0.0 {
        return rad;
    }
    (rad / step_rad).round() * step_rad
}

/// Display convention for headings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingWrap {
    /// Unsigned full range, `[0, 360)`
    #[default]
    Full,
    /// Signed half range, `(-180, 180]`
    Half,
}

impl HeadingWrap {
    /// Wrap mode from the `headingWrapHalf` flag used in export metadata.
    pub fn from_half_flag(half: bool) -> Self {
        if half {
            Self::Half
        } else {
            Self::Full
        }
    }

    /// `true` for the signed half-range mode.
    pub fn is_half(self) -> bool {
        self == Self::Half
    }

    /// Heading in degrees for display.
    pub fn degrees(self, rad: f64) -> f64 {
        let canonical = normalize(rad).to_degrees();
        match self {
            Self::Half => canonical + 0.0,
            Self::Full => {
                let mut deg = canonical % 360.0;
                if deg < 0.0 {
                    deg += 360.0;
                }
                if deg >= 360.0 {
                    deg -= 360.0;
                }
                deg + 0.0
            }
        }
    }

    /// Heading in radians for export.
    pub fn radians(self, rad: f64) -> f64 {
        match self {
            Self::Half => normalize(rad),
            Self::Full => wrap_full(rad),
        }
    }
}

impl fmt::Display for HeadingWrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Half => write!(f, "half"),
        }
    }
}

impl FromStr for HeadingWrap {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" | "0-360" | "unsigned" => Ok(Self::Full),
            "half" | "180" | "signed" => Ok(Self::Half),
            _ => Err(CoreError::unknown("heading wrap mode", s)),
        }
    }
}
