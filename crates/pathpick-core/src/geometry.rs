//! Coordinate engine
//!
//! Converts between image-pixel space (origin top-left, Y down) and field
//! space (physical units, user-selected origin and axis convention).
//!
//! The scale factor is `min(image_width, image_height) / field_size`
//! pixels per field unit. With the offset `(dx, dy)` of an image point
//! from the origin anchor, the mapping is:
//!
//! ```text
//! Standard, Center/TopLeft:  X =  dx / s   Y =  dy / s
//! Standard, BottomLeft:      X =  dx / s   Y = -dy / s
//! RobotForward, any origin:  X = -dy / s   Y = -dx / s
//! ```
//!
//! where the anchor is the image center, `(0, 0)` or `(0, height)`.
//! [`FieldFrame::field_to_image`] is the algebraic inverse.

use crate::angle;
use crate::field::{AxisConvention, FieldConfig, Origin};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

/// Pixel dimensions of the loaded field image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: f64,
    pub height: f64,
}

impl ImageSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// `true` when both sides are finite and positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn shorter_side(&self) -> f64 {
        self.width.min(self.height)
    }

    pub fn center(&self) -> ImagePoint {
        ImagePoint::new(self.width / 2.0, self.height / 2.0)
    }

    /// `true` if the point lies on or inside the image bounds.
    pub fn contains(&self, point: ImagePoint) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

/// A point in image-pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImagePoint {
    pub x: f64,
    pub y: f64,
}

impl ImagePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: ImagePoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A point in field space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldPoint {
    pub x: f64,
    pub y: f64,
}

impl FieldPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for FieldPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// A pose expressed in field space; the unit of exchange for codecs and transforms
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldPose {
    pub x: f64,
    pub y: f64,
    /// Heading in radians, CCW positive in field space
    pub heading: f64,
    pub locked: bool,
}

impl FieldPose {
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self {
            x,
            y,
            heading,
            locked: false,
        }
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn position(&self) -> FieldPoint {
        FieldPoint::new(self.x, self.y)
    }
}

/// Field space bound to a concrete image
///
/// Only constructible once an image is known; callers without an image have
/// no frame and therefore cannot ask field-space questions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldFrame {
    image: ImageSize,
    field_size: f64,
    origin: Origin,
    axes: AxisConvention,
}

impl FieldFrame {
    pub fn new(image: ImageSize, config: &FieldConfig) -> Self {
        Self {
            image,
            field_size: config.field_size,
            origin: config.origin,
            axes: config.axes,
        }
    }

    pub fn image(&self) -> ImageSize {
        self.image
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn axes(&self) -> AxisConvention {
        self.axes
    }

    /// Image pixels per field unit.
    pub fn scale(&self) -> f64 {
        self.image.shorter_side() / self.field_size
    }

    fn anchor(&self) -> ImagePoint {
        match self.origin {
            Origin::Center => self.image.center(),
            Origin::TopLeft => ImagePoint::new(0.0, 0.0),
            Origin::BottomLeft => ImagePoint::new(0.0, self.image.height),
        }
    }

    /// Image-pixel coordinates to field coordinates.
    pub fn image_to_field(&self, point: ImagePoint) -> FieldPoint {
        let anchor = self.anchor();
        let (dx, dy) = (point.x - anchor.x, point.y - anchor.y);
        let (x, y) = match (self.axes, self.origin) {
            (AxisConvention::Standard, Origin::BottomLeft) => (dx, -dy),
            (AxisConvention::Standard, _) => (dx, dy),
            (AxisConvention::RobotForward, _) => (-dy, -dx),
        };
        let s = self.scale();
        FieldPoint::new(x / s, y / s)
    }

    /// Field coordinates to image-pixel coordinates.
    pub fn field_to_image(&self, point: FieldPoint) -> ImagePoint {
        let s = self.scale();
        let (x, y) = (point.x * s, point.y * s);
        let (dx, dy) = match (self.axes, self.origin) {
            (AxisConvention::Standard, Origin::BottomLeft) => (x, -y),
            (AxisConvention::Standard, _) => (x, y),
            (AxisConvention::RobotForward, _) => (-y, -x),
        };
        let anchor = self.anchor();
        ImagePoint::new(anchor.x + dx, anchor.y + dy)
    }

    /// Unit vector in image space pointing along a field heading.
    pub fn image_direction(&self, heading: f64) -> (f64, f64) {
        let tip = self.field_to_image(FieldPoint::new(heading.cos(), heading.sin()));
        let base = self.field_to_image(FieldPoint::default());
        let (dx, dy) = (tip.x - base.x, tip.y - base.y);
        let len = dx.hypot(dy);
        if len == 0.0 {
            (0.0, 0.0)
        } else {
            (dx / len, dy / len)
        }
    }
}

/// Rigid field-space transforms applied to a whole path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoseTransform {
    /// Reflect across the field X axis
    MirrorX,
    /// Reflect across the field Y axis
    MirrorY,
    /// Rotate +90° (counter-clockwise)
    RotateCcw90,
    /// Rotate -90° (clockwise)
    RotateCw90,
    /// Rotate 180°
    Rotate180,
}

impl PoseTransform {
    pub const ALL: [PoseTransform; 5] = [
        PoseTransform::MirrorX,
        PoseTransform::MirrorY,
        PoseTransform::RotateCcw90,
        PoseTransform::RotateCw90,
        PoseTransform::Rotate180,
    ];

    /// Apply to a field pose. The heading comes back normalized; the lock flag is kept.
    pub fn apply(self, pose: FieldPose) -> FieldPose {
        let FieldPose { x, y, heading, .. } = pose;
        let (x, y, heading) = match self {
            Self::MirrorX => (x, -y, -heading),
            Self::MirrorY => (-x, y, PI - heading),
            Self::RotateCcw90 => (-y, x, heading + FRAC_PI_2),
            Self::RotateCw90 => (y, -x, heading - FRAC_PI_2),
            Self::Rotate180 => (-x, -y, heading + PI),
        };
        FieldPose {
            x: x + 0.0,
            y: y + 0.0,
            heading: angle::normalize(heading),
            locked: pose.locked,
        }
    }
}

impl fmt::Display for PoseTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MirrorX => write!(f, "mirror-x"),
            Self::MirrorY => write!(f, "mirror-y"),
            Self::RotateCcw90 => write!(f, "rotate-ccw"),
            Self::RotateCw90 => write!(f, "rotate-cw"),
            Self::Rotate180 => write!(f, "rotate-180"),
        }
    }
}

impl FromStr for PoseTransform {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "mirror-x" | "mirrorx" | "flip-x" => Ok(Self::MirrorX),
            "mirror-y" | "mirrory" | "flip-y" => Ok(Self::MirrorY),
            "rotate-ccw" | "rotate+90" | "ccw" => Ok(Self::RotateCcw90),
            "rotate-cw" | "rotate-90" | "cw" => Ok(Self::RotateCw90),
            "rotate-180" | "rotate180" | "180" => Ok(Self::Rotate180),
            _ => Err(crate::error::CoreError::unknown("transform", s)),
        }
    }
}
