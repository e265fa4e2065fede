//! Canvas layout and hit-testing.
//!
//! The field image is fitted into the canvas with a margin of
//! [`FIELD_MARGIN`] field units on every side and centered. Canvas pixels
//! relate to image pixels through the resulting [`ImageRect`]:
//!
//! ```text
//! canvas_x = rect.x + image_x * rect.scale
//! canvas_y = rect.y + image_y * rect.scale
//! ```
//!
//! Handle and hit radii are given in CSS pixels and multiplied by the
//! device pixel ratio.

use crate::model::Path;
use pathpick_core::{FieldFrame, ImagePoint, ImageSize};
use std::fmt;

/// Margin around the image, in field units.
pub const FIELD_MARGIN: f64 = 12.0;
/// Pick radius around a pose marker, in CSS pixels.
pub const POINT_HIT_RADIUS: f64 = 10.0;
/// Distance from a pose to its rotation handle, in CSS pixels.
pub const HANDLE_DISTANCE: f64 = 28.0;
/// Fraction of the canvas used for the placeholder rect when no image is loaded.
const EMPTY_FILL: f64 = 0.8;

/// A point in canvas-pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasPoint {
    pub x: f64,
    pub y: f64,
}

impl CanvasPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: CanvasPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Where the image lands on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Canvas pixels per image pixel
    pub scale: f64,
}

impl ImageRect {
    pub fn image_to_canvas(&self, point: ImagePoint) -> CanvasPoint {
        CanvasPoint::new(self.x + point.x * self.scale, self.y + point.y * self.scale)
    }

    pub fn canvas_to_image(&self, point: CanvasPoint) -> ImagePoint {
        ImagePoint::new((point.x - self.x) / self.scale, (point.y - self.y) / self.scale)
    }

    /// `true` if the canvas point falls on the image.
    pub fn contains(&self, point: CanvasPoint) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

impl fmt::Display for ImageRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}x{:.1} at ({:.1}, {:.1}), scale {:.4}",
            self.width, self.height, self.x, self.y, self.scale
        )
    }
}

/// Result of a hit test on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// A pose marker; `handle` is set when the rotation handle was hit
    Point { index: usize, handle: bool },
    /// Inside the image but not on any pose
    Empty,
}

/// The rendering surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    canvas_width: f64,
    canvas_height: f64,
    pixel_ratio: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl Viewport {
    /// Creates a viewport with a pixel ratio of 1.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            canvas_width,
            canvas_height,
            pixel_ratio: 1.0,
        }
    }

    pub fn with_pixel_ratio(mut self, ratio: f64) -> Self {
        if ratio.is_finite() && ratio > 0.0 {
            self.pixel_ratio = ratio;
        }
        self
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    /// Sets the canvas dimensions (typically called when window resizes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Layout of the image on the canvas.
    ///
    /// Without a frame the rect is a centered placeholder covering most of
    /// the canvas at scale 1.
    pub fn image_rect(&self, frame: Option<&FieldFrame>) -> ImageRect {
        let (cw, ch) = (self.canvas_width, self.canvas_height);
        let Some(frame) = frame else {
            let (w, h) = (cw * EMPTY_FILL, ch * EMPTY_FILL);
            return ImageRect {
                x: (cw - w) / 2.0,
                y: (ch - h) / 2.0,
                width: w,
                height: h,
                scale: 1.0,
            };
        };
        let ImageSize { width: iw, height: ih } = frame.image();
        let margin = FIELD_MARGIN * frame.scale();
        let scale = (cw / (iw + 2.0 * margin)).min(ch / (ih + 2.0 * margin));
        let (w, h) = (iw * scale, ih * scale);
        ImageRect {
            x: (cw - w) / 2.0,
            y: (ch - h) / 2.0,
            width: w,
            height: h,
            scale,
        }
    }

    /// Finds what lies under `point`, checking the most recently added pose first.
    ///
    /// Returns `None` when nothing is hit and the point is outside the image.
    pub fn hit_test(&self, frame: &FieldFrame, path: &Path, point: CanvasPoint) -> Option<Hit> {
        let rect = self.image_rect(Some(frame));
        let radius = POINT_HIT_RADIUS * self.pixel_ratio;
        let reach = HANDLE_DISTANCE * self.pixel_ratio;

        for (index, pose) in path.points().iter().enumerate().rev() {
            let center = rect.image_to_canvas(pose.position);
            let (ux, uy) = frame.image_direction(pose.heading());
            let handle = CanvasPoint::new(center.x + ux * reach, center.y + uy * reach);
            if handle.distance_to(point) < radius {
                return Some(Hit::Point { index, handle: true });
            }
            if center.distance_to(point) < radius {
                return Some(Hit::Point { index, handle: false });
            }
        }
        rect.contains(point).then_some(Hit::Empty)
    }

    /// Where "add point" places a new pose: under the cursor when it is
    /// over the image, otherwise at the image center.
    pub fn placement_point(&self, frame: &FieldFrame, cursor: Option<CanvasPoint>) -> ImagePoint {
        let rect = self.image_rect(Some(frame));
        match cursor {
            Some(c) if rect.contains(c) => rect.canvas_to_image(c),
            _ => frame.image().center(),
        }
    }
}
