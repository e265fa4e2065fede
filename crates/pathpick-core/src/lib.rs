//! # PathPick Core
//!
//! Core types for the PathPick waypoint editor:
//!
//! - **Units**: field length units and conversions
//! - **Angles**: canonical heading normalization and display wrap modes
//! - **Field configuration**: field size, origin placement, axis convention
//! - **Geometry**: image-pixel ↔ field-space conversion and pose transforms
//!
//! Everything in this crate is pure and synchronous.

pub mod angle;
pub mod error;
pub mod field;
pub mod geometry;
pub mod units;

pub use angle::HeadingWrap;
pub use error::{CoreError, Result};
pub use field::{AxisConvention, FieldConfig, Origin};
pub use geometry::{FieldFrame, FieldPoint, FieldPose, ImagePoint, ImageSize, PoseTransform};
pub use units::MeasurementUnit;
