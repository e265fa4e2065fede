//! Structured JSON format.
//!
//! ```json
//! {
//!   "meta": { "library": "rr", "format": "list", "headingWrapHalf": false,
//!             "fieldSize": 144, "robotLen": 18, "robotWid": 18,
//!             "measurementUnit": "in" },
//!   "poses": [ { "x": 10.0, "y": 20.0, "headingRad": 0.0, "locked": false } ]
//! }
//! ```
//!
//! Decoding also accepts a legacy `points` array of image-space
//! `{xPx, yPx, headingRad}` records and a bare top-level array of poses.

use super::{round_to, DeclarationKind, ExportContext, ImportMetadata, ImportPatch, ImportedPoses, Library};
use crate::error::{CodecError, CodecResult};
use crate::model::Pose;
use pathpick_core::{FieldPose, ImagePoint, MeasurementUnit};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonMeta {
    library: Library,
    format: DeclarationKind,
    heading_wrap_half: bool,
    field_size: f64,
    robot_len: f64,
    robot_wid: f64,
    measurement_unit: MeasurementUnit,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonPose {
    x: f64,
    y: f64,
    heading_rad: f64,
    locked: bool,
}

#[derive(Serialize)]
struct JsonDocument {
    meta: JsonMeta,
    poses: Vec<JsonPose>,
}

/// Pretty-printed JSON for `poses`.
pub fn encode(poses: &[FieldPose], ctx: &ExportContext<'_>) -> CodecResult<String> {
    let doc = JsonDocument {
        meta: JsonMeta {
            library: ctx.options.library,
            format: ctx.options.kind,
            heading_wrap_half: ctx.heading_wrap.is_half(),
            field_size: ctx.field.field_size,
            robot_len: ctx.field.robot_length,
            robot_wid: ctx.field.robot_width,
            measurement_unit: ctx.field.unit,
        },
        poses: poses
            .iter()
            .map(|p| JsonPose {
                x: round_to(p.x, 3),
                y: round_to(p.y, 3),
                heading_rad: round_to(ctx.heading_wrap.radians(p.heading), 6),
                locked: p.locked,
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Parse any supported JSON shape.
pub fn decode(text: &str) -> CodecResult<ImportPatch> {
    let value: Value = serde_json::from_str(text)?;
    let mut metadata = ImportMetadata::default();

    match value {
        Value::Object(obj) => {
            if let Some(Value::Object(meta)) = obj.get("meta") {
                read_metadata(meta, &mut metadata);
            }
            if metadata.heading_wrap.is_none() {
                if let Some(flag) = obj.get("headingWrapHalf") {
                    metadata.set("headingWrapHalf", &scalar_text(flag));
                }
            }

            if let Some(Value::Array(poses)) = obj.get("poses") {
                let poses = parse_all(poses, field_pose)?;
                Ok(ImportPatch {
                    metadata,
                    poses: ImportedPoses::Field(poses),
                })
            } else if let Some(Value::Array(points)) = obj.get("points") {
                let points = parse_all(points, image_pose)?;
                Ok(ImportPatch {
                    metadata,
                    poses: ImportedPoses::Image(points),
                })
            } else {
                Err(CodecError::UnrecognizedStructure)
            }
        }
        Value::Array(items) => {
            let looks_like_poses = items
                .first()
                .and_then(Value::as_object)
                .is_some_and(|o| o.contains_key("x") && o.contains_key("y"));
            if !looks_like_poses {
                return Err(CodecError::UnrecognizedStructure);
            }
            Ok(ImportPatch {
                metadata,
                poses: ImportedPoses::Field(parse_all(&items, field_pose)?),
            })
        }
        _ => Err(CodecError::UnrecognizedStructure),
    }
}

/// Parses every record, skipping bad ones. An empty array is a valid empty
/// path, but a non-empty one with no usable record is rejected.
fn parse_all<T>(items: &[Value], parse: impl Fn(&Value) -> Option<T>) -> CodecResult<Vec<T>> {
    let parsed: Vec<T> = items.iter().filter_map(parse).collect();
    if parsed.is_empty() && !items.is_empty() {
        return Err(CodecError::NoPoses { format: "JSON" });
    }
    Ok(parsed)
}

fn read_metadata(meta: &Map<String, Value>, out: &mut ImportMetadata) {
    for (key, value) in meta {
        out.set(key, &scalar_text(value));
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Numbers or numeric strings.
fn number(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    let value = match obj.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    value.filter(|v| v.is_finite())
}

fn flag(obj: &Map<String, Value>, key: &str) -> bool {
    match obj.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        _ => false,
    }
}

fn field_pose(item: &Value) -> Option<FieldPose> {
    let obj = item.as_object()?;
    let (Some(x), Some(y)) = (number(obj, "x"), number(obj, "y")) else {
        warn!(%item, "Skipping pose without numeric x/y");
        return None;
    };
    let heading = number(obj, "headingRad")
        .or_else(|| number(obj, "h"))
        .unwrap_or(0.0);
    Some(FieldPose::new(x, y, heading).with_locked(flag(obj, "locked")))
}

fn image_pose(item: &Value) -> Option<Pose> {
    let obj = item.as_object()?;
    let (Some(x), Some(y)) = (number(obj, "xPx"), number(obj, "yPx")) else {
        warn!(%item, "Skipping point without numeric xPx/yPx");
        return None;
    };
    let mut pose = Pose::new(ImagePoint::new(x, y), number(obj, "headingRad").unwrap_or(0.0));
    pose.locked = flag(obj, "locked");
    Some(pose)
}
