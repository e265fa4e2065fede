//! Comma-separated table format.
//!
//! ```text
//! # library=rr
//! # headingWrapHalf=false
//! # fieldSize=144
//! index,x,y,heading_rad,heading_deg,locked
//! 1,10.000,20.000,0.000000,0.0,false
//! ```
//!
//! Column names are matched case-insensitively, `x`/`y` may carry a unit
//! suffix (`x_in`, `y_m`), and missing columns fall back to position. The
//! heading comes from `heading_rad` when present and from `heading_deg`
//! otherwise.

use super::{degrees_text, fixed, ExportContext, ImportMetadata, ImportPatch, ImportedPoses};
use crate::error::{CodecError, CodecResult};
use pathpick_core::{angle, FieldPose};
use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

/// Header row written on export.
pub const HEADER: &str = "index,x,y,heading_rad,heading_deg,locked";

fn metadata_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#\s*(\w+)\s*=\s*([^#\s]+)").expect("invalid regex pattern"))
}

pub fn encode(poses: &[FieldPose], ctx: &ExportContext<'_>) -> String {
    let mut lines: Vec<String> = ctx
        .metadata_pairs()
        .into_iter()
        .map(|(key, value)| format!("# {key}={value}"))
        .collect();
    lines.push(HEADER.to_string());
    for (i, p) in poses.iter().enumerate() {
        lines.push(format!(
            "{},{},{},{},{},{}",
            i + 1,
            fixed(p.x, 3),
            fixed(p.y, 3),
            fixed(ctx.heading_wrap.radians(p.heading), 6),
            degrees_text(ctx.heading_wrap, p.heading),
            p.locked
        ));
    }
    lines.join("\n")
}

/// Column positions resolved from the header row
struct Columns {
    x: usize,
    y: usize,
    heading_rad: Option<usize>,
    heading_deg: Option<usize>,
    locked: Option<usize>,
}

impl Columns {
    fn from_header(header: &str) -> Self {
        let names: Vec<String> = header.split(',').map(|h| h.trim().to_lowercase()).collect();
        let find = |pred: &dyn Fn(&str) -> bool| names.iter().position(|n| pred(n.as_str()));
        let axis = |axis: &'static str| {
            move |n: &str| n == axis || n.strip_prefix(axis).is_some_and(|rest| rest.starts_with('_'))
        };
        let (heading_rad, heading_deg) =
            match (find(&|n: &str| n == "heading_rad"), find(&|n: &str| n == "heading_deg")) {
                (None, None) => (Some(3), Some(4)),
                found => found,
            };
        Self {
            x: find(&axis("x")).unwrap_or(1),
            y: find(&axis("y")).unwrap_or(2),
            heading_rad,
            heading_deg,
            locked: find(&|n: &str| n == "locked"),
        }
    }

    fn positional(width: usize) -> Self {
        let (x, y) = if width >= 3 { (1, 2) } else { (0, 1) };
        Self {
            x,
            y,
            heading_rad: Some(3),
            heading_deg: Some(4),
            locked: Some(5),
        }
    }

    fn parse_row(&self, cells: &[&str]) -> Option<FieldPose> {
        let num = |i: Option<usize>| -> Option<f64> {
            cells
                .get(i?)
                .filter(|c| !c.is_empty())
                .and_then(|c| c.parse::<f64>().ok())
                .filter(|v| v.is_finite())
        };
        let x = num(Some(self.x))?;
        let y = num(Some(self.y))?;
        let heading = num(self.heading_rad)
            .or_else(|| num(self.heading_deg).map(angle::from_degrees))
            .unwrap_or(0.0);
        let locked = self
            .locked
            .and_then(|i| cells.get(i))
            .is_some_and(|c| c.eq_ignore_ascii_case("true"));
        Some(FieldPose::new(x, y, heading).with_locked(locked))
    }
}

pub fn decode(text: &str) -> CodecResult<ImportPatch> {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    if lines.is_empty() {
        return Err(CodecError::EmptyTable);
    }

    let mut metadata = ImportMetadata::default();
    let data_start = lines.iter().position(|l| !l.starts_with('#')).unwrap_or(lines.len());
    for line in &lines[..data_start] {
        if let Some(caps) = metadata_regex().captures(line) {
            metadata.set(&caps[1], &caps[2]);
        }
    }

    let rows = &lines[data_start..];
    let Some(first) = rows.first() else {
        return Err(CodecError::NoDataRows);
    };
    let lower = first.to_lowercase();
    let has_header = lower.contains('x') || lower.contains('y') || lower.contains("heading");
    let (columns, body) = if has_header {
        (Columns::from_header(first), &rows[1..])
    } else {
        (Columns::positional(first.split(',').count()), rows)
    };

    let mut poses = Vec::with_capacity(body.len());
    for (n, row) in body.iter().enumerate() {
        let cells: Vec<&str> = row.split(',').map(str::trim).collect();
        match columns.parse_row(&cells) {
            Some(pose) => poses.push(pose),
            None => warn!(row = n + 1, line = %row, "Skipping CSV row without numeric x/y"),
        }
    }
    if poses.is_empty() {
        return Err(CodecError::NoPoses { format: "CSV" });
    }
    Ok(ImportPatch {
        metadata,
        poses: ImportedPoses::Field(poses),
    })
}
