//! Java source export and import.
//!
//! Both variants start with a `// key=value` metadata block and contain one
//! `new Pose2d(...)` call per line, followed by a human-readable comment:
//!
//! ```text
//!     new Pose2d(10.000, 20.000, 0.000000),  // #1  x=10.000in, y=20.000in, θ=0.0°
//! ```
//!
//! Import only looks for constructor calls, so hand-edited files and either
//! constructor dialect are accepted.

use super::{
    degrees_text, fixed, DeclarationKind, ExportContext, ImportMetadata, ImportPatch, ImportedPoses,
};
use crate::error::{CodecError, CodecResult};
use pathpick_core::FieldPose;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

const NUMBER: &str = r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?";

fn pose_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(
            r"(?i)new\s+Pose2d\s*\(\s*({n})\s*,\s*({n})\s*,\s*(?:new\s+Rotation2d\s*\(\s*({n})\s*\)|({n}))\s*\)",
            n = NUMBER
        );
        Regex::new(&pattern).expect("invalid regex pattern")
    })
}

fn metadata_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*//\s*(\w+)\s*=\s*(\S+)\s*$").expect("invalid regex pattern")
    })
}

fn locked_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)locked\s*=\s*(true|false)").expect("invalid regex pattern"))
}

fn header_comment(ctx: &ExportContext<'_>) -> String {
    ctx.metadata_pairs()
        .into_iter()
        .map(|(key, value)| format!("// {key}={value}\n"))
        .collect()
}

fn import_lines(ctx: &ExportContext<'_>) -> String {
    ctx.options
        .library
        .imports()
        .iter()
        .map(|class| format!("import {class};"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn pose_lines(poses: &[FieldPose], ctx: &ExportContext<'_>, indent: &str) -> Vec<String> {
    let unit = ctx.field.unit;
    poses
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let (x, y) = (fixed(p.x, 3), fixed(p.y, 3));
            let heading = fixed(ctx.heading_wrap.radians(p.heading), 6);
            let deg = degrees_text(ctx.heading_wrap, p.heading);
            let comma = if i + 1 < poses.len() { "," } else { "" };
            let lock = if p.locked { " locked=true" } else { "" };
            format!(
                "{indent}{}{comma}  // #{}  x={x}{unit}, y={y}{unit}, θ={deg}°{lock}",
                ctx.options.library.pose_ctor(&x, &y, &heading),
                i + 1
            )
        })
        .collect()
}

/// `open`, the body lines, then `close`, without a blank line for an empty body.
fn block(open: &str, lines: &[String], close: &str) -> String {
    let mut out = String::from(open);
    out.push('\n');
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(close);
    out
}

/// A bare declaration of `path`, without trailing newline.
pub fn encode_snippet(poses: &[FieldPose], ctx: &ExportContext<'_>) -> String {
    let lines = pose_lines(poses, ctx, "    ");
    let header = header_comment(ctx);
    let imports = import_lines(ctx);
    match ctx.options.kind {
        DeclarationKind::List => format!(
            "{header}import java.util.*;\n{imports}\n\n{}",
            block("List<Pose2d> path = Arrays.asList(", &lines, ");")
        ),
        DeclarationKind::Array => format!(
            "{header}{imports}\n\n{}",
            block("Pose2d[] path = new Pose2d[]{", &lines, "};")
        ),
    }
}

/// A non-instantiable class exposing the path as `PATH`.
pub fn encode_class(poses: &[FieldPose], ctx: &ExportContext<'_>, class_name: &str) -> String {
    let lines = pose_lines(poses, ctx, "        ");
    let package = ctx
        .options
        .package
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("package {p};\n\n"))
        .unwrap_or_default();
    let declaration = match ctx.options.kind {
        DeclarationKind::List => block(
            "    public static final List<Pose2d> PATH = Arrays.asList(",
            &lines,
            "    );",
        ),
        DeclarationKind::Array => block(
            "    public static final Pose2d[] PATH = new Pose2d[]{",
            &lines,
            "    };",
        ),
    };
    format!(
        "{package}{}import java.util.*;\n{}\n\npublic final class {class_name} {{\n    private {class_name}() {{}}\n\n{declaration}\n}}\n",
        header_comment(ctx),
        import_lines(ctx)
    )
}

/// Recover metadata and poses from Java source text.
pub fn decode(text: &str) -> CodecResult<ImportPatch> {
    let mut metadata = ImportMetadata::default();
    for caps in metadata_regex().captures_iter(text) {
        metadata.set(&caps[1], &caps[2]);
    }

    let mut poses = Vec::new();
    for line in text.lines() {
        let locked = locked_regex()
            .captures(line)
            .is_some_and(|c| c[1].eq_ignore_ascii_case("true"));
        for caps in pose_regex().captures_iter(line) {
            let parse = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<f64>().ok());
            let (Some(x), Some(y)) = (parse(1), parse(2)) else {
                continue;
            };
            let heading = parse(3).or_else(|| parse(4)).unwrap_or(0.0);
            if x.is_finite() && y.is_finite() {
                let heading = if heading.is_finite() { heading } else { 0.0 };
                poses.push(FieldPose::new(x, y, heading).with_locked(locked));
            }
        }
    }

    if poses.is_empty() {
        return Err(CodecError::NoPoses { format: "source" });
    }
    debug!(count = poses.len(), "Parsed Pose2d constructor calls");
    Ok(ImportPatch {
        metadata,
        poses: ImportedPoses::Field(poses),
    })
}
