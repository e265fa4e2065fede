//! Import/export of paths.
//!
//! Every format has an `encode`/`decode` pair in its own module; the
//! [`FileFormat`] enum dispatches between them. Export always works on
//! field-space poses freshly derived from the stored image positions.
//! Decoding never touches the document: it produces an [`ImportPatch`]
//! that the caller applies once parsing has fully succeeded.

pub mod csv;
pub mod json;
pub mod source;

use crate::error::{CodecError, CodecResult};
use crate::model::Pose;
use pathpick_core::{CoreError, FieldConfig, FieldPose, HeadingWrap, MeasurementUnit};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Default class name and file base for exports.
pub const DEFAULT_CLASS_NAME: &str = "AutoPath";

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileFormat {
    /// Structured JSON with a metadata block
    Json,
    /// Comma-separated table with `# key=value` metadata
    Csv,
    /// A complete Java class holding the path
    #[default]
    #[serde(rename = "java-class")]
    SourceClass,
    /// A bare Java declaration
    #[serde(rename = "java-snippet")]
    SourceSnippet,
}

impl FileFormat {
    pub const ALL: [FileFormat; 4] = [
        FileFormat::Json,
        FileFormat::Csv,
        FileFormat::SourceClass,
        FileFormat::SourceSnippet,
    ];

    /// Identify the format of `text`, using content first and the file
    /// extension second.
    pub fn detect(text: &str, file_name: &str) -> CodecResult<Self> {
        let trimmed = text.trim_start();
        let ext = extension(file_name);
        let format = if trimmed.starts_with('{') || trimmed.starts_with('[') {
            Self::Json
        } else if text.to_lowercase().contains("pose2d") {
            if ext == "java" {
                Self::SourceClass
            } else {
                Self::SourceSnippet
            }
        } else {
            match ext.as_str() {
                "json" => Self::Json,
                "csv" => Self::Csv,
                "java" => Self::SourceClass,
                "txt" => Self::SourceSnippet,
                _ => {
                    let shown = if ext.is_empty() { file_name.to_string() } else { ext };
                    return Err(CodecError::UnsupportedFormat(shown));
                }
            }
        };
        debug!(%format, file_name, "Detected import format");
        Ok(format)
    }

    /// Render `poses` as a complete export artifact.
    pub fn encode(self, poses: &[FieldPose], ctx: &ExportContext<'_>) -> CodecResult<ExportArtifact> {
        let class_name = sanitize_java_ident(&ctx.options.class_name);
        let file_base = sanitize_file_base(&ctx.options.class_name);
        let (content, preview, suggested_name) = match self {
            Self::Json => {
                let text = json::encode(poses, ctx)?;
                (text.clone(), text, format!("{file_base}.json"))
            }
            Self::Csv => {
                let text = csv::encode(poses, ctx);
                (text.clone(), text, format!("{file_base}.csv"))
            }
            Self::SourceSnippet => {
                let snippet = source::encode_snippet(poses, ctx);
                (format!("{snippet}\n"), snippet, format!("{file_base}.java.txt"))
            }
            Self::SourceClass => {
                let text = source::encode_class(poses, ctx, &class_name);
                (text.clone(), text, format!("{class_name}.java"))
            }
        };
        let mime = mime_for_name(&suggested_name);
        Ok(ExportArtifact {
            content,
            preview,
            suggested_name,
            mime,
        })
    }

    /// Parse `text` in this format.
    pub fn decode(self, text: &str) -> CodecResult<ImportPatch> {
        match self {
            Self::Json => json::decode(text),
            Self::Csv => csv::decode(text),
            Self::SourceClass | Self::SourceSnippet => source::decode(text),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::SourceClass => write!(f, "java-class"),
            Self::SourceSnippet => write!(f, "java-snippet"),
        }
    }
}

impl FromStr for FileFormat {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "java-class" | "class" | "java" => Ok(Self::SourceClass),
            "java-snippet" | "snippet" | "txt" => Ok(Self::SourceSnippet),
            _ => Err(CodecError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Target library dialect for source exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Library {
    #[default]
    #[serde(rename = "rr")]
    RoadRunner,
    #[serde(rename = "ftclib")]
    FtcLib,
    #[serde(rename = "RilLib")]
    RilLib,
}

impl Library {
    pub const ALL: [Library; 3] = [Library::RoadRunner, Library::FtcLib, Library::RilLib];

    /// Token written into export metadata
    pub fn label(self) -> &'static str {
        match self {
            Self::RoadRunner => "rr",
            Self::FtcLib => "ftclib",
            Self::RilLib => "RilLib",
        }
    }

    /// Fully-qualified classes the declaration needs
    pub fn imports(self) -> &'static [&'static str] {
        match self {
            Self::RoadRunner => &["com.acmerobotics.roadrunner.geometry.Pose2d"],
            Self::FtcLib => &["com.arcrobotics.ftclib.geometry.Pose2d"],
            Self::RilLib => &[
                "org.firstinspires.ftc.teamcode.RilLib.Math.Geometry.Pose2d",
                "org.firstinspires.ftc.teamcode.RilLib.Math.Geometry.Rotation2d",
            ],
        }
    }

    /// Constructor call for one pose, given preformatted arguments
    pub fn pose_ctor(self, x: &str, y: &str, heading: &str) -> String {
        match self {
            Self::RoadRunner | Self::FtcLib => format!("new Pose2d({x}, {y}, {heading})"),
            Self::RilLib => format!("new Pose2d({x}, {y}, new Rotation2d({heading}))"),
        }
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Library {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rr" | "roadrunner" => Ok(Self::RoadRunner),
            "ftclib" => Ok(Self::FtcLib),
            "rillib" => Ok(Self::RilLib),
            _ => Err(CoreError::unknown("library", s)),
        }
    }
}

/// Declaration shape for source exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    /// `List<Pose2d>` built with `Arrays.asList`
    #[default]
    List,
    /// `Pose2d[]` array literal
    Array,
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Array => write!(f, "array"),
        }
    }
}

impl FromStr for DeclarationKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "list" => Ok(Self::List),
            "array" => Ok(Self::Array),
            _ => Err(CoreError::unknown("declaration kind", s)),
        }
    }
}

/// User-selected export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub format: FileFormat,
    pub library: Library,
    pub kind: DeclarationKind,
    /// Class name for the class variant; also the file base for the others
    pub class_name: String,
    /// Optional package declaration for the class variant
    pub package: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: FileFormat::default(),
            library: Library::default(),
            kind: DeclarationKind::default(),
            class_name: DEFAULT_CLASS_NAME.to_string(),
            package: None,
        }
    }
}

/// Everything an encoder needs besides the poses
#[derive(Debug, Clone, Copy)]
pub struct ExportContext<'a> {
    pub field: &'a FieldConfig,
    pub heading_wrap: HeadingWrap,
    pub options: &'a ExportOptions,
}

impl ExportContext<'_> {
    /// `key=value` metadata shared by the CSV and source headers.
    pub(crate) fn metadata_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("library", self.options.library.to_string()),
            ("format", self.options.kind.to_string()),
            ("headingWrapHalf", self.heading_wrap.is_half().to_string()),
            ("fieldSize", self.field.field_size.to_string()),
            ("robotLen", self.field.robot_length.to_string()),
            ("robotWid", self.field.robot_width.to_string()),
            ("measurementUnit", self.field.unit.to_string()),
        ]
    }
}

/// Text ready for preview and persistence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// File content
    pub content: String,
    /// Text for on-screen preview and clipboard
    pub preview: String,
    pub suggested_name: String,
    pub mime: &'static str,
}

/// Metadata recovered from an import; absent keys stay `None`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportMetadata {
    pub library: Option<Library>,
    pub kind: Option<DeclarationKind>,
    pub heading_wrap: Option<HeadingWrap>,
    pub field_size: Option<f64>,
    pub robot_length: Option<f64>,
    pub robot_width: Option<f64>,
    pub unit: Option<MeasurementUnit>,
}

impl ImportMetadata {
    /// Record one `key=value` pair. Keys are matched case-insensitively;
    /// unknown keys and unparseable values are ignored.
    pub fn set(&mut self, key: &str, value: &str) {
        let value = value.trim();
        match key.trim().to_lowercase().as_str() {
            "library" => self.library = parse_or_warn(key, value),
            "format" => self.kind = parse_or_warn(key, value),
            "headingwraphalf" => {
                self.heading_wrap = Some(HeadingWrap::from_half_flag(value.eq_ignore_ascii_case("true")))
            }
            "fieldsize" => self.field_size = positive(key, value),
            "robotlen" | "robotlenin" => self.robot_length = positive(key, value),
            "robotwid" | "robotwidin" => self.robot_width = positive(key, value),
            "measurementunit" => self.unit = parse_or_warn(key, value),
            _ => {}
        }
    }

    /// Copy every recovered value into `field`. The unit is replaced, not
    /// converted: imported sizes are already expressed in it.
    pub fn apply_to(&self, field: &mut FieldConfig) {
        if let Some(unit) = self.unit {
            field.unit = unit;
        }
        if let Some(size) = self.field_size {
            field.field_size = size;
        }
        if let Some(len) = self.robot_length {
            field.robot_length = len;
        }
        if let Some(wid) = self.robot_width {
            field.robot_width = wid;
        }
    }
}

fn parse_or_warn<T: FromStr>(key: &str, value: &str) -> Option<T> {
    match value.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(key, value, "Ignoring unrecognized metadata value");
            None
        }
    }
}

fn positive(key: &str, value: &str) -> Option<f64> {
    parse_or_warn::<f64>(key, value).filter(|v| v.is_finite() && *v > 0.0)
}

/// Poses recovered from an import
#[derive(Debug, Clone, PartialEq)]
pub enum ImportedPoses {
    /// Field-space poses, placed through the current frame
    Field(Vec<FieldPose>),
    /// Image-space poses from the legacy point layout
    Image(Vec<Pose>),
}

impl ImportedPoses {
    pub fn len(&self) -> usize {
        match self {
            Self::Field(p) => p.len(),
            Self::Image(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of decoding a file
#[derive(Debug, Clone, PartialEq)]
pub struct ImportPatch {
    pub metadata: ImportMetadata,
    pub poses: ImportedPoses,
}

/// Lower-case extension of `file_name`, empty if none.
fn extension(file_name: &str) -> String {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default()
}

/// Reduce `name` to a valid Java identifier.
pub fn sanitize_java_ident(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if ident.is_empty() {
        ident = DEFAULT_CLASS_NAME.to_string();
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Reduce `name` to a portable file base name.
pub fn sanitize_file_base(name: &str) -> String {
    let base: String = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    if base.is_empty() {
        DEFAULT_CLASS_NAME.to_string()
    } else {
        base
    }
}

/// MIME type for a suggested file name.
pub fn mime_for_name(name: &str) -> &'static str {
    if name.ends_with(".java") {
        "text/x-java-source"
    } else if name.ends_with(".json") {
        "application/json"
    } else if name.ends_with(".csv") {
        "text/csv"
    } else {
        "text/plain"
    }
}

/// `value` with `places` decimals, never printing negative zero.
pub(crate) fn fixed(value: f64, places: usize) -> String {
    let s = format!("{:.*}", places, value + 0.0);
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        s[1..].to_string()
    } else {
        s
    }
}

/// Display degrees to one decimal, kept inside the wrap mode's range after
/// rounding (359.96° is written as `0.0`, -179.96° as `180.0`).
pub(crate) fn degrees_text(wrap: HeadingWrap, rad: f64) -> String {
    let deg = round_to(wrap.degrees(rad), 1);
    let deg = match wrap {
        HeadingWrap::Full if deg >= 360.0 => deg - 360.0,
        HeadingWrap::Half if deg <= -180.0 => deg + 360.0,
        _ => deg,
    };
    fixed(deg, 1)
}

/// Round to `places` decimals.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let m = 10f64.powi(places);
    (value * m).round() / m + 0.0
}
