//! # PathPick
//!
//! Waypoint editor for robot autonomous routines. Poses are placed over a
//! top-down field image and exported as JSON, CSV or Java source for the
//! RoadRunner, FTCLib and RilLib `Pose2d` types.
//!
//! ## Architecture
//!
//! PathPick is organized as a workspace:
//!
//! 1. **pathpick-core** - units, angles, field configuration, coordinate engine
//! 2. **pathpick-editor** - document model, undo history, viewport, codecs
//! 3. **pathpick-settings** - persisted JSON/TOML configuration
//! 4. **pathpick** - logging, export destinations and the command line

pub mod cli;
pub mod sink;

pub use pathpick_core::{
    AxisConvention, CoreError, FieldConfig, FieldFrame, FieldPoint, FieldPose, HeadingWrap,
    ImagePoint, ImageSize, MeasurementUnit, Origin, PoseTransform,
};
pub use pathpick_editor::{
    CodecError, DeclarationKind, Document, EditorError, EditorState, ExportArtifact,
    ExportOptions, FileFormat, History, Library, Path, Pose,
};
pub use pathpick_settings::{Config, SettingsError};
pub use sink::{
    ClipboardSink, DirectorySink, ExportChain, ExportSink, ExportSinkError, SaveDialogSink,
    SinkOutcome, WorkingDirSink,
};

/// Initialize logging with tracing
///
/// `RUST_LOG` is honoured; INFO and above is always shown.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
