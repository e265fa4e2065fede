//! # PathPick Editor
//!
//! Editing layer on top of the coordinate engine in `pathpick-core`.
//!
//! ## Components
//!
//! - **Model**: poses stored in image pixels, four colored paths, preview cursor
//! - **History**: bounded whole-document snapshots for undo/redo
//! - **Viewport**: image placement on the canvas and pose hit-testing
//! - **EditorState**: the owned application state every edit goes through
//! - **Codec**: JSON, CSV and Java source import/export
//!
//! ## Architecture
//!
//! ```text
//! EditorState
//!   ├── Document (4 × Path)     ── snapshots ──> History
//!   ├── FieldConfig + ImageSize ──> FieldFrame (pathpick-core)
//!   └── Codec (FileFormat::encode / decode)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pathpick_editor::{EditorState, ExportOptions, FileFormat};
//! use pathpick_core::{ImagePoint, ImageSize};
//!
//! let mut state = EditorState::new();
//! state.load_image(ImageSize::new(1440.0, 1440.0))?;
//! state.add_pose(ImagePoint::new(100.0, 200.0))?;
//!
//! let options = ExportOptions { format: FileFormat::Csv, ..Default::default() };
//! println!("{}", state.export(&options)?.preview);
//! ```

pub mod codec;
pub mod editor_state;
pub mod error;
pub mod history;
pub mod model;
pub mod viewport;

pub use codec::{
    DeclarationKind, ExportArtifact, ExportContext, ExportOptions, FileFormat, ImportMetadata,
    ImportPatch, ImportedPoses, Library,
};
pub use editor_state::{DragMode, EditSteps, EditorState, ImportReport};
pub use error::{CodecError, CodecResult, EditorError, Result};
pub use history::{History, DEFAULT_HISTORY_DEPTH};
pub use model::{Document, Path, PathColor, Pose, PATH_COUNT};
pub use viewport::{CanvasPoint, Hit, ImageRect, Viewport};
