//! Editor state for UI integration.
//!
//! [`EditorState`] owns the document, its history, the transient selection
//! and drag state, and the ambient field configuration. Every mutation of
//! the document goes through one of its methods, which records a history
//! snapshot first unless the call turns out to be a no-op.

use crate::codec::{
    DeclarationKind, ExportArtifact, ExportContext, ExportOptions, FileFormat, ImportedPoses, Library,
};
use crate::error::{EditorError, Result};
use crate::history::History;
use crate::model::{Document, Path, Pose, PATH_COUNT};
use pathpick_core::angle::{self, ROTATE_STEP_COARSE_DEG, ROTATE_STEP_DEG, SNAP_STEP_DEG};
use pathpick_core::{
    FieldConfig, FieldFrame, FieldPoint, FieldPose, HeadingWrap, ImagePoint, ImageSize, PoseTransform,
};
use tracing::{debug, info};

/// Grid step, in field units, used when snapping a dragged pose.
pub const POSITION_SNAP: f64 = 0.5;

/// What a pointer drag changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Move,
    Rotate,
}

/// Angle increments for keyboard rotation and snapped rotate drags, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditSteps {
    pub rotate_deg: f64,
    pub rotate_coarse_deg: f64,
    pub snap_deg: f64,
}

impl Default for EditSteps {
    fn default() -> Self {
        Self {
            rotate_deg: ROTATE_STEP_DEG,
            rotate_coarse_deg: ROTATE_STEP_COARSE_DEG,
            snap_deg: SNAP_STEP_DEG,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Drag {
    index: usize,
    mode: DragMode,
}

/// Summary of a completed import
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub format: FileFormat,
    pub pose_count: usize,
    /// Library named in the file's metadata, if any
    pub library: Option<Library>,
    /// Declaration kind named in the file's metadata, if any
    pub kind: Option<DeclarationKind>,
}

/// Application state of one editing session
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    document: Document,
    history: History,
    selected: Option<usize>,
    field: FieldConfig,
    image: Option<ImageSize>,
    drag: Option<Drag>,
    steps: EditSteps,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state with the given field configuration.
    pub fn with_field(field: FieldConfig) -> Result<Self> {
        field.validate()?;
        Ok(Self {
            field,
            ..Self::default()
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn field(&self) -> &FieldConfig {
        &self.field
    }

    pub fn image(&self) -> Option<ImageSize> {
        self.image
    }

    pub fn active_path(&self) -> &Path {
        self.document.active_path()
    }

    /// Replace the field configuration. Stored poses keep their image
    /// positions, so their field coordinates change with it.
    pub fn set_field_config(&mut self, field: FieldConfig) -> Result<()> {
        field.validate()?;
        self.field = field;
        debug!(?field, "Field configuration updated");
        Ok(())
    }

    pub fn edit_steps(&self) -> EditSteps {
        self.steps
    }

    /// Replaces the rotation and snap increments. A non-positive snap step
    /// turns heading snapping off.
    pub fn set_edit_steps(&mut self, steps: EditSteps) {
        self.steps = steps;
        debug!(?steps, "Edit steps updated");
    }

    /// Registers the dimensions of the loaded field image.
    pub fn load_image(&mut self, size: ImageSize) -> Result<()> {
        if !size.is_valid() {
            return Err(EditorError::InvalidImage {
                width: size.width,
                height: size.height,
            });
        }
        self.image = Some(size);
        info!(width = size.width, height = size.height, "Field image loaded");
        Ok(())
    }

    /// The current field frame; requires a loaded image.
    pub fn frame(&self) -> Result<FieldFrame> {
        let image = self.image.ok_or(EditorError::NoFieldImage)?;
        Ok(FieldFrame::new(image, &self.field))
    }

    // ----- selection -----

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn select(&mut self, index: Option<usize>) -> Result<()> {
        if let Some(i) = index {
            self.check_index(i)?;
        }
        self.selected = index;
        Ok(())
    }

    pub fn selected_pose(&self) -> Option<&Pose> {
        self.selected.and_then(|i| self.active_path().get(i))
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let len = self.active_path().len();
        if index < len {
            Ok(())
        } else {
            Err(EditorError::PoseOutOfRange { index, len })
        }
    }

    /// The pose at `index` if it exists and is unlocked.
    fn editable(&self, index: usize) -> Result<Option<Pose>> {
        self.check_index(index)?;
        Ok(self.active_path().get(index).copied().filter(|p| !p.locked))
    }

    fn record(&mut self) {
        self.history.record(&self.document);
    }

    // ----- pose editing -----

    /// Appends a pose at `position`, facing the same way as the selected
    /// pose (or 0), and selects it.
    pub fn add_pose(&mut self, position: ImagePoint) -> Result<usize> {
        self.frame()?;
        let heading = self.selected_pose().map_or(0.0, Pose::heading);
        self.record();
        let index = self.document.active_path_mut().push(Pose::new(position, heading));
        self.selected = Some(index);
        debug!(index, x = position.x, y = position.y, "Pose added");
        Ok(index)
    }

    /// Inserts an unlocked copy of the pose right after it and selects the copy.
    pub fn duplicate_pose(&mut self, index: usize) -> Result<usize> {
        self.check_index(index)?;
        let copy = self.active_path().points()[index].duplicate();
        self.record();
        let at = self.document.active_path_mut().insert_after(index, copy);
        self.selected = Some(at);
        debug!(from = index, to = at, "Pose duplicated");
        Ok(at)
    }

    pub fn delete_pose(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.record();
        let path = self.document.active_path_mut();
        path.remove(index);
        self.selected = path.len().checked_sub(1).map(|last| index.min(last));
        self.drag = None;
        debug!(index, remaining = path.len(), "Pose deleted");
        Ok(())
    }

    /// Swaps two poses; the selection stays on the element it was on.
    pub fn reorder(&mut self, i: usize, j: usize) -> Result<()> {
        self.check_index(i)?;
        self.check_index(j)?;
        if i == j {
            return Ok(());
        }
        self.record();
        self.document.active_path_mut().swap(i, j);
        self.drag = None;
        self.selected = match self.selected {
            Some(s) if s == i => Some(j),
            Some(s) if s == j => Some(i),
            other => other,
        };
        debug!(i, j, "Poses swapped");
        Ok(())
    }

    /// Moves the pose one place earlier. Returns `false` at the start of the path.
    pub fn move_up(&mut self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        if index == 0 {
            return Ok(false);
        }
        self.reorder(index, index - 1)?;
        Ok(true)
    }

    /// Moves the pose one place later. Returns `false` at the end of the path.
    pub fn move_down(&mut self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        if index + 1 >= self.active_path().len() {
            return Ok(false);
        }
        self.reorder(index, index + 1)?;
        Ok(true)
    }

    /// Returns `false` when the flag already had that value.
    pub fn set_locked(&mut self, index: usize, locked: bool) -> Result<bool> {
        self.check_index(index)?;
        if self.active_path().points()[index].locked == locked {
            return Ok(false);
        }
        self.record();
        if let Some(pose) = self.document.active_path_mut().get_mut(index) {
            pose.locked = locked;
        }
        Ok(true)
    }

    /// Moves an unlocked pose to `position`. Locked poses are left alone
    /// and `false` is returned.
    pub fn move_pose(&mut self, index: usize, position: ImagePoint) -> Result<bool> {
        if self.editable(index)?.is_none() {
            return Ok(false);
        }
        self.record();
        self.write_pose(index, |p| p.position = position);
        Ok(true)
    }

    /// Sets the field coordinates of an unlocked pose.
    pub fn set_field_position(&mut self, index: usize, point: FieldPoint) -> Result<bool> {
        let frame = self.frame()?;
        if self.editable(index)?.is_none() {
            return Ok(false);
        }
        self.record();
        self.write_pose(index, |p| p.position = frame.field_to_image(point));
        Ok(true)
    }

    /// Sets the heading from degrees in either display range.
    pub fn set_heading_degrees(&mut self, index: usize, degrees: f64) -> Result<bool> {
        if self.editable(index)?.is_none() {
            return Ok(false);
        }
        self.record();
        self.write_pose(index, |p| p.set_heading(angle::from_degrees(degrees)));
        Ok(true)
    }

    /// Turns an unlocked pose by `delta_degrees` (positive is counter-clockwise).
    pub fn rotate_pose(&mut self, index: usize, delta_degrees: f64) -> Result<bool> {
        let Some(pose) = self.editable(index)? else {
            return Ok(false);
        };
        self.record();
        let heading = pose.heading() + delta_degrees.to_radians();
        self.write_pose(index, |p| p.set_heading(heading));
        Ok(true)
    }

    /// One keyboard rotation step; `coarse` uses the larger increment.
    pub fn rotate_step(&mut self, index: usize, clockwise: bool, coarse: bool) -> Result<bool> {
        let step = if coarse {
            self.steps.rotate_coarse_deg
        } else {
            self.steps.rotate_deg
        };
        self.rotate_pose(index, if clockwise { -step } else { step })
    }

    fn write_pose(&mut self, index: usize, f: impl FnOnce(&mut Pose)) {
        if let Some(pose) = self.document.active_path_mut().get_mut(index) {
            f(pose);
        }
    }

    // ----- pointer drag -----

    /// Selects the pose and starts a drag. A locked pose is selected but
    /// not dragged, and `false` is returned. One history snapshot covers
    /// the whole drag.
    pub fn begin_drag(&mut self, index: usize, mode: DragMode) -> Result<bool> {
        self.check_index(index)?;
        self.selected = Some(index);
        if self.active_path().points()[index].locked {
            self.drag = None;
            return Ok(false);
        }
        self.record();
        self.drag = Some(Drag { index, mode });
        Ok(true)
    }

    /// Continues the current drag towards `cursor`. With `snap` the position
    /// lands on a half-unit field grid and headings on the configured snap step.
    pub fn drag_to(&mut self, cursor: ImagePoint, snap: bool) -> Result<bool> {
        let Some(drag) = self.drag else {
            return Ok(false);
        };
        let frame = self.frame()?;
        let Some(pose) = self.editable(drag.index)? else {
            return Ok(false);
        };
        match drag.mode {
            DragMode::Move => {
                let position = if snap {
                    let f = frame.image_to_field(cursor);
                    frame.field_to_image(FieldPoint::new(
                        angle::snap(f.x, POSITION_SNAP),
                        angle::snap(f.y, POSITION_SNAP),
                    ))
                } else {
                    cursor
                };
                self.write_pose(drag.index, |p| p.position = position);
            }
            DragMode::Rotate => {
                let from = frame.image_to_field(pose.position);
                let to = frame.image_to_field(cursor);
                if from == to {
                    return Ok(false);
                }
                let mut heading = (to.y - from.y).atan2(to.x - from.x);
                if snap {
                    heading = angle::snap(heading, self.steps.snap_deg.to_radians());
                }
                self.write_pose(drag.index, |p| p.set_heading(heading));
            }
        }
        Ok(true)
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    // ----- path level -----

    /// Empties the active path. Returns `false` if it was already empty.
    pub fn clear_active(&mut self) -> bool {
        if self.active_path().is_empty() {
            return false;
        }
        self.record();
        self.document.active_path_mut().clear();
        self.selected = None;
        self.drag = None;
        true
    }

    /// Empties every path. Returns `false` if there was nothing to clear.
    pub fn clear_all(&mut self) -> bool {
        if self.document.pose_count() == 0 {
            return false;
        }
        self.record();
        for path in self.document.paths_mut() {
            path.clear();
        }
        self.selected = None;
        self.drag = None;
        true
    }

    /// Applies a field-space transform to every pose of the active path,
    /// locked ones included. Without an image or poses nothing happens.
    pub fn transform_active(&mut self, transform: PoseTransform) -> bool {
        let Ok(frame) = self.frame() else {
            return false;
        };
        if self.active_path().is_empty() {
            return false;
        }
        self.record();
        for pose in self.document.active_path_mut().iter_mut() {
            let moved = transform.apply(pose.to_field(&frame));
            *pose = Pose::from_field(&frame, &moved);
        }
        info!(%transform, "Transform applied to active path");
        true
    }

    pub fn set_active_path(&mut self, index: usize) -> Result<()> {
        if !self.document.set_active(index) {
            return Err(EditorError::PathOutOfRange {
                index,
                count: PATH_COUNT,
            });
        }
        self.selected = None;
        self.drag = None;
        Ok(())
    }

    pub fn rename_path(&mut self, index: usize, name: &str) -> Result<()> {
        let name = name.trim();
        let current = self
            .document
            .path(index)
            .ok_or(EditorError::PathOutOfRange {
                index,
                count: PATH_COUNT,
            })?;
        if name.is_empty() || current.name == name {
            return Ok(());
        }
        self.record();
        if let Some(path) = self.document.path_mut(index) {
            path.name = name.to_string();
        }
        Ok(())
    }

    /// Display mode only; stored headings are unaffected.
    pub fn set_heading_wrap(&mut self, wrap: HeadingWrap) {
        self.document.set_heading_wrap(wrap);
    }

    pub fn heading_wrap(&self) -> HeadingWrap {
        self.document.heading_wrap()
    }

    // ----- history -----

    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.undo(&self.document) else {
            return false;
        };
        self.restore(previous);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(next) = self.history.redo(&self.document) else {
            return false;
        };
        self.restore(next);
        true
    }

    fn restore(&mut self, document: Document) {
        self.document = document;
        for path in self.document.paths_mut() {
            path.clamp_preview();
        }
        self.selected = None;
        self.drag = None;
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ----- preview -----

    pub fn set_preview_enabled(&mut self, enabled: bool) {
        self.document.active_path_mut().set_preview_enabled(enabled);
    }

    pub fn step_preview(&mut self, delta: isize) {
        self.document.active_path_mut().step_preview(delta);
    }

    pub fn set_preview_cursor(&mut self, cursor: Option<usize>) {
        self.document.active_path_mut().set_preview_cursor(cursor);
    }

    pub fn preview_show_all(&mut self) {
        self.document.active_path_mut().preview_show_all();
    }

    pub fn preview_show_none(&mut self) {
        self.document.active_path_mut().preview_show_none();
    }

    // ----- field space, import and export -----

    /// Field pose of one pose in the active path.
    pub fn field_pose(&self, index: usize) -> Result<FieldPose> {
        let frame = self.frame()?;
        self.check_index(index)?;
        Ok(self.active_path().points()[index].to_field(&frame))
    }

    /// The active path in field space.
    pub fn field_poses(&self) -> Result<Vec<FieldPose>> {
        let frame = self.frame()?;
        Ok(self.active_path().field_poses(&frame))
    }

    /// Renders the active path in the requested format.
    pub fn export(&self, options: &ExportOptions) -> Result<ExportArtifact> {
        let poses = self.field_poses()?;
        let ctx = ExportContext {
            field: &self.field,
            heading_wrap: self.document.heading_wrap(),
            options,
        };
        let artifact = options.format.encode(&poses, &ctx)?;
        info!(
            format = %options.format,
            poses = poses.len(),
            name = %artifact.suggested_name,
            "Export generated"
        );
        Ok(artifact)
    }

    /// Replaces the active path with the poses in `text`.
    ///
    /// Nothing changes unless the whole input parses; on success the file's
    /// metadata is applied to the field configuration and wrap mode before
    /// the poses are placed.
    pub fn import_text(&mut self, text: &str, file_name: &str) -> Result<ImportReport> {
        self.frame()?;
        let format = FileFormat::detect(text, file_name)?;
        let patch = format.decode(text)?;

        self.record();
        patch.metadata.apply_to(&mut self.field);
        if let Some(wrap) = patch.metadata.heading_wrap {
            self.document.set_heading_wrap(wrap);
        }
        let frame = self.frame()?;
        let points: Vec<Pose> = match patch.poses {
            ImportedPoses::Field(poses) => poses.iter().map(|p| Pose::from_field(&frame, p)).collect(),
            ImportedPoses::Image(points) => points,
        };
        let pose_count = points.len();
        self.document.active_path_mut().replace_points(points);
        self.selected = (pose_count > 0).then_some(0);
        self.drag = None;

        info!(%format, pose_count, file_name, "Import complete");
        Ok(ImportReport {
            format,
            pose_count,
            library: patch.metadata.library,
            kind: patch.metadata.kind,
        })
    }
}
