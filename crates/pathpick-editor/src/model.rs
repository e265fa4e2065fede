//! Path document model.
//!
//! Poses are stored in image-pixel space so they stay put when the canvas
//! is resized or the field configuration changes; field coordinates are
//! derived on demand through a [`FieldFrame`].
//!
//! The preview cursor marks how many leading poses of a path are revealed.
//! `None` reveals nothing, `Some(len - 1)` reveals everything, and the
//! cursor never points past the end of the point list.

use pathpick_core::angle;
use pathpick_core::{FieldFrame, FieldPose, HeadingWrap, ImagePoint};
use std::fmt;

/// Number of paths in a document.
pub const PATH_COUNT: usize = 4;

/// An oriented waypoint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Position in image pixels
    pub position: ImagePoint,
    heading: f64,
    /// Locked poses ignore drag, numeric edits and keyboard rotation
    pub locked: bool,
}

impl Pose {
    /// Creates an unlocked pose; the heading is normalized.
    pub fn new(position: ImagePoint, heading: f64) -> Self {
        Self {
            position,
            heading: angle::normalize(heading),
            locked: false,
        }
    }

    /// Builds a pose from field coordinates.
    pub fn from_field(frame: &FieldFrame, pose: &FieldPose) -> Self {
        Self {
            position: frame.field_to_image(pose.position()),
            heading: angle::normalize(pose.heading),
            locked: pose.locked,
        }
    }

    /// Heading in canonical radians, `(-π, π]`.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn set_heading(&mut self, heading: f64) {
        self.heading = angle::normalize(heading);
    }

    /// The pose in field space.
    pub fn to_field(&self, frame: &FieldFrame) -> FieldPose {
        let p = frame.image_to_field(self.position);
        FieldPose {
            x: p.x,
            y: p.y,
            heading: self.heading,
            locked: self.locked,
        }
    }

    /// Copy with the lock cleared.
    pub fn duplicate(&self) -> Self {
        Self {
            locked: false,
            ..*self
        }
    }
}

/// Display colour of a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathColor {
    Silver,
    Magenta,
    Green,
    Orange,
}

impl PathColor {
    /// Colours of paths 1 through 4.
    pub const ALL: [PathColor; PATH_COUNT] = [
        PathColor::Silver,
        PathColor::Magenta,
        PathColor::Green,
        PathColor::Orange,
    ];

    pub fn hex(self) -> &'static str {
        match self {
            Self::Silver => "#666666",
            Self::Magenta => "#FD3DB5",
            Self::Green => "#81C784",
            Self::Orange => "#FFB74D",
        }
    }
}

impl fmt::Display for PathColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}

/// A named, ordered sequence of poses
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub name: String,
    pub color: PathColor,
    points: Vec<Pose>,
    preview_enabled: bool,
    preview_cursor: Option<usize>,
}

impl Path {
    pub fn new(name: impl Into<String>, color: PathColor) -> Self {
        Self {
            name: name.into(),
            color,
            points: Vec::new(),
            preview_enabled: false,
            preview_cursor: None,
        }
    }

    pub fn points(&self) -> &[Pose] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Pose> {
        self.points.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Pose> {
        self.points.get_mut(index)
    }

    fn last_index(&self) -> Option<usize> {
        self.points.len().checked_sub(1)
    }

    /// Appends a pose and returns its index.
    ///
    /// If the cursor revealed every pose before the push it keeps doing so;
    /// otherwise the new pose stays hidden.
    pub fn push(&mut self, pose: Pose) -> usize {
        let showed_all = self.preview_cursor == self.last_index();
        self.points.push(pose);
        if showed_all {
            self.preview_cursor = self.last_index();
        }
        self.points.len() - 1
    }

    /// Inserts a pose right after `index` and returns the new index.
    /// The cursor follows the same rule as [`Path::push`].
    pub fn insert_after(&mut self, index: usize, pose: Pose) -> usize {
        let showed_all = self.preview_cursor == self.last_index();
        let at = (index + 1).min(self.points.len());
        self.points.insert(at, pose);
        if showed_all {
            self.preview_cursor = self.last_index();
        }
        at
    }

    /// Removes and returns the pose at `index`, clamping the cursor.
    pub fn remove(&mut self, index: usize) -> Option<Pose> {
        if index >= self.points.len() {
            return None;
        }
        let pose = self.points.remove(index);
        self.clamp_preview();
        Some(pose)
    }

    /// Swaps two poses. Returns `false` if either index is out of range.
    pub fn swap(&mut self, i: usize, j: usize) -> bool {
        if i >= self.points.len() || j >= self.points.len() {
            return false;
        }
        self.points.swap(i, j);
        true
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.preview_cursor = None;
    }

    /// Replaces every pose. A cursor that revealed everything keeps doing so.
    pub fn replace_points(&mut self, points: Vec<Pose>) {
        let showed_all = self.preview_cursor == self.last_index();
        self.points = points;
        if showed_all {
            self.preview_cursor = self.last_index();
        } else {
            self.clamp_preview();
        }
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Pose> {
        self.points.iter_mut()
    }

    /// All poses in field space.
    pub fn field_poses(&self, frame: &FieldFrame) -> Vec<FieldPose> {
        self.points.iter().map(|p| p.to_field(frame)).collect()
    }

    pub fn preview_enabled(&self) -> bool {
        self.preview_enabled
    }

    pub fn preview_cursor(&self) -> Option<usize> {
        self.preview_cursor
    }

    /// Turns step-through preview on or off. Turning it off reveals every
    /// pose; turning it on with nothing revealed starts from "show all".
    pub fn set_preview_enabled(&mut self, enabled: bool) {
        self.preview_enabled = enabled;
        if !enabled || self.preview_cursor.is_none() {
            self.preview_cursor = self.last_index();
        }
    }

    /// Moves the cursor, clamped to the point list.
    pub fn set_preview_cursor(&mut self, cursor: Option<usize>) {
        self.preview_cursor = match (cursor, self.last_index()) {
            (Some(c), Some(last)) => Some(c.min(last)),
            _ => None,
        };
    }

    /// Moves the cursor by `delta` steps; stepping below the first pose hides everything.
    pub fn step_preview(&mut self, delta: isize) {
        let current = self.preview_cursor.map_or(-1, |c| c as isize);
        let next = current.saturating_add(delta);
        let cursor = if next < 0 { None } else { Some(next as usize) };
        self.set_preview_cursor(cursor);
    }

    pub fn preview_show_all(&mut self) {
        self.preview_enabled = true;
        self.preview_cursor = self.last_index();
    }

    pub fn preview_show_none(&mut self) {
        self.preview_enabled = true;
        self.preview_cursor = None;
    }

    /// Number of leading poses currently revealed.
    pub fn visible_count(&self) -> usize {
        if !self.preview_enabled {
            return self.points.len();
        }
        self.preview_cursor.map_or(0, |c| c + 1)
    }

    pub fn clamp_preview(&mut self) {
        if let Some(cursor) = self.preview_cursor {
            self.preview_cursor = self.last_index().map(|last| cursor.min(last));
        }
    }
}

/// The editable document: four paths, one of them active
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    paths: [Path; PATH_COUNT],
    active: usize,
    heading_wrap: HeadingWrap,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            paths: std::array::from_fn(|i| {
                Path::new(format!("Path {}", i + 1), PathColor::ALL[i])
            }),
            active: 0,
            heading_wrap: HeadingWrap::default(),
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn path(&self, index: usize) -> Option<&Path> {
        self.paths.get(index)
    }

    pub fn path_mut(&mut self, index: usize) -> Option<&mut Path> {
        self.paths.get_mut(index)
    }

    pub fn paths_mut(&mut self) -> std::slice::IterMut<'_, Path> {
        self.paths.iter_mut()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Selects the active path. Returns `false` if `index` is out of range.
    pub fn set_active(&mut self, index: usize) -> bool {
        if index < PATH_COUNT {
            self.active = index;
            true
        } else {
            false
        }
    }

    pub fn active_path(&self) -> &Path {
        &self.paths[self.active]
    }

    pub fn active_path_mut(&mut self) -> &mut Path {
        &mut self.paths[self.active]
    }

    pub fn heading_wrap(&self) -> HeadingWrap {
        self.heading_wrap
    }

    pub fn set_heading_wrap(&mut self, wrap: HeadingWrap) {
        self.heading_wrap = wrap;
    }

    /// Total poses across all paths.
    pub fn pose_count(&self) -> usize {
        self.paths.iter().map(Path::len).sum()
    }
}
