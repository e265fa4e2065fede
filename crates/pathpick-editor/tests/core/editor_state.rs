use pathpick_core::{FieldPoint, ImagePoint, ImageSize, Origin, PoseTransform};
use pathpick_editor::{CodecError, EditorError, EditorState};
use std::f64::consts::PI;

fn editor() -> EditorState {
    let mut state = EditorState::new();
    state.load_image(ImageSize::new(144.0, 144.0)).unwrap();
    state
}

fn editor_with(n: usize) -> EditorState {
    let mut state = editor();
    for i in 0..n {
        state.add_pose(ImagePoint::new(10.0 * (i + 1) as f64, 5.0)).unwrap();
    }
    state
}

#[test]
fn test_delete_only_pose_resets_cursor_and_selection() {
    let mut state = editor_with(1);
    assert_eq!(state.active_path().preview_cursor(), Some(0));
    state.delete_pose(0).unwrap();
    assert!(state.active_path().is_empty());
    assert_eq!(state.active_path().preview_cursor(), None);
    assert_eq!(state.selected(), None);
}

#[test]
fn test_delete_selects_neighbour() {
    let mut state = editor_with(3);
    state.delete_pose(2).unwrap();
    assert_eq!(state.selected(), Some(1));
    state.delete_pose(0).unwrap();
    assert_eq!(state.selected(), Some(0));
}

#[test]
fn test_delete_out_of_range() {
    let mut state = editor_with(1);
    let err = state.delete_pose(5).unwrap_err();
    assert!(matches!(err, EditorError::PoseOutOfRange { index: 5, len: 1 }));
    assert_eq!(state.active_path().len(), 1);
}

#[test]
fn test_add_mid_preview_keeps_future_hidden() {
    let mut state = editor_with(3);
    state.set_preview_enabled(true);
    state.set_preview_cursor(Some(0));
    state.add_pose(ImagePoint::new(1.0, 1.0)).unwrap();
    assert_eq!(state.active_path().preview_cursor(), Some(0));

    state.preview_show_all();
    state.add_pose(ImagePoint::new(2.0, 2.0)).unwrap();
    assert_eq!(state.active_path().preview_cursor(), Some(4));
}

#[test]
fn test_duplicate_inserts_unlocked_copy() {
    let mut state = editor_with(2);
    state.set_locked(0, true).unwrap();
    let at = state.duplicate_pose(0).unwrap();
    assert_eq!(at, 1);
    assert_eq!(state.selected(), Some(1));
    let points = state.active_path().points();
    assert_eq!(points.len(), 3);
    assert_eq!(points[1].position, points[0].position);
    assert!(!points[1].locked);
    assert_eq!(points[2].position, ImagePoint::new(20.0, 5.0));
}

#[test]
fn test_reorder_selection_follows_element() {
    let mut state = editor_with(3);
    state.select(Some(0)).unwrap();
    state.reorder(0, 2).unwrap();
    assert_eq!(state.selected(), Some(2));
    assert_eq!(state.active_path().points()[2].position, ImagePoint::new(10.0, 5.0));

    assert!(state.move_up(2).unwrap());
    assert_eq!(state.selected(), Some(1));
    assert!(!state.move_up(0).unwrap());
    assert!(!state.move_down(2).unwrap());
}

#[test]
fn test_numeric_edits() {
    let mut state = editor_with(1);
    state.set_field_position(0, FieldPoint::new(30.0, 40.0)).unwrap();
    assert_eq!(state.active_path().points()[0].position, ImagePoint::new(30.0, 40.0));

    state.set_heading_degrees(0, 270.0).unwrap();
    assert!((state.active_path().points()[0].heading() + PI / 2.0).abs() < 1e-12);

    state.rotate_pose(0, 15.0).unwrap();
    let expected = -PI / 2.0 + 15f64.to_radians();
    assert!((state.active_path().points()[0].heading() - expected).abs() < 1e-12);
}

#[test]
fn test_transform_applies_to_locked_poses() {
    let mut state = editor();
    let mut field = *state.field();
    field.origin = Origin::Center;
    state.set_field_config(field).unwrap();
    state.add_pose(ImagePoint::new(82.0, 92.0)).unwrap();
    state.set_locked(0, true).unwrap();

    assert!(state.transform_active(PoseTransform::Rotate180));
    let pose = state.field_pose(0).unwrap();
    assert!((pose.x + 10.0).abs() < 1e-9);
    assert!((pose.y + 20.0).abs() < 1e-9);
    assert!((pose.heading - PI).abs() < 1e-12);
    assert!(pose.locked);
}

#[test]
fn test_transform_without_image_is_noop() {
    let mut state = EditorState::new();
    assert!(!state.transform_active(PoseTransform::MirrorY));
    assert!(!state.can_undo());
}

#[test]
fn test_clear_only_records_when_needed() {
    let mut state = editor();
    assert!(!state.clear_active());
    assert!(!state.clear_all());
    assert!(!state.can_undo());

    state.add_pose(ImagePoint::new(1.0, 1.0)).unwrap();
    state.set_active_path(1).unwrap();
    state.add_pose(ImagePoint::new(2.0, 2.0)).unwrap();
    assert!(state.clear_active());
    assert_eq!(state.document().pose_count(), 1);
}

#[test]
fn test_set_active_path_resets_selection() {
    let mut state = editor_with(2);
    assert_eq!(state.selected(), Some(1));
    state.set_active_path(3).unwrap();
    assert_eq!(state.selected(), None);
    assert!(state.active_path().is_empty());
    assert_eq!(state.active_path().name, "Path 4");
}

#[test]
fn test_rename_path() {
    let mut state = editor();
    state.rename_path(0, "  Red Left ").unwrap();
    assert_eq!(state.document().paths()[0].name, "Red Left");
    assert!(state.undo());
    assert_eq!(state.document().paths()[0].name, "Path 1");
    assert!(state.rename_path(9, "x").is_err());
}

#[test]
fn test_import_failure_leaves_document_untouched() {
    let mut state = editor_with(2);
    let before = state.document().clone();
    let undo_depth = state.history().undo_count();

    assert!(state.import_text("{", "bad.json").is_err());
    assert!(state.import_text("", "empty.csv").is_err());
    assert!(state.import_text("class Nothing {}", "A.java").is_err());
    assert!(state.import_text("hello", "notes.dxf").is_err());

    assert_eq!(state.document(), &before);
    assert_eq!(state.history().undo_count(), undo_depth);
}

#[test]
fn test_import_of_unreadable_json_poses_keeps_path() {
    let mut state = editor_with(3);
    let before = state.document().clone();

    let err = state
        .import_text(r#"{"poses":[{"x":"abc","y":null},{"foo":1}]}"#, "bad.json")
        .unwrap_err();
    assert!(matches!(
        err,
        EditorError::Codec(CodecError::NoPoses { format: "JSON" })
    ));
    assert_eq!(state.active_path().len(), 3);
    assert_eq!(state.document(), &before);

    // A literally empty list is still a valid, empty path
    state.import_text(r#"{"poses": []}"#, "empty.json").unwrap();
    assert!(state.active_path().is_empty());
}

#[test]
fn test_import_requires_image_before_parsing() {
    let mut state = EditorState::new();
    let err = state.import_text("{", "bad.json").unwrap_err();
    assert!(matches!(err, EditorError::NoFieldImage));
}

#[test]
fn test_import_applies_metadata_and_selects_first() {
    let mut state = editor();
    let text = "# headingWrapHalf=true\n# fieldSize=72\nindex,x,y,heading_rad,heading_deg,locked\n1,10,20,0.5,28.6,true\n";
    let report = state.import_text(text, "path.csv").unwrap();
    assert_eq!(report.pose_count, 1);
    assert_eq!(state.field().field_size, 72.0);
    assert!(state.heading_wrap().is_half());
    assert_eq!(state.selected(), Some(0));
    // 144 px image over a 72 unit field: 2 px per unit.
    assert_eq!(state.active_path().points()[0].position, ImagePoint::new(20.0, 40.0));
    assert!(state.active_path().points()[0].locked);

    assert!(state.undo());
    assert!(state.active_path().is_empty());
}
