use pathpick_core::{FieldConfig, FieldFrame, ImagePoint, ImageSize, Origin};
use pathpick_editor::{Document, Path, PathColor, Pose, PATH_COUNT};

fn pose(x: f64, y: f64) -> Pose {
    Pose::new(ImagePoint::new(x, y), 0.0)
}

#[test]
fn test_default_paths_names_and_colors() {
    let doc = Document::new();
    let names: Vec<&str> = doc.paths().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Path 1", "Path 2", "Path 3", "Path 4"]);
    let colors: Vec<&str> = doc.paths().iter().map(|p| p.color.hex()).collect();
    assert_eq!(colors, ["#666666", "#FD3DB5", "#81C784", "#FFB74D"]);
    assert_eq!(doc.paths().len(), PATH_COUNT);
}

#[test]
fn test_preview_cursor_never_exceeds_points() {
    let mut path = Path::new("P", PathColor::Green);
    for i in 0..4 {
        path.push(pose(i as f64, 0.0));
    }
    path.set_preview_enabled(true);
    path.set_preview_cursor(Some(99));
    assert_eq!(path.preview_cursor(), Some(3));
    path.remove(3);
    path.remove(2);
    assert_eq!(path.preview_cursor(), Some(1));
    path.clear();
    assert_eq!(path.preview_cursor(), None);
    assert_eq!(path.visible_count(), 0);
}

#[test]
fn test_preview_disabled_shows_everything() {
    let mut path = Path::new("P", PathColor::Orange);
    path.push(pose(0.0, 0.0));
    path.push(pose(1.0, 0.0));
    path.set_preview_cursor(None);
    assert!(!path.preview_enabled());
    assert_eq!(path.visible_count(), 2);
}

#[test]
fn test_field_poses_follow_frame() {
    let mut path = Path::new("P", PathColor::Silver);
    path.push(pose(0.0, 0.0));
    let config = FieldConfig {
        origin: Origin::Center,
        ..FieldConfig::default()
    };
    let frame = FieldFrame::new(ImageSize::new(144.0, 144.0), &config);
    let field = path.field_poses(&frame);
    assert!((field[0].x + 72.0).abs() < 1e-9);
    assert!((field[0].y + 72.0).abs() < 1e-9);
}

#[test]
fn test_pose_from_field_round_trip() {
    let frame = FieldFrame::new(ImageSize::new(1000.0, 800.0), &FieldConfig::default());
    let original = Pose::new(ImagePoint::new(123.0, 456.0), -2.5);
    let back = Pose::from_field(&frame, &original.to_field(&frame));
    assert!((back.position.x - 123.0).abs() < 1e-9);
    assert!((back.position.y - 456.0).abs() < 1e-9);
    assert!((back.heading() + 2.5).abs() < 1e-12);
}
