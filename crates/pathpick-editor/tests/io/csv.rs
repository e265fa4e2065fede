use pathpick_core::{HeadingWrap, ImagePoint, ImageSize};
use pathpick_editor::{EditorState, ExportOptions, FileFormat};

fn editor() -> EditorState {
    let mut state = EditorState::new();
    state.load_image(ImageSize::new(144.0, 144.0)).unwrap();
    state
}

#[test]
fn test_import_single_row_table() {
    let mut state = editor();
    let text = "index,x,y,heading_rad,heading_deg,locked\n1,10.00,20.00,0.000000,0.000,false";
    let report = state.import_text(text, "waypoints.csv").unwrap();
    assert_eq!(report.format, FileFormat::Csv);
    assert_eq!(report.pose_count, 1);

    let pose = state.field_pose(0).unwrap();
    assert!((pose.x - 10.0).abs() < 1e-9);
    assert!((pose.y - 20.0).abs() < 1e-9);
    assert_eq!(pose.heading, 0.0);
    assert!(!pose.locked);
}

#[test]
fn test_export_layout_and_wrap_adjusted_degrees() {
    let mut state = editor();
    state.add_pose(ImagePoint::new(10.0, 20.0)).unwrap();
    state.set_heading_degrees(0, -90.0).unwrap();
    state.set_locked(0, true).unwrap();

    let options = ExportOptions {
        format: FileFormat::Csv,
        class_name: "Blue Right".to_string(),
        ..ExportOptions::default()
    };
    let full = state.export(&options).unwrap();
    assert_eq!(full.suggested_name, "Blue_Right.csv");
    assert_eq!(full.mime, "text/csv");
    let lines: Vec<&str> = full.content.lines().collect();
    assert!(lines.contains(&"# headingWrapHalf=false"));
    assert!(lines.contains(&"# measurementUnit=in"));
    assert!(lines.contains(&"index,x,y,heading_rad,heading_deg,locked"));
    assert_eq!(lines.last(), Some(&"1,10.000,20.000,4.712389,270.0,true"));

    state.set_heading_wrap(HeadingWrap::Half);
    let half = state.export(&options).unwrap();
    assert!(half.content.ends_with("1,10.000,20.000,-1.570796,-90.0,true"));
}

#[test]
fn test_csv_round_trip() {
    let mut state = editor();
    state.add_pose(ImagePoint::new(12.3456, 98.7654)).unwrap();
    state.add_pose(ImagePoint::new(100.0, 3.0)).unwrap();
    state.rotate_pose(1, 200.0).unwrap();
    let before = state.field_poses().unwrap();

    let options = ExportOptions {
        format: FileFormat::Csv,
        ..ExportOptions::default()
    };
    let artifact = state.export(&options).unwrap();
    state.clear_all();
    state.import_text(&artifact.content, &artifact.suggested_name).unwrap();
    let after = state.field_poses().unwrap();

    assert_eq!(before.len(), after.len());
    for (a, b) in before.iter().zip(&after) {
        assert!((a.x - b.x).abs() <= 5e-4);
        assert!((a.y - b.y).abs() <= 5e-4);
        assert!(pathpick_core::angle::normalize(a.heading - b.heading).abs() <= 5e-7);
    }
}

#[test]
fn test_legacy_inch_columns_and_degrees_only() {
    let mut state = editor();
    let text = "# robotLenIn=20\nindex,x_in,y_in,heading_deg\n1,5,6,180\n2,7,8,-90\n";
    state.import_text(text, "legacy.csv").unwrap();
    assert_eq!(state.field().robot_length, 20.0);
    let poses = state.field_poses().unwrap();
    assert!((poses[0].heading - std::f64::consts::PI).abs() < 1e-12);
    assert!((poses[1].heading + std::f64::consts::FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn test_rounded_degrees_stay_in_display_range() {
    let mut state = editor();
    state.add_pose(ImagePoint::new(10.0, 20.0)).unwrap();
    state.set_heading_degrees(0, (-0.0001f64).to_degrees()).unwrap();
    let options = ExportOptions {
        format: FileFormat::Csv,
        ..ExportOptions::default()
    };

    let degrees_column = |content: &str| -> String {
        let row = content.lines().last().unwrap();
        row.split(',').nth(4).unwrap().to_string()
    };

    let full = state.export(&options).unwrap();
    assert_eq!(degrees_column(&full.content), "0.0");

    state.set_heading_wrap(HeadingWrap::Half);
    state.set_heading_degrees(0, -179.96).unwrap();
    let half = state.export(&options).unwrap();
    assert_eq!(degrees_column(&half.content), "180.0");
}
