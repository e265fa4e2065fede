use pathpick_core::{AxisConvention, FieldConfig, HeadingWrap, ImagePoint, ImageSize, MeasurementUnit, Origin};
use pathpick_editor::{EditorState, ExportOptions, FileFormat, Library};
use proptest::prelude::*;

fn options() -> ExportOptions {
    ExportOptions {
        format: FileFormat::Json,
        ..ExportOptions::default()
    }
}

fn source_state(field: FieldConfig, wrap: HeadingWrap) -> EditorState {
    let mut state = EditorState::with_field(field).unwrap();
    state.load_image(ImageSize::new(1200.0, 900.0)).unwrap();
    state.set_heading_wrap(wrap);
    state
}

#[test]
fn test_round_trip_restores_poses_and_metadata() {
    let field = FieldConfig {
        field_size: 3.6576,
        unit: MeasurementUnit::Meters,
        origin: Origin::Center,
        axes: AxisConvention::RobotForward,
        robot_length: 0.45,
        robot_width: 0.4,
    };
    let mut src = source_state(field, HeadingWrap::Half);
    src.add_pose(ImagePoint::new(100.0, 200.0)).unwrap();
    src.add_pose(ImagePoint::new(640.0, 480.0)).unwrap();
    src.rotate_pose(1, -135.0).unwrap();
    src.set_locked(0, true).unwrap();
    let exported = src.field_poses().unwrap();
    let artifact = src.export(&options()).unwrap();
    assert_eq!(artifact.suggested_name, "AutoPath.json");
    assert_eq!(artifact.mime, "application/json");

    // Destination starts from defaults; everything must come from the file.
    let mut dst = EditorState::new();
    dst.load_image(ImageSize::new(1200.0, 900.0)).unwrap();
    dst.set_field_config(FieldConfig {
        origin: Origin::Center,
        axes: AxisConvention::RobotForward,
        ..FieldConfig::default()
    })
    .unwrap();
    let report = dst.import_text(&artifact.content, &artifact.suggested_name).unwrap();
    assert_eq!(report.format, FileFormat::Json);
    assert_eq!(report.library, Some(Library::RoadRunner));

    assert_eq!(dst.field().unit, MeasurementUnit::Meters);
    assert_eq!(dst.field().field_size, 3.6576);
    assert_eq!(dst.field().robot_length, 0.45);
    assert_eq!(dst.field().robot_width, 0.4);
    assert_eq!(dst.heading_wrap(), HeadingWrap::Half);

    let imported = dst.field_poses().unwrap();
    assert_eq!(imported.len(), exported.len());
    for (a, b) in exported.iter().zip(&imported) {
        assert!((a.x - b.x).abs() <= 5e-4, "x {} vs {}", a.x, b.x);
        assert!((a.y - b.y).abs() <= 5e-4, "y {} vs {}", a.y, b.y);
        assert!(pathpick_core::angle::normalize(a.heading - b.heading).abs() <= 5e-7);
        assert_eq!(a.locked, b.locked);
    }
}

#[test]
fn test_export_empty_path_imports_empty() {
    let mut src = source_state(FieldConfig::default(), HeadingWrap::Full);
    let artifact = src.export(&options()).unwrap();
    assert!(artifact.content.contains("\"poses\": []"));
    let report = src.import_text(&artifact.content, "x.json").unwrap();
    assert_eq!(report.pose_count, 0);
    assert_eq!(src.selected(), None);
}

#[test]
fn test_export_requires_image() {
    let state = EditorState::new();
    assert!(state.export(&options()).is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn json_round_trip_within_precision(
        px in 0.0f64..1200.0,
        py in 0.0f64..900.0,
        heading in -10.0f64..10.0,
        half in any::<bool>(),
    ) {
        let wrap = HeadingWrap::from_half_flag(half);
        let mut state = source_state(FieldConfig::default(), wrap);
        state.add_pose(ImagePoint::new(px, py)).unwrap();
        state.rotate_pose(0, heading.to_degrees()).unwrap();
        let before = state.field_poses().unwrap()[0];

        let artifact = state.export(&options()).unwrap();
        state.import_text(&artifact.content, "p.json").unwrap();
        let after = state.field_poses().unwrap()[0];

        prop_assert!((before.x - after.x).abs() <= 5e-4);
        prop_assert!((before.y - after.y).abs() <= 5e-4);
        prop_assert!(pathpick_core::angle::normalize(before.heading - after.heading).abs() <= 5e-7);
    }
}
