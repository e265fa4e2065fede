use pathpick_core::{ImagePoint, ImageSize};
use pathpick_editor::{DeclarationKind, EditorState, ExportOptions, FileFormat, Library};

fn editor_with_poses() -> EditorState {
    let mut state = EditorState::new();
    state.load_image(ImageSize::new(288.0, 288.0)).unwrap();
    state.add_pose(ImagePoint::new(20.0, 40.0)).unwrap();
    state.add_pose(ImagePoint::new(100.0, 60.0)).unwrap();
    state.set_heading_degrees(1, 45.0).unwrap();
    state.set_locked(1, true).unwrap();
    state
}

#[test]
fn test_class_export_names_and_package() {
    let state = editor_with_poses();
    let options = ExportOptions {
        format: FileFormat::SourceClass,
        library: Library::FtcLib,
        kind: DeclarationKind::List,
        class_name: "9 Red Auto".to_string(),
        package: Some("org.firstinspires.ftc.teamcode".to_string()),
    };
    let artifact = state.export(&options).unwrap();
    assert_eq!(artifact.suggested_name, "_9RedAuto.java");
    assert_eq!(artifact.mime, "text/x-java-source");
    assert_eq!(artifact.content, artifact.preview);
    assert!(artifact.content.starts_with("package org.firstinspires.ftc.teamcode;\n\n"));
    assert!(artifact.content.contains("import com.arcrobotics.ftclib.geometry.Pose2d;"));
    assert!(artifact.content.contains("public final class _9RedAuto {"));
    assert!(artifact.content.contains("new Pose2d(10.000, 20.000, 0.000000),  // #1"));
    assert!(artifact.content.contains("new Pose2d(50.000, 30.000, 0.785398)  // #2"));
    assert!(artifact.content.contains("θ=45.0° locked=true"));
}

#[test]
fn test_snippet_content_has_trailing_newline() {
    let state = editor_with_poses();
    let options = ExportOptions {
        format: FileFormat::SourceSnippet,
        kind: DeclarationKind::Array,
        ..ExportOptions::default()
    };
    let artifact = state.export(&options).unwrap();
    assert_eq!(artifact.suggested_name, "AutoPath.java.txt");
    assert_eq!(artifact.mime, "text/plain");
    assert_eq!(artifact.content, format!("{}\n", artifact.preview));
    assert!(artifact.preview.contains("Pose2d[] path = new Pose2d[]{"));
    assert!(artifact.preview.ends_with("};"));
    assert!(!artifact.preview.contains("java.util"));
}

#[test]
fn test_round_trip_every_dialect() {
    for library in Library::ALL {
        for kind in [DeclarationKind::List, DeclarationKind::Array] {
            for format in [FileFormat::SourceClass, FileFormat::SourceSnippet] {
                let mut state = editor_with_poses();
                let before = state.field_poses().unwrap();
                let options = ExportOptions {
                    format,
                    library,
                    kind,
                    ..ExportOptions::default()
                };
                let artifact = state.export(&options).unwrap();
                state.clear_active();
                let report = state
                    .import_text(&artifact.content, &artifact.suggested_name)
                    .unwrap();
                assert_eq!(report.library, Some(library));
                assert_eq!(report.kind, Some(kind));

                let after = state.field_poses().unwrap();
                assert_eq!(before.len(), after.len(), "{library} {kind} {format}");
                for (a, b) in before.iter().zip(&after) {
                    assert!((a.x - b.x).abs() <= 5e-4);
                    assert!((a.y - b.y).abs() <= 5e-4);
                    assert!(pathpick_core::angle::normalize(a.heading - b.heading).abs() <= 5e-7);
                    assert_eq!(a.locked, b.locked);
                }
            }
        }
    }
}

#[test]
fn test_hand_written_source_is_sniffed() {
    let mut state = EditorState::new();
    state.load_image(ImageSize::new(144.0, 144.0)).unwrap();
    let text = "Pose2d start = new Pose2d(12, 24, new Rotation2d(1.5708));\n";
    let report = state.import_text(text, "clipboard").unwrap();
    assert_eq!(report.format, FileFormat::SourceSnippet);
    let pose = state.field_pose(0).unwrap();
    assert_eq!((pose.x, pose.y), (12.0, 24.0));
    assert!((pose.heading - 1.5708).abs() < 1e-12);
}
