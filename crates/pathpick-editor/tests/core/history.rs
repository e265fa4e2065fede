use pathpick_core::{ImagePoint, ImageSize, PoseTransform};
use pathpick_editor::{Document, EditorState, History};
use proptest::prelude::*;

fn editor() -> EditorState {
    let mut state = EditorState::new();
    state.load_image(ImageSize::new(720.0, 720.0)).unwrap();
    state
}

#[derive(Debug, Clone)]
enum Op {
    Add(f64, f64),
    Duplicate,
    Delete,
    Rotate(f64),
    Lock,
    Swap,
    Transform(usize),
    SwitchPath(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0.0f64..720.0, 0.0f64..720.0).prop_map(|(x, y)| Op::Add(x, y)),
        Just(Op::Duplicate),
        Just(Op::Delete),
        (-90.0f64..90.0).prop_map(Op::Rotate),
        Just(Op::Lock),
        Just(Op::Swap),
        (0usize..5).prop_map(Op::Transform),
        (0usize..4).prop_map(Op::SwitchPath),
    ]
}

/// Applies `op`; returns whether it recorded history.
fn apply(state: &mut EditorState, op: &Op) -> bool {
    let before = state.history().undo_count();
    let len = state.active_path().len();
    match *op {
        Op::Add(x, y) => {
            state.add_pose(ImagePoint::new(x, y)).unwrap();
        }
        Op::Duplicate if len > 0 => {
            state.duplicate_pose(len - 1).unwrap();
        }
        Op::Delete if len > 0 => {
            state.delete_pose(0).unwrap();
        }
        Op::Rotate(deg) if len > 0 => {
            state.rotate_pose(len - 1, deg).unwrap();
        }
        Op::Lock if len > 0 => {
            let locked = state.active_path().points()[0].locked;
            state.set_locked(0, !locked).unwrap();
        }
        Op::Swap if len > 1 => {
            state.reorder(0, len - 1).unwrap();
        }
        Op::Transform(t) => {
            state.transform_active(PoseTransform::ALL[t]);
        }
        Op::SwitchPath(p) => {
            state.set_active_path(p).unwrap();
        }
        _ => {}
    }
    state.history().undo_count() > before
}

#[test]
fn test_undo_restores_each_step() {
    let mut state = editor();
    let empty = state.document().clone();
    state.add_pose(ImagePoint::new(10.0, 10.0)).unwrap();
    let one = state.document().clone();
    state.add_pose(ImagePoint::new(20.0, 20.0)).unwrap();
    let two = state.document().clone();

    assert!(state.undo());
    assert_eq!(state.document(), &one);
    assert_eq!(state.selected(), None);
    assert!(state.undo());
    assert_eq!(state.document(), &empty);
    assert!(!state.undo());

    assert!(state.redo());
    assert!(state.redo());
    assert_eq!(state.document(), &two);
    assert!(!state.redo());
}

#[test]
fn test_new_edit_discards_redo() {
    let mut state = editor();
    state.add_pose(ImagePoint::new(10.0, 10.0)).unwrap();
    state.undo();
    assert!(state.can_redo());
    state.add_pose(ImagePoint::new(30.0, 30.0)).unwrap();
    assert!(!state.can_redo());
}

#[test]
fn test_snapshots_cover_all_paths() {
    let mut state = editor();
    state.add_pose(ImagePoint::new(10.0, 10.0)).unwrap();
    state.set_active_path(2).unwrap();
    state.add_pose(ImagePoint::new(50.0, 50.0)).unwrap();
    assert!(state.clear_all());
    assert_eq!(state.document().pose_count(), 0);
    assert!(state.undo());
    assert_eq!(state.document().pose_count(), 2);
    assert_eq!(state.document().active_index(), 2);
}

#[test]
fn test_history_depth_is_bounded() {
    let mut state = editor();
    for i in 0..120 {
        state.add_pose(ImagePoint::new(i as f64, 0.0)).unwrap();
    }
    assert_eq!(state.history().undo_count(), 100);
    while state.undo() {}
    assert_eq!(state.active_path().len(), 20);
}

#[test]
fn test_snapshot_is_independent_of_live_document() {
    let mut history = History::new();
    let mut doc = Document::new();
    history.record(&doc);
    doc.active_path_mut().name = "Changed".to_string();
    let restored = history.undo(&doc).unwrap();
    assert_eq!(restored.active_path().name, "Path 1");
}

#[test]
fn test_heading_wrap_restored_by_undo() {
    let mut state = editor();
    state.set_heading_wrap(pathpick_core::HeadingWrap::Half);
    state.add_pose(ImagePoint::new(10.0, 10.0)).unwrap();
    state.set_heading_wrap(pathpick_core::HeadingWrap::Full);
    state.undo();
    assert_eq!(state.heading_wrap(), pathpick_core::HeadingWrap::Half);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn undo_all_then_redo_all(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut state = editor();
        let start = state.document().clone();
        let mut recorded = 0;
        for op in &ops {
            if apply(&mut state, op) {
                recorded += 1;
            }
        }
        let end = state.document().clone();

        for _ in 0..recorded {
            prop_assert!(state.undo());
        }
        prop_assert!(!state.can_undo());
        prop_assert_eq!(state.document().paths(), start.paths());
        prop_assert_eq!(state.document().heading_wrap(), start.heading_wrap());

        for _ in 0..recorded {
            prop_assert!(state.redo());
        }
        prop_assert_eq!(state.document().paths(), end.paths());
    }
}
