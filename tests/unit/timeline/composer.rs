use super::*;

fn slots() -> Vec<SceneSlot> {
    vec![
        SceneSlot::new("intro", 450, 30),
        SceneSlot::new("quiz", 600, 40),
        SceneSlot::new("outro", 500, 0),
    ]
}

#[test]
fn offsets_and_total_follow_overlaps() {
    let t = compose(&slots(), 0).unwrap();
    assert_eq!(t.total_duration, 1480);
    assert_eq!(t.offsets(), vec![0, 420, 980]);
}

#[test]
fn tail_padding_extends_total_and_last_scene() {
    let t = compose(&slots(), 15).unwrap();
    assert_eq!(t.total_duration, 1495);
    let active = t.active_at(FrameIndex(1490));
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].index, 2);
    assert_eq!(active[0].local_frame, FrameIndex(510));
    assert!(t.active_at(FrameIndex(1495)).is_empty());
}

#[test]
fn last_scene_overlap_is_ignored() {
    let mut s = slots();
    s[2] = SceneSlot::new("outro", 500, 60);
    let t = compose(&s, 0).unwrap();
    assert_eq!(t.total_duration, 1480);
    assert!(t.scenes[2].transition_out.is_none());
}

#[test]
fn both_scenes_active_during_overlap() {
    let t = compose(&slots(), 0).unwrap();

    let solo = t.active_at(FrameIndex(100));
    assert_eq!(solo.len(), 1);
    assert!(solo[0].transition.is_none());

    let both = t.active_at(FrameIndex(435));
    assert_eq!(both.len(), 2);
    let (out, inc) = (&both[0], &both[1]);
    assert_eq!(out.index, 0);
    assert_eq!(out.local_frame, FrameIndex(435));
    assert_eq!(inc.index, 1);
    assert_eq!(inc.local_frame, FrameIndex(15));

    let out_t = out.transition.as_ref().unwrap();
    let in_t = inc.transition.as_ref().unwrap();
    assert_eq!(out_t.role, TransitionRole::Outgoing);
    assert_eq!(in_t.role, TransitionRole::Incoming);
    assert_eq!(out_t.raw_progress, 0.5);
    assert_eq!(in_t.raw_progress, 0.5);
    assert_eq!(out_t.opacity + in_t.opacity, 1.0);
}

#[test]
fn overlap_boundaries_are_half_open() {
    let t = compose(&slots(), 0).unwrap();
    assert_eq!(t.active_at(FrameIndex(419)).len(), 1);
    let first = t.active_at(FrameIndex(420));
    assert_eq!(first.len(), 2);
    assert_eq!(first[1].transition.as_ref().unwrap().raw_progress, 0.0);
    let last = t.active_at(FrameIndex(449));
    assert_eq!(last.len(), 2);
    let solo = t.active_at(FrameIndex(450));
    assert_eq!(solo.len(), 1);
    assert_eq!(solo[0].index, 1);
    assert!(solo[0].transition.is_none());
}

#[test]
fn every_frame_has_an_active_scene() {
    let t = compose(&slots(), 0).unwrap();
    for f in 0..t.total_duration {
        let n = t.active_at(FrameIndex(f)).len();
        assert!((1..=2).contains(&n), "frame {f} has {n} scenes");
    }
}

#[test]
fn oversized_overlaps_are_rejected() {
    let too_long = vec![SceneSlot::new("a", 20, 30), SceneSlot::new("b", 100, 0)];
    assert!(matches!(
        compose(&too_long, 0),
        Err(BeatframeError::InvalidConfiguration(_))
    ));

    let triple = vec![
        SceneSlot::new("a", 100, 30),
        SceneSlot::new("b", 50, 30),
        SceneSlot::new("c", 100, 0),
    ];
    assert!(compose(&triple, 0).is_err());
}

#[test]
fn zero_duration_and_duplicates_are_rejected() {
    assert!(compose(&[SceneSlot::new("a", 0, 0)], 0).is_err());
    assert!(compose(&[SceneSlot::new("a", 10, 0), SceneSlot::new("a", 10, 0)], 0).is_err());
}

#[test]
fn empty_scene_list_is_just_padding() {
    let t = compose(&[], 12).unwrap();
    assert_eq!(t.total_duration, 12);
    assert!(t.active_at(FrameIndex(0)).is_empty());
}

#[test]
fn wipe_transition_keeps_scenes_opaque() {
    let mut s = slots();
    s[0].transition_out = Some(TransitionSpec {
        kind: "wipe".to_owned(),
        duration_frames: 30,
        ease: Ease::InOutCubic,
        params: serde_json::json!({ "dir": "rtl" }),
    });
    let t = compose(&s, 0).unwrap();
    let both = t.active_at(FrameIndex(430));
    let inc = both[1].transition.as_ref().unwrap();
    assert!(matches!(inc.kind, TransitionKind::Wipe { .. }));
    assert_eq!(inc.opacity, 1.0);
    assert_eq!(inc.progress, Ease::InOutCubic.apply(inc.raw_progress));
}
