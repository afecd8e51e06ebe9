use super::*;
use crate::{
    scene::{model::ProjectDef, prepare::prepare},
    timeline::composer::TransitionRole,
};

fn project() -> PreparedProject {
    let def = ProjectDef::from_json_value(serde_json::json!({
        "fps": 30,
        "seed": 3,
        "beat_order": ["title_in"],
        "beat_defaults": { "title_in": 0.5 },
        "tail_padding_frames": 10,
        "scenes": [
            {
                "id": "a",
                "duration_frames": 60,
                "transition": { "duration_frames": 20 },
                "elements": [
                    {
                        "id": "title",
                        "animations": [
                            { "start": "title_in", "duration_s": 0.5, "preset": "fade_up_in", "distance": 40 }
                        ]
                    }
                ],
                "layout": {
                    "boxes": [
                        { "id": "title", "position": { "x": 400, "y": 100 }, "width": 200, "height": 50, "flexible": false },
                        { "id": "tag", "position": { "x": 700, "y": 100 }, "width": 80, "height": 30 }
                    ]
                },
                "emitters": [
                    { "id": "burst", "effect": "confetti", "origin": { "x": 960, "y": 540 }, "count": 12, "duration": 40 }
                ],
                "connectors": [ { "id": "link", "from": "title", "to": "tag" } ]
            },
            {
                "id": "b",
                "duration_frames": 40,
                "elements": [
                    { "id": "pulse", "animations": [ { "start": 0, "duration_s": 1, "preset": "pulse_emphasis", "delta": 0.2 } ] }
                ]
            }
        ]
    }))
    .unwrap();
    prepare(&def).unwrap()
}

#[test]
fn single_scene_frame() {
    let p = project();
    let s = Evaluator::eval_frame(&p, FrameIndex(0)).unwrap();
    assert_eq!(s.scenes.len(), 1);
    let a = &s.scenes[0];
    assert_eq!(a.scene, "a");
    assert!(a.transition.is_none());
    assert_eq!(a.elements[0].state.opacity, Some(0.0));
    assert_eq!(a.elements[0].state.translate_y, Some(40.0));
    assert_eq!(a.emitters[0].particles.len(), 12);
    assert_eq!(a.layout.len(), 2);
}

#[test]
fn connector_follows_element_translation() {
    let p = project();
    let early = Evaluator::eval_frame(&p, FrameIndex(0)).unwrap();
    assert_eq!(early.scenes[0].connectors[0].from, Point::new(400.0, 140.0));
    let settled = Evaluator::eval_frame(&p, FrameIndex(30)).unwrap();
    let link = &settled.scenes[0].connectors[0];
    assert_eq!(link.from, Point::new(400.0, 100.0));
    assert_eq!(link.to, Point::new(700.0, 100.0));
}

#[test]
fn overlap_frames_carry_both_scenes() {
    let p = project();
    let s = Evaluator::eval_frame(&p, FrameIndex(45)).unwrap();
    assert_eq!(s.scenes.len(), 2);
    let out = s.scenes[0].transition.as_ref().unwrap();
    let inc = s.scenes[1].transition.as_ref().unwrap();
    assert_eq!(out.role, TransitionRole::Outgoing);
    assert_eq!(inc.role, TransitionRole::Incoming);
    assert_eq!(out.raw_progress, 0.25);
    assert_eq!(s.scenes[1].local_frame, FrameIndex(5));
}

#[test]
fn tail_padding_keeps_last_scene_alive() {
    let p = project();
    assert_eq!(p.total_frames(), 60 + 40 - 20 + 10);
    let s = Evaluator::eval_frame(&p, FrameIndex(85)).unwrap();
    assert_eq!(s.scenes.len(), 1);
    assert_eq!(s.scenes[0].scene, "b");
    assert_eq!(s.scenes[0].local_frame, FrameIndex(45));
    assert_eq!(s.scenes[0].elements[0].state.scale, Some(1.0));
}

#[test]
fn out_of_bounds_frame_is_an_error() {
    let p = project();
    let err = Evaluator::eval_frame(&p, FrameIndex(p.total_frames())).unwrap_err();
    assert!(matches!(err, BeatframeError::Evaluation(_)));
}

#[test]
fn parallel_matches_serial() {
    let p = project();
    let range = FrameRange::new(FrameIndex(0), FrameIndex(p.total_frames())).unwrap();
    let serial = eval_frames(&p, range, Threading::Serial).unwrap();
    let parallel = eval_frames(&p, range, Threading::Parallel { threads: Some(3) }).unwrap();
    assert_eq!(serial.len(), 90);
    assert_eq!(serial, parallel);
}

#[test]
fn zero_threads_is_rejected() {
    let p = project();
    let range = FrameRange::new(FrameIndex(0), FrameIndex(2)).unwrap();
    let err = eval_frames(&p, range, Threading::Parallel { threads: Some(0) }).unwrap_err();
    assert!(matches!(err, BeatframeError::InvalidConfiguration(_)));
}

#[test]
fn frames_evaluate_independently_of_order() {
    let p = project();
    let forward: Vec<_> = (0..90)
        .map(|f| Evaluator::eval_frame(&p, FrameIndex(f)).unwrap())
        .collect();
    for f in (0..90).rev().step_by(7) {
        let again = Evaluator::eval_frame(&p, FrameIndex(f)).unwrap();
        assert_eq!(again, forward[f as usize]);
    }
}
