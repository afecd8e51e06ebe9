use super::*;

#[test]
fn wipe_dir_parses_aliases() {
    let spec = TransitionSpec {
        kind: "wipe".to_string(),
        duration_frames: 10,
        ease: Ease::Linear,
        params: serde_json::json!({ "dir": "ttb", "soft_edge": 0.1 }),
    };
    assert_eq!(
        parse_transition(&spec).unwrap(),
        TransitionKind::Wipe {
            dir: WipeDir::TopToBottom,
            soft_edge: 0.1
        }
    );
}

#[test]
fn wipe_soft_edge_is_clamped() {
    let spec = TransitionSpec {
        kind: "wipe".to_string(),
        duration_frames: 10,
        ease: Ease::Linear,
        params: serde_json::json!({ "soft_edge": -5.0 }),
    };
    assert_eq!(
        parse_transition(&spec).unwrap(),
        TransitionKind::Wipe {
            dir: WipeDir::LeftToRight,
            soft_edge: 0.0
        }
    );
}

#[test]
fn unknown_kind_is_invalid_configuration() {
    let err = parse_transition_kind_params("spin", &serde_json::Value::Null).unwrap_err();
    assert!(matches!(err, BeatframeError::InvalidConfiguration(_)));
    assert!(parse_transition_kind_params("  ", &serde_json::Value::Null).is_err());
}

#[test]
fn crossfade_opacities_are_complementary() {
    let (out, inc) = TransitionKind::Crossfade.opacities(0.25);
    assert_eq!(out, 0.75);
    assert_eq!(inc, 0.25);
    let wipe = TransitionKind::Wipe {
        dir: WipeDir::LeftToRight,
        soft_edge: 0.0,
    };
    assert_eq!(wipe.opacities(0.5), (1.0, 1.0));
}

#[test]
fn spec_defaults_to_crossfade() {
    let spec: TransitionSpec =
        serde_json::from_value(serde_json::json!({ "duration_frames": 12 })).unwrap();
    assert_eq!(spec, TransitionSpec::crossfade(12));
}
