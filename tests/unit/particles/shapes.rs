use super::*;

fn params() -> FloatingShapeParams {
    FloatingShapeParams::new(Rect::new(0.0, 0.0, 1920.0, 1080.0), 50)
}

#[test]
fn shapes_are_faint_and_seed_selected() {
    let shapes = params().generate(21);
    assert_eq!(shapes.len(), 50);
    for s in &shapes {
        assert!((0.03..0.08).contains(&s.opacity));
        match s.kind {
            ShapeKind::Blob => {
                assert_eq!(s.blob_radii.len(), BLOB_POINTS);
                assert!(s.blob_radii.iter().all(|r| (0.8..1.2).contains(r)));
            }
            _ => assert!(s.blob_radii.is_empty()),
        }
    }
    let kinds: std::collections::HashSet<_> =
        shapes.iter().map(|s| format!("{:?}", s.kind)).collect();
    assert!(kinds.len() > 1);
}

#[test]
fn drift_stays_near_home() {
    let p = params();
    for s in p.generate(4) {
        for f in [0u64, 50, 5_000] {
            let st = p.evaluate(&s, FrameIndex(f), Vec2::ZERO);
            assert!((st.x - s.x).abs() <= s.drift_amplitude + 1e-9);
            assert!((st.y - s.y).abs() <= s.drift_amplitude + 1e-9);
            assert_eq!(st.opacity, s.opacity);
            assert!((st.scale - 1.0).abs() <= 0.08 + 1e-12);
        }
    }
}

#[test]
fn serialized_shape_omits_empty_radii() {
    let s = FloatingShape {
        kind: ShapeKind::Line,
        x: 0.0,
        y: 0.0,
        size: 50.0,
        drift_speed: 0.01,
        drift_amplitude: 10.0,
        phase: 0.0,
        rotation: 0.0,
        rotation_speed: 0.0,
        opacity: 0.05,
        blob_radii: SmallVec::new(),
    };
    let v = serde_json::to_value(&s).unwrap();
    assert!(v.get("blob_radii").is_none());
    assert_eq!(v["kind"], "line");
}
