use super::*;
use crate::foundation::core::{Point, Rect};

#[test]
fn spec_parses_tagged_json() {
    let v = serde_json::json!({
        "effect": "confetti",
        "origin": { "x": 960.0, "y": 540.0 },
        "count": 30,
        "start_frame": 12
    });
    let spec: EmitterSpec = serde_json::from_value(v).unwrap();
    assert_eq!(spec.kind(), EffectKind::Confetti);
    match spec {
        EmitterSpec::Confetti(p) => {
            assert_eq!(p.start_frame, 12);
            assert_eq!(p.duration, 90);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn generate_then_evaluate_every_kind() {
    let cache = ParticleCache::new();
    let region = Rect::new(0.0, 0.0, 640.0, 360.0);
    let specs = [
        EmitterSpec::Ambient(AmbientParams::new(region, 5)),
        EmitterSpec::Confetti(ConfettiParams::new(Point::new(320.0, 180.0), 6)),
        EmitterSpec::Sparkle(SparkleParams::new(region, 7)),
        EmitterSpec::FloatingShapes(FloatingShapeParams::new(region, 8)),
    ];
    for (spec, n) in specs.iter().zip([5, 6, 7, 8]) {
        let set = spec.generate(10, &cache);
        assert_eq!(set.len(), n);
        let states = set.evaluate(spec, FrameIndex(20), Vec2::ZERO);
        assert_eq!(states.len(), n);
    }
    assert_eq!(cache.len(), 4);
}

#[test]
fn mismatched_spec_yields_nothing() {
    let cache = ParticleCache::new();
    let region = Rect::new(0.0, 0.0, 10.0, 10.0);
    let ambient = EmitterSpec::Ambient(AmbientParams::new(region, 3));
    let sparkle = EmitterSpec::Sparkle(SparkleParams::new(region, 3));
    let set = ambient.generate(1, &cache);
    assert!(set.evaluate(&sparkle, FrameIndex(0), Vec2::ZERO).is_empty());
}
