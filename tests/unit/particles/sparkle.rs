use super::*;

fn params() -> SparkleParams {
    SparkleParams::new(Rect::new(100.0, 100.0, 500.0, 300.0), 25)
}

#[test]
fn delay_and_duration_ranges() {
    for s in params().generate(8) {
        assert!((0.0..=30.0).contains(&s.delay));
        assert!((20.0..=40.0).contains(&s.duration));
        assert!((100.0..500.0).contains(&s.x));
        assert!((100.0..300.0).contains(&s.y));
    }
}

#[test]
fn window_visibility_and_burst_shape() {
    let params = SparkleParams {
        start_frame: 10,
        ..params()
    };
    let p = SparkleParticle {
        x: 200.0,
        y: 150.0,
        size: 10.0,
        delay: 5.0,
        duration: 20.0,
        rotation_speed: 3.0,
    };
    assert!(!params.evaluate(&p, FrameIndex(14), Vec2::ZERO).visible);

    let start = params.evaluate(&p, FrameIndex(15), Vec2::ZERO);
    assert!(start.visible);
    assert_eq!(start.scale, 0.0);
    assert_eq!(start.opacity, 0.0);

    let peak = params.evaluate(&p, FrameIndex(25), Vec2::ZERO);
    assert_eq!(peak.scale, 1.0);
    assert_eq!(peak.opacity, 1.0);
    assert_eq!(peak.rotation, 30.0);

    let end = params.evaluate(&p, FrameIndex(35), Vec2::ZERO);
    assert_eq!(end.scale, 0.0);
    assert!(!params.evaluate(&p, FrameIndex(36), Vec2::ZERO).visible);
}

#[test]
fn fade_in_is_faster_than_fade_out() {
    let params = SparkleParams::new(Rect::new(0.0, 0.0, 10.0, 10.0), 1);
    let p = SparkleParticle {
        x: 0.0,
        y: 0.0,
        size: 10.0,
        delay: 0.0,
        duration: 100.0,
        rotation_speed: 1.0,
    };
    let opacity = |f| params.evaluate(&p, FrameIndex(f), Vec2::ZERO).opacity;
    assert_eq!(opacity(20), 1.0);
    assert!(opacity(70) < 1.0);
    assert!(opacity(10) > opacity(90));
}
