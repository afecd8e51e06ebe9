use super::*;

#[test]
fn closed_form_trajectory_is_exact() {
    let params = ConfettiParams::new(Point::new(960.0, 540.0), 1);
    let p = ConfettiParticle {
        x0: 960.0,
        y0: 540.0,
        angle: 0.0,
        velocity: 5.0,
        rotation: 0.0,
        rotation_speed: 0.0,
        gravity: 0.1,
        color_index: 0,
        size: 8.0,
    };
    let s = params.evaluate(&p, FrameIndex(10), Vec2::ZERO);
    assert_eq!(s.x, 1010.0);
    assert_eq!(s.y, 545.0);
    assert_eq!(p.position_at(10.0), Point::new(1010.0, 545.0));
}

#[test]
fn generated_fields_respect_ranges() {
    let params = ConfettiParams::new(Point::new(960.0, 540.0), 60);
    let ps = params.generate(42);
    assert_eq!(ps.len(), 60);
    for p in &ps {
        assert!((3.0..7.0).contains(&p.velocity));
        assert!((0.08..0.12).contains(&p.gravity));
        assert!(p.color_index < 6);
        assert_eq!((p.x0, p.y0), (960.0, 540.0));
    }
}

#[test]
fn angles_spread_evenly_without_jitter() {
    let params = ConfettiParams {
        jitter: 0.0,
        ..ConfettiParams::new(Point::ORIGIN, 4)
    };
    let angles: Vec<f64> = params.generate(1).iter().map(|p| p.angle).collect();
    let step = std::f64::consts::TAU / 4.0;
    for w in angles.windows(2) {
        assert!((w[1] - w[0] - step).abs() < 1e-12);
    }
}

#[test]
fn invisible_outside_lifetime() {
    let params = ConfettiParams {
        start_frame: 30,
        duration: 60,
        ..ConfettiParams::new(Point::new(0.0, 0.0), 3)
    };
    let p = params.generate(9)[0];
    assert!(!params.evaluate(&p, FrameIndex(29), Vec2::ZERO).visible);
    assert!(params.evaluate(&p, FrameIndex(30), Vec2::ZERO).visible);
    assert!(params.evaluate(&p, FrameIndex(90), Vec2::ZERO).visible);
    assert!(!params.evaluate(&p, FrameIndex(91), Vec2::ZERO).visible);
}

#[test]
fn fades_over_final_thirty_percent() {
    let params = ConfettiParams {
        duration: 100,
        ..ConfettiParams::new(Point::new(0.0, 0.0), 1)
    };
    let p = params.generate(2)[0];
    assert_eq!(params.evaluate(&p, FrameIndex(60), Vec2::ZERO).opacity, 1.0);
    let fading = params.evaluate(&p, FrameIndex(85), Vec2::ZERO).opacity;
    assert!((fading - 0.5).abs() < 1e-9);
    assert_eq!(params.evaluate(&p, FrameIndex(100), Vec2::ZERO).opacity, 0.0);
}

#[test]
fn evaluation_is_order_independent() {
    let params = ConfettiParams::new(Point::new(100.0, 100.0), 20);
    let ps = params.generate(77);
    let forward: Vec<_> = (0..90)
        .map(|f| params.evaluate_all(&ps, FrameIndex(f), Vec2::ZERO))
        .collect();
    let mut backward: Vec<_> = (0..90)
        .rev()
        .map(|f| params.evaluate_all(&ps, FrameIndex(f), Vec2::ZERO))
        .collect();
    backward.reverse();
    assert_eq!(forward, backward);
}
