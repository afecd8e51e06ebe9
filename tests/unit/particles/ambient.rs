use super::*;

fn params() -> AmbientParams {
    AmbientParams::new(Rect::new(0.0, 0.0, 1920.0, 1080.0), 40)
}

#[test]
fn generated_fields_respect_ranges() {
    let p = params();
    let particles = p.generate(11);
    assert_eq!(particles.len(), 40);
    for a in &particles {
        assert!((0.0..1920.0).contains(&a.x));
        assert!((0.0..1080.0).contains(&a.y));
        assert!((2.0..6.0).contains(&a.size));
        assert!((0.3..0.8).contains(&a.speed));
        assert!((20.0..50.0).contains(&a.amplitude));
        assert!((0.1..0.3).contains(&a.opacity));
        assert!((0.0..std::f64::consts::TAU).contains(&a.phase));
    }
}

#[test]
fn generation_is_seed_deterministic() {
    let p = params();
    assert_eq!(p.generate(5), p.generate(5));
    assert_ne!(p.generate(5), p.generate(6));
}

#[test]
fn vertical_position_wraps_within_loop() {
    let p = params();
    let particles = p.generate(3);
    for a in &particles {
        for f in [0u64, 10, 1_000, 100_000] {
            let s = p.evaluate(a, FrameIndex(f), Vec2::ZERO);
            assert!(s.y >= 0.0 && s.y < 1080.0, "y {} at frame {f}", s.y);
            assert!(s.visible);
        }
    }
}

#[test]
fn loop_is_seamless() {
    let p = AmbientParams {
        vertical_speed: 1.0,
        loop_height: Some(100.0),
        ..AmbientParams::new(Rect::new(0.0, 0.0, 100.0, 100.0), 1)
    };
    let a = AmbientParticle {
        x: 50.0,
        y: 50.0,
        size: 3.0,
        speed: 0.5,
        phase: 0.0,
        amplitude: 20.0,
        opacity: 0.2,
    };
    // 200 frames at 0.5 px/frame is exactly one loop.
    let s0 = p.evaluate(&a, FrameIndex(0), Vec2::ZERO);
    let s1 = p.evaluate(&a, FrameIndex(200), Vec2::ZERO);
    assert_eq!(s0.y, s1.y);
    let rising = p.evaluate(&a, FrameIndex(20), Vec2::ZERO);
    assert_eq!(rising.y, 40.0);
}

#[test]
fn anchor_offsets_position() {
    let p = params();
    let a = p.generate(1)[0];
    let base = p.evaluate(&a, FrameIndex(7), Vec2::ZERO);
    let moved = p.evaluate(&a, FrameIndex(7), Vec2::new(10.0, -5.0));
    assert_eq!(moved.x, base.x + 10.0);
    assert_eq!(moved.y, base.y - 5.0);
}
