use super::*;

#[test]
fn starts_at_rest_at_zero() {
    let s = SpringConfig::default();
    assert_eq!(s.value(0.0), 0.0);
    assert_eq!(s.value(-1.0), 0.0);
}

#[test]
fn default_spring_overshoots_then_settles() {
    let s = SpringConfig::default();
    assert!(s.damping_ratio() < 1.0);
    let peak = (1..120)
        .map(|f| s.value(f64::from(f) / 30.0))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0);
    assert_eq!(s.value(10.0), 1.0);
    assert_eq!(s.value(1000.0), 1.0);
}

#[test]
fn overshoot_clamping_caps_value() {
    let s = SpringConfig {
        overshoot_clamping: true,
        ..SpringConfig::default()
    };
    for f in 0..120 {
        assert!(s.value(f64::from(f) / 30.0) <= 1.0);
    }
}

#[test]
fn critical_and_overdamped_never_overshoot() {
    for damping in [20.0, 60.0] {
        let s = SpringConfig {
            damping,
            ..SpringConfig::default()
        };
        let mut prev = 0.0;
        for f in 0..300 {
            let v = s.value(f64::from(f) / 30.0);
            assert!(v <= 1.0, "damping {damping} frame {f} -> {v}");
            assert!(v >= prev);
            prev = v;
        }
    }
}

#[test]
fn settle_frame_is_found_for_default_spring() {
    let s = SpringConfig::default();
    let f = s.settle_frame(30.0, 600).unwrap();
    assert!(f > 10);
    assert_eq!(s.value(f as f64 / 30.0), 1.0);
}

#[test]
fn invalid_parameters_are_rejected() {
    for bad in [
        SpringConfig {
            mass: 0.0,
            ..SpringConfig::default()
        },
        SpringConfig {
            stiffness: -1.0,
            ..SpringConfig::default()
        },
        SpringConfig {
            damping: f64::NAN,
            ..SpringConfig::default()
        },
        SpringConfig {
            damping: 0.0,
            ..SpringConfig::default()
        },
    ] {
        assert!(matches!(
            bad.validate(),
            Err(BeatframeError::InvalidConfiguration(_))
        ));
    }
    assert!(SpringConfig::default().validate().is_ok());
}
