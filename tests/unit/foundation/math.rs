use super::*;

#[test]
fn fnv_seeded_hash_is_stable() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"beatframe");
    let mut b = Fnv1a64::new(Fnv1a64::OFFSET_BASIS);
    b.write_u8(b'b');
    b.write_bytes(b"eatframe");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn fnv_distinguishes_signed_zero() {
    let mut a = Fnv1a64::new_default();
    a.write_f64(0.0);
    let mut b = Fnv1a64::new_default();
    b.write_f64(-0.0);
    assert_ne!(a.finish(), b.finish());
}

#[test]
fn round_half_up_goes_up_on_ties() {
    assert_eq!(round_half_up(1.5), 2);
    assert_eq!(round_half_up(2.5), 3);
    assert_eq!(round_half_up(-0.5), 0);
    assert_eq!(round_half_up(2.49), 2);
}

#[test]
fn lerp_and_clamp() {
    assert_eq!(lerp(10.0, 20.0, 0.5), 15.0);
    assert_eq!(clamp01(1.5), 1.0);
    assert_eq!(clamp01(-0.1), 0.0);
}

#[test]
fn snap_rounds_to_the_nearest_step() {
    assert_eq!(snap(0.01 + 2.01, 1e6), 2.02);
    assert_eq!(snap(1.23456789, 1e3), 1.235);
    assert_eq!(snap(-0.0004, 1e3), 0.0);
}
