use super::*;
use crate::animation::preset::evaluate;
use crate::foundation::core::{Fps, FrameIndex};

#[test]
fn delay_shifts_start_only() {
    let c = fade_up_in(1.0, 0.5, 10.0);
    let d = delay(c, 0.25);
    assert_eq!(d.start_s, 1.25);
    assert_eq!(d.duration_s, c.duration_s);
    assert_eq!(d.preset, c.preset);
}

#[test]
fn stagger_offsets_each_copy() {
    let items = stagger(fade_up_in(0.5, 0.5, 10.0), 4, 0.1);
    assert_eq!(items.len(), 4);
    assert_eq!(items[0].start_s, 0.5);
    assert!((items[3].start_s - 0.8).abs() < 1e-12);
}

#[test]
fn staggered_items_reveal_in_order() {
    let fps = Fps::new(30, 1).unwrap();
    let items = stagger(fade_up_in(0.0, 0.5, 10.0), 3, 0.5);
    let frame = FrameIndex(20);
    let opacities: Vec<f64> = items
        .iter()
        .map(|c| evaluate(frame, fps, c).opacity.unwrap())
        .collect();
    assert_eq!(opacities[0], 1.0);
    assert!(opacities[1] > 0.0 && opacities[1] < 1.0);
    assert_eq!(opacities[2], 0.0);
}

#[test]
fn with_ease_replaces_curve() {
    let c = with_ease(breathe(0.0, 0.1, 1.0), Ease::OutBack);
    assert_eq!(c.ease, Ease::OutBack);
}
