use super::*;
use crate::foundation::core::{Point, Rect};
use crate::particles::{ambient::AmbientParams, confetti::ConfettiParams};

#[test]
fn second_lookup_is_a_hit_sharing_the_array() {
    let cache = ParticleCache::new();
    let p = AmbientParams::new(Rect::new(0.0, 0.0, 100.0, 100.0), 10);
    let a = cache.get_or_generate(&p, 1);
    let b = cache.get_or_generate(&p, 1);
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(cache.hits(), 1);
    assert_eq!(cache.misses(), 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn key_includes_seed_kind_and_params() {
    let cache = ParticleCache::new();
    let region = Rect::new(0.0, 0.0, 100.0, 100.0);
    cache.get_or_generate(&AmbientParams::new(region, 10), 1);
    cache.get_or_generate(&AmbientParams::new(region, 10), 2);
    cache.get_or_generate(&AmbientParams::new(region, 11), 1);
    cache.get_or_generate(&ConfettiParams::new(Point::ORIGIN, 10), 1);
    assert_eq!(cache.len(), 4);
    assert_eq!(cache.hits(), 0);
}

#[test]
fn cached_and_fresh_generation_agree() {
    let cache = ParticleCache::new();
    let p = ConfettiParams::new(Point::new(5.0, 5.0), 12);
    let cached = cache.get_or_generate(&p, 99);
    cache.clear();
    assert!(cache.is_empty());
    let regenerated = cache.get_or_generate(&p, 99);
    assert_eq!(*cached, *regenerated);
    assert_eq!(*cached, p.generate(99));
}

#[test]
fn cache_is_shareable_across_threads() {
    let cache = Arc::new(ParticleCache::new());
    let p = AmbientParams::new(Rect::new(0.0, 0.0, 50.0, 50.0), 8);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let p = p.clone();
            std::thread::spawn(move || cache.get_or_generate(&p, 3).as_ref().clone())
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.windows(2).all(|w| w[0] == w[1]));
}
