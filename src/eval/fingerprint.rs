use crate::{
    animation::preset::AnimationState,
    eval::evaluator::FrameState,
    foundation::math::Fnv1a64,
    particles::ParticleState,
    timeline::composer::TransitionRole,
};

/// FNV-1a over every value of a frame, floats by bit pattern.
///
/// Two evaluations of the same frame agree exactly, whichever thread or order produced them.
pub fn fingerprint_frame(state: &FrameState) -> u64 {
    let mut h = Fnv1a64::new_default();
    h.write_u64(state.frame.0);
    h.write_u64(state.scenes.len() as u64);
    for s in &state.scenes {
        h.write_str(&s.scene);
        h.write_u64(s.index as u64);
        h.write_u64(s.local_frame.0);
        match &s.transition {
            Some(t) => {
                h.write_u8(1);
                h.write_u8(match t.role {
                    TransitionRole::Outgoing => 0,
                    TransitionRole::Incoming => 1,
                });
                h.write_f64(t.raw_progress);
                h.write_f64(t.progress);
                h.write_f64(t.opacity);
            }
            None => h.write_u8(0),
        }

        h.write_u64(s.elements.len() as u64);
        for e in &s.elements {
            h.write_str(&e.id);
            match e.position {
                Some(p) => {
                    h.write_u8(1);
                    h.write_f64(p.x);
                    h.write_f64(p.y);
                }
                None => h.write_u8(0),
            }
            write_anim(&mut h, &e.state);
        }

        h.write_u64(s.emitters.len() as u64);
        for e in &s.emitters {
            h.write_str(&e.id);
            h.write_u64(e.particles.len() as u64);
            for p in &e.particles {
                write_particle(&mut h, p);
            }
        }

        h.write_u64(s.connectors.len() as u64);
        for c in &s.connectors {
            h.write_str(&c.id);
            for v in [c.from.x, c.from.y, c.to.x, c.to.y] {
                h.write_f64(v);
            }
            write_anim(&mut h, &c.state);
        }

        h.write_u64(s.layout.len() as u64);
        for (id, p) in &s.layout {
            h.write_str(id);
            h.write_f64(p.x);
            h.write_f64(p.y);
        }
    }
    h.finish()
}

fn write_anim(h: &mut Fnv1a64, a: &AnimationState) {
    for v in [a.opacity, a.translate_x, a.translate_y, a.scale, a.rotation] {
        match v {
            Some(v) => {
                h.write_u8(1);
                h.write_f64(v);
            }
            None => h.write_u8(0),
        }
    }
}

fn write_particle(h: &mut Fnv1a64, p: &ParticleState) {
    h.write_u8(u8::from(p.visible));
    if p.visible {
        for v in [p.x, p.y, p.scale, p.rotation, p.opacity] {
            h.write_f64(v);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/fingerprint.rs"]
mod tests;
