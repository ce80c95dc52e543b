use vega_core::constants::VISIBILITY_THRESHOLD;
use vega_core::preset::VisualEffectId;
use vega_core::visual::{ParticleField, VisualMixer};

#[test]
fn fade_in_is_monotone_and_bounded() {
    let mut mixer = VisualMixer::new();
    mixer.set_active(VisualEffectId::Alpha, true);
    let mut last = mixer.progress(VisualEffectId::Alpha);
    for _ in 0..600 {
        mixer.step();
        let p = mixer.progress(VisualEffectId::Alpha);
        assert!(p >= last, "fade-in regressed: {p} < {last}");
        assert!(p <= 1.0);
        last = p;
    }
    assert!(last > 0.99, "fade-in did not converge: {last}");
}

#[test]
fn fade_out_is_monotone_and_bounded() {
    let mut mixer = VisualMixer::new();
    mixer.set_active(VisualEffectId::Omega, true);
    for _ in 0..600 {
        mixer.step();
    }
    mixer.set_active(VisualEffectId::Omega, false);
    let mut last = mixer.progress(VisualEffectId::Omega);
    for _ in 0..600 {
        mixer.step();
        let p = mixer.progress(VisualEffectId::Omega);
        assert!(p <= last);
        assert!(p >= 0.0);
        last = p;
    }
    assert!(!mixer.visible(VisualEffectId::Omega));
}

#[test]
fn visibility_tracks_the_threshold() {
    let mut mixer = VisualMixer::new();
    assert!(!mixer.any_visible());
    mixer.set_active(VisualEffectId::Vega, true);
    // a single step is already above the floor: 0.02 > 0.01
    mixer.step();
    assert!(mixer.visible(VisualEffectId::Vega));
    assert!(mixer.progress(VisualEffectId::Vega) > VISIBILITY_THRESHOLD);
    assert!(mixer.any_visible());
}

#[test]
fn retarget_mid_fade_never_overshoots() {
    let mut mixer = VisualMixer::new();
    mixer.set_active(VisualEffectId::Cosmic, true);
    for _ in 0..50 {
        mixer.step();
    }
    mixer.set_active(VisualEffectId::Cosmic, false);
    for _ in 0..2000 {
        mixer.step();
        let p = mixer.progress(VisualEffectId::Cosmic);
        assert!((0.0..=1.0).contains(&p));
    }
}

#[test]
fn deactivate_all_clears_every_target() {
    let mut mixer = VisualMixer::new();
    for id in VisualEffectId::ALL {
        mixer.set_active(id, true);
    }
    mixer.deactivate_all();
    for id in VisualEffectId::ALL {
        assert!(!mixer.is_active(id));
    }
}

#[test]
fn clock_advances_per_frame() {
    let mut mixer = VisualMixer::new();
    for _ in 0..100 {
        mixer.step();
    }
    assert!((mixer.time() - 1.6).abs() < 1e-3);
}

#[test]
fn visible_layers_scale_base_opacity() {
    let mut mixer = VisualMixer::new();
    mixer.set_active(VisualEffectId::Alpha, true);
    mixer.set_active(VisualEffectId::Neural, true);
    for _ in 0..300 {
        mixer.step();
    }
    let layers: Vec<_> = mixer.visible_layers().collect();
    assert_eq!(layers.len(), 2);
    // registry order, not activation order
    assert_eq!(layers[0].0, VisualEffectId::Alpha);
    assert_eq!(layers[1].0, VisualEffectId::Neural);
    for &(id, opacity) in &layers {
        let base = vega_core::preset::effect_config(id).base_opacity;
        assert!(opacity > 0.0 && opacity <= base);
    }
}

#[test]
fn particle_field_is_reproducible() {
    let a = ParticleField::new(42, 800.0, 600.0);
    let b = ParticleField::new(42, 800.0, 600.0);
    for (pa, pb) in a.particles().iter().zip(b.particles()) {
        assert_eq!(pa.x, pb.x);
        assert_eq!(pa.y, pb.y);
        assert_eq!(pa.hue, pb.hue);
    }
}

#[test]
fn particles_wrap_at_viewport_bounds() {
    let mut field = ParticleField::new(7, 800.0, 600.0);
    let mut time = 0.0f32;
    for _ in 0..10_000 {
        field.step(time);
        time += 0.016;
    }
    for p in field.particles() {
        assert!((0.0..=800.0).contains(&p.x), "x escaped: {}", p.x);
        assert!((0.0..=600.0).contains(&p.y), "y escaped: {}", p.y);
        assert!((0.2..=0.7).contains(&p.opacity));
        assert!((1.0..=4.0).contains(&p.size));
    }
}

#[test]
fn resize_rescales_particle_positions() {
    let mut field = ParticleField::new(3, 800.0, 600.0);
    field.resize(400.0, 300.0);
    for p in field.particles() {
        assert!((0.0..=400.0).contains(&p.x));
        assert!((0.0..=300.0).contains(&p.y));
    }
}
