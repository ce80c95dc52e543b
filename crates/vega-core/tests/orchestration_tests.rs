use vega_core::constants::{ACTIVATE_DELAY_MS, PERFECT_STAGGER_MS, STAGGER_MS};
use vega_core::orchestration::{Action, Orchestrator, Plan};
use vega_core::preset::{
    preset, PresetId, Resonance, SoundscapeId, VisualEffectId, CYCLE_ORDER,
};

fn visual_ons(plan: &Plan) -> Vec<(u32, VisualEffectId)> {
    plan.iter()
        .filter_map(|s| match s.action {
            Action::SetVisual(v, true) => Some((s.delay_ms, v)),
            _ => None,
        })
        .collect()
}

#[test]
fn activation_fades_everything_out_first() {
    let mut orc = Orchestrator::new();
    let plan = orc.activate(PresetId::NeuralSync);
    for v in VisualEffectId::ALL {
        assert!(plan
            .iter()
            .any(|s| s.delay_ms == 0 && s.action == Action::SetVisual(v, false)));
    }
}

#[test]
fn activation_staggers_the_presets_visuals() {
    let mut orc = Orchestrator::new();
    let plan = orc.activate(PresetId::InfinityLoop);
    let ons = visual_ons(&plan);
    let expected = preset(PresetId::InfinityLoop).visuals;
    assert_eq!(ons.len(), expected.len());
    for (i, &(delay, v)) in ons.iter().enumerate() {
        assert_eq!(v, expected[i]);
        assert_eq!(delay, ACTIVATE_DELAY_MS + i as u32 * STAGGER_MS);
    }
}

#[test]
fn activation_carries_audio_resonance_and_announcement() {
    let mut orc = Orchestrator::new();
    let plan = orc.activate(PresetId::AlphaResonance);
    assert!(plan
        .iter()
        .any(|s| s.action == Action::EnsureSoundscape(SoundscapeId::Alpha)));
    assert!(plan
        .iter()
        .any(|s| s.action == Action::SyncTrack(SoundscapeId::Alpha)));
    assert!(plan.iter().any(|s| matches!(
        s.action,
        Action::SetResonance(Resonance {
            alpha: 100,
            omega: 30,
            vega: 50
        })
    )));
    let ev = plan
        .iter()
        .find_map(|s| match s.action {
            Action::EmitChange(ev) => Some(ev),
            _ => None,
        })
        .unwrap();
    assert_eq!(ev.preset, PresetId::AlphaResonance);
    assert_eq!(ev.phase, 3);
    assert_eq!(ev.color, "#00ffff");
    assert!(plan.iter().any(|s| s.action == Action::StartAnimation));
    assert_eq!(orc.current(), Some(PresetId::AlphaResonance));
}

#[test]
fn perfect_orchestration_is_the_slow_all_on_sweep() {
    let mut orc = Orchestrator::new();
    let plan = orc.perfect_orchestration();
    let ons = visual_ons(&plan);
    assert_eq!(ons.len(), 4);
    for (i, &(delay, _)) in ons.iter().enumerate() {
        assert_eq!(delay, i as u32 * PERFECT_STAGGER_MS);
    }
    assert!(plan
        .iter()
        .any(|s| s.action == Action::SetResonance(Resonance::MAX)));
    assert!(plan
        .iter()
        .any(|s| s.action == Action::EnsureSoundscape(SoundscapeId::Cosmic)));
    assert_eq!(orc.current(), Some(PresetId::InfinityLoop));
}

#[test]
fn perfect_orchestration_clears_layers_outside_the_sweep() {
    let mut orc = Orchestrator::new();
    let plan = orc.perfect_orchestration();
    let swept = preset(PresetId::InfinityLoop).visuals;
    for v in VisualEffectId::ALL {
        if swept.contains(&v) {
            // swept layers only ever fade in
            assert!(!plan
                .iter()
                .any(|s| s.action == Action::SetVisual(v, false)));
        } else {
            assert!(plan
                .iter()
                .any(|s| s.delay_ms == 0 && s.action == Action::SetVisual(v, false)));
        }
    }
}

#[test]
fn skip_sound_leaves_the_audio_graph_alone() {
    let mut orc = Orchestrator::new();
    let plan = orc.activate_with(PresetId::OmegaWave, true);
    assert!(!plan
        .iter()
        .any(|s| matches!(s.action, Action::EnsureSoundscape(_) | Action::SyncTrack(_))));
    assert!(!visual_ons(&plan).is_empty());
}

#[test]
fn cycle_walks_the_rotation_and_wraps() {
    let mut orc = Orchestrator::new();
    orc.start_cycle();
    assert_eq!(orc.current(), Some(CYCLE_ORDER[0]));
    for i in 1..CYCLE_ORDER.len() * 2 {
        orc.advance_cycle();
        assert_eq!(orc.current(), Some(CYCLE_ORDER[i % CYCLE_ORDER.len()]));
    }
}

#[test]
fn restarting_the_cycle_resets_its_position() {
    let mut orc = Orchestrator::new();
    orc.start_cycle();
    orc.advance_cycle();
    orc.advance_cycle();
    assert_eq!(orc.cycle_index(), 2);
    orc.start_cycle();
    assert_eq!(orc.cycle_index(), 0);
    assert_eq!(orc.current(), Some(CYCLE_ORDER[0]));
}

#[test]
fn manual_activation_does_not_touch_cycle_position() {
    let mut orc = Orchestrator::new();
    orc.start_cycle();
    orc.advance_cycle();
    let idx = orc.cycle_index();
    orc.activate(PresetId::AmbientDrift);
    assert_eq!(orc.cycle_index(), idx);
    assert_eq!(orc.current(), Some(PresetId::AmbientDrift));
}
