use vega_core::preset::*;

#[test]
fn every_preset_resolves() {
    for id in PresetId::ALL {
        let p = preset(id);
        assert_eq!(p.id, id);
        assert!(!p.name.is_empty());
        assert!(!p.visuals.is_empty());
        assert!(p.color.starts_with('#') && p.color.len() == 7);
        assert!(matches!(p.phase, 3 | 5 | 8));
    }
}

#[test]
fn preset_ids_round_trip() {
    for id in PresetId::ALL {
        assert_eq!(PresetId::parse(id.as_str()), Some(id));
    }
    assert_eq!(PresetId::parse("nonsense"), None);
}

#[test]
fn soundscape_ids_round_trip() {
    for id in SoundscapeId::ALL {
        assert_eq!(SoundscapeId::parse(id.as_str()), Some(id));
        assert_eq!(id.visual().soundscape(), id);
    }
}

#[test]
fn visual_indices_are_a_bijection() {
    let mut seen = [false; VisualEffectId::COUNT];
    for id in VisualEffectId::ALL {
        assert!(!seen[id.index()]);
        seen[id.index()] = true;
    }
    assert!(seen.iter().all(|&s| s));
}

#[test]
fn every_soundscape_has_a_recipe_and_track() {
    for id in SoundscapeId::ALL {
        match *recipe(id) {
            Recipe::ToneBank(tones) => {
                assert!(!tones.is_empty());
                for t in tones {
                    assert!(t.freq > 0.0 && t.gain > 0.0);
                }
            }
            Recipe::TonesWithNoise {
                tones, lowpass_hz, ..
            } => {
                assert!(!tones.is_empty());
                assert!(lowpass_hz > 0.0);
            }
            Recipe::Binaural {
                base_hz, beat_hz, ..
            } => {
                assert!(base_hz > 0.0 && beat_hz > 0.0);
            }
        }
        assert!(track_url(id).starts_with("https://"));
    }
}

#[test]
fn effect_configs_are_total() {
    for id in VisualEffectId::ALL {
        let cfg = effect_config(id);
        assert!(!cfg.colors.is_empty());
        assert!(cfg.base_opacity > 0.0 && cfg.base_opacity < 1.0);
        for c in cfg.colors {
            assert!(c.starts_with('#') && c.len() == 7, "bad color {c}");
        }
    }
}

#[test]
fn cycle_order_uses_known_presets() {
    for id in CYCLE_ORDER {
        assert!(PresetId::ALL.contains(&id));
    }
    assert_eq!(CYCLE_ORDER[0], PresetId::AlphaResonance);
    assert_eq!(CYCLE_ORDER[CYCLE_ORDER.len() - 1], PresetId::InfinityLoop);
}
