//! Static registries: orchestration presets, visual effect configs and
//! soundscape synthesis recipes.
//!
//! Ids are closed enums, so a preset can only ever reference effects and
//! soundscapes that exist; the tests assert the tables are total.

/// A toggleable audio synthesis recipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundscapeId {
    Alpha,
    Omega,
    Vega,
    Ambient,
    Cosmic,
    Neural,
}

impl SoundscapeId {
    pub const ALL: [SoundscapeId; 6] = [
        SoundscapeId::Alpha,
        SoundscapeId::Omega,
        SoundscapeId::Vega,
        SoundscapeId::Ambient,
        SoundscapeId::Cosmic,
        SoundscapeId::Neural,
    ];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            SoundscapeId::Alpha => 0,
            SoundscapeId::Omega => 1,
            SoundscapeId::Vega => 2,
            SoundscapeId::Ambient => 3,
            SoundscapeId::Cosmic => 4,
            SoundscapeId::Neural => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SoundscapeId::Alpha => "alpha",
            SoundscapeId::Omega => "omega",
            SoundscapeId::Vega => "vega",
            SoundscapeId::Ambient => "ambient",
            SoundscapeId::Cosmic => "cosmic",
            SoundscapeId::Neural => "neural",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == s)
    }

    /// The visual effect that shares this soundscape's name, used when
    /// a soundscape toggle also drives its matching visual layer.
    pub fn visual(self) -> VisualEffectId {
        match self {
            SoundscapeId::Alpha => VisualEffectId::Alpha,
            SoundscapeId::Omega => VisualEffectId::Omega,
            SoundscapeId::Vega => VisualEffectId::Vega,
            SoundscapeId::Ambient => VisualEffectId::Ambient,
            SoundscapeId::Cosmic => VisualEffectId::Cosmic,
            SoundscapeId::Neural => VisualEffectId::Neural,
        }
    }
}

/// A named full-screen canvas effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisualEffectId {
    Alpha,
    Omega,
    Vega,
    Ambient,
    Cosmic,
    Neural,
}

impl VisualEffectId {
    pub const COUNT: usize = 6;
    pub const ALL: [VisualEffectId; Self::COUNT] = [
        VisualEffectId::Alpha,
        VisualEffectId::Omega,
        VisualEffectId::Vega,
        VisualEffectId::Ambient,
        VisualEffectId::Cosmic,
        VisualEffectId::Neural,
    ];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            VisualEffectId::Alpha => 0,
            VisualEffectId::Omega => 1,
            VisualEffectId::Vega => 2,
            VisualEffectId::Ambient => 3,
            VisualEffectId::Cosmic => 4,
            VisualEffectId::Neural => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VisualEffectId::Alpha => "alpha",
            VisualEffectId::Omega => "omega",
            VisualEffectId::Vega => "vega",
            VisualEffectId::Ambient => "ambient",
            VisualEffectId::Cosmic => "cosmic",
            VisualEffectId::Neural => "neural",
        }
    }

    /// Inverse of [`SoundscapeId::visual`].
    pub fn soundscape(self) -> SoundscapeId {
        match self {
            VisualEffectId::Alpha => SoundscapeId::Alpha,
            VisualEffectId::Omega => SoundscapeId::Omega,
            VisualEffectId::Vega => SoundscapeId::Vega,
            VisualEffectId::Ambient => SoundscapeId::Ambient,
            VisualEffectId::Cosmic => SoundscapeId::Cosmic,
            VisualEffectId::Neural => SoundscapeId::Neural,
        }
    }
}

/// Draw strategy variant for an effect; one renderer per kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    IceCrystals,
    AuroraWaves,
    CosmicGlow,
    FogMist,
    StarfieldNebula,
    RainbowPrismatic,
}

pub struct EffectConfig {
    pub kind: EffectKind,
    pub colors: &'static [&'static str],
    pub base_opacity: f32,
}

// In VisualEffectId::ALL order.
static EFFECT_CONFIGS: [EffectConfig; VisualEffectId::COUNT] = [
    EffectConfig {
        kind: EffectKind::IceCrystals,
        colors: &["#00ffff", "#0088ff", "#00ddff", "#66ffff"],
        base_opacity: 0.15,
    },
    EffectConfig {
        kind: EffectKind::AuroraWaves,
        colors: &["#8b5cf6", "#a855f7", "#c084fc", "#7c3aed"],
        base_opacity: 0.2,
    },
    EffectConfig {
        kind: EffectKind::CosmicGlow,
        colors: &["#ffd700", "#00ff88", "#88ff00", "#ffaa00"],
        base_opacity: 0.18,
    },
    EffectConfig {
        kind: EffectKind::FogMist,
        colors: &["#1a1a2e", "#2d2d44", "#0a0a15", "#15152a"],
        base_opacity: 0.25,
    },
    EffectConfig {
        kind: EffectKind::StarfieldNebula,
        colors: &["#00ffff", "#8b5cf6", "#ff00ff", "#00ff88", "#ffd700"],
        base_opacity: 0.2,
    },
    EffectConfig {
        kind: EffectKind::RainbowPrismatic,
        colors: &["#ff0000", "#ff7700", "#ffff00", "#00ff00", "#0077ff", "#8b00ff"],
        base_opacity: 0.22,
    },
];

#[inline]
pub fn effect_config(id: VisualEffectId) -> &'static EffectConfig {
    &EFFECT_CONFIGS[id.index()]
}

/// Displayed intensity per resonance band, in percent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resonance {
    pub alpha: u8,
    pub omega: u8,
    pub vega: u8,
}

impl Resonance {
    pub const MAX: Resonance = Resonance {
        alpha: 100,
        omega: 100,
        vega: 100,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PresetId {
    AlphaResonance,
    OmegaWave,
    VegaCrystal,
    CosmicUnity,
    NeuralSync,
    AmbientDrift,
    InfinityLoop,
}

impl PresetId {
    pub const ALL: [PresetId; 7] = [
        PresetId::AlphaResonance,
        PresetId::OmegaWave,
        PresetId::VegaCrystal,
        PresetId::CosmicUnity,
        PresetId::NeuralSync,
        PresetId::AmbientDrift,
        PresetId::InfinityLoop,
    ];

    #[inline]
    fn index(self) -> usize {
        match self {
            PresetId::AlphaResonance => 0,
            PresetId::OmegaWave => 1,
            PresetId::VegaCrystal => 2,
            PresetId::CosmicUnity => 3,
            PresetId::NeuralSync => 4,
            PresetId::AmbientDrift => 5,
            PresetId::InfinityLoop => 6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PresetId::AlphaResonance => "alpha_resonance",
            PresetId::OmegaWave => "omega_wave",
            PresetId::VegaCrystal => "vega_crystal",
            PresetId::CosmicUnity => "cosmic_unity",
            PresetId::NeuralSync => "neural_sync",
            PresetId::AmbientDrift => "ambient_drift",
            PresetId::InfinityLoop => "infinity_loop",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == s)
    }
}

pub struct Preset {
    pub id: PresetId,
    pub name: &'static str,
    pub description: &'static str,
    pub visuals: &'static [VisualEffectId],
    pub soundscape: Option<SoundscapeId>,
    pub resonance: Resonance,
    pub phase: u8,
    pub color: &'static str,
}

/// Rotation order used by the automatic preset cycle.
pub const CYCLE_ORDER: [PresetId; 5] = [
    PresetId::AlphaResonance,
    PresetId::OmegaWave,
    PresetId::VegaCrystal,
    PresetId::CosmicUnity,
    PresetId::InfinityLoop,
];

// In PresetId::ALL order.
static PRESETS: [Preset; 7] = [
    Preset {
        id: PresetId::AlphaResonance,
        name: "Alpha Resonance",
        description: "Ice crystal clarity • 63Hz-126Hz • Mental focus",
        visuals: &[VisualEffectId::Alpha],
        soundscape: Some(SoundscapeId::Alpha),
        resonance: Resonance {
            alpha: 100,
            omega: 30,
            vega: 50,
        },
        phase: 3,
        color: "#00ffff",
    },
    Preset {
        id: PresetId::OmegaWave,
        name: "Omega Wave",
        description: "Aurora flow • 285Hz-396Hz • Deep relaxation",
        visuals: &[VisualEffectId::Omega],
        soundscape: Some(SoundscapeId::Omega),
        resonance: Resonance {
            alpha: 30,
            omega: 100,
            vega: 50,
        },
        phase: 5,
        color: "#8b5cf6",
    },
    Preset {
        id: PresetId::VegaCrystal,
        name: "Vega Crystal",
        description: "Cosmic glow • 528Hz-639Hz • Heart opening",
        visuals: &[VisualEffectId::Vega],
        soundscape: Some(SoundscapeId::Vega),
        resonance: Resonance {
            alpha: 50,
            omega: 50,
            vega: 100,
        },
        phase: 8,
        color: "#ffd700",
    },
    Preset {
        id: PresetId::CosmicUnity,
        name: "Cosmic Unity",
        description: "Starfield nebula • Full spectrum • Universal connection",
        visuals: &[VisualEffectId::Cosmic, VisualEffectId::Vega],
        soundscape: Some(SoundscapeId::Cosmic),
        resonance: Resonance {
            alpha: 80,
            omega: 80,
            vega: 100,
        },
        phase: 8,
        color: "#ff00ff",
    },
    Preset {
        id: PresetId::NeuralSync,
        name: "Neural Sync",
        description: "Rainbow prismatic • All frequencies • Complete activation",
        visuals: &[
            VisualEffectId::Neural,
            VisualEffectId::Alpha,
            VisualEffectId::Omega,
        ],
        soundscape: Some(SoundscapeId::Neural),
        resonance: Resonance::MAX,
        phase: 8,
        color: "#00ff88",
    },
    Preset {
        id: PresetId::AmbientDrift,
        name: "Ambient Drift",
        description: "Fog mist • Low frequencies • Deep meditation",
        visuals: &[VisualEffectId::Ambient],
        soundscape: Some(SoundscapeId::Ambient),
        resonance: Resonance {
            alpha: 40,
            omega: 60,
            vega: 40,
        },
        phase: 3,
        color: "#2d2d44",
    },
    Preset {
        id: PresetId::InfinityLoop,
        name: "Infinity Loop 3-5-8",
        description: "Complete cycle • All resonance • Perfect harmony",
        visuals: &[
            VisualEffectId::Alpha,
            VisualEffectId::Omega,
            VisualEffectId::Vega,
            VisualEffectId::Cosmic,
        ],
        soundscape: Some(SoundscapeId::Cosmic),
        resonance: Resonance::MAX,
        phase: 8,
        color: "#00ffff",
    },
];

#[inline]
pub fn preset(id: PresetId) -> &'static Preset {
    &PRESETS[id.index()]
}

/// A single steady tone within a soundscape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub freq: f32,
    pub gain: f32,
}

const fn tone(freq: f32, gain: f32) -> Tone {
    Tone { freq, gain }
}

/// Synthesis recipe for one soundscape. The audio layer owns the actual
/// node graph; this is data only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Recipe {
    /// Detuned tone bank, each tone with slow random pitch drift.
    ToneBank(&'static [Tone]),
    /// Sub tone plus a lowpass-filtered looping noise bed.
    TonesWithNoise {
        tones: &'static [Tone],
        noise_gain: f32,
        noise_amp: f32,
        lowpass_hz: f32,
    },
    /// Stereo binaural pair plus a mono carrier tone.
    Binaural {
        base_hz: f32,
        beat_hz: f32,
        pair_gain: f32,
        carrier_hz: f32,
        carrier_gain: f32,
    },
}

// In SoundscapeId::ALL order.
static RECIPES: [Recipe; 6] = [
    Recipe::ToneBank(&[tone(63.0, 0.5), tone(126.0, 0.35)]),
    Recipe::ToneBank(&[tone(285.0, 0.3), tone(396.0, 0.25)]),
    Recipe::ToneBank(&[tone(528.0, 0.2), tone(639.0, 0.15)]),
    Recipe::TonesWithNoise {
        tones: &[tone(40.0, 0.4)],
        noise_gain: 0.4,
        noise_amp: 0.03,
        lowpass_hz: 300.0,
    },
    Recipe::ToneBank(&[
        tone(63.0, 0.25),
        tone(126.0, 0.2),
        tone(174.0, 0.15),
        tone(285.0, 0.12),
        tone(396.0, 0.1),
        tone(528.0, 0.08),
        tone(639.0, 0.06),
    ]),
    Recipe::Binaural {
        base_hz: 200.0,
        beat_hz: 10.0,
        pair_gain: 0.3,
        carrier_hz: 432.0,
        carrier_gain: 0.15,
    },
];

#[inline]
pub fn recipe(id: SoundscapeId) -> &'static Recipe {
    &RECIPES[id.index()]
}

/// External playlist synced to each soundscape (best-effort).
pub fn track_url(id: SoundscapeId) -> &'static str {
    match id {
        SoundscapeId::Alpha => "https://soundcloud.com/anlaetan/sets/resonance-core",
        SoundscapeId::Omega => "https://soundcloud.com/anlaetan/sets/infinity-loop",
        SoundscapeId::Vega => "https://soundcloud.com/anlaetan/sets/vega-sessions",
        SoundscapeId::Ambient => "https://soundcloud.com/anlaetan/sets/cosmic-drift",
        SoundscapeId::Cosmic => "https://soundcloud.com/anlaetan/sets",
        SoundscapeId::Neural => "https://soundcloud.com/anlaetan/sets/infinity-loop",
    }
}
