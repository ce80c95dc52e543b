// Shared tuning constants used by the web frontend and the core state
// machines.

// Visual mixer
pub const FRAME_STEP: f32 = 0.016; // nominal per-frame time advance (~60 Hz)
pub const EASE_RATE: f32 = 0.02; // exponential approach factor per frame
pub const VISIBILITY_THRESHOLD: f32 = 0.01; // progress below this is not drawn

// Starfield
pub const PARTICLE_COUNT: usize = 150;

// Orchestration timing (milliseconds)
pub const ACTIVATE_DELAY_MS: u32 = 300; // pause between fade-out and fade-in
pub const STAGGER_MS: u32 = 200; // per-visual fade-in offset
pub const PERFECT_STAGGER_MS: u32 = 500; // slower stagger for the all-on sweep
pub const DEFAULT_CYCLE_MS: u32 = 30_000;

// Audio defaults
pub const DEFAULT_MASTER_VOLUME: f32 = 0.35;
pub const DEFAULT_SCAPE_VOLUME: f32 = 0.5;
pub const GAIN_RAMP_SECS: f64 = 1.0; // linear ramp-in on soundscape start
pub const LFO_RATE_MIN_HZ: f32 = 0.1; // slow random pitch drift
pub const LFO_RATE_SPAN_HZ: f32 = 0.2;
pub const LFO_DEPTH_RATIO: f32 = 0.02; // drift depth as a fraction of base freq

// Panel dragging (CSS pixels)
pub const EDGE_THRESHOLD: f32 = 60.0; // screen-edge band that triggers snap
pub const MIN_REACHABLE: f32 = 50.0; // part of the panel that must stay onscreen
pub const TAB_VISIBLE: f32 = 40.0; // sliver left visible when edge-hidden
