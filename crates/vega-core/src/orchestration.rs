//! Preset orchestration planner.
//!
//! Activating a preset is expressed as a pure plan: a list of actions,
//! each with a delay relative to now. The web layer walks the plan,
//! runs the zero-delay actions inline and schedules the rest, and can
//! cancel everything still pending when a new plan supersedes it. The
//! planner itself never touches a timer.

use smallvec::SmallVec;

use crate::constants::{ACTIVATE_DELAY_MS, PERFECT_STAGGER_MS, STAGGER_MS};
use crate::preset::{
    preset, PresetId, Resonance, SoundscapeId, VisualEffectId, CYCLE_ORDER,
};

/// One side effect the host must perform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    SetVisual(VisualEffectId, bool),
    /// Start the soundscape if it is not already running.
    EnsureSoundscape(SoundscapeId),
    /// Point the external player at the soundscape's playlist.
    SyncTrack(SoundscapeId),
    SetResonance(Resonance),
    /// Announce the preset change to listeners outside the engine.
    EmitChange(ChangeEvent),
    /// Make sure the render loop is running.
    StartAnimation,
}

/// Payload carried by the preset-change announcement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChangeEvent {
    pub preset: PresetId,
    pub name: &'static str,
    pub phase: u8,
    pub color: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scheduled {
    pub delay_ms: u32,
    pub action: Action,
}

pub type Plan = SmallVec<[Scheduled; 16]>;

fn at(delay_ms: u32, action: Action) -> Scheduled {
    Scheduled { delay_ms, action }
}

/// Tracks the active preset and the automatic rotation position.
#[derive(Default)]
pub struct Orchestrator {
    current: Option<PresetId>,
    cycle_index: usize,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<PresetId> {
        self.current
    }

    /// Build the activation plan for a preset. All visual layers fade
    /// out immediately; the preset's own layers fade back in after a
    /// short gap, staggered so they bloom one at a time.
    pub fn activate(&mut self, id: PresetId) -> Plan {
        self.activate_with(id, false)
    }

    /// `skip_sound` leaves the audio graph alone, for callers that
    /// only want the visual side of a preset.
    pub fn activate_with(&mut self, id: PresetId, skip_sound: bool) -> Plan {
        let p = preset(id);
        self.current = Some(id);

        let mut plan = Plan::new();
        for v in VisualEffectId::ALL {
            plan.push(at(0, Action::SetVisual(v, false)));
        }
        plan.push(at(0, Action::SetResonance(p.resonance)));
        if !skip_sound {
            if let Some(s) = p.soundscape {
                plan.push(at(0, Action::EnsureSoundscape(s)));
                plan.push(at(0, Action::SyncTrack(s)));
            }
        }
        plan.push(at(
            0,
            Action::EmitChange(ChangeEvent {
                preset: id,
                name: p.name,
                phase: p.phase,
                color: p.color,
            }),
        ));
        for (i, &v) in p.visuals.iter().enumerate() {
            plan.push(at(
                ACTIVATE_DELAY_MS + i as u32 * STAGGER_MS,
                Action::SetVisual(v, true),
            ));
        }
        plan.push(at(0, Action::StartAnimation));
        plan
    }

    /// The "everything on" sweep: the full infinity preset with every
    /// band at maximum, layers brought up slowly one by one. Layers
    /// outside the sweep fade out first so nothing stale lingers.
    pub fn perfect_orchestration(&mut self) -> Plan {
        let id = PresetId::InfinityLoop;
        let p = preset(id);
        self.current = Some(id);

        let mut plan = Plan::new();
        for v in VisualEffectId::ALL {
            if !p.visuals.contains(&v) {
                plan.push(at(0, Action::SetVisual(v, false)));
            }
        }
        for (i, &v) in p.visuals.iter().enumerate() {
            plan.push(at(i as u32 * PERFECT_STAGGER_MS, Action::SetVisual(v, true)));
        }
        plan.push(at(0, Action::SetResonance(Resonance::MAX)));
        plan.push(at(0, Action::EnsureSoundscape(SoundscapeId::Cosmic)));
        plan.push(at(0, Action::SyncTrack(SoundscapeId::Cosmic)));
        plan.push(at(
            0,
            Action::EmitChange(ChangeEvent {
                preset: id,
                name: p.name,
                phase: p.phase,
                color: p.color,
            }),
        ));
        plan.push(at(0, Action::StartAnimation));
        plan
    }

    /// Restart the rotation from the top and activate its first preset.
    pub fn start_cycle(&mut self) -> Plan {
        self.cycle_index = 0;
        self.activate(CYCLE_ORDER[0])
    }

    /// Advance to the next preset in the rotation, wrapping at the end.
    pub fn advance_cycle(&mut self) -> Plan {
        self.cycle_index = (self.cycle_index + 1) % CYCLE_ORDER.len();
        self.activate(CYCLE_ORDER[self.cycle_index])
    }

    pub fn cycle_index(&self) -> usize {
        self.cycle_index
    }
}
