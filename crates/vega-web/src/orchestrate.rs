//! Orchestration controller: owns the planner, the mixer, the audio
//! engine and the scheduler, and turns plans into DOM/audio effects.
//!
//! Plans supersede each other: running a new one first cancels every
//! timeout still pending from the previous plan, so staggered fade-ins
//! from an abandoned preset can never land on top of the new one.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use vega_core::{
    Action, ChangeEvent, Orchestrator, ParticleField, Plan, PresetId, Resonance, SoundscapeId,
    VisualMixer, DEFAULT_CYCLE_MS,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys as web;

use crate::audio::AudioEngine;
use crate::dom;
use crate::frame::{start_loop, FrameContext};
use crate::music;
use crate::scheduler::Scheduler;
use crate::status;

pub const CHANGE_EVENT: &str = "orchestrationChange";

pub struct Controller {
    orchestrator: RefCell<Orchestrator>,
    pub mixer: Rc<RefCell<VisualMixer>>,
    pub audio: Rc<RefCell<AudioEngine>>,
    scheduler: RefCell<Scheduler>,
    canvas: web::HtmlCanvasElement,
    ctx2d: web::CanvasRenderingContext2d,
    loop_started: Cell<bool>,
}

impl Controller {
    pub fn new(
        canvas: web::HtmlCanvasElement,
        ctx2d: web::CanvasRenderingContext2d,
    ) -> Rc<Self> {
        Rc::new(Self {
            orchestrator: RefCell::new(Orchestrator::new()),
            mixer: Rc::new(RefCell::new(VisualMixer::new())),
            audio: Rc::new(RefCell::new(AudioEngine::new())),
            scheduler: RefCell::new(Scheduler::new()),
            canvas,
            ctx2d,
            loop_started: Cell::new(false),
        })
    }

    pub fn current_preset(&self) -> Option<PresetId> {
        self.orchestrator.borrow().current()
    }

    pub fn activate_preset(self: &Rc<Self>, id: PresetId) {
        let plan = self.orchestrator.borrow_mut().activate(id);
        self.run_plan(plan);
        if id == PresetId::InfinityLoop {
            status::notify_infinity_start();
        }
    }

    pub fn perfect_orchestration(self: &Rc<Self>) {
        let plan = self.orchestrator.borrow_mut().perfect_orchestration();
        self.run_plan(plan);
        status::notify_infinity_start();
    }

    /// Begin the automatic rotation. Restarting replaces the previous
    /// cycle timer, so there is at most one alive.
    pub fn start_cycle(self: &Rc<Self>, period_ms: Option<u32>) {
        let plan = self.orchestrator.borrow_mut().start_cycle();
        self.run_plan(plan);
        let ctrl = self.clone();
        self.scheduler
            .borrow_mut()
            .set_interval(period_ms.unwrap_or(DEFAULT_CYCLE_MS), move || {
                let plan = ctrl.orchestrator.borrow_mut().advance_cycle();
                ctrl.run_plan(plan);
                status::notify_infinity_iterate();
            });
    }

    /// Cancel only the repeating cycle timer; any staggered fade-ins
    /// from the current activation keep running.
    pub fn stop_cycle(&self) {
        self.scheduler.borrow_mut().cancel_interval();
    }

    pub fn cycle_running(&self) -> bool {
        self.scheduler.borrow().has_interval()
    }

    /// Manual soundscape toggle; the matching visual layer follows the
    /// audio state.
    pub fn toggle_soundscape(self: &Rc<Self>, id: SoundscapeId) {
        let on = self.audio.borrow_mut().toggle(id);
        self.mixer.borrow_mut().set_active(id.visual(), on);
        if on {
            self.ensure_animation();
            if let Some(doc) = dom::window_document() {
                music::sync_track(&doc, id);
            }
        }
    }

    pub fn shutdown_audio(&self) {
        self.audio.borrow_mut().shutdown();
    }

    fn run_plan(self: &Rc<Self>, plan: Plan) {
        self.scheduler.borrow_mut().cancel_pending();
        let mut deferred = Plan::new();
        for step in plan {
            if step.delay_ms == 0 {
                self.apply(step.action);
            } else {
                deferred.push(step);
            }
        }
        let mut sched = self.scheduler.borrow_mut();
        for step in deferred {
            let ctrl = self.clone();
            sched.schedule(step.delay_ms, move || ctrl.apply(step.action));
        }
    }

    fn apply(self: &Rc<Self>, action: Action) {
        match action {
            Action::SetVisual(v, on) => self.mixer.borrow_mut().set_active(v, on),
            Action::EnsureSoundscape(s) => self.audio.borrow_mut().activate(s),
            Action::SyncTrack(s) => {
                if let Some(doc) = dom::window_document() {
                    music::sync_track(&doc, s);
                }
            }
            Action::SetResonance(r) => update_resonance_display(r),
            Action::EmitChange(ev) => emit_change(&ev),
            Action::StartAnimation => self.ensure_animation(),
        }
    }

    /// Start the render loop once; later calls are no-ops.
    fn ensure_animation(self: &Rc<Self>) {
        if self.loop_started.replace(true) {
            return;
        }
        let w = self.canvas.width() as f32;
        let h = self.canvas.height() as f32;
        let frame_ctx = Rc::new(RefCell::new(FrameContext {
            mixer: self.mixer.clone(),
            canvas: self.canvas.clone(),
            ctx2d: self.ctx2d.clone(),
            stars: ParticleField::new(js_sys::Date::now() as u64, w, h),
        }));
        start_loop(frame_ctx);
    }
}

fn update_resonance_display(r: Resonance) {
    let Some(doc) = dom::window_document() else { return };
    for (name, pct) in [("alpha", r.alpha), ("omega", r.omega), ("vega", r.vega)] {
        dom::set_text(&doc, &format!("resonance-{name}-value"), &format!("{pct}%"));
        if let Some(bar) = doc.get_element_by_id(&format!("resonance-{name}-bar")) {
            if let Ok(el) = bar.dyn_into::<web::HtmlElement>() {
                let _ = el.style().set_property("width", &format!("{pct}%"));
            }
        }
    }
}

/// Announce the preset change as a DOM CustomEvent on the window, so
/// page scripts outside the engine can react.
fn emit_change(ev: &ChangeEvent) {
    let Some(window) = web::window() else { return };
    let detail = js_sys::Object::new();
    let set = |k: &str, v: JsValue| {
        let _ = js_sys::Reflect::set(&detail, &JsValue::from_str(k), &v);
    };
    set("preset", JsValue::from_str(ev.preset.as_str()));
    set("name", JsValue::from_str(ev.name));
    set("phase", JsValue::from_f64(ev.phase as f64));
    set("color", JsValue::from_str(ev.color));

    let init = web::CustomEventInit::new();
    init.set_detail(&detail);
    match web::CustomEvent::new_with_event_init_dict(CHANGE_EVENT, &init) {
        Ok(event) => {
            let _ = window.dispatch_event(&event);
        }
        Err(e) => log::error!("CustomEvent error: {:?}", e),
    }

    if let Some(doc) = dom::window_document() {
        dom::set_text(&doc, "active-preset", ev.name);
        dom::set_text(&doc, "active-phase", &format!("Phase {}", ev.phase));
        if let Some(el) = doc.get_element_by_id("active-preset") {
            if let Ok(el) = el.dyn_into::<web::HtmlElement>() {
                let _ = el.style().set_property("color", ev.color);
            }
        }
    }
    log::info!("[orchestrate] {} (phase {})", ev.name, ev.phase);
}
