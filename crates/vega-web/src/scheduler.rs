//! Timeout/interval bookkeeping. Every handle registered here can be
//! cancelled in one call, so a new orchestration plan supersedes any
//! staggered steps still pending from the previous one.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Default)]
pub struct Scheduler {
    // (handle, closure) pairs; closures must outlive their timers
    pending: Vec<(i32, Closure<dyn FnMut()>)>,
    interval: Option<(i32, Closure<dyn FnMut()>)>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` once after `delay_ms`.
    pub fn schedule(&mut self, delay_ms: u32, f: impl FnMut() + 'static) {
        let Some(window) = web::window() else { return };
        let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay_ms as i32,
        ) {
            Ok(handle) => self.pending.push((handle, closure)),
            Err(e) => log::error!("setTimeout error: {:?}", e),
        }
    }

    /// Install the repeating tick, replacing any existing one.
    pub fn set_interval(&mut self, period_ms: u32, f: impl FnMut() + 'static) {
        self.cancel_interval();
        let Some(window) = web::window() else { return };
        let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            period_ms as i32,
        ) {
            Ok(handle) => self.interval = Some((handle, closure)),
            Err(e) => log::error!("setInterval error: {:?}", e),
        }
    }

    pub fn has_interval(&self) -> bool {
        self.interval.is_some()
    }

    /// Drop every timeout that has not fired yet.
    pub fn cancel_pending(&mut self) {
        if let Some(window) = web::window() {
            for (handle, _) in &self.pending {
                window.clear_timeout_with_handle(*handle);
            }
        }
        self.pending.clear();
    }

    pub fn cancel_interval(&mut self) {
        if let Some((handle, _)) = self.interval.take() {
            if let Some(window) = web::window() {
                window.clear_interval_with_handle(handle);
            }
        }
    }
}
