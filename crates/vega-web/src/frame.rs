use std::cell::RefCell;
use std::rc::Rc;
use vega_core::{ParticleField, VisualMixer};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::canvas::draw_effect;

pub struct FrameContext {
    pub mixer: Rc<RefCell<VisualMixer>>,
    pub canvas: web::HtmlCanvasElement,
    pub ctx2d: web::CanvasRenderingContext2d,
    pub stars: ParticleField,
}

impl FrameContext {
    /// One animation frame: advance every fade, then paint the layers
    /// that are above the visibility floor.
    pub fn frame(&mut self) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        self.ctx2d.clear_rect(0.0, 0.0, w, h);

        let mut mixer = self.mixer.borrow_mut();
        mixer.step();
        let time = mixer.time();
        let layers: Vec<_> = mixer.visible_layers().collect();
        drop(mixer);

        for (id, opacity) in layers {
            draw_effect(&self.ctx2d, id, opacity, time, w, h, &mut self.stars);
        }
    }
}

/// Drive the frame via requestAnimationFrame. The closure keeps itself
/// alive by re-requesting the next frame.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
