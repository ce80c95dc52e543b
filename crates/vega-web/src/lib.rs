#![cfg(target_arch = "wasm32")]
//! Browser entry point: builds the full-viewport canvas, wires the
//! control panels and hands everything to the orchestration controller.

use std::rc::Rc;
use vega_core::{PresetId, SoundscapeId};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub mod audio;
pub mod canvas;
pub mod dom;
pub mod frame;
pub mod music;
pub mod orchestrate;
pub mod panel;
pub mod scheduler;
pub mod status;

use orchestrate::Controller;

const CANVAS_ID: &str = "vega-canvas";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("vega-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas = create_effect_canvas(&document)?;
    let ctx2d = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<web::CanvasRenderingContext2d>().ok())
        .ok_or_else(|| anyhow::anyhow!("no 2d context"))?;

    let controller = Controller::new(canvas, ctx2d);
    wire_controls(&document, &controller);
    panel::make_draggable(&document, "control-panel");
    panel::make_draggable(&document, "resonance-panel");

    spawn_local(status::load_site_config());
    status::start_polling();
    Ok(())
}

/// Full-viewport canvas behind the page content, inserted as the first
/// body child and kept sized to the window.
fn create_effect_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas.set_id(CANVAS_ID);
    let _ = canvas.set_attribute(
        "style",
        "position:fixed;top:0;left:0;width:100vw;height:100vh;pointer-events:none;z-index:0",
    );

    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no body"))?;
    let _ = body.insert_before(&canvas, body.first_child().as_ref());

    dom::sync_canvas_backing_size(&canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        let _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
    Ok(canvas)
}

fn wire_controls(document: &web::Document, controller: &Rc<Controller>) {
    // preset buttons carry their id in a data attribute
    if let Ok(buttons) = document.query_selector_all("[data-preset]") {
        for i in 0..buttons.length() {
            let Some(el) = buttons.item(i).and_then(|n| n.dyn_into::<web::Element>().ok())
            else {
                continue;
            };
            let Some(id) = el.get_attribute("data-preset").and_then(|s| PresetId::parse(&s))
            else {
                log::warn!("unknown data-preset on element {}", i);
                continue;
            };
            let ctrl = controller.clone();
            let closure = Closure::wrap(Box::new(move || {
                ctrl.activate_preset(id);
            }) as Box<dyn FnMut()>);
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    // soundscape toggle buttons
    if let Ok(buttons) = document.query_selector_all("[data-soundscape]") {
        for i in 0..buttons.length() {
            let Some(el) = buttons.item(i).and_then(|n| n.dyn_into::<web::Element>().ok())
            else {
                continue;
            };
            let Some(id) = el
                .get_attribute("data-soundscape")
                .and_then(|s| SoundscapeId::parse(&s))
            else {
                continue;
            };
            let ctrl = controller.clone();
            let closure = Closure::wrap(Box::new(move || {
                ctrl.toggle_soundscape(id);
            }) as Box<dyn FnMut()>);
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    {
        let ctrl = controller.clone();
        dom::add_click_listener(document, "perfect-orchestration", move || {
            ctrl.perfect_orchestration();
            let p = vega_core::preset(PresetId::InfinityLoop);
            spawn_local(async move {
                let text = status::orchestration_description(p.name, p.phase).await;
                if let Some(doc) = dom::window_document() {
                    dom::set_text(&doc, "orchestration-description", &text);
                }
            });
        });
    }
    {
        let ctrl = controller.clone();
        dom::add_click_listener(document, "start-cycle", move || {
            ctrl.start_cycle(None);
        });
    }
    {
        let ctrl = controller.clone();
        dom::add_click_listener(document, "stop-cycle", move || {
            ctrl.stop_cycle();
        });
    }
    {
        let ctrl = controller.clone();
        dom::add_click_listener(document, "stop-audio", move || {
            ctrl.shutdown_audio();
        });
    }

    // volume sliders are 0..100
    {
        let ctrl = controller.clone();
        dom::add_input_listener(document, "master-volume", move |value| {
            if let Ok(v) = value.parse::<f32>() {
                ctrl.audio.borrow_mut().set_master_volume(v / 100.0);
            }
        });
    }
    for id in SoundscapeId::ALL {
        let ctrl = controller.clone();
        dom::add_input_listener(document, &format!("volume-{}", id.as_str()), move |value| {
            if let Ok(v) = value.parse::<f32>() {
                ctrl.audio.borrow_mut().set_volume(id, v / 100.0);
            }
        });
    }
}
