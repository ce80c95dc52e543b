//! Draggable control panels with edge hiding. Pointer events cover
//! mouse and touch; the layout record persists in localStorage so a
//! panel comes back where it was left.

use std::cell::RefCell;
use std::rc::Rc;
use vega_core::{
    centered_position, clamp_position, edge_at, snapped_position, Edge, PanelLayout,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;

fn storage_key(panel_id: &str) -> String {
    format!("vega_panel_{panel_id}")
}

fn viewport() -> (f32, f32) {
    let Some(window) = web::window() else {
        return (0.0, 0.0);
    };
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (w as f32, h as f32)
}

fn load_layout(panel_id: &str) -> PanelLayout {
    dom::local_storage()
        .and_then(|s| s.get_item(&storage_key(panel_id)).ok().flatten())
        .and_then(|json| serde_json::from_str(&json).ok())
        .unwrap_or_default()
}

fn save_layout(panel_id: &str, layout: &PanelLayout) {
    let Some(storage) = dom::local_storage() else { return };
    match serde_json::to_string(layout) {
        Ok(json) => {
            let _ = storage.set_item(&storage_key(panel_id), &json);
        }
        Err(e) => log::error!("panel layout serialize error: {e}"),
    }
}

fn set_panel_position(panel: &web::HtmlElement, x: f32, y: f32) {
    let style = panel.style();
    let _ = style.set_property("left", &format!("{x}px"));
    let _ = style.set_property("top", &format!("{y}px"));
    let _ = style.set_property("right", "auto");
    let _ = style.set_property("bottom", "auto");
}

/// Move the panel to where its layout record says it belongs.
fn apply_layout(panel: &web::HtmlElement, layout: &PanelLayout) {
    let rect = panel.get_bounding_client_rect();
    let (pw, ph) = (rect.width() as f32, rect.height() as f32);
    let (vw, vh) = viewport();
    if let Some(edge) = layout.hidden_edge {
        let along = match edge {
            Edge::Left | Edge::Right => rect.top() as f32,
            Edge::Top | Edge::Bottom => rect.left() as f32,
        };
        let (x, y) = snapped_position(edge, pw, ph, vw, vh, along);
        set_panel_position(panel, x, y);
    } else if let Some((x, y)) = layout.position {
        let (cx, cy) = clamp_position(x, y, pw, ph, vw, vh);
        set_panel_position(panel, cx, cy);
    }
}

struct DragState {
    dragging: bool,
    moved: bool,
    offset_x: f32,
    offset_y: f32,
}

/// Wire drag, edge-snap and restore behavior onto a panel element.
pub fn make_draggable(document: &web::Document, panel_id: &str) {
    let Some(el) = document.get_element_by_id(panel_id) else {
        log::debug!("no #{panel_id} panel to wire");
        return;
    };
    let Ok(panel) = el.dyn_into::<web::HtmlElement>() else { return };

    let layout = Rc::new(RefCell::new(load_layout(panel_id)));
    apply_layout(&panel, &layout.borrow());

    let drag = Rc::new(RefCell::new(DragState {
        dragging: false,
        moved: false,
        offset_x: 0.0,
        offset_y: 0.0,
    }));
    let id = panel_id.to_string();

    // pointerdown: begin drag, capture the pointer so fast drags keep
    // sending events here
    {
        let panel_d = panel.clone();
        let drag_d = drag.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            // presses on the panel's controls are not drags
            if let Some(target) = ev.target().and_then(|t| t.dyn_into::<web::Element>().ok()) {
                let tag = target.tag_name();
                if tag == "BUTTON" || tag == "INPUT" {
                    return;
                }
            }
            let rect = panel_d.get_bounding_client_rect();
            let mut ds = drag_d.borrow_mut();
            ds.dragging = true;
            ds.moved = false;
            ds.offset_x = ev.client_x() as f32 - rect.left() as f32;
            ds.offset_y = ev.client_y() as f32 - rect.top() as f32;
            let _ = panel_d.set_pointer_capture(ev.pointer_id());
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let _ = panel
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointermove: follow the pointer, clamped so the panel stays
    // grabbable
    {
        let panel_m = panel.clone();
        let drag_m = drag.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let mut ds = drag_m.borrow_mut();
            if !ds.dragging {
                return;
            }
            ds.moved = true;
            let rect = panel_m.get_bounding_client_rect();
            let (vw, vh) = viewport();
            let x = ev.client_x() as f32 - ds.offset_x;
            let y = ev.client_y() as f32 - ds.offset_y;
            let (pw, ph) = (rect.width() as f32, rect.height() as f32);
            let (cx, cy) = clamp_position(x, y, pw, ph, vw, vh);
            set_panel_position(&panel_m, cx, cy);
            // hint which edge the panel would snap to if released here
            match edge_at(cx, cy, pw, ph, vw, vh) {
                Some(edge) => {
                    let hint = match edge {
                        Edge::Left => "left",
                        Edge::Right => "right",
                        Edge::Top => "top",
                        Edge::Bottom => "bottom",
                    };
                    let _ = panel_m.set_attribute("data-edge-hint", hint);
                }
                None => {
                    let _ = panel_m.remove_attribute("data-edge-hint");
                }
            }
        }) as Box<dyn FnMut(_)>);
        let _ = panel
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointerup: either snap to an edge band or persist the free spot
    {
        let panel_u = panel.clone();
        let drag_u = drag.clone();
        let layout_u = layout.clone();
        let id_u = id.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let mut ds = drag_u.borrow_mut();
            if !ds.dragging {
                return;
            }
            ds.dragging = false;
            let _ = panel_u.remove_attribute("data-edge-hint");
            let _ = panel_u.release_pointer_capture(ev.pointer_id());
            if !ds.moved {
                return;
            }
            let rect = panel_u.get_bounding_client_rect();
            let (pw, ph) = (rect.width() as f32, rect.height() as f32);
            let (vw, vh) = viewport();
            let (x, y) = (rect.left() as f32, rect.top() as f32);
            let mut layout = layout_u.borrow_mut();
            if let Some(edge) = edge_at(x, y, pw, ph, vw, vh) {
                layout.set_hidden(edge);
            } else {
                layout.set_position(x, y);
            }
            save_layout(&id_u, &layout);
            apply_layout(&panel_u, &layout);
        }) as Box<dyn FnMut(_)>);
        let _ =
            panel.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // click on an edge-hidden panel brings it back to the center
    {
        let panel_c = panel.clone();
        let drag_c = drag.clone();
        let layout_c = layout.clone();
        let id_c = id.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
            if drag_c.borrow().moved {
                return;
            }
            let mut layout = layout_c.borrow_mut();
            if !layout.is_hidden() {
                return;
            }
            let rect = panel_c.get_bounding_client_rect();
            let (vw, vh) = viewport();
            let (x, y) =
                centered_position(rect.width() as f32, rect.height() as f32, vw, vh);
            layout.set_position(x, y);
            save_layout(&id_c, &layout);
            apply_layout(&panel_c, &layout);
        }) as Box<dyn FnMut(_)>);
        let _ = panel.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // re-snap hidden panels when the viewport changes
    {
        let panel_r = panel.clone();
        let layout_r = layout.clone();
        let closure = Closure::wrap(Box::new(move || {
            apply_layout(&panel_r, &layout_r.borrow());
        }) as Box<dyn FnMut()>);
        if let Some(window) = web::window() {
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }
}
