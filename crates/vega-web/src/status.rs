//! Backend status polling and advisory notifications. Every failure
//! path just marks the backend offline and logs; the page never depends
//! on the server being up.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

use crate::dom;

const POLL_MS: i32 = 2000;
const CONTENT_POLL_MS: i32 = 30_000;

async fn read_json(resp: web::Response, url: &str) -> Result<serde_json::Value, JsValue> {
    if !resp.ok() {
        return Err(JsValue::from_str(&format!("{} -> {}", url, resp.status())));
    }
    let text = JsFuture::from(resp.text()?).await?;
    let text = text.as_string().ok_or_else(|| JsValue::from_str("non-string body"))?;
    serde_json::from_str(&text).map_err(|e| JsValue::from_str(&e.to_string()))
}

async fn fetch_json(url: &str) -> Result<serde_json::Value, JsValue> {
    let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(url)).await?.dyn_into()?;
    read_json(resp, url).await
}

async fn post_json(url: &str) -> Result<serde_json::Value, JsValue> {
    let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let init = web::RequestInit::new();
    init.set_method("POST");
    let resp: web::Response = JsFuture::from(window.fetch_with_str_and_init(url, &init))
        .await?
        .dyn_into()?;
    read_json(resp, url).await
}

fn set_status(online: bool) {
    let Some(doc) = dom::window_document() else { return };
    dom::set_text(&doc, "server-status", if online { "online" } else { "offline" });
    if let Some(el) = doc.get_element_by_id("server-status") {
        let _ = el.set_attribute("data-online", if online { "true" } else { "false" });
    }
}

async fn poll_once() {
    match fetch_json("/api/heartbeat").await {
        Ok(body) => set_status(body["status"] == "ok"),
        Err(e) => {
            log::debug!("heartbeat failed: {:?}", e);
            set_status(false);
        }
    }
}

/// Apply the server-side site config to the page chrome, once at boot.
pub async fn load_site_config() {
    match fetch_json("/api/config").await {
        Ok(config) => {
            let Some(doc) = dom::window_document() else { return };
            if let Some(title) = config["site"]["title"].as_str() {
                dom::set_text(&doc, "site-title", title);
            }
            if let Some(color) = config["site"]["primaryColor"].as_str() {
                if let Some(body) = doc.body() {
                    let _ = body.style().set_property("--vega-primary", color);
                }
            }
        }
        Err(e) => log::debug!("config fetch failed: {:?}", e),
    }
}

fn set_count(target: &str, body: &serde_json::Value, key: &str) {
    let items = body.as_array().or_else(|| body[key].as_array());
    if let (Some(items), Some(doc)) = (items, dom::window_document()) {
        dom::set_text(&doc, target, &items.len().to_string());
    }
}

/// Re-fetch every content endpoint and reflect it in the status UI.
/// Each fetch fails independently; the DOM keeps its last good value
/// for anything that did not come back.
pub async fn refresh_content() {
    match fetch_json("/api/modules").await {
        Ok(body) => set_count("modules-count", &body, "modules"),
        Err(e) => log::debug!("modules fetch failed: {:?}", e),
    }
    match fetch_json("/api/soundscapes").await {
        Ok(body) => set_count("soundscapes-count", &body, "soundscapes"),
        Err(e) => log::debug!("soundscapes fetch failed: {:?}", e),
    }
    match fetch_json("/api/whitepaper").await {
        Ok(body) => {
            if let (Some(title), Some(doc)) = (body["title"].as_str(), dom::window_document()) {
                dom::set_text(&doc, "whitepaper-title", title);
            }
        }
        Err(e) => log::debug!("whitepaper fetch failed: {:?}", e),
    }
    // engine metadata lives in the config document
    match fetch_json("/api/config").await {
        Ok(body) => set_count("engines-count", &body, "engines"),
        Err(e) => log::debug!("engines fetch failed: {:?}", e),
    }
    match fetch_json("/api/infinity").await {
        Ok(body) => {
            if let (Some(iter), Some(doc)) = (body["iteration"].as_u64(), dom::window_document())
            {
                dom::set_text(&doc, "infinity-iteration", &iter.to_string());
            }
        }
        Err(e) => log::debug!("infinity fetch failed: {:?}", e),
    }
}

/// Tell the backend the loop counter started. Advisory only.
pub fn notify_infinity_start() {
    spawn_local(async {
        if let Err(e) = post_json("/api/infinity-loop/start").await {
            log::debug!("infinity start notify failed: {:?}", e);
        }
    });
}

/// Advance the backend loop counter. Advisory only.
pub fn notify_infinity_iterate() {
    spawn_local(async {
        if let Err(e) = post_json("/api/infinity-loop/iterate").await {
            log::debug!("infinity iterate notify failed: {:?}", e);
        }
    });
}

/// Description line for the status UI. Tries the backend stub first and
/// falls back to locally generated text when it is unavailable.
pub async fn orchestration_description(name: &str, phase: u8) -> String {
    match post_json("/api/prompt").await {
        Ok(body) => match body["description"].as_str() {
            Some(s) => s.to_owned(),
            None => local_description(name, phase),
        },
        Err(_) => local_description(name, phase),
    }
}

fn local_description(name: &str, phase: u8) -> String {
    format!("{name} engaged. Phase {phase} resonance holding steady.")
}

/// Kick off the heartbeat and content polls. The intervals run for the
/// life of the page, so their closures are leaked deliberately.
pub fn start_polling() {
    spawn_local(poll_once());
    spawn_local(refresh_content());
    let Some(window) = web::window() else { return };

    let heartbeat = Closure::wrap(Box::new(|| {
        spawn_local(poll_once());
    }) as Box<dyn FnMut()>);
    let _ = window.set_interval_with_callback_and_timeout_and_arguments_0(
        heartbeat.as_ref().unchecked_ref(),
        POLL_MS,
    );
    heartbeat.forget();

    let content = Closure::wrap(Box::new(|| {
        spawn_local(refresh_content());
    }) as Box<dyn FnMut()>);
    let _ = window.set_interval_with_callback_and_timeout_and_arguments_0(
        content.as_ref().unchecked_ref(),
        CONTENT_POLL_MS,
    );
    content.forget();
}
