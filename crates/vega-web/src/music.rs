//! Embedded player sync. Pointing the player iframes at a playlist is
//! best-effort; missing elements just log.

use vega_core::{track_url, SoundscapeId};
use wasm_bindgen::JsCast;
use web_sys as web;

// The small widget and the full player are kept in step.
const PLAYER_IDS: [&str; 2] = ["sc-widget", "soundcloud-player"];

pub fn sync_track(document: &web::Document, id: SoundscapeId) {
    let url = track_url(id);
    let src = format!(
        "https://w.soundcloud.com/player/?url={}&auto_play=true&visual=true",
        js_sys::encode_uri_component(url)
    );
    let mut synced = false;
    for player_id in PLAYER_IDS {
        let Some(el) = document.get_element_by_id(player_id) else {
            log::debug!("no #{player_id} element, skipping");
            continue;
        };
        let Ok(iframe) = el.dyn_into::<web::HtmlIFrameElement>() else {
            log::warn!("#{player_id} is not an iframe");
            continue;
        };
        iframe.set_src(&src);
        synced = true;
    }
    if synced {
        log::info!("[music] synced player to {} for {}", url, id.as_str());
    }
}
