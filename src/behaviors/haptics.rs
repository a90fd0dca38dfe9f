use log::debug;
use wasm_bindgen::JsValue;
use web_sys::js_sys::Reflect;
use web_sys::Document;

use crate::config::{HAPTIC_DURATION_MS, HAPTIC_SELECTOR};
use crate::dom::{self, Listener};
use crate::error::SiteError;

/// Short vibration, only where `navigator.vibrate` exists.
pub fn vibrate_tick() {
    if let Some(window) = web_sys::window() {
        let navigator = window.navigator();
        if Reflect::has(&navigator, &JsValue::from_str("vibrate")).unwrap_or(false) {
            let _ = navigator.vibrate_with_duration(HAPTIC_DURATION_MS);
        }
    }
}

pub struct Haptics {
    _listeners: Vec<Listener>,
}

impl Haptics {
    pub fn install(document: &Document) -> Result<Self, SiteError> {
        let targets = dom::query_document(document, HAPTIC_SELECTOR);
        if targets.is_empty() {
            return Err(SiteError::NothingToObserve(HAPTIC_SELECTOR));
        }
        let listeners = targets
            .iter()
            .map(|el| Listener::passive(el, "touchstart", |_| vibrate_tick()))
            .collect::<Result<Vec<_>, _>>()?;
        debug!("haptics bound to {} elements", listeners.len());
        Ok(Self {
            _listeners: listeners,
        })
    }
}
