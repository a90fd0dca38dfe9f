use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, ScrollBehavior, ScrollToOptions};

use crate::config::HEADER_FALLBACK_HEIGHT;
use crate::dom::{self, Listener};
use crate::error::SiteError;

const SELECTOR: &str = "a[href^=\"#\"]";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollPlan {
    /// Bare `#`: back to the very top.
    Top,
    /// Scroll so the target sits just below the fixed header.
    To(f64),
    /// Unknown target; let the browser handle the click.
    Native,
}

/// Decide what a click on an in-page link with `href` should do.
/// `target_top` is the target's `offsetTop` when it exists, `header_height`
/// the header's rendered height when there is one.
pub fn plan(href: &str, target_top: Option<f64>, header_height: Option<f64>) -> ScrollPlan {
    if href == "#" {
        return ScrollPlan::Top;
    }
    match target_top {
        Some(top) => {
            let header = header_height
                .filter(|h| *h > 0.0)
                .unwrap_or(HEADER_FALLBACK_HEIGHT);
            ScrollPlan::To(top - header)
        }
        None => ScrollPlan::Native,
    }
}

/// Makes every same-page anchor scroll smoothly instead of jumping.
pub struct SmoothScroll {
    _listeners: Vec<Listener>,
}

impl SmoothScroll {
    pub fn install(document: &Document) -> Result<Self, SiteError> {
        let links = dom::query_document(document, SELECTOR);
        if links.is_empty() {
            return Err(SiteError::NothingToObserve(SELECTOR));
        }

        let mut listeners = Vec::with_capacity(links.len());
        for link in links {
            let document = document.clone();
            let anchor = link.clone();
            listeners.push(Listener::new(&link, "click", move |event| {
                let Some(href) = anchor.get_attribute("href") else {
                    return;
                };
                // An invalid selector such as `#1-step` counts as no target.
                let target_top = document
                    .query_selector(&href)
                    .ok()
                    .flatten()
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                    .map(|el| f64::from(el.offset_top()));
                let header_height = document
                    .get_element_by_id("header")
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                    .map(|el| f64::from(el.offset_height()));

                let top = match plan(&href, target_top, header_height) {
                    ScrollPlan::Native => return,
                    ScrollPlan::Top => 0.0,
                    ScrollPlan::To(top) => top,
                };
                event.prevent_default();
                scroll_smoothly(top);
            })?);
        }
        debug!("smooth scroll bound to {} links", listeners.len());
        Ok(Self {
            _listeners: listeners,
        })
    }
}

fn scroll_smoothly(top: f64) {
    let Ok(window) = dom::window() else {
        return;
    };
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_only_goes_to_top() {
        assert_eq!(plan("#", None, Some(72.0)), ScrollPlan::Top);
        assert_eq!(plan("#", Some(900.0), None), ScrollPlan::Top);
    }

    #[test]
    fn test_offsets_by_header_height() {
        assert_eq!(plan("#calculator", Some(1500.0), Some(72.0)), ScrollPlan::To(1428.0));
    }

    #[test]
    fn test_header_fallback() {
        assert_eq!(plan("#services", Some(600.0), None), ScrollPlan::To(520.0));
        assert_eq!(plan("#services", Some(600.0), Some(0.0)), ScrollPlan::To(520.0));
    }

    #[test]
    fn test_missing_target_is_native() {
        assert_eq!(plan("#nowhere", None, Some(72.0)), ScrollPlan::Native);
    }
}
