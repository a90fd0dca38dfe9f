use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::debug;
use web_sys::Document;

use crate::config::{ANIMATE_ROOT_MARGIN, ANIMATE_THRESHOLD};
use crate::dom;
use crate::error::SiteError;
use crate::observer::{VisibilityObserver, VisibilityOptions};
use crate::utils::parse_int;

const SELECTOR: &str = "[data-animate]";
const ANIMATED_CLASS: &str = "animated";

/// Milliseconds to wait before revealing, from a `data-delay` attribute.
pub fn parse_delay(raw: Option<&str>) -> u32 {
    raw.and_then(parse_int)
        .map_or(0, |ms| ms.clamp(0, i64::from(u32::MAX)) as u32)
}

/// Adds `animated` to each `[data-animate]` element shortly after it scrolls
/// into view. One-way: the class is never removed.
pub struct EntranceAnimator {
    _observer: VisibilityObserver,
    pending: Rc<RefCell<Vec<Timeout>>>,
}

impl EntranceAnimator {
    pub fn install(document: &Document) -> Result<Self, SiteError> {
        let elements = dom::query_document(document, SELECTOR);
        if elements.is_empty() {
            return Err(SiteError::NothingToObserve(SELECTOR));
        }

        let pending: Rc<RefCell<Vec<Timeout>>> = Rc::new(RefCell::new(Vec::new()));
        let observer = {
            let pending = pending.clone();
            VisibilityObserver::new(
                VisibilityOptions {
                    threshold: ANIMATE_THRESHOLD,
                    root_margin: Some(ANIMATE_ROOT_MARGIN),
                },
                move |element| {
                    let delay = parse_delay(element.get_attribute("data-delay").as_deref());
                    let timeout = Timeout::new(delay, move || {
                        let _ = element.class_list().add_1(ANIMATED_CLASS);
                    });
                    pending.borrow_mut().push(timeout);
                },
            )?
        };

        for element in &elements {
            observer.observe(element);
        }
        debug!("entrance animator watching {} elements", observer.pending());
        Ok(Self {
            _observer: observer,
            pending,
        })
    }
}

impl Drop for EntranceAnimator {
    fn drop(&mut self) {
        // Dropping a Timeout clears it.
        self.pending.borrow_mut().clear();
    }
}
