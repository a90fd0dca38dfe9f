//! Fire-once visibility observation on top of `IntersectionObserver`.
//!
//! Each observed element triggers its callback at most once: the element is
//! unobserved before the callback runs. Dropping the observer unobserves every
//! element still pending and then disconnects.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::error::SiteError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityOptions {
    /// Fraction of the element that must be visible, `0.0..=1.0`.
    pub threshold: f64,
    pub root_margin: Option<&'static str>,
}

/// Items waiting for their one notification.
#[derive(Debug)]
pub struct Pending<T> {
    items: Vec<T>,
}

impl<T: PartialEq> Default for Pending<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> Pending<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn add(&mut self, item: T) {
        if !self.items.contains(&item) {
            self.items.push(item);
        }
    }

    /// `true` exactly once per added item; later calls return `false`.
    pub fn take(&mut self, item: &T) -> bool {
        match self.items.iter().position(|pending| pending == item) {
            Some(index) => {
                self.items.swap_remove(index);
                true
            }
            None => false,
        }
    }

    pub fn drain(&mut self) -> Vec<T> {
        std::mem::take(&mut self.items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

pub struct VisibilityObserver {
    observer: IntersectionObserver,
    pending: Rc<RefCell<Pending<Element>>>,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl VisibilityObserver {
    pub fn new<F>(options: VisibilityOptions, mut on_visible: F) -> Result<Self, SiteError>
    where
        F: FnMut(Element) + 'static,
    {
        let pending: Rc<RefCell<Pending<Element>>> = Rc::new(RefCell::new(Pending::new()));

        let callback = {
            let pending = pending.clone();
            Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target = entry.target();
                    if release(&observer, &pending, &target) {
                        on_visible(target);
                    }
                }
            }) as Box<dyn FnMut(Array, IntersectionObserver)>)
        };

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        if let Some(margin) = options.root_margin {
            init.set_root_margin(margin);
        }

        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        Ok(Self {
            observer,
            pending,
            _callback: callback,
        })
    }

    pub fn observe(&self, element: &Element) {
        self.pending.borrow_mut().add(element.clone());
        self.observer.observe(element);
    }

    /// Stops watching `element`; its callback will not run. Returns whether
    /// it was still pending.
    pub fn unobserve(&self, element: &Element) -> bool {
        release(&self.observer, &self.pending, element)
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn disconnect(&self) {
        let remaining = self.pending.borrow_mut().drain();
        for element in &remaining {
            self.observer.unobserve(element);
        }
        self.observer.disconnect();
    }
}

/// Shared unsubscribe path for the fire-once callback and `unobserve`.
fn release(observer: &IntersectionObserver, pending: &RefCell<Pending<Element>>, element: &Element) -> bool {
    let was_pending = pending.borrow_mut().take(element);
    observer.unobserve(element);
    was_pending
}

impl Drop for VisibilityObserver {
    fn drop(&mut self) {
        self.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_fires_once() {
        let mut pending = Pending::new();
        pending.add(1);
        pending.add(2);
        assert!(pending.take(&1));
        assert!(!pending.take(&1));
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn test_pending_ignores_unknown_and_duplicates() {
        let mut pending = Pending::new();
        pending.add("a");
        pending.add("a");
        assert_eq!(pending.len(), 1);
        assert!(!pending.take(&"b"));
    }

    #[test]
    fn test_pending_drain_empties() {
        let mut pending = Pending::new();
        pending.add(3);
        pending.add(4);
        let mut drained = pending.drain();
        drained.sort();
        assert_eq!(drained, vec![3, 4]);
        assert_eq!(pending.len(), 0);
        assert!(!pending.take(&3));
    }
}
