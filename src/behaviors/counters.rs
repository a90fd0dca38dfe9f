use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

use crate::config::{COUNTER_DURATION_MS, COUNTER_FRAME_MS, COUNTER_SUFFIX_FROM, COUNTER_THRESHOLD};
use crate::dom;
use crate::error::SiteError;
use crate::observer::{VisibilityObserver, VisibilityOptions};
use crate::utils::parse_int;

const SELECTOR: &str = "[data-count]";

#[derive(Debug, PartialEq)]
pub enum RampFrame {
    Running(i64),
    Finished(String),
}

/// Constant-step ramp from zero to `target`, one step per painted frame.
#[derive(Debug)]
pub struct CounterRamp {
    target: i64,
    step: f64,
    current: f64,
}

impl CounterRamp {
    pub fn new(target: i64) -> Self {
        Self {
            target,
            step: target as f64 / (COUNTER_DURATION_MS / COUNTER_FRAME_MS),
            current: 0.0,
        }
    }

    pub fn advance(&mut self) -> RampFrame {
        self.current += self.step;
        if self.current < self.target as f64 {
            RampFrame::Running(self.current.floor() as i64)
        } else {
            RampFrame::Finished(final_label(self.target))
        }
    }
}

pub fn final_label(target: i64) -> String {
    if target >= COUNTER_SUFFIX_FROM {
        format!("{}+", target)
    } else {
        target.to_string()
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A running ramp. Dropping it, or calling [`RampHandle::cancel`], stops it.
pub struct RampHandle {
    window: Window,
    frame: Rc<RefCell<Option<i32>>>,
    callback: FrameCallback,
}

impl RampHandle {
    pub fn start(window: Window, element: Element, target: i64) -> Result<Self, SiteError> {
        let frame: Rc<RefCell<Option<i32>>> = Rc::new(RefCell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let mut ramp = CounterRamp::new(target);

        {
            let window = window.clone();
            let frame = frame.clone();
            let next = callback.clone();
            *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |_timestamp: f64| {
                *frame.borrow_mut() = None;
                // Detached mid-ramp: stop instead of writing into a dead node.
                if !element.is_connected() {
                    let _ = next.borrow_mut().take();
                    return;
                }
                match ramp.advance() {
                    RampFrame::Running(value) => {
                        element.set_text_content(Some(&value.to_string()));
                        if let Some(cb) = next.borrow().as_ref() {
                            *frame.borrow_mut() = window.request_animation_frame(cb.as_ref().unchecked_ref()).ok();
                        }
                    }
                    RampFrame::Finished(label) => {
                        element.set_text_content(Some(&label));
                        let _ = next.borrow_mut().take();
                    }
                }
            }) as Box<dyn FnMut(f64)>));
        }

        let id = match callback.borrow().as_ref() {
            Some(cb) => window.request_animation_frame(cb.as_ref().unchecked_ref())?,
            None => return Err(SiteError::Js("animation frame callback missing".into())),
        };
        *frame.borrow_mut() = Some(id);

        Ok(Self { window, frame, callback })
    }

    pub fn is_running(&self) -> bool {
        self.callback.borrow().is_some()
    }

    pub fn cancel(&self) {
        if let Some(id) = self.frame.borrow_mut().take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        let _ = self.callback.borrow_mut().take();
    }
}

impl Drop for RampHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Starts a ramp on every `[data-count]` element the first time it is half
/// visible.
pub struct CounterAnimator {
    observer: VisibilityObserver,
    ramps: Rc<RefCell<Vec<RampHandle>>>,
}

impl CounterAnimator {
    pub fn install(document: &Document) -> Result<Self, SiteError> {
        let counters = dom::query_document(document, SELECTOR);
        if counters.is_empty() {
            return Err(SiteError::NothingToObserve(SELECTOR));
        }

        let window = dom::window()?;
        let ramps: Rc<RefCell<Vec<RampHandle>>> = Rc::new(RefCell::new(Vec::new()));
        let observer = {
            let ramps = ramps.clone();
            VisibilityObserver::new(
                VisibilityOptions {
                    threshold: COUNTER_THRESHOLD,
                    root_margin: None,
                },
                move |element| {
                    let Some(target) = element.get_attribute("data-count").as_deref().and_then(parse_int) else {
                        debug!("skipping counter without a numeric target");
                        return;
                    };
                    match RampHandle::start(window.clone(), element, target) {
                        Ok(handle) => {
                            let mut ramps = ramps.borrow_mut();
                            ramps.retain(RampHandle::is_running);
                            ramps.push(handle);
                        }
                        Err(e) => warn!("counter ramp failed to start: {}", e),
                    }
                },
            )?
        };

        for counter in &counters {
            observer.observe(counter);
            if counter.get_attribute("data-count").as_deref().and_then(parse_int).is_none() {
                observer.unobserve(counter);
                debug!("counter without a numeric target left as is");
            }
        }
        debug!("counter animator watching {} elements", observer.pending());
        Ok(Self { observer, ramps })
    }

    pub fn cancel_all(&self) {
        for ramp in self.ramps.borrow_mut().drain(..) {
            ramp.cancel();
        }
    }
}

impl Drop for CounterAnimator {
    fn drop(&mut self) {
        self.observer.disconnect();
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(target: i64) -> (Vec<i64>, String) {
        let mut ramp = CounterRamp::new(target);
        let mut shown = Vec::new();
        for _ in 0..10_000 {
            match ramp.advance() {
                RampFrame::Running(value) => shown.push(value),
                RampFrame::Finished(label) => return (shown, label),
            }
        }
        panic!("ramp for {} never finished", target);
    }

    #[test]
    fn test_suffix_from_one_hundred() {
        assert_eq!(run(150).1, "150+");
        assert_eq!(run(100).1, "100+");
        assert_eq!(run(80).1, "80");
        assert_eq!(run(99).1, "99");
    }

    #[test]
    fn test_ramp_takes_about_two_seconds_of_frames() {
        let (frames, _) = run(150);
        assert!((124..=126).contains(&frames.len()), "got {} frames", frames.len());
    }

    #[test]
    fn test_ramp_is_monotonic_and_below_target() {
        let (frames, _) = run(1200);
        assert!(frames.windows(2).all(|w| w[0] <= w[1]));
        assert!(frames.iter().all(|&v| v < 1200));
        assert_eq!(frames.first(), Some(&9));
    }

    #[test]
    fn test_zero_target_finishes_on_first_frame() {
        let mut ramp = CounterRamp::new(0);
        assert_eq!(ramp.advance(), RampFrame::Finished("0".to_string()));
    }
}
