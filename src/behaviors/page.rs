use log::{debug, info};

use crate::behaviors::counters::CounterAnimator;
use crate::behaviors::entrance::EntranceAnimator;
use crate::behaviors::haptics::Haptics;
use crate::behaviors::smooth_scroll::SmoothScroll;
use crate::dom;
use crate::error::SiteError;

/// Document-wide behaviors of the landing page. Each one is optional; a
/// behavior whose elements are missing is simply not installed. Dropping the
/// value detaches everything.
#[derive(Default)]
pub struct PageBehaviors {
    smooth_scroll: Option<SmoothScroll>,
    entrance: Option<EntranceAnimator>,
    counters: Option<CounterAnimator>,
    haptics: Option<Haptics>,
}

impl PageBehaviors {
    pub fn install() -> Self {
        let document = match dom::document() {
            Ok(document) => document,
            Err(e) => {
                debug!("page behaviors disabled: {}", e);
                return Self::default();
            }
        };

        let behaviors = Self {
            smooth_scroll: enable("smooth scroll", SmoothScroll::install(&document)),
            entrance: enable("entrance animations", EntranceAnimator::install(&document)),
            counters: enable("counters", CounterAnimator::install(&document)),
            haptics: enable("haptics", Haptics::install(&document)),
        };
        info!("page behaviors installed: {}", behaviors.active().join(", "));
        behaviors
    }

    pub fn active(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.smooth_scroll.is_some() {
            names.push("smooth-scroll");
        }
        if self.entrance.is_some() {
            names.push("entrance");
        }
        if self.counters.is_some() {
            names.push("counters");
        }
        if self.haptics.is_some() {
            names.push("haptics");
        }
        names
    }
}

fn enable<T>(name: &str, installed: Result<T, SiteError>) -> Option<T> {
    match installed {
        Ok(behavior) => Some(behavior),
        Err(e) => {
            debug!("{} disabled: {}", name, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enable_skips_failed_install() {
        let missing: Result<u8, SiteError> = Err(SiteError::MissingElement("header"));
        assert!(enable("header", missing).is_none());
        assert_eq!(enable("ok", Ok::<u8, SiteError>(3)), Some(3));
    }

    #[test]
    fn test_default_has_nothing_active() {
        assert!(PageBehaviors::default().active().is_empty());
    }
}
