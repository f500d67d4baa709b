use std::cell::Cell;

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

/// Page-wide side effects shared by the modal and the mobile menu.
pub trait PageEffects {
    /// Takes (`true`) or releases (`false`) one hold on the page scroll.
    fn lock_scroll(&self, locked: bool);
    fn alert(&self, message: &str);
    fn reload(&self);
}

/// Counts overlays holding the page scroll. The page stays locked until the
/// last hold is released.
#[derive(Debug, Default)]
pub struct ScrollLocks {
    holds: Cell<u32>,
}

impl ScrollLocks {
    /// Applies one hold or release. Returns the new lock state when it flips.
    pub fn update(&self, locked: bool) -> Option<bool> {
        let before = self.holds.get();
        let after = if locked {
            before.saturating_add(1)
        } else {
            before.saturating_sub(1)
        };
        self.holds.set(after);
        let (was_locked, is_locked) = (before > 0, after > 0);
        (was_locked != is_locked).then_some(is_locked)
    }
}

/// The real document. One instance is shared through the app context so the
/// menu and the modal count scroll holds together.
#[derive(Debug, Default)]
pub struct BrowserPage {
    scroll: ScrollLocks,
}

impl PageEffects for BrowserPage {
    fn lock_scroll(&self, locked: bool) {
        let Some(locked) = self.scroll.update(locked) else {
            return;
        };
        let Some(body) = document().and_then(|d| d.body()) else {
            debug!("no <body>; scroll lock skipped");
            return;
        };
        let style = body.style();
        let _ = if locked {
            style.set_property("overflow", "hidden")
        } else {
            style.remove_property("overflow").map(|_| ())
        };
    }

    fn alert(&self, message: &str) {
        if let Some(window) = window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn reload(&self) {
        if let Some(window) = window() {
            let _ = window.location().reload();
        }
    }
}

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

/// First element matching `selector`, or `None` when the page has no such
/// markup. Callers treat `None` as "this feature is not on the page".
pub fn query(selector: &str) -> Option<Element> {
    let found = document()?.query_selector(selector).ok().flatten();
    if found.is_none() {
        debug!("no element matches {}", selector);
    }
    found
}

pub fn query_html(selector: &str) -> Option<HtmlElement> {
    query(selector)?.dyn_into::<HtmlElement>().ok()
}

/// Every element matching `selector`, in document order.
pub fn query_all(selector: &str) -> Vec<Element> {
    let Some(list) = document().and_then(|d| d.query_selector_all(selector).ok()) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Closest ancestor-or-self of the event target matching `selector`.
pub fn closest_from_event(event: &web_sys::Event, selector: &str) -> Option<Element> {
    event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest(selector)
        .ok()
        .flatten()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_stays_locked_until_last_hold_is_released() {
        let locks = ScrollLocks::default();
        assert_eq!(locks.update(true), Some(true));
        assert_eq!(locks.update(true), None);
        assert_eq!(locks.update(false), None);
        assert_eq!(locks.update(false), Some(false));
    }

    #[test]
    fn extra_release_does_not_underflow() {
        let locks = ScrollLocks::default();
        assert_eq!(locks.update(false), None);
        assert_eq!(locks.update(true), Some(true));
    }
}
