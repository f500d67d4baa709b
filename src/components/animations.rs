use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::js_sys::Array;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

use crate::config::FadeInOptions;
use crate::dom;

const FADE_IN_SELECTOR: &str = ".fade-in";
const FADE_INDEX_ATTR: &str = "data-fade-index";
const VISIBLE_CLASS: &str = "visible";

/// Remembers which fade-in elements have been revealed. Each one is revealed
/// at most once per page load.
#[derive(Debug, Default)]
pub struct FadeInTracker {
    revealed: HashSet<u32>,
}

impl FadeInTracker {
    /// True the first time `index` comes into view.
    pub fn reveal(&mut self, index: u32) -> bool {
        self.revealed.insert(index)
    }

    pub fn revealed(&self) -> usize {
        self.revealed.len()
    }
}

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

fn observe_fade_ins(options: &FadeInOptions) -> Option<(IntersectionObserver, ObserverCallback)> {
    let elements = dom::query_all(FADE_IN_SELECTOR);
    if elements.is_empty() {
        debug!("no {} elements; animations inactive", FADE_IN_SELECTOR);
        return None;
    }

    let tracker = Rc::new(RefCell::new(FadeInTracker::default()));
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                let index = target
                    .get_attribute(FADE_INDEX_ATTR)
                    .and_then(|raw| raw.parse::<u32>().ok());
                if let Some(index) = index {
                    let mut tracker = tracker.borrow_mut();
                    if tracker.reveal(index) {
                        let _ = target.class_list().add_1(VISIBLE_CLASS);
                        debug!("fade-in {} revealed ({} so far)", index, tracker.revealed());
                    }
                }
                observer.unobserve(&target);
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(&options.root_margin);
    let observer = match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
        Ok(observer) => observer,
        Err(err) => {
            debug!("IntersectionObserver unavailable: {:?}", err);
            return None;
        }
    };

    for (index, element) in elements.iter().enumerate() {
        let _ = element.set_attribute(FADE_INDEX_ATTR, &index.to_string());
        observer.observe(element);
    }
    debug!("observing {} fade-in elements", elements.len());
    Some((observer, callback))
}

/// Fades in every `.fade-in` element of the current page as it scrolls into view.
#[hook]
pub fn use_fade_in(options: FadeInOptions) {
    use_effect_with_deps(
        move |options: &FadeInOptions| {
            let observed = observe_fade_ins(options);
            move || {
                if let Some((observer, callback)) = observed {
                    observer.disconnect();
                    drop(callback);
                }
            }
        },
        options,
    );
}
