use log::debug;
use web_sys::{MouseEvent, ScrollBehavior, ScrollToOptions};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::dom;

/// Element id an in-page link points at. Bare `#` and external links yield `None`.
pub fn anchor_fragment(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Document offset to scroll to so the target sits just below the fixed header.
pub fn scroll_target(element_top: f64, scroll_y: f64, header_height: f64) -> f64 {
    (element_top + scroll_y - header_height).max(0.0)
}

fn handle_anchor_click(e: &MouseEvent) {
    let Some(href) = dom::closest_from_event(e, "a[href^='#']").and_then(|a| a.get_attribute("href")) else {
        return;
    };
    let Some(id) = anchor_fragment(&href) else {
        return;
    };
    let Some(target) = dom::document().and_then(|d| d.get_element_by_id(id)) else {
        debug!("anchor #{} has no target; leaving it to the browser", id);
        return;
    };
    let Some(window) = dom::window() else {
        return;
    };
    e.prevent_default();

    let header_height = dom::query_html(".header")
        .map(|header| f64::from(header.offset_height()))
        .unwrap_or(0.0);
    let top = scroll_target(
        target.get_bounding_client_rect().top(),
        window.scroll_y().unwrap_or(0.0),
        header_height,
    );

    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

/// Smooth-scrolls every same-page anchor link, wherever it is rendered.
#[hook]
pub fn use_smooth_scroll() {
    use_event_with_window("click", move |e: MouseEvent| handle_anchor_click(&e));
}
