use web_sys::{Event, MouseEvent};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::components::mobile_menu::{self, MobileMenu};
use crate::dom;
use crate::AppContext;

const NAV_LINKS: [(&str, &str); 4] = [
    ("#services", "Услуги"),
    ("#calculator", "Цены"),
    ("#faq", "Вопросы"),
    ("#contacts", "Контакты"),
];

/// Whether the page has scrolled far enough for the compact header.
pub fn is_scrolled(offset: f64, threshold: f64) -> bool {
    offset > threshold
}

fn current_scroll_offset() -> f64 {
    dom::window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

#[function_component(Header)]
pub fn header() -> Html {
    let context = use_context::<AppContext>();
    let threshold = context
        .as_ref()
        .map(|c| c.config.header_scroll_threshold)
        .unwrap_or(50.0);
    let page = context.map(|c| c.page).unwrap_or_default();
    let scrolled = use_state(|| false);
    let menu = use_state(MobileMenu::default);

    {
        let scrolled = scrolled.clone();
        use_effect_with_deps(
            move |_| {
                scrolled.set(is_scrolled(current_scroll_offset(), threshold));
                || ()
            },
            (),
        );
    }

    {
        let scrolled = scrolled.clone();
        use_event_with_window("scroll", move |_: Event| {
            let next = is_scrolled(current_scroll_offset(), threshold);
            if next != *scrolled {
                scrolled.set(next);
            }
        });
    }

    let toggle_menu = {
        let menu = menu.clone();
        let page = page.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            if let Some(next) = mobile_menu::transition(*menu, menu.toggled(), &*page) {
                menu.set(next);
            }
        })
    };

    let close_menu = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(next) = mobile_menu::transition(*menu, menu.closed(), &*page) {
                menu.set(next);
            }
        })
    };

    html! {
        <header class={classes!("header", (*scrolled).then(|| "scrolled"))}>
            <div class="header__inner">
                <a href="#top" class="header__logo">{"ЧистоДом"}</a>

                <button class={menu.burger_class()} onclick={toggle_menu} aria-label="Меню">
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <nav class={menu.nav_class()}>
                    { for NAV_LINKS.iter().map(|(href, label)| html! {
                        <a href={*href} class="nav__link" onclick={close_menu.clone()}>{*label}</a>
                    }) }
                    <a href="tel:+74950000000" class="nav__phone" onclick={close_menu.clone()}>
                        {"+7 (495) 000-00-00"}
                    </a>
                    <button class="button button--outline" data-modal-open="header" onclick={close_menu.clone()}>
                        {"Оставить заявку"}
                    </button>
                </nav>
            </div>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrolled_only_past_threshold() {
        assert!(!is_scrolled(0.0, 50.0));
        assert!(!is_scrolled(50.0, 50.0));
        assert!(is_scrolled(50.5, 50.0));
        assert!(is_scrolled(1200.0, 50.0));
    }

    #[test]
    fn nav_links_are_same_page_anchors() {
        for (href, _) in NAV_LINKS {
            assert!(href.starts_with('#') && href.len() > 1);
        }
    }
}
