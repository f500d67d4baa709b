use log::debug;
use web_sys::{HtmlElement, MouseEvent};
use yew::prelude::*;

/// Panels of one accordion. At most one is expanded at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccordionGroup {
    len: usize,
    open: Option<usize>,
}

impl AccordionGroup {
    pub fn new(len: usize, open_first: bool) -> Self {
        Self {
            len,
            open: (open_first && len > 0).then_some(0),
        }
    }

    /// Expands `index` and collapses its siblings, or collapses it if it was
    /// already expanded.
    pub fn toggle(self, index: usize) -> Self {
        if index >= self.len {
            return self;
        }
        let open = if self.open == Some(index) { None } else { Some(index) };
        Self { open, ..self }
    }

    pub fn is_open(self, index: usize) -> bool {
        self.open == Some(index)
    }

    pub fn open_index(self) -> Option<usize> {
        self.open
    }
}

/// Inline `max-height` for a panel body: its natural height while expanded,
/// nothing while collapsed.
pub fn content_max_height(expanded: bool, scroll_height: i32) -> Option<String> {
    expanded.then(|| format!("{}px", scroll_height))
}

#[derive(Clone, PartialEq)]
pub struct AccordionItem {
    pub title: AttrValue,
    pub body: Html,
}

#[derive(Properties, PartialEq)]
pub struct AccordionProps {
    pub items: Vec<AccordionItem>,
    #[prop_or_default]
    pub open_first: bool,
}

#[function_component(Accordion)]
pub fn accordion(props: &AccordionProps) -> Html {
    let len = props.items.len();
    let open_first = props.open_first;
    let group = use_state(|| AccordionGroup::new(len, open_first));
    let content_refs = use_state(|| (0..len).map(|_| NodeRef::default()).collect::<Vec<_>>());

    {
        let content_refs = content_refs.clone();
        use_effect_with_deps(
            move |group: &AccordionGroup| {
                for (index, node) in content_refs.iter().enumerate() {
                    let Some(content) = node.cast::<HtmlElement>() else {
                        continue;
                    };
                    let style = content.style();
                    let _ = match content_max_height(group.is_open(index), content.scroll_height()) {
                        Some(height) => style.set_property("max-height", &height),
                        None => style.remove_property("max-height").map(|_| ()),
                    };
                }
                || ()
            },
            *group,
        );
    }

    html! {
        <div class="accordion">
            { for props.items.iter().enumerate().map(|(index, item)| {
                let onclick = {
                    let group = group.clone();
                    Callback::from(move |e: MouseEvent| {
                        e.prevent_default();
                        let next = group.toggle(index);
                        debug!("accordion panel {:?} expanded", next.open_index());
                        group.set(next);
                    })
                };
                let content_ref = content_refs.get(index).cloned().unwrap_or_default();
                html! {
                    <div class={classes!("accordion__item", group.is_open(index).then(|| "accordion__item--active"))}>
                        <button class="accordion__header" {onclick}>
                            <span class="accordion__title">{item.title.clone()}</span>
                            <span class="accordion__icon">{if group.is_open(index) { "−" } else { "+" }}</span>
                        </button>
                        <div class="accordion__content" ref={content_ref}>
                            <div class="accordion__body">{item.body.clone()}</div>
                        </div>
                    </div>
                }
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_panel_open_by_default() {
        let group = AccordionGroup::new(3, true);
        assert!(group.is_open(0));
        assert!(!group.is_open(1));
        assert_eq!(AccordionGroup::new(3, false).open_index(), None);
        assert_eq!(AccordionGroup::new(0, true).open_index(), None);
    }

    #[test]
    fn opening_a_panel_closes_its_siblings() {
        let group = AccordionGroup::new(3, true).toggle(1);
        assert!(!group.is_open(0));
        assert!(group.is_open(1));
        assert!(!group.is_open(2));
    }

    #[test]
    fn clicking_the_open_panel_collapses_it() {
        let group = AccordionGroup::new(3, true).toggle(0);
        assert_eq!(group.open_index(), None);
    }

    #[test]
    fn out_of_range_toggle_is_ignored() {
        let group = AccordionGroup::new(2, true);
        assert_eq!(group.toggle(5), group);
    }

    #[test]
    fn max_height_follows_expansion() {
        assert_eq!(content_max_height(true, 240), Some("240px".to_string()));
        assert_eq!(content_max_height(false, 240), None);
    }
}
