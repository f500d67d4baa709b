use yew::prelude::*;

use crate::dom::PageEffects;

/// Open/closed state of the burger navigation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggled(self) -> Self {
        Self { open: !self.open }
    }

    pub fn closed(self) -> Self {
        Self { open: false }
    }

    pub fn nav_class(self) -> Classes {
        classes!("nav", self.open.then(|| "nav--open"))
    }

    pub fn burger_class(self) -> Classes {
        classes!("burger", self.open.then(|| "burger--active"))
    }
}

/// Moves the menu to `next`, locking page scroll while it is open.
/// Returns `None` when nothing changes.
pub fn transition(current: MobileMenu, next: MobileMenu, page: &dyn PageEffects) -> Option<MobileMenu> {
    if current == next {
        return None;
    }
    page.lock_scroll(next.is_open());
    Some(next)
}
