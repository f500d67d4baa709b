use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{info, warn};
use web_sys::{HtmlInputElement, KeyboardEvent, MouseEvent, SubmitEvent};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::components::lead_form::{Lead, LeadForm};
use crate::config::ModalTiming;
use crate::dom::{self, BrowserPage, PageEffects};
use crate::error::FormError;
use crate::timer::{BrowserScheduler, Scheduler, TaskHandle};
use crate::AppContext;

/// Where accepted leads go.
pub trait LeadSink {
    fn submit(&self, lead: &Lead);
}

/// Writes leads to the console log; nothing leaves the browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogLeadSink;

impl LeadSink for LogLeadSink {
    fn submit(&self, lead: &Lead) {
        info!("lead received: name={:?} phone={:?}", lead.name, lead.phone);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Closed,
    Open,
    /// Success message on screen, waiting for the auto-close.
    Submitted,
}

/// What a submit did when validation passed or was never attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Accepted,
    /// The modal was not showing the form, so nothing was validated or sent.
    Ignored,
}

struct ModalInner {
    phase: ModalPhase,
    error: Option<FormError>,
    close_task: Option<TaskHandle>,
    reload_task: Option<TaskHandle>,
    timing: ModalTiming,
    scheduler: Rc<dyn Scheduler>,
    page: Rc<dyn PageEffects>,
    sink: Rc<dyn LeadSink>,
    on_change: Option<Rc<dyn Fn()>>,
}

/// Lead modal behaviour, independent of the markup that shows it.
#[derive(Clone)]
pub struct ModalController {
    inner: Rc<RefCell<ModalInner>>,
}

impl PartialEq for ModalController {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl ModalController {
    pub fn new(
        timing: ModalTiming,
        scheduler: Rc<dyn Scheduler>,
        page: Rc<dyn PageEffects>,
        sink: Rc<dyn LeadSink>,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ModalInner {
                phase: ModalPhase::Closed,
                error: None,
                close_task: None,
                reload_task: None,
                timing,
                scheduler,
                page,
                sink,
                on_change: None,
            })),
        }
    }

    pub fn set_on_change(&self, on_change: Rc<dyn Fn()>) {
        self.inner.borrow_mut().on_change = Some(on_change);
    }

    pub fn phase(&self) -> ModalPhase {
        self.inner.borrow().phase
    }

    pub fn error(&self) -> Option<FormError> {
        self.inner.borrow().error
    }

    pub fn is_visible(&self) -> bool {
        self.phase() != ModalPhase::Closed
    }

    pub fn open(&self) {
        let page = {
            let mut inner = self.inner.borrow_mut();
            if inner.phase != ModalPhase::Closed {
                return;
            }
            inner.phase = ModalPhase::Open;
            inner.error = None;
            inner.page.clone()
        };
        page.lock_scroll(true);
        self.notify();
    }

    /// Close button, backdrop click or Escape. Closing the success message
    /// early skips the pending auto-close but still reloads the page.
    pub fn close(&self) {
        match self.phase() {
            ModalPhase::Closed => {}
            ModalPhase::Open => {
                let page = {
                    let mut inner = self.inner.borrow_mut();
                    inner.phase = ModalPhase::Closed;
                    inner.error = None;
                    inner.page.clone()
                };
                page.lock_scroll(false);
                self.notify();
            }
            ModalPhase::Submitted => self.finish(false),
        }
    }

    pub fn handle_key(&self, key: &str) {
        if key == "Escape" {
            self.close();
        }
    }

    pub fn submit(&self, form: &LeadForm) -> Result<Submission, FormError> {
        if self.phase() != ModalPhase::Open {
            warn!("lead form submitted while the modal is {:?}; ignored", self.phase());
            return Ok(Submission::Ignored);
        }

        match form.validate() {
            Err(err) => {
                warn!("lead form rejected: {}", err);
                let page = {
                    let mut inner = self.inner.borrow_mut();
                    inner.error = Some(err);
                    inner.page.clone()
                };
                page.alert(&err.to_string());
                self.notify();
                Err(err)
            }
            Ok(lead) => {
                let sink = self.inner.borrow().sink.clone();
                sink.submit(&lead);

                let weak = Rc::downgrade(&self.inner);
                let mut inner = self.inner.borrow_mut();
                inner.phase = ModalPhase::Submitted;
                inner.error = None;
                let task = inner.scheduler.schedule(
                    inner.timing.close_delay_ms,
                    Box::new(move || {
                        if let Some(controller) = Self::upgrade(&weak) {
                            controller.finish(true);
                        }
                    }),
                );
                inner.close_task = Some(task);
                drop(inner);

                self.notify();
                Ok(Submission::Accepted)
            }
        }
    }

    fn upgrade(weak: &Weak<RefCell<ModalInner>>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    fn finish(&self, from_close_task: bool) {
        let page = {
            let mut inner = self.inner.borrow_mut();
            if inner.phase != ModalPhase::Submitted {
                return;
            }
            inner.phase = ModalPhase::Closed;
            if let Some(task) = inner.close_task.take() {
                if from_close_task {
                    // the timer is running right now; it must not be torn down
                    task.forget();
                } else {
                    task.cancel();
                }
            }
            let page = inner.page.clone();
            let reload_page = page.clone();
            let task = inner.scheduler.schedule(
                inner.timing.reload_delay_ms,
                Box::new(move || reload_page.reload()),
            );
            inner.reload_task = Some(task);
            page
        };
        page.lock_scroll(false);
        self.notify();
    }

    fn notify(&self) {
        let on_change = self.inner.borrow().on_change.clone();
        if let Some(on_change) = on_change {
            on_change();
        }
    }
}

fn input_value(node: &NodeRef) -> String {
    node.cast::<HtmlInputElement>()
        .map(|input| input.value())
        .unwrap_or_default()
}

#[function_component(LeadModal)]
pub fn lead_modal() -> Html {
    let context = use_context::<AppContext>();
    let timing = context.as_ref().map(|c| c.config.modal).unwrap_or_default();
    let page: Rc<BrowserPage> = context.map(|c| c.page).unwrap_or_default();
    let update = use_update();
    let controller = use_state(|| {
        ModalController::new(timing, Rc::new(BrowserScheduler), page, Rc::new(LogLeadSink))
    });
    let name_ref = use_node_ref();
    let phone_ref = use_node_ref();

    {
        let controller = controller.clone();
        use_effect_with_deps(
            move |_| {
                controller.set_on_change(update);
                || ()
            },
            (),
        );
    }

    // Triggers can sit anywhere on the page, so clicks are caught at the window.
    {
        let controller = controller.clone();
        use_event_with_window("click", move |e: MouseEvent| {
            if dom::closest_from_event(&e, "[data-modal-open]").is_some() {
                e.prevent_default();
                controller.open();
            } else if dom::closest_from_event(&e, "[data-modal-close]").is_some() {
                e.prevent_default();
                controller.close();
            }
        });
    }

    {
        let controller = controller.clone();
        use_event_with_window("keydown", move |e: KeyboardEvent| {
            controller.handle_key(&e.key());
        });
    }

    let on_backdrop = {
        let controller = controller.clone();
        Callback::from(move |e: MouseEvent| {
            if dom::closest_from_event(&e, ".modal__dialog").is_none() {
                controller.close();
            }
        })
    };

    let on_submit = {
        let controller = controller.clone();
        let name_ref = name_ref.clone();
        let phone_ref = phone_ref.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form = LeadForm::new(input_value(&name_ref), input_value(&phone_ref));
            let _ = controller.submit(&form);
        })
    };

    let phase = controller.phase();

    html! {
        <div
            id="modal"
            class={classes!("modal", controller.is_visible().then(|| "modal--open"))}
            aria-hidden={(!controller.is_visible()).to_string()}
            onclick={on_backdrop}
        >
            <div class="modal__dialog" role="dialog">
                <button class="modal__close" data-modal-close="x" aria-label="Закрыть">{"×"}</button>
                {
                    if phase == ModalPhase::Submitted {
                        html! {
                            <div class="modal__success">
                                <h3>{"Спасибо за заявку!"}</h3>
                                <p>{"Мы перезвоним вам в течение 15 минут."}</p>
                            </div>
                        }
                    } else {
                        html! {
                            <form id="lead-form" class="lead-form" onsubmit={on_submit} novalidate=true>
                                <h3>{"Оставьте заявку"}</h3>
                                <p class="lead-form__lead">{"Перезвоним и рассчитаем точную стоимость уборки."}</p>
                                <input ref={name_ref} type="text" name="name" placeholder="Ваше имя" autocomplete="name" />
                                <input ref={phone_ref} type="tel" name="phone" placeholder="+7 (___) ___-__-__" autocomplete="tel" />
                                {
                                    if let Some(err) = controller.error() {
                                        html! { <p class="lead-form__error" role="alert">{err.to_string()}</p> }
                                    } else {
                                        html! {}
                                    }
                                }
                                <button type="submit" class="button button--primary">{"Отправить"}</button>
                            </form>
                        }
                    }
                }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mobile_menu::{self, MobileMenu};
    use crate::dom::testing::RecordingPage;
    use crate::timer::testing::VirtualScheduler;
    use std::cell::Cell;

    #[derive(Default)]
    struct RecordingSink {
        leads: RefCell<Vec<Lead>>,
    }

    impl LeadSink for RecordingSink {
        fn submit(&self, lead: &Lead) {
            self.leads.borrow_mut().push(lead.clone());
        }
    }

    struct Harness {
        modal: ModalController,
        clock: VirtualScheduler,
        page: Rc<RecordingPage>,
        sink: Rc<RecordingSink>,
        changes: Rc<Cell<u32>>,
    }

    fn harness() -> Harness {
        let clock = VirtualScheduler::new();
        let page = Rc::new(RecordingPage::default());
        let sink = Rc::new(RecordingSink::default());
        let modal = ModalController::new(
            ModalTiming::default(),
            Rc::new(clock.clone()),
            page.clone(),
            sink.clone(),
        );
        let changes = Rc::new(Cell::new(0));
        modal.set_on_change({
            let changes = changes.clone();
            Rc::new(move || changes.set(changes.get() + 1))
        });
        Harness {
            modal,
            clock,
            page,
            sink,
            changes,
        }
    }

    #[test]
    fn open_locks_scroll_and_escape_closes() {
        let h = harness();
        h.modal.open();
        assert_eq!(h.modal.phase(), ModalPhase::Open);
        assert!(h.page.scroll_locked());

        h.modal.handle_key("Enter");
        assert_eq!(h.modal.phase(), ModalPhase::Open);

        h.modal.handle_key("Escape");
        assert_eq!(h.modal.phase(), ModalPhase::Closed);
        assert!(!h.page.scroll_locked());
        assert_eq!(h.changes.get(), 2);
    }

    #[test]
    fn opening_twice_is_a_no_op() {
        let h = harness();
        h.modal.open();
        h.modal.open();
        assert_eq!(*h.page.locks.borrow(), vec![true]);
    }

    #[test]
    fn empty_phone_blocks_submission() {
        let h = harness();
        h.modal.open();

        let result = h.modal.submit(&LeadForm::new("Анна", ""));

        assert_eq!(result, Err(FormError::MissingPhone));
        assert_eq!(h.modal.phase(), ModalPhase::Open);
        assert_eq!(h.modal.error(), Some(FormError::MissingPhone));
        assert_eq!(h.page.alerts.borrow().len(), 1);
        assert!(h.sink.leads.borrow().is_empty());
        assert_eq!(h.clock.pending(), 0);

        h.clock.advance(10_000);
        assert_eq!(h.modal.phase(), ModalPhase::Open);
        assert_eq!(h.page.reloads.get(), 0);
    }

    #[test]
    fn valid_submission_closes_once_then_reloads() {
        let h = harness();
        h.modal.open();

        assert_eq!(
            h.modal.submit(&LeadForm::new("Анна", "+7 900 000-00-00")),
            Ok(Submission::Accepted)
        );
        assert_eq!(h.modal.phase(), ModalPhase::Submitted);
        assert_eq!(h.sink.leads.borrow().len(), 1);
        assert!(h.page.scroll_locked());

        h.clock.advance(2499);
        assert_eq!(h.modal.phase(), ModalPhase::Submitted);

        h.clock.advance(1);
        assert_eq!(h.modal.phase(), ModalPhase::Closed);
        assert!(!h.page.scroll_locked());
        assert_eq!(h.page.reloads.get(), 0);

        h.clock.advance(299);
        assert_eq!(h.page.reloads.get(), 0);
        h.clock.advance(1);
        assert_eq!(h.page.reloads.get(), 1);

        h.clock.advance(60_000);
        assert_eq!(h.page.reloads.get(), 1);
        assert_eq!(*h.page.locks.borrow(), vec![true, false]);
    }

    #[test]
    fn closing_success_message_early_cancels_auto_close() {
        let h = harness();
        h.modal.open();
        h.modal.submit(&LeadForm::new("Анна", "+7 900")).unwrap();

        h.clock.advance(1000);
        h.modal.close();
        assert_eq!(h.modal.phase(), ModalPhase::Closed);
        assert_eq!(h.clock.pending(), 1);

        h.clock.advance(300);
        assert_eq!(h.page.reloads.get(), 1);
        h.clock.advance(5000);
        assert_eq!(h.page.reloads.get(), 1);
        assert_eq!(*h.page.locks.borrow(), vec![true, false]);
    }

    #[test]
    fn submit_while_closed_is_ignored() {
        let h = harness();
        assert_eq!(
            h.modal.submit(&LeadForm::new("Анна", "+7 900")),
            Ok(Submission::Ignored)
        );
        assert!(h.sink.leads.borrow().is_empty());
        assert_eq!(h.clock.pending(), 0);
    }

    #[test]
    fn closing_modal_keeps_scroll_locked_under_open_menu() {
        let h = harness();
        let menu = MobileMenu::default();
        let menu = mobile_menu::transition(menu, menu.toggled(), &*h.page).unwrap();

        h.modal.open();
        h.modal.close();
        assert!(h.page.scroll_locked());

        mobile_menu::transition(menu, menu.closed(), &*h.page).unwrap();
        assert!(!h.page.scroll_locked());
    }

    #[test]
    fn resubmitting_after_success_does_nothing() {
        let h = harness();
        h.modal.open();
        h.modal.submit(&LeadForm::new("Анна", "+7 900")).unwrap();
        assert_eq!(
            h.modal.submit(&LeadForm::new("Борис", "+7 901")),
            Ok(Submission::Ignored)
        );
        assert_eq!(h.sink.leads.borrow().len(), 1);
        assert_eq!(h.clock.pending(), 1);
    }
}
