use std::rc::Rc;

use log::{error, info, Level};
use yew::prelude::*;
use yew_router::prelude::*;

mod calculator;
mod config;
mod dom;
mod error;
mod timer;
mod pricing {
    pub mod engine;
    pub mod table;
}
mod components {
    pub mod accordion;
    pub mod animations;
    pub mod header;
    pub mod lead_form;
    pub mod mobile_menu;
    pub mod modal;
    pub mod smooth_scroll;
}
mod pages {
    pub mod landing;
}

use config::SiteConfig;
use dom::BrowserPage;
use pages::landing::Landing;
use pricing::engine::PricingEngine;

/// State handed to every component: read-only configuration plus the page
/// handle whose scroll holds are shared between overlays.
#[derive(Clone)]
pub struct AppContext {
    pub config: Rc<SiteConfig>,
    pub engine: Rc<PricingEngine>,
    pub page: Rc<BrowserPage>,
}

impl AppContext {
    fn new(config: SiteConfig) -> Self {
        let engine = Rc::new(config.pricing_engine());
        Self {
            config: Rc::new(config),
            engine,
            page: Rc::new(BrowserPage::default()),
        }
    }
}

impl PartialEq for AppContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.config, &other.config)
            && Rc::ptr_eq(&self.engine, &other.engine)
            && Rc::ptr_eq(&self.page, &other.page)
    }
}

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering landing page");
            html! { <Landing /> }
        }
        Route::NotFound => {
            info!("Unknown path, rendering not found page");
            html! {
                <div class="not-found">
                    <h1>{"Страница не найдена"}</h1>
                    <Link<Route> to={Route::Home}>{"На главную"}</Link<Route>>
                </div>
            }
        }
    }
}

fn load_config() -> SiteConfig {
    match SiteConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid site config, using built-in defaults: {}", e);
            SiteConfig::default()
        }
    }
}

#[function_component]
fn App() -> Html {
    let context = use_state(|| AppContext::new(load_config()));

    html! {
        <ContextProvider<AppContext> context={(*context).clone()}>
            <BrowserRouter>
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </ContextProvider<AppContext>>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
