use log::debug;
use web_sys::{Element, HtmlInputElement};
use yew::prelude::*;

use crate::pricing::engine::{format_price, AreaBounds, PricingEngine};
use crate::pricing::table::Frequency;
use crate::AppContext;

pub const CONTACT_US: &str = "Уточняйте у менеджера";

/// What the visitor has picked. Rebuilt from the inputs on every event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculatorState {
    pub area: u32,
    pub frequency: Frequency,
    bounds: AreaBounds,
}

impl CalculatorState {
    pub fn new(bounds: AreaBounds, area: u32, frequency: Frequency) -> Self {
        Self {
            area: bounds.clamp(area),
            frequency,
            bounds,
        }
    }

    pub fn with_area(self, area: u32) -> Self {
        Self {
            area: self.bounds.clamp(area),
            ..self
        }
    }

    pub fn with_frequency(self, frequency: Frequency) -> Self {
        Self { frequency, ..self }
    }
}

/// Price readout of one frequency option, shown next to its radio button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionReadout {
    pub frequency: Frequency,
    pub selected: bool,
    pub price: String,
    pub monthly: String,
    pub savings: String,
}

/// Every string the calculator writes into the page for a given state.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorView {
    pub area_text: String,
    pub area_hint: String,
    pub fill_percent: f64,
    pub track_background: String,
    pub options: Vec<OptionReadout>,
    pub summary: String,
    pub price: String,
    pub monthly: String,
}

impl CalculatorView {
    pub fn render(engine: &PricingEngine, state: &CalculatorState) -> Self {
        let area = state.area;
        let fill_percent = engine.bounds().fill_percent(area);

        let options = Frequency::ALL
            .into_iter()
            .map(|frequency| {
                let price = Some(engine.lookup_price(area, frequency));
                OptionReadout {
                    frequency,
                    selected: frequency == state.frequency,
                    price: format_price(price),
                    monthly: monthly_line(engine, price, frequency),
                    savings: savings_line(engine.savings(area, frequency)),
                }
            })
            .collect();

        let price = Some(engine.lookup_price(area, state.frequency));
        Self {
            area_text: format!("{} кв.м", area),
            area_hint: engine.area_hint(area).to_string(),
            fill_percent,
            track_background: track_background(fill_percent),
            options,
            summary: format!("{} кв.м, {}", area, state.frequency.label()),
            price: format_price(price),
            monthly: monthly_line(engine, price, state.frequency),
        }
    }
}

/// Empty for single visits; the monthly total for weekly plans.
pub fn monthly_line(engine: &PricingEngine, price: Option<u32>, frequency: Frequency) -> String {
    match frequency {
        Frequency::Single => String::new(),
        Frequency::Weekly => match engine.monthly_equivalent(price, frequency) {
            Some(monthly) => format!("≈ {} в месяц", format_price(Some(monthly))),
            None => CONTACT_US.to_string(),
        },
    }
}

fn savings_line(savings: i64) -> String {
    match u32::try_from(savings) {
        Ok(0) => String::new(),
        Ok(saved) => format!("Экономия {}", format_price(Some(saved))),
        Err(_) => String::new(),
    }
}

fn track_background(fill_percent: f64) -> String {
    format!(
        "linear-gradient(to right, var(--accent) 0%, var(--accent) {p:.1}%, var(--track) {p:.1}%, var(--track) 100%)",
        p = fill_percent
    )
}

pub fn parse_area(raw: &str, bounds: AreaBounds) -> Option<u32> {
    raw.trim().parse::<u32>().ok().map(|area| bounds.clamp(area))
}

/// Current slider value, or `None` when the slider is not mounted.
pub fn read_area(slider: &NodeRef, bounds: AreaBounds) -> Option<u32> {
    let input = slider.cast::<HtmlInputElement>()?;
    parse_area(&input.value(), bounds)
}

fn read_checked_frequency(section: &NodeRef) -> Option<Frequency> {
    let checked = section
        .cast::<Element>()?
        .query_selector("input[name='frequency']:checked")
        .ok()
        .flatten()?;
    Frequency::from_value(&checked.get_attribute("value")?)
}

#[function_component(Calculator)]
pub fn calculator() -> Html {
    let context = use_context::<AppContext>();
    let engine = context
        .map(|c| c.engine)
        .unwrap_or_else(|| std::rc::Rc::new(PricingEngine::default()));
    let bounds = engine.bounds();

    let state = use_state(|| CalculatorState::new(bounds, bounds.default, Frequency::Single));
    let section_ref = use_node_ref();
    let slider_ref = use_node_ref();

    // Sync once from whatever the markup ended up with.
    {
        let state = state.clone();
        let section_ref = section_ref.clone();
        let slider_ref = slider_ref.clone();
        use_effect_with_deps(
            move |_| {
                match read_area(&slider_ref, bounds) {
                    Some(area) => {
                        let frequency =
                            read_checked_frequency(&section_ref).unwrap_or(state.frequency);
                        debug!("calculator mounted at {} m², {:?}", area, frequency);
                        state.set(CalculatorState::new(bounds, area, frequency));
                    }
                    None => debug!("area slider not on the page; calculator inactive"),
                }
                || ()
            },
            (),
        );
    }

    let on_area = {
        let state = state.clone();
        let slider_ref = slider_ref.clone();
        Callback::from(move |_: InputEvent| match read_area(&slider_ref, bounds) {
            Some(area) => state.set(state.with_area(area)),
            None => debug!("area input without a slider; ignored"),
        })
    };

    let on_frequency = {
        let state = state.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(frequency) = Frequency::from_value(&input.value()) {
                state.set(state.with_frequency(frequency));
            }
        })
    };

    let view = CalculatorView::render(&engine, &state);

    html! {
        <section class="calculator fade-in" id="calculator" ref={section_ref}>
            <h2>{"Рассчитайте стоимость уборки"}</h2>
            <div class="calculator__area">
                <label for="area-slider">{"Площадь квартиры"}</label>
                <span id="area-value">{&view.area_text}</span>
                <input
                    type="range"
                    id="area-slider"
                    ref={slider_ref}
                    min={bounds.min.to_string()}
                    max={bounds.max.to_string()}
                    step="1"
                    value={state.area.to_string()}
                    style={format!("background: {}", view.track_background)}
                    oninput={on_area}
                />
                <p id="area-hint">{&view.area_hint}</p>
            </div>
            <div class="calculator__options">
                { for view.options.iter().map(|option| html! {
                    <label class={classes!("calculator__option", option.selected.then(|| "calculator__option--selected"))}>
                        <input
                            type="radio"
                            name="frequency"
                            value={option.frequency.value()}
                            checked={option.selected}
                            onchange={on_frequency.clone()}
                        />
                        <span class="option-title">{option.frequency.title()}</span>
                        <span class="option-price" data-frequency={option.frequency.value()}>{&option.price}</span>
                        <span class="option-monthly">{&option.monthly}</span>
                        <span class="option-savings">{&option.savings}</span>
                    </label>
                }) }
            </div>
            <div class="calculator__result">
                <p id="result-summary">{&view.summary}</p>
                <p id="result-price">{&view.price}</p>
                <p id="result-monthly">{&view.monthly}</p>
                <button class="button button--primary" data-modal-open="calculator">
                    {"Заказать уборку"}
                </button>
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::table::PriceZone;

    fn state(area: u32, frequency: Frequency) -> CalculatorState {
        CalculatorState::new(AreaBounds::default(), area, frequency)
    }

    #[test]
    fn weekly_at_one_hundred_meters() {
        let engine = PricingEngine::default();
        let view = CalculatorView::render(&engine, &state(100, Frequency::Weekly));

        assert_eq!(engine.classify_zone(100), PriceZone::Zone2);
        assert_eq!(view.summary, "100 кв.м, регулярно раз в неделю");
        assert_eq!(view.price, format_price(Some(5500)));
        assert_eq!(view.monthly, format!("≈ {} в месяц", format_price(Some(22_000))));
    }

    #[test]
    fn single_visit_has_no_monthly_line() {
        let engine = PricingEngine::default();
        let view = CalculatorView::render(&engine, &state(70, Frequency::Single));

        assert_eq!(view.summary, "70 кв.м, разовая уборка");
        assert_eq!(view.price, format_price(Some(4900)));
        assert_eq!(view.monthly, "");
    }

    #[test]
    fn every_option_readout_follows_the_area() {
        let engine = PricingEngine::default();
        let view = CalculatorView::render(&engine, &state(200, Frequency::Single));

        assert_eq!(view.options.len(), 2);
        let single = &view.options[0];
        let weekly = &view.options[1];
        assert!(single.selected && !weekly.selected);
        assert_eq!(single.price, format_price(Some(9900)));
        assert_eq!(single.savings, "");
        assert_eq!(weekly.price, format_price(Some(7900)));
        assert_eq!(weekly.savings, format!("Экономия {}", format_price(Some(2000))));
        assert_eq!(view.area_hint, "4+ комнат · 3 клинера");
    }

    #[test]
    fn switching_frequency_keeps_area() {
        let start = state(120, Frequency::Single);
        let next = start.with_frequency(Frequency::Weekly);
        assert_eq!(next.area, 120);
        assert_eq!(next.frequency, Frequency::Weekly);
    }

    #[test]
    fn area_is_clamped_to_slider_range() {
        assert_eq!(state(10, Frequency::Single).area, 50);
        assert_eq!(state(100, Frequency::Single).with_area(900).area, 250);
        assert_eq!(parse_area(" 120 ", AreaBounds::default()), Some(120));
        assert_eq!(parse_area("abc", AreaBounds::default()), None);
    }

    #[test]
    fn track_fill_is_proportional() {
        let engine = PricingEngine::default();
        let view = CalculatorView::render(&engine, &state(150, Frequency::Single));
        assert_eq!(view.fill_percent, 50.0);
        assert!(view.track_background.contains("var(--accent) 50.0%"));
    }

    #[test]
    fn unknown_weekly_price_asks_to_contact() {
        let engine = PricingEngine::default();
        assert_eq!(monthly_line(&engine, None, Frequency::Weekly), CONTACT_US);
        assert_eq!(monthly_line(&engine, None, Frequency::Single), "");
    }

    #[test]
    fn missing_slider_reads_nothing() {
        assert_eq!(read_area(&NodeRef::default(), AreaBounds::default()), None);
    }
}
