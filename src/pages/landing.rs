use yew::prelude::*;

use crate::calculator::Calculator;
use crate::components::accordion::{Accordion, AccordionItem};
use crate::components::animations::use_fade_in;
use crate::components::header::Header;
use crate::components::modal::LeadModal;
use crate::components::smooth_scroll::use_smooth_scroll;
use crate::AppContext;

const SERVICES: [(&str, &str); 3] = [
    ("Поддерживающая уборка", "Пыль, полы, санузел и кухня. Всё, чтобы в квартире снова было легко дышать."),
    ("Генеральная уборка", "Моем окна изнутри, двигаем мебель, отмываем кухню и технику до блеска."),
    ("Уборка после ремонта", "Убираем строительную пыль, следы краски и затирки с любых поверхностей."),
];

const FAQ: [(&str, &str); 4] = [
    (
        "Нужно ли мне быть дома во время уборки?",
        "Нет. Можно оставить ключи консьержу или передать их клинеру. Все сотрудники проходят проверку и работают по договору.",
    ),
    (
        "Какие средства вы используете?",
        "Профессиональную гипоаллергенную химию. Если у вас есть свои средства, клинер поработает ими.",
    ),
    (
        "Что входит в регулярную уборку?",
        "Тот же объём работ, что и в разовой, но раз в неделю и со скидкой. Отменить подписку можно в любой момент.",
    ),
    (
        "Как рассчитывается стоимость?",
        "Цена зависит только от площади квартиры. Передвиньте ползунок в калькуляторе, и вы сразу увидите итог.",
    ),
];

fn faq_items() -> Vec<AccordionItem> {
    FAQ.iter()
        .map(|(question, answer)| AccordionItem {
            title: AttrValue::from(*question),
            body: html! { <p>{*answer}</p> },
        })
        .collect()
}

#[function_component(Landing)]
pub fn landing() -> Html {
    let fade_in = use_context::<AppContext>()
        .map(|c| c.config.fade_in.clone())
        .unwrap_or_default();

    use_smooth_scroll();
    use_fade_in(fade_in);

    html! {
        <div class="landing-page" id="top">
            <Header />

            <section class="hero">
                <div class="hero__content fade-in">
                    <h1>{"Чистая квартира без забот"}</h1>
                    <p class="hero__subtitle">
                        {"Профессиональная уборка квартир в Москве. Приедем в удобное время, работаем со своими средствами и инвентарём."}
                    </p>
                    <div class="hero__actions">
                        <button class="button button--primary" data-modal-open="hero">{"Заказать уборку"}</button>
                        <a href="#calculator" class="button button--ghost">{"Рассчитать стоимость"}</a>
                    </div>
                </div>
            </section>

            <section class="services" id="services">
                <h2 class="fade-in">{"Что мы убираем"}</h2>
                <div class="services__grid">
                    { for SERVICES.iter().map(|(title, text)| html! {
                        <div class="service-card fade-in">
                            <h3>{*title}</h3>
                            <p>{*text}</p>
                        </div>
                    }) }
                </div>
            </section>

            <Calculator />

            <section class="faq" id="faq">
                <h2 class="fade-in">{"Частые вопросы"}</h2>
                <Accordion items={faq_items()} open_first=true />
            </section>

            <footer class="footer" id="contacts">
                <div class="footer__content">
                    <p class="footer__brand">{"ЧистоДом"}</p>
                    <a href="tel:+74950000000">{"+7 (495) 000-00-00"}</a>
                    <p>{"Ежедневно с 8:00 до 22:00"}</p>
                    <button class="button button--outline" data-modal-open="footer">{"Перезвоните мне"}</button>
                </div>
            </footer>

            <LeadModal />

            <style>
                {r#"
                :root {
                    --accent: #2bb673;
                    --track: #e3e8ee;
                    --text: #1d2b36;
                    --muted: #6b7a88;
                }

                .landing-page {
                    color: var(--text);
                    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
                }

                .header {
                    position: fixed;
                    top: 0;
                    left: 0;
                    width: 100%;
                    z-index: 100;
                    padding: 1.5rem 0;
                    background: transparent;
                    transition: padding 0.3s ease, background 0.3s ease, box-shadow 0.3s ease;
                }

                .header.scrolled {
                    padding: 0.75rem 0;
                    background: #fff;
                    box-shadow: 0 2px 12px rgba(0, 0, 0, 0.08);
                }

                .header__inner {
                    max-width: 1140px;
                    margin: 0 auto;
                    padding: 0 1.5rem;
                    display: flex;
                    align-items: center;
                    justify-content: space-between;
                }

                .header__logo {
                    font-weight: 700;
                    font-size: 1.4rem;
                    color: var(--text);
                    text-decoration: none;
                }

                .nav {
                    display: flex;
                    align-items: center;
                    gap: 1.5rem;
                }

                .nav__link, .nav__phone {
                    color: var(--text);
                    text-decoration: none;
                }

                .burger {
                    display: none;
                    background: none;
                    border: none;
                    cursor: pointer;
                }

                .burger span {
                    display: block;
                    width: 24px;
                    height: 2px;
                    margin: 5px 0;
                    background: var(--text);
                    transition: transform 0.3s ease, opacity 0.3s ease;
                }

                .burger--active span:nth-child(1) { transform: translateY(7px) rotate(45deg); }
                .burger--active span:nth-child(2) { opacity: 0; }
                .burger--active span:nth-child(3) { transform: translateY(-7px) rotate(-45deg); }

                .button {
                    display: inline-block;
                    padding: 0.9rem 1.8rem;
                    border-radius: 999px;
                    border: 2px solid var(--accent);
                    font-size: 1rem;
                    cursor: pointer;
                    text-decoration: none;
                }

                .button--primary { background: var(--accent); color: #fff; }
                .button--outline { background: transparent; color: var(--accent); }
                .button--ghost { border-color: transparent; color: var(--accent); }

                .hero {
                    min-height: 90vh;
                    display: flex;
                    align-items: center;
                    padding: 8rem 1.5rem 4rem;
                    background: linear-gradient(135deg, #f3fbf7 0%, #e7f3fb 100%);
                }

                .hero__content {
                    max-width: 640px;
                    margin: 0 auto;
                }

                .hero h1 { font-size: 3rem; margin-bottom: 1rem; }
                .hero__subtitle { font-size: 1.2rem; color: var(--muted); }
                .hero__actions { display: flex; gap: 1rem; margin-top: 2rem; flex-wrap: wrap; }

                .services, .faq, .calculator {
                    max-width: 1140px;
                    margin: 0 auto;
                    padding: 5rem 1.5rem;
                }

                .services__grid {
                    display: grid;
                    grid-template-columns: repeat(auto-fit, minmax(260px, 1fr));
                    gap: 1.5rem;
                }

                .service-card {
                    padding: 2rem;
                    border-radius: 16px;
                    background: #fff;
                    box-shadow: 0 8px 24px rgba(0, 0, 0, 0.06);
                }

                .calculator__area { margin-bottom: 2rem; }

                #area-value { float: right; font-weight: 700; }

                #area-slider {
                    width: 100%;
                    height: 6px;
                    border-radius: 3px;
                    appearance: none;
                    outline: none;
                }

                #area-hint { color: var(--muted); }

                .calculator__options {
                    display: grid;
                    grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
                    gap: 1rem;
                }

                .calculator__option {
                    display: flex;
                    flex-direction: column;
                    gap: 0.35rem;
                    padding: 1.25rem;
                    border: 2px solid var(--track);
                    border-radius: 12px;
                    cursor: pointer;
                }

                .calculator__option--selected { border-color: var(--accent); }
                .option-price { font-size: 1.4rem; font-weight: 700; }
                .option-monthly, .option-savings { color: var(--muted); font-size: 0.9rem; }

                .calculator__result { margin-top: 2rem; }
                #result-price { font-size: 2rem; font-weight: 700; }
                #result-monthly { color: var(--muted); }

                .accordion__item {
                    border-bottom: 1px solid var(--track);
                }

                .accordion__header {
                    width: 100%;
                    display: flex;
                    justify-content: space-between;
                    padding: 1.25rem 0;
                    background: none;
                    border: none;
                    font-size: 1.1rem;
                    text-align: left;
                    cursor: pointer;
                }

                .accordion__content {
                    max-height: 0;
                    overflow: hidden;
                    transition: max-height 0.3s ease;
                }

                .accordion__body { padding-bottom: 1.25rem; color: var(--muted); }

                .footer {
                    padding: 3rem 1.5rem;
                    background: var(--text);
                    color: #fff;
                    text-align: center;
                }

                .footer a { color: #fff; }
                .footer__brand { font-weight: 700; font-size: 1.4rem; }

                .modal {
                    position: fixed;
                    inset: 0;
                    z-index: 200;
                    display: none;
                    align-items: center;
                    justify-content: center;
                    background: rgba(0, 0, 0, 0.5);
                }

                .modal--open { display: flex; }

                .modal__dialog {
                    position: relative;
                    width: min(440px, 92vw);
                    padding: 2.5rem 2rem;
                    border-radius: 16px;
                    background: #fff;
                }

                .modal__close {
                    position: absolute;
                    top: 0.75rem;
                    right: 1rem;
                    background: none;
                    border: none;
                    font-size: 1.8rem;
                    cursor: pointer;
                }

                .lead-form {
                    display: flex;
                    flex-direction: column;
                    gap: 0.9rem;
                }

                .lead-form input {
                    padding: 0.9rem 1rem;
                    border: 1px solid var(--track);
                    border-radius: 8px;
                    font-size: 1rem;
                }

                .lead-form__error { color: #d64545; margin: 0; }
                .modal__success { text-align: center; }

                .fade-in {
                    opacity: 0;
                    transform: translateY(24px);
                    transition: opacity 0.6s ease, transform 0.6s ease;
                }

                .fade-in.visible {
                    opacity: 1;
                    transform: none;
                }

                @media (max-width: 860px) {
                    .burger { display: block; }

                    .nav {
                        position: fixed;
                        top: 0;
                        right: 0;
                        height: 100vh;
                        width: 75vw;
                        flex-direction: column;
                        justify-content: center;
                        background: #fff;
                        transform: translateX(100%);
                        transition: transform 0.3s ease;
                    }

                    .nav--open { transform: translateX(0); }

                    .hero h1 { font-size: 2.2rem; }
                }
                "#}
            </style>
        </div>
    }
}
