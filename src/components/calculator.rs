use gloo_timers::callback::Timeout;
use log::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlInputElement};
use yew::prelude::*;

use crate::config::{whatsapp_base_url, AREA_DEFAULT, AREA_MAX, AREA_MIN, AREA_RANGE_MAX, PRICE_PULSE_MS};
use crate::content::{Extra, RepairType};
use crate::dom;
use crate::error::SiteError;
use crate::pricing::{
    area_from_field, extra_label, per_m2_label, range_from_field, ExtraChoice, Quote, RepairChoice, Selection,
};

const REPAIR_INPUTS: &str = "input[name=\"repairType\"]";
const CHECKED_REPAIR: &str = "input[name=\"repairType\"]:checked";
const CHECKED_EXTRAS: &str = "input[name=\"extras\"]:checked";

/// Reads the current form state straight from the rendered inputs, so prices
/// and labels always come from the elements' own data attributes.
pub fn read_selection(card: &Element, area_input: Option<&HtmlInputElement>) -> Selection {
    let repair = card
        .query_selector(CHECKED_REPAIR)
        .ok()
        .flatten()
        .map(|input| {
            RepairChoice::from_attrs(
                input.get_attribute("data-label").as_deref(),
                input.get_attribute("data-price").as_deref(),
            )
        });

    let area = area_from_field(&area_input.map(HtmlInputElement::value).unwrap_or_default());

    let extras = dom::query_all(card, CHECKED_EXTRAS)
        .iter()
        .map(|checkbox| {
            let title = checkbox
                .closest(".calc-extra")
                .ok()
                .flatten()
                .and_then(|extra| extra.query_selector(".extra-title").ok().flatten())
                .and_then(|title| title.text_content());
            ExtraChoice::from_attrs(title.as_deref(), checkbox.get_attribute("data-price").as_deref())
        })
        .collect();

    Selection { repair, area, extras }
}

/// Checks the first repair type when the markup has none checked.
fn ensure_repair_selected(card: &Element) {
    if card.query_selector(CHECKED_REPAIR).ok().flatten().is_some() {
        return;
    }
    if let Some(first) = card
        .query_selector(REPAIR_INPUTS)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    {
        first.set_checked(true);
    }
}

#[derive(Properties, PartialEq)]
pub struct CalculatorProps {
    pub repair_types: Vec<RepairType>,
    pub extras: Vec<Extra>,
}

/// Writes a quote into the total display and the WhatsApp link. Both are
/// updated in place so the form itself never re-renders under the user.
fn render_quote(quote: &Quote, total: Option<&HtmlElement>, link: Option<&Element>, pulse: &mut Option<Timeout>) {
    debug!("quote total {}", quote.total);
    if let Some(total) = total {
        total.set_text_content(Some(&quote.display));
        dom::set_style(total, "transform", "scale(1.1)");
        let total = total.clone();
        // Replacing the handle clears a restore that has not fired yet.
        *pulse = Some(Timeout::new(PRICE_PULSE_MS, move || {
            dom::set_style(&total, "transform", "scale(1)");
        }));
    }
    if let Some(link) = link {
        if let Err(e) = link.set_attribute("href", &quote.link) {
            debug!("whatsapp link not updated: {}", SiteError::from(e));
        }
    }
}

#[function_component(Calculator)]
pub fn calculator(props: &CalculatorProps) -> Html {
    let card_ref = use_node_ref();
    let area_input_ref = use_node_ref();
    let area_range_ref = use_node_ref();
    let total_ref = use_node_ref();
    let link_ref = use_node_ref();
    let pulse = use_mut_ref(|| None::<Timeout>);

    let recompute = {
        let card_ref = card_ref.clone();
        let area_input_ref = area_input_ref.clone();
        let total_ref = total_ref.clone();
        let link_ref = link_ref.clone();
        let pulse = pulse.clone();
        Callback::from(move |_: ()| {
            let Some(card) = card_ref.cast::<Element>() else {
                return;
            };
            let area_input = area_input_ref.cast::<HtmlInputElement>();
            let selection = read_selection(&card, area_input.as_ref());
            let quote = Quote::from(&selection);
            render_quote(
                &quote,
                total_ref.cast::<HtmlElement>().as_ref(),
                link_ref.cast::<Element>().as_ref(),
                &mut pulse.borrow_mut(),
            );
        })
    };

    // Default selection and first quote once the form is in the document.
    {
        let card_ref = card_ref.clone();
        let recompute = recompute.clone();
        let pulse = pulse.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(card) = card_ref.cast::<Element>() {
                    ensure_repair_selected(&card);
                    recompute.emit(());
                    info!("calculator ready");
                } else {
                    debug!("calculator disabled: card not rendered");
                }
                move || drop(pulse.borrow_mut().take())
            },
            (),
        );
    }

    let on_area_input = {
        let area_range_ref = area_range_ref.clone();
        let recompute = recompute.clone();
        Callback::from(move |e: InputEvent| {
            let Some(field) = e.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            if let Some(range) = area_range_ref.cast::<HtmlInputElement>() {
                range.set_value(&range_from_field(&field.value()).to_string());
            }
            recompute.emit(());
        })
    };

    let on_range_input = {
        let area_input_ref = area_input_ref.clone();
        let recompute = recompute.clone();
        Callback::from(move |e: InputEvent| {
            let Some(range) = e.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            if let Some(field) = area_input_ref.cast::<HtmlInputElement>() {
                field.set_value(&range.value());
            }
            recompute.emit(());
        })
    };

    let on_option_change = {
        let recompute = recompute.clone();
        Callback::from(move |_: Event| recompute.emit(()))
    };

    let default_area = AREA_DEFAULT.to_string();
    let preselected = props.repair_types.iter().position(|t| t.preselected);

    html! {
        <div class="calculator-card" ref={card_ref}>
            <div class="calc-step">
                <h3 class="calc-step-title">{"1. Тип ремонта"}</h3>
                <div class="calc-options">
                    {
                        props.repair_types.iter().enumerate().map(|(i, repair)| html! {
                            <label class="option-card" key={repair.id.clone()}>
                                <input
                                    type="radio"
                                    name="repairType"
                                    value={repair.id.clone()}
                                    data-price={repair.price.to_string()}
                                    data-label={repair.label.clone()}
                                    checked={preselected == Some(i)}
                                    onchange={on_option_change.clone()}
                                />
                                <span class="option-title">{repair.label.clone()}</span>
                                <span class="option-price">{per_m2_label(repair.price)}</span>
                                <span class="option-desc">{repair.description.clone()}</span>
                            </label>
                        }).collect::<Html>()
                    }
                </div>
            </div>

            <div class="calc-step">
                <h3 class="calc-step-title">{"2. Площадь, м²"}</h3>
                <div class="calc-area">
                    <input
                        type="number"
                        id="areaInput"
                        class="area-input"
                        ref={area_input_ref}
                        min={AREA_MIN.to_string()}
                        max={AREA_MAX.to_string()}
                        value={default_area.clone()}
                        oninput={on_area_input}
                    />
                    <input
                        type="range"
                        id="areaRange"
                        class="area-range"
                        ref={area_range_ref}
                        min={AREA_MIN.to_string()}
                        max={AREA_RANGE_MAX.to_string()}
                        value={default_area}
                        oninput={on_range_input}
                    />
                </div>
            </div>

            <div class="calc-step">
                <h3 class="calc-step-title">{"3. Дополнительные работы"}</h3>
                <div class="calc-extras">
                    {
                        props.extras.iter().map(|extra| html! {
                            <label class="calc-extra extra-card" key={extra.id.clone()}>
                                <input
                                    type="checkbox"
                                    name="extras"
                                    value={extra.id.clone()}
                                    data-price={extra.price.to_string()}
                                    onchange={on_option_change.clone()}
                                />
                                <span class="extra-title">{extra.title.clone()}</span>
                                <span class="extra-price">{extra_label(extra.price)}</span>
                            </label>
                        }).collect::<Html>()
                    }
                </div>
            </div>

            <div class="calc-result">
                <span class="calc-result-label">{"Примерная стоимость:"}</span>
                <span id="totalPrice" class="calc-total" ref={total_ref}></span>
                <a
                    id="sendToWhatsApp"
                    class="btn btn-whatsapp"
                    ref={link_ref}
                    href={whatsapp_base_url()}
                    target="_blank"
                    rel="noopener noreferrer"
                >
                    {"Отправить расчёт в WhatsApp"}
                </a>
            </div>
        </div>
    }
}
