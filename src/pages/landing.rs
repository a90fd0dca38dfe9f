use yew::prelude::*;

use crate::behaviors::page::PageBehaviors;
use crate::components::calculator::Calculator;
use crate::components::header::Header;
use crate::config::whatsapp_base_url;
use crate::content::SiteContent;

#[derive(Properties, PartialEq)]
pub struct LandingProps {
    pub content: SiteContent,
}

#[function_component(Landing)]
pub fn landing(props: &LandingProps) -> Html {
    let content = &props.content;

    // Document-wide behaviors need the whole page in place, so they are
    // attached after mount and detached on unmount.
    use_effect_with_deps(
        |_| {
            let behaviors = PageBehaviors::install();
            move || drop(behaviors)
        },
        (),
    );

    html! {
        <>
            <Header brand={content.brand.clone()} links={content.nav.clone()} />
            <main class="landing-page">
                <section class="hero" id="hero">
                    <div class="container hero-content">
                        <h1 class="hero-title" data-animate="fade-up">{content.tagline.clone()}</h1>
                        <p class="hero-subtitle" data-animate="fade-up" data-delay="100">
                            {"Фиксированная смета, собственные бригады и гарантия 2 года на все работы."}
                        </p>
                        <div class="hero-cta-group" data-animate="fade-up" data-delay="200">
                            <a href="#calculator" class="btn btn-primary">{"Рассчитать стоимость"}</a>
                            <a href="#contacts" class="btn btn-outline">{"Связаться с нами"}</a>
                        </div>
                    </div>
                </section>

                <section class="services" id="services">
                    <div class="container">
                        <h2 class="section-title" data-animate="fade-up">{"Наши услуги"}</h2>
                        <div class="services-grid">
                            {
                                content.services.iter().enumerate().map(|(i, service)| html! {
                                    <div class="service-card" data-animate="fade-up" data-delay={(i * 100).to_string()}>
                                        <div class="service-icon">{service.icon.clone()}</div>
                                        <h3>{service.title.clone()}</h3>
                                        <p>{service.text.clone()}</p>
                                    </div>
                                }).collect::<Html>()
                            }
                        </div>
                    </div>
                </section>

                <section class="about" id="about">
                    <div class="container">
                        <h2 class="section-title" data-animate="fade-up">{"Почему выбирают нас"}</h2>
                        <div class="stats-grid">
                            {
                                content.stats.iter().map(|stat| html! {
                                    <div class="stat-item" data-animate="zoom-in">
                                        <span class="stat-number" data-count={stat.count.to_string()}></span>
                                        <span class="stat-label">{stat.label.clone()}</span>
                                    </div>
                                }).collect::<Html>()
                            }
                        </div>
                    </div>
                </section>

                <section class="calculator" id="calculator">
                    <div class="container">
                        <h2 class="section-title" data-animate="fade-up">{"Калькулятор стоимости"}</h2>
                        <p class="section-subtitle" data-animate="fade-up" data-delay="100">
                            {"Выберите параметры и отправьте расчёт нам в WhatsApp"}
                        </p>
                        <Calculator
                            repair_types={content.repair_types.clone()}
                            extras={content.extras.clone()}
                        />
                    </div>
                </section>

                <section class="steps" id="steps">
                    <div class="container">
                        <h2 class="section-title" data-animate="fade-up">{"Как мы работаем"}</h2>
                        <ol class="steps-list">
                            {
                                content.steps.iter().enumerate().map(|(i, step)| html! {
                                    <li class="step" data-animate="fade-left" data-delay={(i * 150).to_string()}>
                                        <span class="step-number">{(i + 1).to_string()}</span>
                                        <h3>{step.title.clone()}</h3>
                                        <p>{step.text.clone()}</p>
                                    </li>
                                }).collect::<Html>()
                            }
                        </ol>
                    </div>
                </section>

                <section class="contacts" id="contacts">
                    <div class="container contacts-inner" data-animate="fade-up">
                        <h2 class="section-title">{"Контакты"}</h2>
                        <p class="contact-line">{content.contacts.phone.clone()}</p>
                        <p class="contact-line">{content.contacts.address.clone()}</p>
                        <p class="contact-line">{content.contacts.hours.clone()}</p>
                        <a
                            href={whatsapp_base_url()}
                            class="btn btn-whatsapp"
                            target="_blank"
                            rel="noopener noreferrer"
                        >
                            {"Написать в WhatsApp"}
                        </a>
                    </div>
                </section>
            </main>
            <footer class="footer">
                <div class="container footer-inner">
                    <span>{format!("© {}", content.brand)}</span>
                    <a href="#" class="footer-top">{"Наверх ↑"}</a>
                </div>
            </footer>
        </>
    }
}
