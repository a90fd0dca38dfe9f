use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{MouseEvent, Node};
use yew::prelude::*;

use crate::config::HEADER_SCROLL_THRESHOLD;
use crate::content::NavItem;
use crate::dom::{self, Listener};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MenuAction {
    Toggle,
    Close,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MenuState {
    pub open: bool,
}

impl MenuState {
    /// Inline `overflow` for `<body>` while in this state.
    pub fn body_overflow(&self) -> &'static str {
        if self.open {
            "hidden"
        } else {
            ""
        }
    }
}

impl Reducible for MenuState {
    type Action = MenuAction;

    fn reduce(self: Rc<Self>, action: MenuAction) -> Rc<Self> {
        match action {
            MenuAction::Toggle => Rc::new(Self { open: !self.open }),
            MenuAction::Close if self.open => Rc::new(Self { open: false }),
            MenuAction::Close => self,
        }
    }
}

pub fn is_scrolled(scroll_y: f64) -> bool {
    scroll_y > HEADER_SCROLL_THRESHOLD
}

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub brand: AttrValue,
    pub links: Vec<NavItem>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let menu = use_reducer(MenuState::default);
    // Re-renders only when the threshold is crossed, not on every scroll event.
    let is_scrolled_state = use_state_eq(|| false);
    let button_ref = use_node_ref();
    let nav_ref = use_node_ref();

    // Header style follows the scroll offset.
    {
        let is_scrolled_state = is_scrolled_state.clone();
        use_effect_with_deps(
            move |_| {
                let listener = dom::window().ok().and_then(|window| {
                    let update = {
                        let window = window.clone();
                        move || {
                            if let Ok(y) = window.scroll_y() {
                                is_scrolled_state.set(is_scrolled(y));
                            }
                        }
                    };
                    update();
                    Listener::passive(&window, "scroll", move |_| update()).ok()
                });
                move || drop(listener)
            },
            (),
        );
    }

    // Scroll lock mirrors the menu.
    use_effect_with_deps(
        |menu: &MenuState| {
            if let Ok(body) = dom::body() {
                dom::set_style(&body, "overflow", menu.body_overflow());
            }
            || ()
        },
        (*menu).clone(),
    );

    // Clicks outside the button and the panel close an open menu.
    {
        let dispatcher = menu.dispatcher();
        let button_ref = button_ref.clone();
        let nav_ref = nav_ref.clone();
        use_effect_with_deps(
            move |_| {
                let listener = dom::document().ok().and_then(|document| {
                    Listener::new(&document, "click", move |event| {
                        let (Some(button), Some(nav)) = (button_ref.get(), nav_ref.get()) else {
                            return;
                        };
                        let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
                        if !button.contains(target.as_ref()) && !nav.contains(target.as_ref()) {
                            dispatcher.dispatch(MenuAction::Close);
                        }
                    })
                    .ok()
                });
                move || drop(listener)
            },
            (),
        );
    }

    let toggle_menu = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| menu.dispatch(MenuAction::Toggle))
    };

    // Not prevented: the link still has to scroll to its section.
    let close_menu = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| menu.dispatch(MenuAction::Close))
    };

    let active = menu.open.then_some("active");

    html! {
        <header id="header" class={classes!("header", (*is_scrolled_state).then_some("scrolled"))}>
            <div class="container header-inner">
                <a href="#" class="logo">{props.brand.clone()}</a>
                <nav id="navList" ref={nav_ref} class={classes!("nav", active)}>
                    {
                        props.links.iter().map(|item| html! {
                            <a href={item.href.clone()} class="nav-link" onclick={close_menu.clone()}>
                                {item.label.clone()}
                            </a>
                        }).collect::<Html>()
                    }
                </nav>
                <button
                    id="mobileMenuBtn"
                    ref={button_ref}
                    class={classes!("burger-menu", active)}
                    aria-label="Меню"
                    onclick={toggle_menu}
                >
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
            </div>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(state: MenuState, actions: &[MenuAction]) -> Rc<MenuState> {
        actions
            .iter()
            .fold(Rc::new(state), |state, action| state.reduce(*action))
    }

    #[test]
    fn test_toggle_twice_returns_to_closed() {
        let state = apply(MenuState::default(), &[MenuAction::Toggle, MenuAction::Toggle]);
        assert!(!state.open);
        assert_eq!(state.body_overflow(), "");
    }

    #[test]
    fn test_open_locks_scroll() {
        let state = apply(MenuState::default(), &[MenuAction::Toggle]);
        assert!(state.open);
        assert_eq!(state.body_overflow(), "hidden");
    }

    #[test]
    fn test_nav_link_closes_open_menu() {
        let state = apply(MenuState::default(), &[MenuAction::Toggle, MenuAction::Close]);
        assert!(!state.open);
    }

    #[test]
    fn test_close_when_closed_keeps_state() {
        let closed = Rc::new(MenuState::default());
        let after = closed.clone().reduce(MenuAction::Close);
        assert!(Rc::ptr_eq(&closed, &after));
    }

    #[test]
    fn test_scrolling_within_one_side_keeps_flag() {
        let flags: Vec<bool> = [0.0, 12.0, 49.0, 50.0].into_iter().map(is_scrolled).collect();
        assert!(flags.windows(2).all(|w| w[0] == w[1]));
        let flags: Vec<bool> = [51.0, 300.0, 2000.0].into_iter().map(is_scrolled).collect();
        assert!(flags.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_scroll_threshold() {
        assert!(!is_scrolled(0.0));
        assert!(!is_scrolled(50.0));
        assert!(is_scrolled(50.5));
        assert!(is_scrolled(400.0));
    }
}
