use yew::prelude::*;
use yew_router::prelude::*;
use log::info;

mod config;
mod content;
mod dom;
mod error;
mod observer;
mod pricing;
mod utils;
mod behaviors {
    pub mod counters;
    pub mod entrance;
    pub mod haptics;
    pub mod page;
    pub mod smooth_scroll;
}
mod components {
    pub mod calculator;
    pub mod header;
}
mod pages {
    pub mod landing;
    pub mod not_found;
}

use content::SiteContent;
use pages::{landing::Landing, not_found::NotFound};


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
            info!("Rendering Home page");
            html! { <Landing content={SiteContent::bundled()} /> }
        },
        Route::NotFound => {
            info!("Rendering NotFound page");
            html! { <NotFound /> }
        },
    }
}


#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}


fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
