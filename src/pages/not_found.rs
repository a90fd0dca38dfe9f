use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <main class="not-found">
            <h1>{"404"}</h1>
            <p>{"Такой страницы нет."}</p>
            <Link<Route> to={Route::Home} classes="btn btn-primary">
                {"На главную"}
            </Link<Route>>
        </main>
    }
}
