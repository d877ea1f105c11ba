use std::rc::Rc;

use wasm_bindgen::prelude::*;
use yew::prelude::*;
use yew_router::prelude::*;

pub mod api;
pub mod auth;
pub mod browser;
pub mod charts;
pub mod components;
pub mod config;
pub mod error;
pub mod format;
pub mod routes;
pub mod session;
pub mod table;
pub mod theme;
pub mod types;
pub mod validate;

use auth::AuthProvider;
use components::{Footer, Navbar};
use config::AppConfig;
use routes::Route;
use theme::ThemeProvider;

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| AppConfig::load());

    html! {
        <ContextProvider<Rc<AppConfig>> context={config}>
            <BrowserRouter>
                <ThemeProvider>
                    <AuthProvider>
                        <Navbar />
                        <main class="container">
                            <Switch<Route> render={routes::switch} />
                        </main>
                        <Footer />
                    </AuthProvider>
                </ThemeProvider>
            </BrowserRouter>
        </ContextProvider<Rc<AppConfig>>>
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    let document = web_sys::window().unwrap().document().unwrap();
    let root = document.get_element_by_id("root").unwrap();
    yew::Renderer::<App>::with_root(root).render();
}
