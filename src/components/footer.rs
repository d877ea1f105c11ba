use yew::prelude::*;
use yew_router::prelude::*;

use crate::routes::Route;

#[function_component(Footer)]
pub fn footer() -> Html {
    html! {
        <footer class="footer">
            <span>{ "AquaView · water quality monitoring" }</span>
            <div class="footer-links">
                <Link<Route> to={Route::About}>{ "About" }</Link<Route>>
                <Link<Route> to={Route::Pricing}>{ "Pricing" }</Link<Route>>
                <Link<Route> to={Route::Faqs}>{ "FAQs" }</Link<Route>>
            </div>
        </footer>
    }
}
