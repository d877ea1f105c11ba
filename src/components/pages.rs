//! Static marketing pages. Always public.

use yew::prelude::*;
use yew_router::prelude::*;

use crate::routes::Route;

#[function_component(AboutPage)]
pub fn about_page() -> Html {
    html! {
        <div class="page static-page">
            <h2>{ "About AquaView" }</h2>
            <p>
                { "AquaView collects pH, temperature and turbidity readings from \
                   field sensors and turns them into live dashboards, trend graphs \
                   and cross-location comparisons." }
            </p>
            <p>
                { "Operators get out-of-range warnings within minutes; analysts can \
                   pull historical series for any monitored site." }
            </p>
        </div>
    }
}

#[function_component(PricingPage)]
pub fn pricing_page() -> Html {
    let tiers = [
        ("Starter", "Free", "1 location, 7-day history"),
        ("Team", "$49/mo", "10 locations, 1-year history, warnings"),
        ("Enterprise", "Contact us", "Unlimited locations, exports, SLA"),
    ];
    html! {
        <div class="page static-page">
            <h2>{ "Pricing" }</h2>
            <div class="cards-row">
                { for tiers.iter().map(|(name, price, blurb)| html! {
                    <div class="card">
                        <h4 class="card-title">{ *name }</h4>
                        <p class="price">{ *price }</p>
                        <p class="muted">{ *blurb }</p>
                    </div>
                })}
            </div>
        </div>
    }
}

#[function_component(FaqsPage)]
pub fn faqs_page() -> Html {
    let faqs = [
        (
            "How often are readings updated?",
            "Sensors report continuously; dashboards poll the API and can auto-refresh every 10 seconds.",
        ),
        (
            "What do the warning thresholds mean?",
            "pH outside 6.5–8.5, temperature outside 0–33 °C or turbidity outside 1–5 NTU raises an alert for the affected locations.",
        ),
        (
            "Can I export the raw data?",
            "Admins can browse and manage the full dataset; export is available on paid plans.",
        ),
    ];
    html! {
        <div class="page static-page">
            <h2>{ "Frequently Asked Questions" }</h2>
            { for faqs.iter().map(|(q, a)| html! {
                <details class="faq">
                    <summary>{ *q }</summary>
                    <p>{ *a }</p>
                </details>
            })}
        </div>
    }
}

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <div class="page static-page text-center">
            <h2>{ "Page not found" }</h2>
            <p class="muted">{ "The page you are looking for does not exist." }</p>
            <Link<Route> classes="btn btn-primary" to={Route::Home}>{ "Back to dashboard" }</Link<Route>>
        </div>
    }
}
