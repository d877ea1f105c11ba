use yew::prelude::*;
use yew_router::prelude::*;

use crate::auth::use_auth;
use crate::routes::Route;
use crate::theme::use_theme;

#[function_component(Navbar)]
pub fn navbar() -> Html {
    let auth = use_auth();
    let theme = use_theme();

    let on_toggle_theme = {
        let theme = theme.clone();
        Callback::from(move |_: MouseEvent| theme.set(theme.toggled()))
    };

    let on_logout = {
        let auth = auth.clone();
        Callback::from(move |_: MouseEvent| auth.logout())
    };

    let user = auth.user();
    let links = if let Some(user) = &user {
        html! {
            <>
                <Link<Route> classes="nav-link" to={Route::Home}>{ "Dashboard" }</Link<Route>>
                <Link<Route> classes="nav-link" to={Route::Graphs}>{ "Graphs" }</Link<Route>>
                <Link<Route> classes="nav-link" to={Route::CompareGraphs}>{ "Compare" }</Link<Route>>
                <Link<Route> classes="nav-link" to={Route::Data}>{ "Data" }</Link<Route>>
                { if user.is_admin() {
                    html! {
                        <>
                            <Link<Route> classes="nav-link" to={Route::Admin}>{ "Admin" }</Link<Route>>
                            <Link<Route> classes="nav-link" to={Route::AdminUsers}>{ "Users" }</Link<Route>>
                        </>
                    }
                } else {
                    html! {}
                }}
            </>
        }
    } else {
        html! {
            <>
                <Link<Route> classes="nav-link" to={Route::About}>{ "About" }</Link<Route>>
                <Link<Route> classes="nav-link" to={Route::Pricing}>{ "Pricing" }</Link<Route>>
                <Link<Route> classes="nav-link" to={Route::Faqs}>{ "FAQs" }</Link<Route>>
            </>
        }
    };

    html! {
        <nav class="navbar">
            <Link<Route> classes="nav-brand" to={Route::Home}>{ "AquaView" }</Link<Route>>
            <div class="nav-links">{ links }</div>
            <div class="nav-actions">
                <button class="btn btn-ghost" onclick={on_toggle_theme}
                    title={ if theme.is_dark() { "Switch to light theme" } else { "Switch to dark theme" } }>
                    { if theme.is_dark() { "☀" } else { "🌙" } }
                </button>
                { if let Some(user) = &user {
                    html! {
                        <>
                            <span class="nav-user">{ &user.username }</span>
                            <button class="btn btn-secondary" onclick={on_logout}>{ "Logout" }</button>
                        </>
                    }
                } else {
                    html! {
                        <>
                            <Link<Route> classes="btn btn-secondary" to={Route::Login}>{ "Login" }</Link<Route>>
                            <Link<Route> classes="btn btn-primary" to={Route::Signup}>{ "Sign up" }</Link<Route>>
                        </>
                    }
                }}
            </div>
        </nav>
    }
}
