use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::Credentials;
use crate::auth::use_auth;
use crate::browser;
use crate::components::{Alert, AlertVariant};
use crate::routes::Route;
use crate::validate::first_missing;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let auth = use_auth();
    let navigator = use_navigator();
    let username = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(String::new);
    let submitting = use_state(|| false);

    // Session-teardown notice handed over in the query string.
    let notice = use_memo((), |_| browser::query_param("message"));

    let on_username = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            username.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let on_password = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            password.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_submit = {
        let auth = auth.clone();
        let username = username.clone();
        let password = password.clone();
        let error = error.clone();
        let submitting = submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if let Some(message) = first_missing(&[
                (&username, "Please enter your username."),
                (&password, "Please enter your password."),
            ]) {
                error.set(message.to_string());
                return;
            }

            let credentials = Credentials {
                username: (*username).clone(),
                password: (*password).clone(),
            };
            let auth = auth.clone();
            let navigator = navigator.clone();
            let error = error.clone();
            let submitting = submitting.clone();
            submitting.set(true);
            spawn_local(async move {
                match auth.login(credentials).await {
                    Ok(user) => {
                        error.set(String::new());
                        if let Some(navigator) = navigator {
                            navigator.replace(&crate::routes::landing_route(user.is_admin()));
                        }
                    }
                    Err(message) => error.set(message),
                }
                submitting.set(false);
            });
        })
    };

    html! {
        <div class="auth-page">
            <h2>{ "Login" }</h2>
            { if let Some(notice) = notice.as_ref() {
                html! { <Alert variant={AlertVariant::Info}>{ notice.clone() }</Alert> }
            } else {
                html! {}
            }}
            { if !error.is_empty() {
                html! { <Alert variant={AlertVariant::Danger}>{ (*error).clone() }</Alert> }
            } else {
                html! {}
            }}
            <form onsubmit={on_submit}>
                <div class="form-group">
                    <label for="username">{ "Username" }</label>
                    <input id="username" type="text" value={(*username).clone()}
                        oninput={on_username} placeholder="Enter username" />
                </div>
                <div class="form-group">
                    <label for="password">{ "Password" }</label>
                    <input id="password" type="password" value={(*password).clone()}
                        oninput={on_password} placeholder="Enter password" />
                </div>
                <button type="submit" class="btn btn-primary" disabled={*submitting}>
                    { if *submitting { "Logging in…" } else { "Login" } }
                </button>
            </form>
            <p class="muted">
                { "Don't have an account? " }
                <Link<Route> to={Route::Signup}>{ "Sign up here" }</Link<Route>>
                { "." }
            </p>
        </div>
    }
}
