use std::rc::Rc;

use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::{ApiClient, SignupRequest};
use crate::components::{Alert, AlertVariant};
use crate::config::AppConfig;
use crate::routes::Route;
use crate::validate::{
    first_missing, is_valid_email, is_valid_password, password_strength, password_strength_label,
};

#[function_component(SignupPage)]
pub fn signup_page() -> Html {
    let config = use_context::<Rc<AppConfig>>().expect("SignupPage outside ConfigProvider");
    let navigator = use_navigator();
    let form = use_state(SignupRequest::default);
    let error = use_state(String::new);
    let submitting = use_state(|| false);

    // One handler per field keeps the update sites obvious.
    let set_field = |apply: fn(&mut SignupRequest, String)| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let value = e.target_unchecked_into::<HtmlInputElement>().value();
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
        })
    };
    let on_firstname = set_field(|f, v| f.firstname = v);
    let on_lastname = set_field(|f, v| f.lastname = v);
    let on_username = set_field(|f, v| f.username = v);
    let on_password = set_field(|f, v| f.password = v);
    let on_email = set_field(|f, v| f.email = v);
    let on_user_type = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            let mut next = (*form).clone();
            next.user_type = value;
            form.set(next);
        })
    };

    let on_submit = {
        let form = form.clone();
        let error = error.clone();
        let submitting = submitting.clone();
        let config = config.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if let Some(message) = first_missing(&[
                (&form.firstname, "First name is required."),
                (&form.lastname, "Last name is required."),
                (&form.username, "Username is required."),
                (&form.password, "Password is required."),
                (&form.email, "Email is required."),
            ]) {
                error.set(message.to_string());
                return;
            }
            if !is_valid_email(&form.email) {
                error.set("Please enter a valid email address.".to_string());
                return;
            }
            if !is_valid_password(&form.password) {
                error.set(
                    "Password must be at least 8 characters and contain a letter and a number."
                        .to_string(),
                );
                return;
            }

            let mut request = (*form).clone();
            if request.user_type.is_empty() {
                request.user_type = "customer".to_string();
            }
            let api = ApiClient::new(&config);
            let navigator = navigator.clone();
            let error = error.clone();
            let submitting = submitting.clone();
            submitting.set(true);
            spawn_local(async move {
                match api.signup(&request).await {
                    Ok(()) => {
                        error.set(String::new());
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Login);
                        }
                    }
                    Err(err) => error.set(err.to_string()),
                }
                submitting.set(false);
            });
        })
    };

    let strength = password_strength(&form.password);

    html! {
        <div class="auth-page">
            <h2>{ "Signup" }</h2>
            { if !error.is_empty() {
                html! { <Alert variant={AlertVariant::Danger}>{ (*error).clone() }</Alert> }
            } else {
                html! {}
            }}
            <form onsubmit={on_submit}>
                <div class="form-group">
                    <label for="firstname">{ "First Name" }</label>
                    <input id="firstname" type="text" value={form.firstname.clone()}
                        oninput={on_firstname} placeholder="Enter first name" />
                </div>
                <div class="form-group">
                    <label for="lastname">{ "Last Name" }</label>
                    <input id="lastname" type="text" value={form.lastname.clone()}
                        oninput={on_lastname} placeholder="Enter last name" />
                </div>
                <div class="form-group">
                    <label for="username">{ "Username" }</label>
                    <input id="username" type="text" value={form.username.clone()}
                        oninput={on_username} placeholder="Enter username" />
                </div>
                <div class="form-group">
                    <label for="password">{ "Password" }</label>
                    <input id="password" type="password" value={form.password.clone()}
                        oninput={on_password} placeholder="Enter password" />
                    { if !form.password.is_empty() {
                        html! {
                            <small class="muted">
                                { format!("Strength: {}", password_strength_label(strength)) }
                            </small>
                        }
                    } else {
                        html! {}
                    }}
                </div>
                <div class="form-group">
                    <label for="email">{ "Email" }</label>
                    <input id="email" type="email" value={form.email.clone()}
                        oninput={on_email} placeholder="Enter email" />
                </div>
                <div class="form-group">
                    <label for="user_type">{ "User Type" }</label>
                    <select id="user_type" onchange={on_user_type}>
                        <option value="customer" selected={form.user_type != "admin"}>{ "Customer" }</option>
                        <option value="admin" selected={form.user_type == "admin"}>{ "Admin" }</option>
                    </select>
                </div>
                <button type="submit" class="btn btn-primary" disabled={*submitting}>
                    { if *submitting { "Signing up…" } else { "Signup" } }
                </button>
            </form>
            <p class="muted">
                { "Already have an account? " }
                <Link<Route> to={Route::Login}>{ "Login here" }</Link<Route>>
                { "." }
            </p>
        </div>
    }
}
