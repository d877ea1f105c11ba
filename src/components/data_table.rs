use std::rc::Rc;

use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::browser;
use crate::components::{Alert, AlertVariant, Spinner};
use crate::config::AppConfig;
use crate::format::{format_date_long, format_value};
use crate::types::Reading;

const POLL_INTERVAL_MS: u32 = 5_000;

/// Full data listing with an optional date+location search and a polling
/// toggle for live refresh.
#[function_component(DataTablePage)]
pub fn data_table_page() -> Html {
    let config = use_context::<Rc<AppConfig>>().expect("DataTablePage outside ConfigProvider");

    let rows = use_state(Vec::<Reading>::new);
    let date = use_state(String::new);
    let location = use_state(String::new);
    let error = use_state(String::new);
    let loading = use_state(|| false);
    let polling = use_state(|| false);

    let fetch = {
        let rows = rows.clone();
        let error = error.clone();
        let loading = loading.clone();
        let config = config.clone();
        Callback::from(move |params: (Option<String>, Option<String>)| {
            let api = ApiClient::new(&config);
            let rows = rows.clone();
            let error = error.clone();
            let loading = loading.clone();
            loading.set(true);
            spawn_local(async move {
                let (date, location) = params;
                match api.data(date.as_deref(), location.as_deref()).await {
                    Ok(data) => {
                        error.set(String::new());
                        rows.set(data);
                    }
                    Err(err) => {
                        browser::console_error(&format!("Error fetching data: {err}"));
                        error.set("Failed to fetch data".to_string());
                        rows.set(Vec::new());
                    }
                }
                loading.set(false);
            });
        })
    };

    {
        let fetch = fetch.clone();
        use_effect_with((), move |_| {
            fetch.emit((None, None));
            || ()
        });
    }

    // Live refresh keeps re-applying whatever filter is active. The timer
    // is dropped on toggle-off, on filter change, and on unmount.
    {
        let fetch = fetch.clone();
        let deps = (*polling, (*date).clone(), (*location).clone());
        use_effect_with(deps.clone(), move |_| {
            let (polling, date, location) = deps;
            let timer = polling.then(|| {
                browser::Interval::new(POLL_INTERVAL_MS, move || {
                    let date = (!date.is_empty()).then(|| date.clone());
                    let location = (!location.is_empty()).then(|| location.clone());
                    fetch.emit((date, location));
                })
            });
            move || drop(timer)
        });
    }

    let on_date = {
        let date = date.clone();
        Callback::from(move |e: InputEvent| {
            date.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let on_location = {
        let location = location.clone();
        Callback::from(move |e: InputEvent| {
            location.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_search = {
        let date = date.clone();
        let location = location.clone();
        let error = error.clone();
        let rows = rows.clone();
        let fetch = fetch.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if date.is_empty() || location.is_empty() {
                error.set("Please select both date and location".to_string());
                rows.set(Vec::new());
                return;
            }
            error.set(String::new());
            fetch.emit((Some((*date).clone()), Some((*location).clone())));
        })
    };
    let on_reset = {
        let date = date.clone();
        let location = location.clone();
        let error = error.clone();
        let fetch = fetch.clone();
        Callback::from(move |_: MouseEvent| {
            date.set(String::new());
            location.set(String::new());
            error.set(String::new());
            fetch.emit((None, None));
        })
    };
    let on_toggle_polling = {
        let polling = polling.clone();
        Callback::from(move |_: MouseEvent| polling.set(!*polling))
    };

    html! {
        <div class="page">
            <form class="form-row" onsubmit={on_search}>
                <div class="form-group">
                    <label>{ "Date" }</label>
                    <input type="date" value={(*date).clone()} oninput={on_date} />
                </div>
                <div class="form-group">
                    <label>{ "Location" }</label>
                    <input type="text" placeholder="Enter location"
                        value={(*location).clone()} oninput={on_location} />
                </div>
                <div class="form-group form-actions">
                    <button type="submit" class="btn btn-primary">{ "Search" }</button>
                    <button type="button" class="btn btn-secondary" onclick={on_reset}>
                        { "Reset" }
                    </button>
                </div>
            </form>

            <div class="section">
                <button
                    class={if *polling { "btn btn-danger" } else { "btn btn-success" }}
                    onclick={on_toggle_polling}>
                    { if *polling { "Stop Refreshing Data" } else { "Start Refreshing Data" } }
                </button>
            </div>

            { if !error.is_empty() {
                html! { <Alert variant={AlertVariant::Danger}>{ (*error).clone() }</Alert> }
            } else {
                html! {}
            }}

            { if *loading {
                html! { <Spinner /> }
            } else if rows.is_empty() {
                html! { <p class="text-center muted">{ "No data available" }</p> }
            } else {
                html! {
                    <table class="table">
                        <thead>
                            <tr>
                                <th>{ "ID" }</th>
                                <th>{ "pH Value" }</th>
                                <th>{ "Temperature (°C)" }</th>
                                <th>{ "Turbidity (NTU)" }</th>
                                <th>{ "Location" }</th>
                                <th>{ "Time" }</th>
                                <th>{ "Date" }</th>
                            </tr>
                        </thead>
                        <tbody>
                            { for rows.iter().map(|row| html! {
                                <tr key={row.id}>
                                    <td>{ row.id }</td>
                                    <td>{ format_value(row.ph_value) }</td>
                                    <td>{ format_value(row.temperature) }</td>
                                    <td>{ format_value(row.turbidity) }</td>
                                    <td>{ row.location.clone() }</td>
                                    <td>{ row.time.clone() }</td>
                                    <td>{ format_date_long(&row.date) }</td>
                                </tr>
                            })}
                        </tbody>
                    </table>
                }
            }}
        </div>
    }
}
