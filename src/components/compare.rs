use std::rc::Rc;

use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::charts::{normalize_comparison, ComparisonChart};
use crate::components::{Alert, AlertVariant, LineChart, Spinner};
use crate::config::AppConfig;
use crate::types::DataType;

/// Multi-location comparison view. The server payload shape varies, so the
/// response goes through `charts::normalize_comparison` before rendering.
#[function_component(ComparePage)]
pub fn compare_page() -> Html {
    let config = use_context::<Rc<AppConfig>>().expect("ComparePage outside ConfigProvider");

    let start_date = use_state(String::new);
    let end_date = use_state(String::new);
    let locations = use_state(Vec::<String>::new);
    let location_input = use_state(String::new);
    let data_type = use_state(|| DataType::PhValue);
    let chart = use_state(|| None::<ComparisonChart>);
    let error = use_state(String::new);
    let loading = use_state(|| false);

    let on_start = {
        let start_date = start_date.clone();
        Callback::from(move |e: InputEvent| {
            start_date.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let on_end = {
        let end_date = end_date.clone();
        Callback::from(move |e: InputEvent| {
            end_date.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let on_location_input = {
        let location_input = location_input.clone();
        Callback::from(move |e: InputEvent| {
            location_input.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let on_data_type = {
        let data_type = data_type.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            if let Some(dt) = DataType::from_param(&value) {
                data_type.set(dt);
            }
        })
    };

    let on_add_location = {
        let locations = locations.clone();
        let location_input = location_input.clone();
        Callback::from(move |_: MouseEvent| {
            let candidate = location_input.trim().to_string();
            if candidate.is_empty() || locations.contains(&candidate) {
                return;
            }
            let mut next = (*locations).clone();
            next.push(candidate);
            locations.set(next);
            location_input.set(String::new());
        })
    };
    let remove_location = {
        let locations = locations.clone();
        Callback::from(move |location: String| {
            locations.set(locations.iter().filter(|l| **l != location).cloned().collect());
        })
    };

    let on_generate = {
        let start_date = start_date.clone();
        let end_date = end_date.clone();
        let locations = locations.clone();
        let data_type = data_type.clone();
        let chart = chart.clone();
        let error = error.clone();
        let loading = loading.clone();
        let config = config.clone();
        Callback::from(move |_: MouseEvent| {
            if start_date.is_empty() || end_date.is_empty() || locations.is_empty() {
                error.set(
                    "Please provide start date, end date, and at least one location.".to_string(),
                );
                return;
            }
            error.set(String::new());
            loading.set(true);

            let api = ApiClient::new(&config);
            let start = (*start_date).clone();
            let end = (*end_date).clone();
            let locs = (*locations).clone();
            let dt = *data_type;
            let chart = chart.clone();
            let error = error.clone();
            let loading = loading.clone();
            spawn_local(async move {
                crate::browser::console_log(&format!(
                    "Fetching comparison data: {start}..{end} {} [{}]",
                    dt.as_param(),
                    locs.join(",")
                ));
                let result = api
                    .compare_graph_data(&start, &end, &locs, dt.as_param())
                    .await;
                match result {
                    Ok(payload) => match normalize_comparison(&payload) {
                        Ok(normalized) => chart.set(Some(normalized)),
                        Err(err) => {
                            chart.set(None);
                            error.set(err.to_string());
                        }
                    },
                    Err(err) => {
                        chart.set(None);
                        error.set(err.to_string());
                    }
                }
                loading.set(false);
            });
        })
    };

    html! {
        <div class="page">
            <h2 class="text-center">{ "Compare Values Across Locations" }</h2>
            { if !error.is_empty() {
                html! { <Alert variant={AlertVariant::Danger}>{ (*error).clone() }</Alert> }
            } else {
                html! {}
            }}
            <div class="form-row">
                <div class="form-group">
                    <label>{ "Start Date" }</label>
                    <input type="date" value={(*start_date).clone()} oninput={on_start} />
                </div>
                <div class="form-group">
                    <label>{ "End Date" }</label>
                    <input type="date" value={(*end_date).clone()} oninput={on_end} />
                </div>
                <div class="form-group">
                    <label>{ "Location" }</label>
                    <input type="text" placeholder="Enter location"
                        value={(*location_input).clone()} oninput={on_location_input} />
                </div>
                <div class="form-group">
                    <label>{ "Data Type" }</label>
                    <select onchange={on_data_type}>
                        { for DataType::ALL.iter().map(|dt| html! {
                            <option value={dt.as_param()} selected={*data_type == *dt}>
                                { dt.label() }
                            </option>
                        })}
                    </select>
                </div>
            </div>
            <div class="form-row">
                <button class="btn btn-secondary" onclick={on_add_location}>{ "Add Location" }</button>
            </div>
            { if !locations.is_empty() {
                html! {
                    <div class="chip-list">
                        { for locations.iter().map(|location| {
                            let remove = {
                                let remove_location = remove_location.clone();
                                let location = location.clone();
                                Callback::from(move |_: MouseEvent| {
                                    remove_location.emit(location.clone())
                                })
                            };
                            html! {
                                <span class="chip">
                                    { location.clone() }
                                    <button class="btn btn-danger btn-sm" onclick={remove}>
                                        { "Remove" }
                                    </button>
                                </span>
                            }
                        })}
                    </div>
                }
            } else {
                html! {}
            }}
            <button class="btn btn-primary" onclick={on_generate} disabled={*loading}>
                { if *loading { html! { <><Spinner small=true />{ " Loading…" }</> } } else { html! { "Generate Comparison Graph" } } }
            </button>
            { if let Some(chart) = chart.as_ref() {
                html! { <LineChart chart={chart.clone()} y_label={data_type.axis_label()} /> }
            } else {
                html! {}
            }}
        </div>
    }
}
