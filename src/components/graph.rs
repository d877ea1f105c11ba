use std::rc::Rc;

use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::charts::{AlignedSeries, ComparisonChart};
use crate::components::{Alert, AlertVariant, LineChart, Spinner};
use crate::config::AppConfig;
use crate::theme::use_theme;
use crate::types::DataType;

/// Single-location time series viewer.
#[function_component(GraphPage)]
pub fn graph_page() -> Html {
    let config = use_context::<Rc<AppConfig>>().expect("GraphPage outside ConfigProvider");
    let theme = use_theme();

    let start_date = use_state(String::new);
    let end_date = use_state(String::new);
    let location = use_state(String::new);
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
    let on_location = {
        let location = location.clone();
        Callback::from(move |e: InputEvent| {
            location.set(e.target_unchecked_into::<HtmlInputElement>().value());
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

    let series_color = if theme.is_dark() { "#90caf9" } else { "#4bc0c0" };

    let on_generate = {
        let start_date = start_date.clone();
        let end_date = end_date.clone();
        let location = location.clone();
        let data_type = data_type.clone();
        let chart = chart.clone();
        let error = error.clone();
        let loading = loading.clone();
        let config = config.clone();
        Callback::from(move |_: MouseEvent| {
            if start_date.is_empty() || end_date.is_empty() || location.is_empty() {
                error.set("Please provide start date, end date, and location.".to_string());
                return;
            }
            error.set(String::new());
            loading.set(true);

            let api = ApiClient::new(&config);
            let start = (*start_date).clone();
            let end = (*end_date).clone();
            let loc = (*location).clone();
            let dt = *data_type;
            let chart = chart.clone();
            let error = error.clone();
            let loading = loading.clone();
            spawn_local(async move {
                match api.graph_data(&start, &end, &loc, dt.as_param()).await {
                    Ok(points) => {
                        let label = format!("{} for Location: {}", dt.label(), loc);
                        chart.set(Some(ComparisonChart {
                            dates: points.iter().map(|p| p.date.clone()).collect(),
                            series: vec![AlignedSeries {
                                label,
                                color: series_color,
                                values: points.iter().map(|p| Some(p.value)).collect(),
                            }],
                        }));
                    }
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
            <h2 class="text-center">{ "Graph Viewer" }</h2>
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
                        value={(*location).clone()} oninput={on_location} />
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
            <div class="text-center">
                <button class="btn btn-primary" onclick={on_generate} disabled={*loading}>
                    { if *loading { html! { <Spinner small=true /> } } else { html! { "Generate Graph" } } }
                </button>
            </div>
            { if let Some(chart) = chart.as_ref() {
                html! { <LineChart chart={chart.clone()} y_label={data_type.axis_label()} /> }
            } else {
                html! {}
            }}
        </div>
    }
}
