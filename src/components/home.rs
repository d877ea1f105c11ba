use std::rc::Rc;

use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::browser;
use crate::components::{Alert, AlertVariant, ScatterChart, Spinner};
use crate::config::AppConfig;
use crate::format::{format_time_12h, format_value};
use crate::table::{sort_readings, SortField, SortOrder};
use crate::theme::use_theme;
use crate::types::{CorrelationData, ParamSummary, Reading, SummaryInsights, Warning};

const RECENT_ROWS_SHOWN: usize = 5;

fn summary_line(label: &str, entries: &[crate::types::SummaryEntry], unit: &str) -> Html {
    let Some(first) = entries.first() else {
        return html! { <p><strong>{ label }</strong>{ " N/A" }</p> };
    };
    let locations: Vec<&str> = entries.iter().map(|e| e.location.as_str()).collect();
    html! {
        <p>
            <strong>{ label }</strong>
            { format!(" {} {} at ", format_value(first.value), unit) }
            <span class="highlight">{ locations.join(", ") }</span>
        </p>
    }
}

fn summary_card(title: &str, unit: &str, param: &ParamSummary) -> Html {
    html! {
        <div class="card">
            <h4 class="card-title">{ title }</h4>
            <hr />
            { summary_line("Highest:", &param.highest, unit) }
            { summary_line("Lowest:", &param.lowest, unit) }
        </div>
    }
}

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let config = use_context::<Rc<AppConfig>>().expect("HomePage outside ConfigProvider");
    let theme = use_theme();

    let summary = use_state(|| None::<SummaryInsights>);
    let warnings = use_state(Vec::<Warning>::new);
    let recent = use_state(Vec::<Reading>::new);
    let correlation = use_state(|| None::<CorrelationData>);
    let loading = use_state(|| false);
    let loading_correlation = use_state(|| false);
    let location = use_state(|| "US".to_string());
    let location_input = use_state(|| "US".to_string());
    let sort = use_state(|| (SortField::Date, SortOrder::Desc));
    let refresh_ms = use_state(|| 0u32);

    let fetch_correlation = {
        let correlation = correlation.clone();
        let loading_correlation = loading_correlation.clone();
        let config = config.clone();
        Callback::from(move |location: String| {
            let api = ApiClient::new(&config);
            let correlation = correlation.clone();
            let loading_correlation = loading_correlation.clone();
            loading_correlation.set(true);
            spawn_local(async move {
                match api.correlation_data(&location).await {
                    Ok(data) => correlation.set(Some(data)),
                    Err(err) => {
                        browser::console_error(&format!("Error fetching correlation data: {err}"));
                        correlation.set(None);
                    }
                }
                loading_correlation.set(false);
            });
        })
    };

    // Summary cards, warnings and the recent table load together; each
    // degrades to its empty state on error instead of failing the screen.
    let fetch_dashboard = {
        let summary = summary.clone();
        let warnings = warnings.clone();
        let recent = recent.clone();
        let loading = loading.clone();
        let config = config.clone();
        Callback::from(move |_: ()| {
            let api = ApiClient::new(&config);
            let summary = summary.clone();
            let warnings = warnings.clone();
            let recent = recent.clone();
            let loading = loading.clone();
            loading.set(true);
            spawn_local(async move {
                match api.summary_insights().await {
                    Ok(data) => summary.set(Some(data)),
                    Err(err) => {
                        browser::console_error(&format!("Error fetching summary insights: {err}"));
                        summary.set(None);
                    }
                }
                match api.warnings().await {
                    Ok(data) => warnings.set(data),
                    Err(err) => {
                        browser::console_error(&format!("Error fetching warnings: {err}"));
                        warnings.set(Vec::new());
                    }
                }
                match api.recent_data().await {
                    Ok(data) => recent.set(data),
                    Err(err) => {
                        browser::console_error(&format!("Error fetching recent data: {err}"));
                        recent.set(Vec::new());
                    }
                }
                loading.set(false);
            });
        })
    };

    {
        let fetch_dashboard = fetch_dashboard.clone();
        use_effect_with((), move |_| {
            fetch_dashboard.emit(());
            || ()
        });
    }
    {
        let fetch_correlation = fetch_correlation.clone();
        let applied = (*location).clone();
        use_effect_with(applied.clone(), move |_| {
            fetch_correlation.emit(applied);
            || ()
        });
    }
    // Auto-refresh timer, rebuilt when the interval choice or the applied
    // location changes and dropped on unmount.
    {
        let fetch_dashboard = fetch_dashboard.clone();
        let fetch_correlation = fetch_correlation.clone();
        let ms = *refresh_ms;
        let applied = (*location).clone();
        use_effect_with((ms, applied.clone()), move |_| {
            let timer = (ms > 0).then(|| {
                browser::Interval::new(ms, move || {
                    fetch_dashboard.emit(());
                    fetch_correlation.emit(applied.clone());
                })
            });
            move || drop(timer)
        });
    }

    let on_refresh_change = {
        let refresh_ms = refresh_ms.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            refresh_ms.set(value.parse().unwrap_or(0));
        })
    };
    let on_location_input = {
        let location_input = location_input.clone();
        Callback::from(move |e: InputEvent| {
            location_input.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let on_apply_location = {
        let location = location.clone();
        let location_input = location_input.clone();
        Callback::from(move |_: MouseEvent| {
            location.set((*location_input).clone());
        })
    };
    let on_sort = {
        let sort = sort.clone();
        Callback::from(move |field: SortField| {
            let (current_field, current_order) = *sort;
            let order = if current_field == field {
                current_order.flipped()
            } else {
                SortOrder::Asc
            };
            sort.set((field, order));
        })
    };

    let (sort_field, sort_order) = *sort;
    let sorted_recent = {
        let mut rows = (*recent).clone();
        sort_readings(&mut rows, sort_field, sort_order);
        rows.truncate(RECENT_ROWS_SHOWN);
        rows
    };

    let sort_header = |field: SortField, label: &str| {
        let on_sort = on_sort.clone();
        let onclick = Callback::from(move |_: MouseEvent| on_sort.emit(field));
        let marker = (sort_field == field)
            .then(|| format!(" {}", sort_order.arrow()))
            .unwrap_or_default();
        html! { <th class="sortable" {onclick}>{ format!("{label}{marker}") }</th> }
    };

    let scatter_color = if theme.is_dark() { "#ffd700" } else { "#4bc0c0" };

    html! {
        <div class="page">
            <div class="page-header">
                <h2>{ "Summary of Last 24 Hours" }</h2>
                <label class="inline-field">
                    { "Auto Refresh:" }
                    <select onchange={on_refresh_change}>
                        <option value="0" selected={*refresh_ms == 0}>{ "No Auto Refresh" }</option>
                        <option value="10000" selected={*refresh_ms == 10_000}>{ "Every 10 seconds" }</option>
                        <option value="60000" selected={*refresh_ms == 60_000}>{ "Every 1 minute" }</option>
                    </select>
                </label>
            </div>

            if *loading {
                <Spinner />
            } else {
                <>
                <section class="section">
                    <h3>{ "Top Insights" }</h3>
                    { if warnings.is_empty() {
                        html! {
                            <Alert variant={AlertVariant::Success}>
                                { "All parameters are within safe limits." }
                            </Alert>
                        }
                    } else {
                        html! {
                            <Alert variant={AlertVariant::Danger}>
                                <ul class="warning-list">
                                    { for warnings.iter().map(|w: &Warning| html! {
                                        <li>
                                            <strong>{ format!("{} Alert: ", w.parameter.replace('_', " ").to_uppercase()) }</strong>
                                            { w.message.clone() }
                                        </li>
                                    })}
                                </ul>
                            </Alert>
                        }
                    }}
                    { match summary.as_ref() {
                        Some(summary) => html! {
                            <div class="cards-row">
                                { for summary.cards().iter().map(|(dt, param)| {
                                    summary_card(dt.label(), dt.unit(), param)
                                })}
                            </div>
                        },
                        None => html! {
                            <Alert variant={AlertVariant::Info}>
                                { "No data available for the last 24 hours." }
                            </Alert>
                        },
                    }}
                </section>

                <section class="section">
                    <h3>{ "Correlation Graphs" }</h3>
                    <div class="inline-form">
                        <label class="inline-field">
                            { "Select Location:" }
                            <input type="text" value={(*location_input).clone()} oninput={on_location_input} />
                        </label>
                        <button class="btn btn-primary" onclick={on_apply_location}>{ "Refresh" }</button>
                    </div>
                    { if *loading_correlation {
                        html! { <Spinner /> }
                    } else {
                        match correlation.as_ref() {
                            Some(data) if !data.is_empty() => html! {
                                <div class="charts-row">
                                    <ScatterChart
                                        xs={data.temperature.clone()}
                                        ys={data.ph_value.clone()}
                                        x_label="Temperature (°C)"
                                        y_label="pH Value"
                                        color={scatter_color} />
                                    <ScatterChart
                                        xs={data.turbidity.clone()}
                                        ys={data.ph_value.clone()}
                                        x_label="Turbidity (NTU)"
                                        y_label="pH Value"
                                        color={scatter_color} />
                                </div>
                            },
                            _ => html! {
                                <Alert variant={AlertVariant::Info}>
                                    { "No correlation data available for the selected location." }
                                </Alert>
                            },
                        }
                    }}
                </section>

                <section class="section">
                    <h3>{ "Recent Data" }</h3>
                    { if sorted_recent.is_empty() {
                        html! {
                            <Alert variant={AlertVariant::Info}>{ "No recent data available." }</Alert>
                        }
                    } else {
                        html! {
                            <table class="table">
                                <thead>
                                    <tr>
                                        { sort_header(SortField::Location, "Location") }
                                        { sort_header(SortField::PhValue, "pH Value") }
                                        { sort_header(SortField::Temperature, "Temperature (°C)") }
                                        { sort_header(SortField::Turbidity, "Turbidity (NTU)") }
                                        <th>{ "Date" }</th>
                                        <th>{ "Time" }</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    { for sorted_recent.iter().map(|row| html! {
                                        <tr>
                                            <td>{ row.location.clone() }</td>
                                            <td>{ format_value(row.ph_value) }</td>
                                            <td>{ format_value(row.temperature) }</td>
                                            <td>{ format_value(row.turbidity) }</td>
                                            <td>{ row.date.clone() }</td>
                                            <td>{ format_time_12h(&row.time) }</td>
                                        </tr>
                                    })}
                                </tbody>
                            </table>
                        }
                    }}
                </section>
                </>
            }
        </div>
    }
}
