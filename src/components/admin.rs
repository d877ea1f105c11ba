use std::rc::Rc;

use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::browser;
use crate::components::{Alert, AlertVariant, Spinner};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::format::format_value;
use crate::table::{filter_readings, page_count, page_slice, page_window, PageItem};
use crate::types::{Reading, ReadingDraft};

const SUCCESS_BANNER_MS: u32 = 3_000;
const VISIBLE_PAGE_LINKS: usize = 5;

fn draft_error(draft: &ReadingDraft) -> Option<&'static str> {
    if draft.location.trim().is_empty() {
        return Some("Location is required.");
    }
    for value in [&draft.ph_value, &draft.temperature, &draft.turbidity] {
        if value.trim().parse::<f64>().is_err() {
            return Some("pH, temperature and turbidity must be numbers.");
        }
    }
    None
}

#[derive(Properties, PartialEq)]
struct RecordModalProps {
    title: AttrValue,
    submit_label: AttrValue,
    busy_label: AttrValue,
    draft: ReadingDraft,
    submitting: bool,
    on_change: Callback<ReadingDraft>,
    on_cancel: Callback<()>,
    on_submit: Callback<()>,
}

#[function_component(RecordModal)]
fn record_modal(props: &RecordModalProps) -> Html {
    let field = |label: &str,
                 kind: &'static str,
                 value: String,
                 apply: fn(&mut ReadingDraft, String)| {
        let draft = props.draft.clone();
        let on_change = props.on_change.clone();
        let oninput = Callback::from(move |e: InputEvent| {
            let mut next = draft.clone();
            apply(&mut next, e.target_unchecked_into::<HtmlInputElement>().value());
            on_change.emit(next);
        });
        html! {
            <div class="form-group">
                <label>{ label.to_string() }</label>
                <input type={kind} {value} {oninput} />
            </div>
        }
    };

    let on_cancel = {
        let cb = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let on_submit = {
        let cb = props.on_submit.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    html! {
        <div class="modal-backdrop">
            <div class="modal">
                <div class="modal-header">
                    <h3>{ props.title.to_string() }</h3>
                </div>
                <div class="modal-body">
                    { field("Location", "text", props.draft.location.clone(), |d, v| d.location = v) }
                    { field("pH Value", "number", props.draft.ph_value.clone(), |d, v| d.ph_value = v) }
                    { field("Temperature (°C)", "number", props.draft.temperature.clone(), |d, v| d.temperature = v) }
                    { field("Turbidity (NTU)", "number", props.draft.turbidity.clone(), |d, v| d.turbidity = v) }
                </div>
                <div class="modal-footer">
                    <button class="btn btn-secondary" onclick={on_cancel} disabled={props.submitting}>
                        { "Cancel" }
                    </button>
                    <button class="btn btn-primary" onclick={on_submit} disabled={props.submitting}>
                        { if props.submitting { props.busy_label.to_string() } else { props.submit_label.to_string() } }
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Admin CRUD over the readings. The full dataset is fetched once and
/// filtered/paginated client-side; every mutation triggers a full refetch
/// instead of patching the cache.
#[function_component(AdminPage)]
pub fn admin_page() -> Html {
    let config = use_context::<Rc<AppConfig>>().expect("AdminPage outside ConfigProvider");

    let all_rows = use_state(Vec::<Reading>::new);
    let loading = use_state(|| false);
    let error = use_state(String::new);
    let filter_date = use_state(String::new);
    let filter_location = use_state(String::new);
    let applied = use_state(|| (String::new(), String::new()));
    let page = use_state(|| 1usize);
    let show_create = use_state(|| false);
    let create_draft = use_state(ReadingDraft::default);
    let edit = use_state(|| None::<(i64, ReadingDraft)>);
    let submitting = use_state(|| false);
    let success = use_state(String::new);
    let banner_timer = use_mut_ref(|| None::<browser::Timeout>);

    let fetch_all = {
        let all_rows = all_rows.clone();
        let loading = loading.clone();
        let error = error.clone();
        let config = config.clone();
        Callback::from(move |_: ()| {
            let api = ApiClient::new(&config);
            let all_rows = all_rows.clone();
            let loading = loading.clone();
            let error = error.clone();
            loading.set(true);
            spawn_local(async move {
                match api.all_data().await {
                    Ok(rows) => {
                        error.set(String::new());
                        all_rows.set(rows);
                    }
                    Err(ApiError::Unauthorized) => {
                        error.set("Not authorized to access admin data. Please login again.".to_string());
                    }
                    Err(err) => {
                        browser::console_error(&format!("Error fetching all data: {err}"));
                        error.set("Failed to fetch data. Please try again later.".to_string());
                    }
                }
                loading.set(false);
            });
        })
    };

    {
        let fetch_all = fetch_all.clone();
        use_effect_with((), move |_| {
            fetch_all.emit(());
            || ()
        });
    }

    let flash_success = {
        let success = success.clone();
        let banner_timer = banner_timer.clone();
        Callback::from(move |message: String| {
            success.set(message);
            let success = success.clone();
            *banner_timer.borrow_mut() =
                browser::Timeout::new(SUCCESS_BANNER_MS, move || success.set(String::new()));
        })
    };

    let on_filter_date = {
        let filter_date = filter_date.clone();
        Callback::from(move |e: InputEvent| {
            filter_date.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let on_filter_location = {
        let filter_location = filter_location.clone();
        Callback::from(move |e: InputEvent| {
            filter_location.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let on_apply_filters = {
        let applied = applied.clone();
        let filter_date = filter_date.clone();
        let filter_location = filter_location.clone();
        let page = page.clone();
        Callback::from(move |_: MouseEvent| {
            applied.set(((*filter_date).clone(), (*filter_location).clone()));
            page.set(1);
        })
    };
    let on_clear_filters = {
        let applied = applied.clone();
        let filter_date = filter_date.clone();
        let filter_location = filter_location.clone();
        let page = page.clone();
        Callback::from(move |_: MouseEvent| {
            filter_date.set(String::new());
            filter_location.set(String::new());
            applied.set((String::new(), String::new()));
            page.set(1);
        })
    };

    let on_delete = {
        let config = config.clone();
        let fetch_all = fetch_all.clone();
        let flash_success = flash_success.clone();
        let error = error.clone();
        Callback::from(move |id: i64| {
            if !browser::confirm("Are you sure you want to delete this record?") {
                return;
            }
            let api = ApiClient::new(&config);
            let fetch_all = fetch_all.clone();
            let flash_success = flash_success.clone();
            let error = error.clone();
            spawn_local(async move {
                match api.delete_data(id).await {
                    Ok(()) => {
                        flash_success.emit("Record deleted successfully!".to_string());
                        fetch_all.emit(());
                    }
                    Err(err) => {
                        browser::console_error(&format!("Error deleting record: {err}"));
                        error.set("Failed to delete the record. Please try again later.".to_string());
                    }
                }
            });
        })
    };

    let on_create = {
        let config = config.clone();
        let create_draft = create_draft.clone();
        let show_create = show_create.clone();
        let submitting = submitting.clone();
        let fetch_all = fetch_all.clone();
        let flash_success = flash_success.clone();
        let error = error.clone();
        Callback::from(move |_: ()| {
            if let Some(message) = draft_error(&create_draft) {
                error.set(message.to_string());
                return;
            }
            let api = ApiClient::new(&config);
            let draft = (*create_draft).clone();
            let create_draft = create_draft.clone();
            let show_create = show_create.clone();
            let submitting = submitting.clone();
            let fetch_all = fetch_all.clone();
            let flash_success = flash_success.clone();
            let error = error.clone();
            submitting.set(true);
            spawn_local(async move {
                match api.create_data(&draft).await {
                    Ok(()) => {
                        show_create.set(false);
                        create_draft.set(ReadingDraft::default());
                        flash_success.emit("Record added successfully!".to_string());
                        fetch_all.emit(());
                    }
                    Err(err) => {
                        browser::console_error(&format!("Error creating new record: {err}"));
                        error.set("Failed to create new record. Please try again later.".to_string());
                    }
                }
                submitting.set(false);
            });
        })
    };

    let on_update = {
        let config = config.clone();
        let edit = edit.clone();
        let submitting = submitting.clone();
        let fetch_all = fetch_all.clone();
        let flash_success = flash_success.clone();
        let error = error.clone();
        Callback::from(move |_: ()| {
            let Some((id, draft)) = (*edit).clone() else {
                return;
            };
            if let Some(message) = draft_error(&draft) {
                error.set(message.to_string());
                return;
            }
            let api = ApiClient::new(&config);
            let edit = edit.clone();
            let submitting = submitting.clone();
            let fetch_all = fetch_all.clone();
            let flash_success = flash_success.clone();
            let error = error.clone();
            submitting.set(true);
            spawn_local(async move {
                match api.update_data(id, &draft).await {
                    Ok(()) => {
                        edit.set(None);
                        flash_success.emit("Record updated successfully!".to_string());
                        fetch_all.emit(());
                    }
                    Err(err) => {
                        browser::console_error(&format!("Error updating record: {err}"));
                        error.set("Failed to update the record. Please try again later.".to_string());
                    }
                }
                submitting.set(false);
            });
        })
    };

    let (applied_date, applied_location) = (*applied).clone();
    let filtered = filter_readings(&all_rows, &applied_date, &applied_location);
    let total_pages = page_count(filtered.len(), config.rows_per_page);
    let current_page = (*page).min(total_pages.max(1));
    let visible_rows = page_slice(&filtered, current_page, config.rows_per_page);

    let pagination = if total_pages > 1 {
        let items = page_window(current_page, total_pages, VISIBLE_PAGE_LINKS);
        html! {
            <div class="pagination">
                { for items.iter().map(|item| match item {
                    PageItem::Ellipsis => html! { <span class="page-ellipsis">{ "…" }</span> },
                    PageItem::Page(n) => {
                        let n = *n;
                        let page = page.clone();
                        let onclick = Callback::from(move |_: MouseEvent| page.set(n));
                        let class = if n == current_page { "page-link active" } else { "page-link" };
                        html! { <button {class} {onclick}>{ n }</button> }
                    }
                })}
            </div>
        }
    } else {
        html! {}
    };

    html! {
        <div class="page">
            <h2 class="text-center">{ "Admin Data Management" }</h2>

            { if !success.is_empty() {
                let on_close = {
                    let success = success.clone();
                    Callback::from(move |_| success.set(String::new()))
                };
                html! {
                    <Alert variant={AlertVariant::Success} on_close={on_close}>
                        { (*success).clone() }
                    </Alert>
                }
            } else {
                html! {}
            }}

            <div class="form-row">
                <div class="form-group">
                    <label>{ "Filter by Date" }</label>
                    <input type="date" value={(*filter_date).clone()} oninput={on_filter_date} />
                </div>
                <div class="form-group">
                    <label>{ "Filter by Location" }</label>
                    <input type="text" placeholder="Enter location"
                        value={(*filter_location).clone()} oninput={on_filter_location} />
                </div>
                <div class="form-group form-actions">
                    <button class="btn btn-primary" onclick={on_apply_filters}>{ "Apply Filters" }</button>
                    <button class="btn btn-secondary" onclick={on_clear_filters}>{ "Clear Filters" }</button>
                </div>
            </div>

            <div class="section text-right">
                <button class="btn btn-success" onclick={{
                    let show_create = show_create.clone();
                    Callback::from(move |_: MouseEvent| show_create.set(true))
                }}>
                    { "Create New Record" }
                </button>
            </div>

            { if *loading {
                html! { <Spinner /> }
            } else if !error.is_empty() {
                html! { <Alert variant={AlertVariant::Danger}>{ (*error).clone() }</Alert> }
            } else {
                html! {
                    <>
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>{ "Location" }</th>
                                    <th>{ "pH Value" }</th>
                                    <th>{ "Temperature (°C)" }</th>
                                    <th>{ "Turbidity (NTU)" }</th>
                                    <th>{ "Date" }</th>
                                    <th>{ "Time" }</th>
                                    <th>{ "Actions" }</th>
                                </tr>
                            </thead>
                            <tbody>
                                { for visible_rows.iter().map(|row| {
                                    let on_edit = {
                                        let edit = edit.clone();
                                        let row = row.clone();
                                        Callback::from(move |_: MouseEvent| {
                                            edit.set(Some((row.id, ReadingDraft {
                                                location: row.location.clone(),
                                                ph_value: row.ph_value.to_string(),
                                                temperature: row.temperature.to_string(),
                                                turbidity: row.turbidity.to_string(),
                                            })));
                                        })
                                    };
                                    let on_delete = {
                                        let on_delete = on_delete.clone();
                                        let id = row.id;
                                        Callback::from(move |_: MouseEvent| on_delete.emit(id))
                                    };
                                    html! {
                                        <tr key={row.id}>
                                            <td>{ row.location.clone() }</td>
                                            <td>{ format_value(row.ph_value) }</td>
                                            <td>{ format_value(row.temperature) }</td>
                                            <td>{ format_value(row.turbidity) }</td>
                                            <td>{ row.date.clone() }</td>
                                            <td>{ row.time.clone() }</td>
                                            <td class="actions">
                                                <button class="btn btn-warning btn-sm" onclick={on_edit}>{ "Edit" }</button>
                                                <button class="btn btn-danger btn-sm" onclick={on_delete}>{ "Delete" }</button>
                                            </td>
                                        </tr>
                                    }
                                })}
                            </tbody>
                        </table>
                        { pagination }
                    </>
                }
            }}

            { if *show_create {
                let on_change = {
                    let create_draft = create_draft.clone();
                    Callback::from(move |draft| create_draft.set(draft))
                };
                let on_cancel = {
                    let show_create = show_create.clone();
                    Callback::from(move |_| show_create.set(false))
                };
                html! {
                    <RecordModal
                        title="Create New Record"
                        submit_label="Create"
                        busy_label="Creating…"
                        draft={(*create_draft).clone()}
                        submitting={*submitting}
                        {on_change}
                        {on_cancel}
                        on_submit={on_create} />
                }
            } else {
                html! {}
            }}

            { if let Some((id, draft)) = (*edit).clone() {
                let on_change = {
                    let edit = edit.clone();
                    Callback::from(move |draft| edit.set(Some((id, draft))))
                };
                let on_cancel = {
                    let edit = edit.clone();
                    Callback::from(move |_| edit.set(None))
                };
                html! {
                    <RecordModal
                        title="Edit Record"
                        submit_label="Update"
                        busy_label="Updating…"
                        draft={draft}
                        submitting={*submitting}
                        {on_change}
                        {on_cancel}
                        on_submit={on_update} />
                }
            } else {
                html! {}
            }}
        </div>
    }
}
