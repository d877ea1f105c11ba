use std::rc::Rc;

use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::{ApiClient, UserDraft};
use crate::browser;
use crate::components::{Alert, AlertVariant, Spinner};
use crate::config::AppConfig;
use crate::session::User;
use crate::validate::{first_missing, is_valid_email};

const SUCCESS_BANNER_MS: u32 = 3_000;

fn draft_error(draft: &UserDraft, creating: bool) -> Option<String> {
    if let Some(message) = first_missing(&[
        (&draft.firstname, "First name is required."),
        (&draft.lastname, "Last name is required."),
        (&draft.username, "Username is required."),
        (&draft.email, "Email is required."),
    ]) {
        return Some(message.to_string());
    }
    if !is_valid_email(&draft.email) {
        return Some("Please enter a valid email address.".to_string());
    }
    if creating && draft.password.as_deref().unwrap_or("").is_empty() {
        return Some("Password is required.".to_string());
    }
    None
}

#[derive(Properties, PartialEq)]
struct UserModalProps {
    title: AttrValue,
    submit_label: AttrValue,
    draft: UserDraft,
    submitting: bool,
    on_change: Callback<UserDraft>,
    on_cancel: Callback<()>,
    on_submit: Callback<()>,
}

#[function_component(UserModal)]
fn user_modal(props: &UserModalProps) -> Html {
    let text_field = |label: &str,
                      kind: &'static str,
                      value: String,
                      apply: fn(&mut UserDraft, String)| {
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

    let on_user_type = {
        let draft = props.draft.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let mut next = draft.clone();
            next.user_type = e.target_unchecked_into::<HtmlSelectElement>().value();
            on_change.emit(next);
        })
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
                    { text_field("First Name", "text", props.draft.firstname.clone(), |d, v| d.firstname = v) }
                    { text_field("Last Name", "text", props.draft.lastname.clone(), |d, v| d.lastname = v) }
                    { text_field("Username", "text", props.draft.username.clone(), |d, v| d.username = v) }
                    { text_field("Email", "email", props.draft.email.clone(), |d, v| d.email = v) }
                    { text_field(
                        "Password (leave blank to keep current)",
                        "password",
                        props.draft.password.clone().unwrap_or_default(),
                        |d, v| d.password = if v.is_empty() { None } else { Some(v) },
                    ) }
                    <div class="form-group">
                        <label>{ "User Type" }</label>
                        <select onchange={on_user_type}>
                            <option value="customer" selected={props.draft.user_type != "admin"}>{ "Customer" }</option>
                            <option value="admin" selected={props.draft.user_type == "admin"}>{ "Admin" }</option>
                        </select>
                    </div>
                </div>
                <div class="modal-footer">
                    <button class="btn btn-secondary" onclick={on_cancel} disabled={props.submitting}>
                        { "Cancel" }
                    </button>
                    <button class="btn btn-primary" onclick={on_submit} disabled={props.submitting}>
                        { if props.submitting { "Saving…".to_string() } else { props.submit_label.to_string() } }
                    </button>
                </div>
            </div>
        </div>
    }
}

fn draft_from(user: &User) -> UserDraft {
    UserDraft {
        firstname: user.firstname.clone(),
        lastname: user.lastname.clone(),
        username: user.username.clone(),
        email: user.email.clone(),
        user_type: if user.is_admin() { "admin" } else { "customer" }.to_string(),
        password: None,
    }
}

/// Admin user management: list, create, edit, delete.
#[function_component(AdminUsersPage)]
pub fn admin_users_page() -> Html {
    let config = use_context::<Rc<AppConfig>>().expect("AdminUsersPage outside ConfigProvider");

    let users = use_state(Vec::<User>::new);
    let loading = use_state(|| false);
    let error = use_state(String::new);
    let show_create = use_state(|| false);
    let create_draft = use_state(UserDraft::default);
    let edit = use_state(|| None::<(i64, UserDraft)>);
    let submitting = use_state(|| false);
    let success = use_state(String::new);
    let banner_timer = use_mut_ref(|| None::<browser::Timeout>);

    let fetch_users = {
        let users = users.clone();
        let loading = loading.clone();
        let error = error.clone();
        let config = config.clone();
        Callback::from(move |_: ()| {
            let api = ApiClient::new(&config);
            let users = users.clone();
            let loading = loading.clone();
            let error = error.clone();
            loading.set(true);
            spawn_local(async move {
                match api.users().await {
                    Ok(list) => {
                        error.set(String::new());
                        users.set(list);
                    }
                    Err(err) => {
                        browser::console_error(&format!("Error fetching users: {err}"));
                        error.set("Failed to fetch users. Please try again later.".to_string());
                    }
                }
                loading.set(false);
            });
        })
    };

    {
        let fetch_users = fetch_users.clone();
        use_effect_with((), move |_| {
            fetch_users.emit(());
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

    let on_delete = {
        let config = config.clone();
        let fetch_users = fetch_users.clone();
        let flash_success = flash_success.clone();
        let error = error.clone();
        Callback::from(move |id: i64| {
            if !browser::confirm("Are you sure you want to delete this user?") {
                return;
            }
            let api = ApiClient::new(&config);
            let fetch_users = fetch_users.clone();
            let flash_success = flash_success.clone();
            let error = error.clone();
            spawn_local(async move {
                match api.delete_user(id).await {
                    Ok(()) => {
                        flash_success.emit("User deleted successfully!".to_string());
                        fetch_users.emit(());
                    }
                    Err(err) => error.set(err.to_string()),
                }
            });
        })
    };

    let on_create = {
        let config = config.clone();
        let create_draft = create_draft.clone();
        let show_create = show_create.clone();
        let submitting = submitting.clone();
        let fetch_users = fetch_users.clone();
        let flash_success = flash_success.clone();
        let error = error.clone();
        Callback::from(move |_: ()| {
            if let Some(message) = draft_error(&create_draft, true) {
                error.set(message);
                return;
            }
            let api = ApiClient::new(&config);
            let mut draft = (*create_draft).clone();
            if draft.user_type.is_empty() {
                draft.user_type = "customer".to_string();
            }
            let create_draft = create_draft.clone();
            let show_create = show_create.clone();
            let submitting = submitting.clone();
            let fetch_users = fetch_users.clone();
            let flash_success = flash_success.clone();
            let error = error.clone();
            submitting.set(true);
            spawn_local(async move {
                match api.create_user(&draft).await {
                    Ok(()) => {
                        show_create.set(false);
                        create_draft.set(UserDraft::default());
                        flash_success.emit("User added successfully!".to_string());
                        fetch_users.emit(());
                    }
                    Err(err) => error.set(err.to_string()),
                }
                submitting.set(false);
            });
        })
    };

    let on_update = {
        let config = config.clone();
        let edit = edit.clone();
        let submitting = submitting.clone();
        let fetch_users = fetch_users.clone();
        let flash_success = flash_success.clone();
        let error = error.clone();
        Callback::from(move |_: ()| {
            let Some((id, draft)) = (*edit).clone() else {
                return;
            };
            if let Some(message) = draft_error(&draft, false) {
                error.set(message);
                return;
            }
            let api = ApiClient::new(&config);
            let edit = edit.clone();
            let submitting = submitting.clone();
            let fetch_users = fetch_users.clone();
            let flash_success = flash_success.clone();
            let error = error.clone();
            submitting.set(true);
            spawn_local(async move {
                match api.update_user(id, &draft).await {
                    Ok(()) => {
                        edit.set(None);
                        flash_success.emit("User updated successfully!".to_string());
                        fetch_users.emit(());
                    }
                    Err(err) => error.set(err.to_string()),
                }
                submitting.set(false);
            });
        })
    };

    html! {
        <div class="page">
            <h2 class="text-center">{ "User Management" }</h2>

            { if !success.is_empty() {
                html! { <Alert variant={AlertVariant::Success}>{ (*success).clone() }</Alert> }
            } else {
                html! {}
            }}
            { if !error.is_empty() {
                html! { <Alert variant={AlertVariant::Danger}>{ (*error).clone() }</Alert> }
            } else {
                html! {}
            }}

            <div class="section text-right">
                <button class="btn btn-success" onclick={{
                    let show_create = show_create.clone();
                    Callback::from(move |_: MouseEvent| show_create.set(true))
                }}>
                    { "Create New User" }
                </button>
            </div>

            { if *loading {
                html! { <Spinner /> }
            } else if users.is_empty() {
                html! { <p class="text-center muted">{ "No users found." }</p> }
            } else {
                html! {
                    <table class="table">
                        <thead>
                            <tr>
                                <th>{ "ID" }</th>
                                <th>{ "Username" }</th>
                                <th>{ "Name" }</th>
                                <th>{ "Email" }</th>
                                <th>{ "Type" }</th>
                                <th>{ "Actions" }</th>
                            </tr>
                        </thead>
                        <tbody>
                            { for users.iter().map(|user| {
                                let on_edit = {
                                    let edit = edit.clone();
                                    let id = user.id;
                                    let draft = draft_from(user);
                                    Callback::from(move |_: MouseEvent| {
                                        edit.set(Some((id, draft.clone())));
                                    })
                                };
                                let on_delete = {
                                    let on_delete = on_delete.clone();
                                    let id = user.id;
                                    Callback::from(move |_: MouseEvent| on_delete.emit(id))
                                };
                                html! {
                                    <tr key={user.id}>
                                        <td>{ user.id }</td>
                                        <td>{ user.username.clone() }</td>
                                        <td>{ format!("{} {}", user.firstname, user.lastname) }</td>
                                        <td>{ user.email.clone() }</td>
                                        <td>{ if user.is_admin() { "Admin" } else { "Customer" } }</td>
                                        <td class="actions">
                                            <button class="btn btn-warning btn-sm" onclick={on_edit}>{ "Edit" }</button>
                                            <button class="btn btn-danger btn-sm" onclick={on_delete}>{ "Delete" }</button>
                                        </td>
                                    </tr>
                                }
                            })}
                        </tbody>
                    </table>
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
                    <UserModal
                        title="Create New User"
                        submit_label="Create"
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
                    <UserModal
                        title="Edit User"
                        submit_label="Update"
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
