//! Session lifecycle context.
//!
//! `AuthProvider` owns the in-memory copy of the session and is the single
//! authority for tearing it down (the HTTP layer redirects on 401 but never
//! clears storage). It re-checks the stored session on mount, on every
//! route change, and on a 5-minute timer; user activity refreshes the
//! inactivity clock. Background revalidation against `GET /check` only
//! signs the user out on an explicit 401 so a flaky network never forces a
//! logout.

use std::rc::Rc;

use serde::Serialize;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::{ApiClient, Credentials};
use crate::browser;
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::routes::Route;
use crate::session::{self, Session, SessionStatus, User};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub session: Option<Session>,
}

pub enum AuthAction {
    SignedIn(Session),
    SignedOut,
    ProfileUpdated(User),
}

impl Reducible for AuthState {
    type Action = AuthAction;

    fn reduce(self: Rc<Self>, action: AuthAction) -> Rc<Self> {
        match action {
            AuthAction::SignedIn(session) => Rc::new(AuthState { session: Some(session) }),
            AuthAction::SignedOut => Rc::new(AuthState { session: None }),
            AuthAction::ProfileUpdated(user) => match self.session.as_ref() {
                Some(session) => {
                    let mut updated = session.clone();
                    updated.user = user;
                    Rc::new(AuthState { session: Some(updated) })
                }
                None => self,
            },
        }
    }
}

pub type AuthContextHandle = UseReducerHandle<AuthState>;

#[derive(Serialize)]
struct LoginQuery<'a> {
    message: &'a str,
}

/// Clear the session everywhere and, when there is something to tell the
/// user and we are not already on an auth screen, land them on the login
/// page with the notice in the query string.
fn teardown(
    state: &AuthContextHandle,
    navigator: Option<&Navigator>,
    message: Option<&str>,
) {
    session::clear();
    state.dispatch(AuthAction::SignedOut);

    if let Some(message) = message {
        let path = browser::pathname();
        if !path.contains("/login") && !path.contains("/signup") {
            if let Some(navigator) = navigator {
                let _ = navigator.push_with_query(&Route::Login, &LoginQuery { message });
            }
        }
    }
}

/// Local pass over the stored session, then an async server revalidation.
fn check_session(
    state: AuthContextHandle,
    config: Rc<AppConfig>,
    navigator: Option<Navigator>,
) {
    let Some(stored) = session::load() else {
        // No stored session is not an error: just make sure the in-memory
        // state agrees.
        if state.session.is_some() {
            state.dispatch(AuthAction::SignedOut);
        }
        return;
    };

    match stored.status(browser::now_ms(), config.inactivity_timeout_ms) {
        SessionStatus::Active => {}
        status => {
            teardown(&state, navigator.as_ref(), status.expiry_message());
            return;
        }
    }

    if state.session.is_none() {
        state.dispatch(AuthAction::SignedIn(stored));
    }

    // Optimistically trust the local session; revalidate in the background.
    spawn_local(async move {
        let api = ApiClient::new(&config);
        match api.check().await {
            Ok(resp) => {
                if let Some(mut current) = session::load() {
                    current.user = resp.user.clone();
                    session::save(&current);
                }
                state.dispatch(AuthAction::ProfileUpdated(resp.user));
            }
            Err(ApiError::Unauthorized) => {
                teardown(
                    &state,
                    navigator.as_ref(),
                    Some("Session expired. Please login again."),
                );
            }
            Err(err) => {
                // Network/CORS blips are non-fatal; keep the session.
                browser::console_warn(&format!("Session check failed: {err}"));
            }
        }
    });
}

#[derive(Properties, PartialEq)]
pub struct AuthProviderProps {
    pub children: Children,
}

#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let config = use_context::<Rc<AppConfig>>().expect("AuthProvider outside ConfigProvider");
    let navigator = use_navigator();
    let location = use_location();

    let state = {
        let config = config.clone();
        use_reducer(move || AuthState {
            // Only trust a stored session that is still inside both clocks;
            // the first check pass handles messaging for the rest.
            session: session::load().filter(|s| {
                s.status(browser::now_ms(), config.inactivity_timeout_ms)
                    == SessionStatus::Active
            }),
        })
    };

    // Re-check on mount and on every route change.
    {
        let state = state.clone();
        let config = config.clone();
        let navigator = navigator.clone();
        let path = location.map(|l| l.path().to_string());
        use_effect_with(path, move |_| {
            check_session(state, config, navigator);
            || ()
        });
    }

    // Periodic check plus activity listeners, released on teardown.
    {
        let state = state.clone();
        let config = config.clone();
        let navigator = navigator.clone();
        use_effect_with((), move |_| {
            let tick = {
                let state = state.clone();
                let config = config.clone();
                let navigator = navigator.clone();
                move || check_session(state.clone(), config.clone(), navigator.clone())
            };
            let timer = browser::Interval::new(config.session_check_interval_ms, tick);

            let listeners: Vec<browser::EventSubscription> =
                ["pointerdown", "keydown", "scroll", "touchstart"]
                    .into_iter()
                    .filter_map(|event| {
                        browser::EventSubscription::new(event, || {
                            session::touch(browser::now_ms());
                        })
                    })
                    .collect();

            move || {
                drop(timer);
                drop(listeners);
            }
        });
    }

    html! {
        <ContextProvider<AuthContextHandle> context={state.clone()}>
            { props.children.clone() }
        </ContextProvider<AuthContextHandle>>
    }
}

/// What the screens use: auth state plus login/logout operations.
#[derive(Clone)]
pub struct AuthHandle {
    state: AuthContextHandle,
    config: Rc<AppConfig>,
    navigator: Option<Navigator>,
}

impl PartialEq for AuthHandle {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
    }
}

impl AuthHandle {
    pub fn user(&self) -> Option<User> {
        self.state.session.as_ref().map(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.session.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.state
            .session
            .as_ref()
            .map(|s| s.user.is_admin())
            .unwrap_or(false)
    }

    /// POST the credentials; on success persist a fresh session (expiry =
    /// now + configured duration) and hand back the user so the caller can
    /// pick the landing route. On failure the server's message comes back
    /// for the inline alert.
    pub async fn login(&self, credentials: Credentials) -> Result<User, String> {
        let api = ApiClient::new(&self.config);
        match api.login(&credentials).await {
            Ok(resp) => {
                let session = Session::new(
                    resp.token,
                    resp.user.clone(),
                    browser::now_ms(),
                    self.config.session_duration_ms,
                );
                session::save(&session);
                self.state.dispatch(AuthAction::SignedIn(session));
                Ok(resp.user)
            }
            Err(err) => Err(err.to_string()),
        }
    }

    /// Best-effort server logout; the local session goes away no matter
    /// what the server says.
    pub fn logout(&self) {
        let api = ApiClient::new(&self.config);
        spawn_local(async move {
            if api.logout().await.is_err() {
                browser::console_warn("Logout request failed, continuing client-side logout");
            }
        });
        teardown(&self.state, self.navigator.as_ref(), None);
        if let Some(navigator) = &self.navigator {
            navigator.push(&Route::Login);
        }
    }
}

#[hook]
pub fn use_auth() -> AuthHandle {
    let state = use_context::<AuthContextHandle>().expect("use_auth outside AuthProvider");
    let config = use_context::<Rc<AppConfig>>().expect("use_auth outside ConfigProvider");
    let navigator = use_navigator();
    AuthHandle { state, config, navigator }
}
