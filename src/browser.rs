//! Thin wrappers over the browser APIs the rest of the crate needs:
//! localStorage, timers, DOM event subscriptions, and console logging.
//!
//! Timers and listeners are handles that unregister themselves on drop, so
//! a component effect can hold them and let the cleanup closure drop them.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

pub fn window() -> Option<web_sys::Window> {
    web_sys::window()
}

pub fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub fn local_storage_get(key: &str) -> Option<String> {
    local_storage().and_then(|s| s.get_item(key).ok().flatten())
}

pub fn local_storage_set(key: &str, value: &str) {
    if let Some(s) = local_storage() {
        let _ = s.set_item(key, value);
    }
}

pub fn local_storage_remove(key: &str) {
    if let Some(s) = local_storage() {
        let _ = s.remove_item(key);
    }
}

/// Milliseconds since the epoch, from the browser clock.
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Repeating timer. Cleared when the handle drops.
pub struct Interval {
    id: i32,
    _cb: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn new(ms: u32, mut f: impl FnMut() + 'static) -> Option<Interval> {
        let window = web_sys::window()?;
        let cb = Closure::wrap(Box::new(move || f()) as Box<dyn FnMut()>);
        let id = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                ms as i32,
            )
            .ok()?;
        Some(Interval { id, _cb: cb })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(w) = web_sys::window() {
            w.clear_interval_with_handle(self.id);
        }
    }
}

/// One-shot timer. Cancelled if the handle drops before it fires.
pub struct Timeout {
    id: i32,
    _cb: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn new(ms: u32, f: impl FnOnce() + 'static) -> Option<Timeout> {
        let window = web_sys::window()?;
        let mut f = Some(f);
        let cb = Closure::wrap(Box::new(move || {
            if let Some(f) = f.take() {
                f();
            }
        }) as Box<dyn FnMut()>);
        let id = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                ms as i32,
            )
            .ok()?;
        Some(Timeout { id, _cb: cb })
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if let Some(w) = web_sys::window() {
            w.clear_timeout_with_handle(self.id);
        }
    }
}

/// A window-level DOM event subscription, removed when the handle drops.
pub struct EventSubscription {
    event: &'static str,
    cb: Closure<dyn FnMut(web_sys::Event)>,
}

impl EventSubscription {
    pub fn new(event: &'static str, mut f: impl FnMut() + 'static) -> Option<EventSubscription> {
        let window = web_sys::window()?;
        let cb = Closure::wrap(Box::new(move |_: web_sys::Event| f()) as Box<dyn FnMut(web_sys::Event)>);
        window
            .add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
            .ok()?;
        Some(EventSubscription { event, cb })
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        if let Some(w) = web_sys::window() {
            let _ = w.remove_event_listener_with_callback(self.event, self.cb.as_ref().unchecked_ref());
        }
    }
}

/// One-shot async sleep backed by `setTimeout`.
pub async fn sleep_ms(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(w) = web_sys::window() {
            let _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
        }
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}

pub fn pathname() -> String {
    web_sys::window()
        .map(|w| w.location().pathname().unwrap_or_default())
        .unwrap_or_default()
}

/// Hard navigation, used by the HTTP layer when a 401 arrives outside the
/// login screen. Everything else navigates through the router.
pub fn redirect(url: &str) {
    if let Some(w) = web_sys::window() {
        let _ = w.location().set_href(url);
    }
}

/// Value of a query-string parameter on the current URL, if present.
pub fn query_param(name: &str) -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get(name)
}

pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

// Console helpers compile to no-ops off wasm so the pure modules that log
// (chart normalization, session load) stay callable from native tests.

pub fn console_log(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&msg.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

pub fn console_warn(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&msg.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

pub fn console_error(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&msg.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}
