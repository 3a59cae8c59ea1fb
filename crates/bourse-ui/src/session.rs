use std::future::Future;

use bourse_types::ApiFailure;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::components::toast::ToastContext;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/dashboard";

/// Full page navigation, so the next request goes out with whatever cookies
/// the last response set.
pub fn navigate_to(path: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Err(e) = leptos::prelude::window().location().set_href(path) {
            leptos::logging::error!("navigation to {path} failed: {e:?}");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = path;
}

/// Route change inside the app. The page stays mounted, so a toast raised
/// just before it is still on screen afterwards. Call from a component body.
pub fn use_route_change() -> impl Fn(&str) + Copy + Send + Sync + 'static {
    route_change(use_navigate())
}

fn route_change(
    navigate: impl Fn(&str, NavigateOptions) + 'static,
) -> impl Fn(&str) + Copy + Send + Sync + 'static {
    let navigate = StoredValue::new_local(navigate);
    move |path: &str| {
        navigate.try_with_value(|go| go(path, NavigateOptions::default()));
    }
}

/// Runs a server function call started from an event handler. Event
/// handlers only fire in the browser.
pub fn spawn(task: impl Future<Output = ()> + 'static) {
    #[cfg(feature = "hydrate")]
    wasm_bindgen_futures::spawn_local(task);
    #[cfg(not(feature = "hydrate"))]
    drop(task);
}

/// A lost session goes back to the login screen; anything else is toasted.
pub fn report(toasts: Option<ToastContext>, failure: &ApiFailure) {
    if failure.is_unauthorized() {
        navigate_to(LOGIN_PATH);
        return;
    }
    if let Some(toasts) = toasts {
        toasts.error(failure.message.clone());
    }
}
