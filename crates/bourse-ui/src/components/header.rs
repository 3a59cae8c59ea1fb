use leptos::prelude::*;
use leptos_router::components::A;

use crate::api::auth::Logout;
use crate::api::failure_of;
use crate::components::toast::ToastContext;

#[component]
pub fn Header() -> impl IntoView {
    let logoutAction = ServerAction::<Logout>::new();
    let pending = logoutAction.pending();
    let toasts = use_context::<ToastContext>();

    // Success navigates through the server function's redirect.
    Effect::new(move |_| {
        if let Some(Err(e)) = logoutAction.value().get() {
            if let Some(toasts) = toasts {
                toasts.error(failure_of(e).message);
            }
        }
    });

    view! {
        <header class="app-header">
            <div class="header-inner">
                <A href="/dashboard" attr:class="brand">
                    <span class="brand-icon">"B"</span>
                    <span class="brand-text">"Stock Exchange"</span>
                </A>
                <ActionForm action=logoutAction>
                    <button type="submit" class="btn btn-secondary" disabled=move || pending.get()>
                        {move || if pending.get() { "Logging out" } else { "Logout" }}
                    </button>
                </ActionForm>
            </div>
        </header>
    }
}
