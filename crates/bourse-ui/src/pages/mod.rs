pub mod dashboard;
pub mod exchange_detail;
pub mod login;
pub mod register;
pub mod stock_detail;

use bourse_types::ApiFailure;
use leptos::prelude::*;
use leptos_router::components::{Redirect, A};

use crate::session::LOGIN_PATH;

/// What a detail page shows when its entity could not be loaded.
fn unavailable(failure: ApiFailure, what: &'static str) -> AnyView {
    if failure.is_unauthorized() {
        return view! { <Redirect path=LOGIN_PATH /> }.into_any();
    }
    view! {
        <div class="card not-found">
            <h2>{format!("{what} not found")}</h2>
            <p class="cell-muted">{failure.message}</p>
            <A href="/dashboard">"Back to dashboard"</A>
        </div>
    }
    .into_any()
}

fn loading(text: &'static str) -> impl IntoView {
    view! {
        <div class="loading">
            <div class="spinner"></div>
            {text}
        </div>
    }
}
