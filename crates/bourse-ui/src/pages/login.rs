use bourse_types::{FormState, LoginForm};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_query_map;

use crate::api::auth::login;
use crate::components::form::{submit_form, TextField};
use crate::components::toast::ToastContext;

#[component]
pub fn LoginPage() -> impl IntoView {
    let form = RwSignal::new(FormState::new(LoginForm::default()));
    let query = use_query_map();
    let toasts = use_context::<ToastContext>();
    let submitting = move || form.with(|f| f.is_submitting());

    // The server function redirects on success.
    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let from = query.with_untracked(|q| q.get("from"));
        submit_form(form, toasts, move |request| login(request, from), |()| {});
    };

    view! {
        <div class="login-page">
            <div class="login-card card">
                <div class="login-header">
                    <div class="login-icon">"B"</div>
                    <h1>"Welcome back"</h1>
                    <p>"Sign in to manage stocks and exchanges"</p>
                </div>

                {move || {
                    form.with(|f| {
                        f.general_error()
                            .map(|message| {
                                view! { <div class="login-error">{message.to_string()}</div> }
                            })
                    })
                }}

                <form on:submit=submit>
                    <TextField
                        form
                        field="email"
                        label="Email"
                        kind="email"
                        placeholder="you@example.com"
                        read=|m: &LoginForm| m.email.clone()
                        write=|m: &mut LoginForm, v: String| m.email = v
                    />
                    <TextField
                        form
                        field="password"
                        label="Password"
                        kind="password"
                        read=|m: &LoginForm| m.password.clone()
                        write=|m: &mut LoginForm, v: String| m.password = v
                    />
                    <button type="submit" class="btn btn-primary btn-block" disabled=submitting>
                        {move || if submitting() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <p class="login-footer">
                    "No account yet? " <A href="/register">"Register"</A>
                </p>
            </div>
        </div>
    }
}
