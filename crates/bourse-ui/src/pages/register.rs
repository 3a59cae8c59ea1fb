use bourse_types::{FormState, RegisterForm};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::components::A;

use crate::api::auth::register;
use crate::components::form::{submit_form, TextField};
use crate::components::toast::ToastContext;
use crate::session::{use_route_change, LOGIN_PATH};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let form = RwSignal::new(FormState::new(RegisterForm::default()));
    let toasts = use_context::<ToastContext>();
    let submitting = move || form.with(|f| f.is_submitting());
    let goTo = use_route_change();

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        submit_form(form, toasts, register, move |message: String| {
            if let Some(toasts) = toasts {
                toasts.success(message);
            }
            goTo(LOGIN_PATH);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card card">
                <div class="login-header">
                    <div class="login-icon">"B"</div>
                    <h1>"Create an account"</h1>
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
                    <div class="form-row">
                        <TextField
                            form
                            field="firstName"
                            label="First name"
                            read=|m: &RegisterForm| m.first_name.clone()
                            write=|m: &mut RegisterForm, v: String| m.first_name = v
                        />
                        <TextField
                            form
                            field="lastName"
                            label="Last name"
                            read=|m: &RegisterForm| m.last_name.clone()
                            write=|m: &mut RegisterForm, v: String| m.last_name = v
                        />
                    </div>
                    <TextField
                        form
                        field="email"
                        label="Email"
                        kind="email"
                        read=|m: &RegisterForm| m.email.clone()
                        write=|m: &mut RegisterForm, v: String| m.email = v
                    />
                    <TextField
                        form
                        field="password"
                        label="Password"
                        kind="password"
                        read=|m: &RegisterForm| m.password.clone()
                        write=|m: &mut RegisterForm, v: String| m.password = v
                    />
                    <TextField
                        form
                        field="confirmPassword"
                        label="Confirm password"
                        kind="password"
                        read=|m: &RegisterForm| m.confirm_password.clone()
                        write=|m: &mut RegisterForm, v: String| m.confirm_password = v
                    />
                    <button type="submit" class="btn btn-primary btn-block" disabled=submitting>
                        {move || if submitting() { "Creating account..." } else { "Register" }}
                    </button>
                </form>
                <p class="login-footer">
                    "Already registered? " <A href="/login">"Sign in"</A>
                </p>
            </div>
        </div>
    }
}
