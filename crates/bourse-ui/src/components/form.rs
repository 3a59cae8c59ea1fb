use std::future::Future;

use bourse_types::{ApiFailure, FormModel, FormState};
use leptos::prelude::*;

use crate::api::failure_of;
use crate::components::toast::ToastContext;
use crate::session::{report, spawn};

/// Validates the form and, when it passes, performs exactly one call. The
/// form settles on the result: closed and reset on success, open with the
/// errors merged in on failure.
pub fn submit_form<M, T, Fut>(
    form: RwSignal<FormState<M>>,
    toasts: Option<ToastContext>,
    call: impl FnOnce(M::Submission) -> Fut,
    on_success: impl FnOnce(T) + 'static,
) where
    M: FormModel,
    T: 'static,
    Fut: Future<Output = Result<T, ServerFnError<ApiFailure>>> + 'static,
{
    let Some(submission) = form.try_update(|f| f.begin_submit()).flatten() else {
        return;
    };
    let pending = call(submission);
    spawn(async move {
        match pending.await {
            Ok(value) => {
                form.update(|f| f.succeed());
                on_success(value);
            }
            Err(e) => {
                let failure = failure_of(e);
                if failure.is_unauthorized() {
                    report(toasts, &failure);
                }
                form.update(|f| f.fail(failure));
            }
        }
    });
}

/// Labelled input bound to one field of a form model.
#[component]
pub fn TextField<M>(
    form: RwSignal<FormState<M>>,
    field: &'static str,
    label: &'static str,
    read: fn(&M) -> String,
    write: fn(&mut M, String),
    #[prop(default = "text")] kind: &'static str,
    #[prop(optional)] placeholder: &'static str,
) -> impl IntoView
where
    M: FormModel,
{
    view! {
        <div class="form-group">
            <label for=field>{label}</label>
            <input
                type=kind
                id=field
                name=field
                placeholder=placeholder
                class:input-error=move || form.with(|f| f.error(field).is_some())
                prop:value=move || form.with(|f| read(f.values()))
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| f.edit(field, |m| write(m, value)));
                }
            />
            {move || {
                form.with(|f| {
                    f.error(field)
                        .map(|message| view! { <p class="field-error">{message.to_string()}</p> })
                })
            }}
        </div>
    }
}

/// Modal shell around a form: title, general error banner, and the
/// cancel / submit buttons. Cancelling is ignored while a call is pending.
#[component]
pub fn FormModal<M>(
    form: RwSignal<FormState<M>>,
    title: &'static str,
    submit_label: &'static str,
    busy_label: &'static str,
    on_submit: Callback<()>,
    children: ChildrenFn,
) -> impl IntoView
where
    M: FormModel,
{
    let close = move || {
        form.update(|f| {
            f.close();
        });
    };
    let submitting = move || form.with(|f| f.is_submitting());

    view! {
        <Show when=move || form.with(|f| f.is_open())>
            <div class="modal-backdrop" on:click=move |_| close()>
                <div class="modal card" on:click=|ev| ev.stop_propagation()>
                    <h2>{title}</h2>
                    {move || {
                        form.with(|f| {
                            f.general_error()
                                .map(|message| {
                                    view! { <div class="form-error">{message.to_string()}</div> }
                                })
                        })
                    }}
                    <form on:submit=move |ev| {
                        ev.prevent_default();
                        on_submit.run(());
                    }>
                        {children()}
                        <div class="modal-actions">
                            <button
                                type="button"
                                class="btn btn-secondary"
                                disabled=submitting
                                on:click=move |_| close()
                            >
                                "Cancel"
                            </button>
                            <button type="submit" class="btn btn-primary" disabled=submitting>
                                {move || if submitting() { busy_label } else { submit_label }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </Show>
    }
}
