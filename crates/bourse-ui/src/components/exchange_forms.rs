use bourse_types::{FormState, StockExchange, StockExchangeForm};
use leptos::prelude::*;

use crate::api::exchanges::{create_exchange, update_exchange};
use crate::components::form::{submit_form, FormModal, TextField};
use crate::components::toast::ToastContext;

fn exchange_fields(form: RwSignal<FormState<StockExchangeForm>>) -> impl IntoView {
    view! {
        <TextField
            form
            field="name"
            label="Name"
            read=|m: &StockExchangeForm| m.name.clone()
            write=|m: &mut StockExchangeForm, v: String| m.name = v
        />
        <TextField
            form
            field="description"
            label="Description"
            read=|m: &StockExchangeForm| m.description.clone()
            write=|m: &mut StockExchangeForm, v: String| m.description = v
        />
    }
}

#[component]
pub fn CreateExchangeModal(on_created: Callback<()>) -> impl IntoView {
    let form = RwSignal::new(FormState::new(StockExchangeForm::default()));
    let toasts = use_context::<ToastContext>();

    let submit = Callback::new(move |_| {
        submit_form(form, toasts, create_exchange, move |exchange: StockExchange| {
            if let Some(toasts) = toasts {
                toasts.success(format!("Stock exchange {} created successfully", exchange.name));
            }
            on_created.run(());
        });
    });

    view! {
        <button class="btn btn-primary" on:click=move |_| form.update(|f| f.open())>
            "Create stock exchange"
        </button>
        <FormModal
            form
            title="Create stock exchange"
            submit_label="Create"
            busy_label="Creating..."
            on_submit=submit
        >
            {exchange_fields(form)}
        </FormModal>
    }
}

/// Edits name and description; closing without saving restores the values
/// last loaded from the backend.
#[component]
pub fn UpdateExchangeModal(
    exchange: StockExchange,
    on_updated: Callback<StockExchange>,
) -> impl IntoView {
    let form = RwSignal::new(FormState::new(StockExchangeForm::from_exchange(&exchange)));
    let toasts = use_context::<ToastContext>();
    let exchangeId = exchange.stock_exchange_id.clone();

    let submit = Callback::new(move |_| {
        let exchangeId = exchangeId.clone();
        submit_form(
            form,
            toasts,
            move |request| update_exchange(exchangeId, request),
            move |updated: StockExchange| {
                form.update(|f| f.rebase(StockExchangeForm::from_exchange(&updated)));
                if let Some(toasts) = toasts {
                    toasts.success("Stock exchange updated successfully");
                }
                on_updated.run(updated);
            },
        );
    });

    view! {
        <button class="btn btn-secondary" on:click=move |_| form.update(|f| f.open())>
            "Edit"
        </button>
        <FormModal
            form
            title="Update stock exchange"
            submit_label="Save"
            busy_label="Saving..."
            on_submit=submit
        >
            {exchange_fields(form)}
        </FormModal>
    }
}
