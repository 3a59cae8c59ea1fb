use bourse_types::{FormState, Stock, StockForm, StockPriceForm};
use leptos::prelude::*;

use crate::api::stocks::{create_stock, update_stock_price};
use crate::components::form::{submit_form, FormModal, TextField};
use crate::components::toast::ToastContext;

#[component]
pub fn CreateStockModal(on_created: Callback<()>) -> impl IntoView {
    let form = RwSignal::new(FormState::new(StockForm::default()));
    let toasts = use_context::<ToastContext>();

    let submit = Callback::new(move |_| {
        submit_form(form, toasts, create_stock, move |stock: Stock| {
            if let Some(toasts) = toasts {
                toasts.success(format!("Stock {} created successfully", stock.name));
            }
            on_created.run(());
        });
    });

    view! {
        <button class="btn btn-primary" on:click=move |_| form.update(|f| f.open())>
            "Create stock"
        </button>
        <FormModal
            form
            title="Create stock"
            submit_label="Create"
            busy_label="Creating..."
            on_submit=submit
        >
            <TextField
                form
                field="name"
                label="Name"
                read=|m: &StockForm| m.name.clone()
                write=|m: &mut StockForm, v: String| m.name = v
            />
            <TextField
                form
                field="description"
                label="Description"
                read=|m: &StockForm| m.description.clone()
                write=|m: &mut StockForm, v: String| m.description = v
            />
            <TextField
                form
                field="currentPrice"
                label="Price"
                kind="number"
                placeholder="0.00"
                read=|m: &StockForm| m.current_price.clone()
                write=|m: &mut StockForm, v: String| m.current_price = v
            />
        </FormModal>
    }
}

/// Price editor for one stock; reopening after an update starts from the
/// new price.
#[component]
pub fn UpdateStockPriceModal(stock: Stock, on_updated: Callback<Stock>) -> impl IntoView {
    let form = RwSignal::new(FormState::new(StockPriceForm::from_price(stock.current_price)));
    let toasts = use_context::<ToastContext>();
    let stockId = stock.stock_id.clone();

    let submit = Callback::new(move |_| {
        let stockId = stockId.clone();
        submit_form(
            form,
            toasts,
            move |request| update_stock_price(stockId, request),
            move |updated: Stock| {
                form.update(|f| f.rebase(StockPriceForm::from_price(updated.current_price)));
                if let Some(toasts) = toasts {
                    toasts.success("Stock price updated successfully");
                }
                on_updated.run(updated);
            },
        );
    });

    view! {
        <button class="btn btn-secondary" on:click=move |_| form.update(|f| f.open())>
            "Update price"
        </button>
        <FormModal
            form
            title="Update stock price"
            submit_label="Save"
            busy_label="Saving..."
            on_submit=submit
        >
            <TextField
                form
                field="currentPrice"
                label="Price"
                kind="number"
                read=|m: &StockPriceForm| m.current_price.clone()
                write=|m: &mut StockPriceForm, v: String| m.current_price = v
            />
        </FormModal>
    }
}
