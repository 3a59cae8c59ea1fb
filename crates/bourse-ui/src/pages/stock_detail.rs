use bourse_types::Stock;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use crate::api::failure_of;
use crate::api::stocks::{delete_stock, load_stock};
use crate::components::confirm::ConfirmDialog;
use crate::components::membership::ExchangesForStockTable;
use crate::components::stock_forms::UpdateStockPriceModal;
use crate::components::toast::ToastContext;
use crate::format;
use crate::pages::{loading, unavailable};
use crate::session::{report, spawn, use_route_change, HOME_PATH};

#[component]
pub fn StockDetailPage() -> impl IntoView {
    let params = use_params_map();
    let stockId = Memo::new(move |_| params.with(|p| p.get("id").unwrap_or_default()));
    let stock = Resource::new(move || stockId.get(), load_stock);

    view! {
        <Suspense fallback=|| loading("Loading stock...")>
            {move || Suspend::new(async move {
                match stock.await {
                    Ok(found) => {
                        view! {
                            <StockDetails stock=found on_changed=Callback::new(move |_| stock.refetch()) />
                        }
                            .into_any()
                    }
                    Err(e) => unavailable(failure_of(e), "Stock"),
                }
            })}
        </Suspense>
    }
}

#[component]
fn StockDetails(stock: Stock, on_changed: Callback<()>) -> impl IntoView {
    let toasts = use_context::<ToastContext>();
    let confirming = RwSignal::new(false);
    let deleting = RwSignal::new(false);
    let goTo = use_route_change();
    let stockId = stock.stock_id.clone();

    let confirmDelete = Callback::new(move |_| {
        let stockId = stockId.clone();
        deleting.set(true);
        spawn(async move {
            match delete_stock(stockId).await {
                Ok(()) => {
                    if let Some(toasts) = toasts {
                        toasts.success("Stock deleted successfully");
                    }
                    goTo(HOME_PATH);
                }
                Err(e) => {
                    report(toasts, &failure_of(e));
                    deleting.set(false);
                    confirming.set(false);
                }
            }
        });
    });

    view! {
        <div class="detail-header">
            <A href="/dashboard" attr:class="btn btn-link">"Back"</A>
            <h1>{stock.name.clone()}</h1>
            <div class="detail-actions">
                <UpdateStockPriceModal
                    stock=stock.clone()
                    on_updated=Callback::new(move |_| on_changed.run(()))
                />
                <button class="btn btn-danger" on:click=move |_| confirming.set(true)>
                    "Delete"
                </button>
            </div>
        </div>
        <div class="card detail-card">
            <dl class="detail-grid">
                <dt>"Stock ID"</dt>
                <dd>{stock.stock_id.clone()}</dd>
                <dt>"Description"</dt>
                <dd>{stock.description.clone()}</dd>
                <dt>"Current price"</dt>
                <dd class="cell-number">{format::price(stock.current_price)}</dd>
                <dt>"Last updated"</dt>
                <dd>{format!("{} {}", format::date(stock.updated_at), format::time(stock.updated_at))}</dd>
            </dl>
        </div>
        <ExchangesForStockTable stock_id=Signal::stored(stock.stock_id.clone()) />
        <ConfirmDialog
            open=confirming
            busy=deleting
            title="Delete stock"
            message=Signal::stored(format!("Delete {}? This cannot be undone.", stock.name))
            confirm_label="Delete"
            busy_label="Deleting..."
            on_confirm=confirmDelete
            on_cancel=Callback::new(move |_| {
                if !deleting.get_untracked() {
                    confirming.set(false);
                }
            })
        />
    }
}
