use bourse_types::StockExchange;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use crate::api::exchanges::{delete_exchange, load_exchange};
use crate::api::failure_of;
use crate::components::confirm::ConfirmDialog;
use crate::components::exchange_forms::UpdateExchangeModal;
use crate::components::membership::{Membership, MembershipTable};
use crate::components::toast::ToastContext;
use crate::format;
use crate::pages::{loading, unavailable};
use crate::session::{report, spawn, use_route_change, HOME_PATH};

#[component]
pub fn ExchangeDetailPage() -> impl IntoView {
    let params = use_params_map();
    let exchangeId = Memo::new(move |_| params.with(|p| p.get("id").unwrap_or_default()));
    let exchange = Resource::new(move || exchangeId.get(), load_exchange);

    view! {
        <Suspense fallback=|| loading("Loading stock exchange...")>
            {move || Suspend::new(async move {
                match exchange.await {
                    Ok(found) => {
                        view! {
                            <ExchangeDetails
                                exchange=found
                                on_changed=Callback::new(move |_| exchange.refetch())
                            />
                        }
                            .into_any()
                    }
                    Err(e) => unavailable(failure_of(e), "Stock exchange"),
                }
            })}
        </Suspense>
    }
}

#[component]
fn ExchangeDetails(exchange: StockExchange, on_changed: Callback<()>) -> impl IntoView {
    let toasts = use_context::<ToastContext>();
    let confirming = RwSignal::new(false);
    let deleting = RwSignal::new(false);
    let goTo = use_route_change();
    let revision = RwSignal::new(0u64);
    let exchangeId = exchange.stock_exchange_id.clone();
    let live = exchange.live_in_market;

    let confirmDelete = Callback::new({
        let exchangeId = exchangeId.clone();
        move |_| {
            let exchangeId = exchangeId.clone();
            deleting.set(true);
            spawn(async move {
                match delete_exchange(exchangeId).await {
                    Ok(()) => {
                        if let Some(toasts) = toasts {
                            toasts.success("Stock exchange deleted successfully");
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
        }
    });

    view! {
        <div class="detail-header">
            <A href="/dashboard" attr:class="btn btn-link">"Back"</A>
            <h1>{exchange.name.clone()}</h1>
            <div class="detail-actions">
                <UpdateExchangeModal
                    exchange=exchange.clone()
                    on_updated=Callback::new(move |_| on_changed.run(()))
                />
                <button class="btn btn-danger" on:click=move |_| confirming.set(true)>
                    "Delete"
                </button>
            </div>
        </div>
        <div class="card detail-card">
            <dl class="detail-grid">
                <dt>"Description"</dt>
                <dd>{exchange.description.clone()}</dd>
                <dt>"Status"</dt>
                <dd>
                    <span class=if live { "status-dot live" } else { "status-dot" }></span>
                    {format::market_status(live)}
                </dd>
            </dl>
        </div>
        <div class="membership-grid">
            <MembershipTable
                membership=Membership::Listed
                exchange_id=Signal::stored(exchangeId.clone())
                revision
            />
            <MembershipTable
                membership=Membership::Unlisted
                exchange_id=Signal::stored(exchangeId)
                revision
            />
        </div>
        <ConfirmDialog
            open=confirming
            busy=deleting
            title="Delete stock exchange"
            message=Signal::stored(format!("Delete {}? This cannot be undone.", exchange.name))
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
