use bourse_types::{LoadTicket, StockExchange, TableState};
use leptos::prelude::*;
use leptos_router::components::A;

use crate::api::exchanges::{delete_exchange, list_exchanges};
use crate::api::failure_of;
use crate::components::confirm::ConfirmDialog;
use crate::components::exchange_forms::CreateExchangeModal;
use crate::components::table::{placeholder_row, PagedTable, Pager};
use crate::components::toast::ToastContext;
use crate::format;
use crate::session::{report, spawn};

const PAGE_SIZE: u32 = 10;
const COLUMNS: u32 = 5;

#[component]
pub fn ExchangeTable() -> impl IntoView {
    let table = PagedTable::new(TableState::new(PAGE_SIZE), |ticket: LoadTicket| {
        list_exchanges(ticket.query)
    });
    let state = table.state();
    let toasts = use_context::<ToastContext>();
    let pendingDelete = RwSignal::new(Option::<StockExchange>::None);
    let deleting = RwSignal::new(false);

    Effect::new(move |_| table.load());

    let confirmDelete = Callback::new(move |_| {
        let Some(exchange) = pendingDelete.get_untracked() else {
            return;
        };
        deleting.set(true);
        spawn(async move {
            match delete_exchange(exchange.stock_exchange_id).await {
                Ok(()) => {
                    if let Some(toasts) = toasts {
                        toasts.success("Stock exchange deleted successfully");
                    }
                    table.load();
                }
                Err(e) => report(toasts, &failure_of(e)),
            }
            deleting.set(false);
            pendingDelete.set(None);
        });
    });

    let rows = move || {
        state.with(|s| {
            if s.rows().is_empty() {
                let text = if s.is_loading() {
                    "Loading stock exchanges..."
                } else {
                    "No stock exchanges found"
                };
                return placeholder_row(COLUMNS, text).into_any();
            }
            s.rows()
                .iter()
                .cloned()
                .enumerate()
                .map(|(index, exchange)| {
                    let number = s.row_number(index);
                    let href = format!("/dashboard/stock-exchanges/{}", exchange.stock_exchange_id);
                    let live = exchange.live_in_market;
                    let target = exchange.clone();
                    view! {
                        <tr>
                            <td>{number}</td>
                            <td class="cell-strong">{exchange.name.clone()}</td>
                            <td class="cell-muted">{exchange.description.clone()}</td>
                            <td class="cell-center">
                                <span class=if live { "status-dot live" } else { "status-dot" }></span>
                                {format::market_status(live)}
                            </td>
                            <td class="cell-actions">
                                <A href=href attr:class="btn btn-link">"View"</A>
                                <button
                                    class="btn btn-link btn-danger-text"
                                    on:click=move |_| pendingDelete.set(Some(target.clone()))
                                >
                                    "Delete"
                                </button>
                            </td>
                        </tr>
                    }
                })
                .collect_view()
                .into_any()
        })
    };

    view! {
        <section class="card table-card">
            <div class="table-header">
                <h2>"Stock Exchanges"</h2>
                <CreateExchangeModal on_created=Callback::new(move |_| table.load()) />
            </div>
            <table class="data-table">
                <caption>{move || state.with(|s| s.caption())}</caption>
                <thead>
                    <tr>
                        <th>"#"</th>
                        <th>"Name"</th>
                        <th>"Description"</th>
                        <th class="cell-center">"Status"</th>
                        <th class="cell-actions">"Actions"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
            <Pager table />
            <ConfirmDialog
                open=Signal::derive(move || pendingDelete.with(Option::is_some))
                busy=deleting
                title="Delete stock exchange"
                message=Signal::derive(move || {
                    pendingDelete
                        .with(|e| {
                            e.as_ref()
                                .map(|e| format!("Delete {}? This cannot be undone.", e.name))
                                .unwrap_or_default()
                        })
                })
                confirm_label="Delete"
                busy_label="Deleting..."
                on_confirm=confirmDelete
                on_cancel=Callback::new(move |_| {
                    if !deleting.get_untracked() {
                        pendingDelete.set(None);
                    }
                })
            />
        </section>
    }
}
