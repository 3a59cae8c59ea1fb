use bourse_types::{LoadTicket, Stock, TableState};
use leptos::prelude::*;
use leptos_router::components::A;

use crate::api::failure_of;
use crate::api::stocks::{delete_stock, list_stocks};
use crate::components::confirm::ConfirmDialog;
use crate::components::stock_forms::CreateStockModal;
use crate::components::table::{placeholder_row, PagedTable, Pager};
use crate::components::toast::ToastContext;
use crate::format;
use crate::session::{report, spawn};

const PAGE_SIZE: u32 = 20;
const COLUMNS: u32 = 6;

#[component]
pub fn StockTable() -> impl IntoView {
    let table = PagedTable::new(TableState::new(PAGE_SIZE), |ticket: LoadTicket| {
        list_stocks(ticket.query)
    });
    let state = table.state();
    let toasts = use_context::<ToastContext>();
    let pendingDelete = RwSignal::new(Option::<Stock>::None);
    let deleting = RwSignal::new(false);

    Effect::new(move |_| table.load());

    let confirmDelete = Callback::new(move |_| {
        let Some(stock) = pendingDelete.get_untracked() else {
            return;
        };
        deleting.set(true);
        spawn(async move {
            match delete_stock(stock.stock_id).await {
                Ok(()) => {
                    if let Some(toasts) = toasts {
                        toasts.success("Stock deleted successfully");
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
                let text = if s.is_loading() { "Loading stocks..." } else { "No stocks found" };
                return placeholder_row(COLUMNS, text).into_any();
            }
            s.rows()
                .iter()
                .cloned()
                .map(|stock| {
                    let href = format!("/dashboard/stocks/{}", stock.stock_id);
                    let target = stock.clone();
                    view! {
                        <tr>
                            <td>{stock.stock_id.clone()}</td>
                            <td class="cell-strong">{stock.name.clone()}</td>
                            <td class="cell-muted">{stock.description.clone()}</td>
                            <td class="cell-number">{format::price(stock.current_price)}</td>
                            <td>
                                <span>{format::date(stock.updated_at)}</span>
                                <span class="cell-muted">" " {format::time(stock.updated_at)}</span>
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
                <h2>"Stocks"</h2>
                <CreateStockModal on_created=Callback::new(move |_| table.load()) />
            </div>
            <table class="data-table">
                <caption>{move || state.with(|s| s.caption())}</caption>
                <thead>
                    <tr>
                        <th>"Stock ID"</th>
                        <th>"Name"</th>
                        <th>"Description"</th>
                        <th class="cell-number">"Price"</th>
                        <th>"Last Updated"</th>
                        <th class="cell-actions">"Actions"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
            <Pager table />
            <ConfirmDialog
                open=Signal::derive(move || pendingDelete.with(Option::is_some))
                busy=deleting
                title="Delete stock"
                message=Signal::derive(move || {
                    pendingDelete
                        .with(|s| {
                            s.as_ref()
                                .map(|s| format!("Delete {}? This cannot be undone.", s.name))
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
