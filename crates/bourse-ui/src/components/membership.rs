use bourse_types::{LoadTicket, Stock, StockExchange, TableState};
use leptos::prelude::*;
use leptos_router::components::A;

use crate::api::exchanges::{
    add_stocks_to_exchange, remove_stocks_from_exchange, stocks_in_exchange,
    stocks_not_in_exchange,
};
use crate::api::failure_of;
use crate::api::stocks::exchanges_for_stock;
use crate::components::confirm::ConfirmDialog;
use crate::components::table::{placeholder_row, PagedTable, Pager};
use crate::components::toast::ToastContext;
use crate::format;
use crate::session::{report, spawn};

const PAGE_SIZE: u32 = 10;

/// Which side of an exchange's listing a table shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Membership {
    Listed,
    Unlisted,
}

impl Membership {
    fn title(self) -> &'static str {
        match self {
            Membership::Listed => "Listed Stocks",
            Membership::Unlisted => "Available Stocks",
        }
    }

    fn action_label(self, count: usize) -> String {
        match self {
            Membership::Listed => format!("Remove {count} selected stocks"),
            Membership::Unlisted => format!("Add {count} selected stocks"),
        }
    }

    fn busy_label(self) -> &'static str {
        match self {
            Membership::Listed => "Removing...",
            Membership::Unlisted => "Adding...",
        }
    }

    fn confirm_title(self) -> &'static str {
        match self {
            Membership::Listed => "Remove stocks from exchange",
            Membership::Unlisted => "Add stocks to exchange",
        }
    }

    fn confirm_message(self, count: usize) -> String {
        match self {
            Membership::Listed => {
                format!("Remove {count} selected stocks from this exchange?")
            }
            Membership::Unlisted => format!("Add {count} selected stocks to this exchange?"),
        }
    }

    fn done_message(self) -> &'static str {
        match self {
            Membership::Listed => "Successfully removed stocks from exchange",
            Membership::Unlisted => "Successfully added stocks to exchange",
        }
    }

    fn empty_text(self) -> &'static str {
        match self {
            Membership::Listed => "No stocks listed on this exchange",
            Membership::Unlisted => "No stocks left to add",
        }
    }
}

fn stock_id(stock: &Stock) -> String {
    stock.stock_id.clone()
}

/// Stocks on (or off) one exchange, with checkbox selection and a bulk
/// action. Bumping `revision` reloads every table watching it, so adding on
/// one side refreshes the other.
#[component]
pub fn MembershipTable(
    membership: Membership,
    #[prop(into)] exchange_id: Signal<String>,
    revision: RwSignal<u64>,
) -> impl IntoView {
    let table = PagedTable::new(
        TableState::scoped(PAGE_SIZE, exchange_id.get_untracked()),
        move |ticket: LoadTicket| async move {
            let exchangeId = ticket.scope.unwrap_or_default();
            match membership {
                Membership::Listed => stocks_in_exchange(exchangeId, ticket.query).await,
                Membership::Unlisted => stocks_not_in_exchange(exchangeId, ticket.query).await,
            }
        },
    );
    let state = table.state();
    let toasts = use_context::<ToastContext>();
    let confirming = RwSignal::new(false);
    let working = RwSignal::new(false);
    let selectedCount = move || state.with(|s| s.selection().len());

    Effect::new(move |_| {
        revision.track();
        table.rescope(exchange_id.get());
    });

    let confirmAction = Callback::new(move |_| {
        let stockIds = table.selected_ids();
        if stockIds.is_empty() {
            confirming.set(false);
            return;
        }
        let exchangeId = exchange_id.get_untracked();
        working.set(true);
        spawn(async move {
            let result = match membership {
                Membership::Listed => remove_stocks_from_exchange(exchangeId, stockIds).await,
                Membership::Unlisted => add_stocks_to_exchange(exchangeId, stockIds).await,
            };
            match result {
                Ok(()) => {
                    if let Some(toasts) = toasts {
                        toasts.success(membership.done_message());
                    }
                    state.update(|s| s.clear_selection());
                    revision.update(|r| *r += 1);
                }
                Err(e) => report(toasts, &failure_of(e)),
            }
            working.set(false);
            confirming.set(false);
        });
    });

    let rows = move || {
        state.with(|s| {
            if s.rows().is_empty() {
                let text = if s.is_loading() { "Loading stocks..." } else { membership.empty_text() };
                return placeholder_row(6, text).into_any();
            }
            s.rows()
                .iter()
                .cloned()
                .map(|stock| {
                    let id = stock.stock_id.clone();
                    let checkedId = id.clone();
                    let href = format!("/dashboard/stocks/{id}");
                    view! {
                        <tr>
                            <td>
                                <input
                                    type="checkbox"
                                    aria-label="Select row"
                                    prop:checked=move || {
                                        state.with(|s| s.selection().contains(&checkedId))
                                    }
                                    on:change=move |ev| {
                                        table.toggle_row(id.clone(), event_target_checked(&ev))
                                    }
                                />
                            </td>
                            <td>{stock.stock_id.clone()}</td>
                            <td class="cell-strong">{stock.name.clone()}</td>
                            <td class="cell-muted">{stock.description.clone()}</td>
                            <td class="cell-number">{format::price(stock.current_price)}</td>
                            <td class="cell-actions">
                                <A href=href attr:class="btn btn-link">"View"</A>
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
                <h3>{membership.title()}</h3>
                <button
                    class=match membership {
                        Membership::Listed => "btn btn-danger",
                        Membership::Unlisted => "btn btn-primary",
                    }
                    disabled=move || selectedCount() == 0 || working.get()
                    on:click=move |_| {
                        if selectedCount() > 0 {
                            confirming.set(true);
                        }
                    }
                >
                    {move || {
                        if working.get() {
                            membership.busy_label().to_string()
                        } else {
                            membership.action_label(selectedCount())
                        }
                    }}
                </button>
            </div>
            <table class="data-table">
                <caption>{move || state.with(|s| s.caption())}</caption>
                <thead>
                    <tr>
                        <th class="cell-check">
                            <input
                                type="checkbox"
                                aria-label="Select all"
                                prop:checked=move || state.with(|s| s.all_selected(stock_id))
                                on:change=move |ev| {
                                    let checked = event_target_checked(&ev);
                                    state.update(|s| s.toggle_all(checked, stock_id));
                                }
                            />
                        </th>
                        <th>"Stock ID"</th>
                        <th>"Name"</th>
                        <th>"Description"</th>
                        <th class="cell-number">"Price"</th>
                        <th class="cell-actions">"Actions"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
            <Pager table />
            <ConfirmDialog
                open=confirming
                busy=working
                title=membership.confirm_title()
                message=Signal::derive(move || membership.confirm_message(selectedCount()))
                confirm_label="Confirm"
                busy_label=membership.busy_label()
                on_confirm=confirmAction
                on_cancel=Callback::new(move |_| {
                    if !working.get_untracked() {
                        confirming.set(false);
                    }
                })
            />
        </section>
    }
}

/// Exchanges a stock is listed on.
#[component]
pub fn ExchangesForStockTable(#[prop(into)] stock_id: Signal<String>) -> impl IntoView {
    let table = PagedTable::new(
        TableState::scoped(PAGE_SIZE, stock_id.get_untracked()).sorted_by("name"),
        |ticket: LoadTicket| {
            exchanges_for_stock(ticket.scope.unwrap_or_default(), ticket.query)
        },
    );
    let state = table.state();

    Effect::new(move |_| table.rescope(stock_id.get()));

    let rows = move || {
        state.with(|s| {
            if s.rows().is_empty() {
                let text = if s.is_loading() {
                    "Loading stock exchanges..."
                } else {
                    "This stock is not listed on any exchange"
                };
                return placeholder_row(5, text).into_any();
            }
            s.rows()
                .iter()
                .enumerate()
                .map(|(index, exchange): (usize, &StockExchange)| {
                    let href = format!("/dashboard/stock-exchanges/{}", exchange.stock_exchange_id);
                    let live = exchange.live_in_market;
                    view! {
                        <tr>
                            <td>{s.row_number(index)}</td>
                            <td class="cell-strong">{exchange.name.clone()}</td>
                            <td class="cell-muted">{exchange.description.clone()}</td>
                            <td class="cell-center">
                                <span class=if live { "status-dot live" } else { "status-dot" }></span>
                                {format::market_status(live)}
                            </td>
                            <td class="cell-actions">
                                <A href=href attr:class="btn btn-link">"View"</A>
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
                <h3>"Listed On"</h3>
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
        </section>
    }
}
