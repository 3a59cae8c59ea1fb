use leptos::prelude::*;

use crate::components::exchange_table::ExchangeTable;
use crate::components::stock_table::StockTable;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
    Stocks,
    Exchanges,
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let tab = RwSignal::new(Tab::Stocks);

    let tabButton = move |target: Tab, label: &'static str| {
        view! {
            <button
                class=move || if tab.get() == target { "tab active" } else { "tab" }
                on:click=move |_| tab.set(target)
            >
                {label}
            </button>
        }
    };

    view! {
        <div class="dashboard-header">
            <h1>"Dashboard"</h1>
            <p class="subtitle">"Manage stocks and the exchanges they are listed on"</p>
        </div>
        <div class="tabs">
            {tabButton(Tab::Stocks, "Stocks")}
            {tabButton(Tab::Exchanges, "Stock Exchanges")}
        </div>
        {move || match tab.get() {
            Tab::Stocks => view! { <StockTable /> }.into_any(),
            Tab::Exchanges => view! { <ExchangeTable /> }.into_any(),
        }}
    }
}
