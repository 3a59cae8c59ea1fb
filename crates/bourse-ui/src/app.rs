use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{
    components::{Redirect, Route, Router, Routes},
    ParamSegment, StaticSegment,
};

use crate::components::header::Header;
use crate::components::toast::ToastProvider;
use crate::pages::dashboard::DashboardPage;
use crate::pages::exchange_detail::ExchangeDetailPage;
use crate::pages::login::LoginPage;
use crate::pages::register::RegisterPage;
use crate::pages::stock_detail::StockDetailPage;
use crate::session::HOME_PATH;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <link rel="icon" href="/favicon.svg" type="image/svg+xml" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/bourse-console.css" />
        <Title text="Stock Exchange" />
        <ToastProvider>
            <Router>
                <Routes fallback=|| view! { <p class="not-found">"Page not found."</p> }.into_any()>
                    <Route path=StaticSegment("") view=|| view! { <Redirect path=HOME_PATH /> } />
                    <Route path=StaticSegment("login") view=LoginPage />
                    <Route path=StaticSegment("register") view=RegisterPage />
                    <Route path=StaticSegment("dashboard") view=DashboardView />
                    <Route
                        path=(StaticSegment("dashboard"), StaticSegment("stocks"), ParamSegment("id"))
                        view=StockDetailView
                    />
                    <Route
                        path=(
                            StaticSegment("dashboard"),
                            StaticSegment("stock-exchanges"),
                            ParamSegment("id"),
                        )
                        view=ExchangeDetailView
                    />
                </Routes>
            </Router>
        </ToastProvider>
    }
}

#[component]
fn DashboardView() -> impl IntoView {
    view! {
        <div class="app-layout">
            <Header />
            <main class="main-content">
                <DashboardPage />
            </main>
        </div>
    }
}

#[component]
fn StockDetailView() -> impl IntoView {
    view! {
        <div class="app-layout">
            <Header />
            <main class="main-content">
                <StockDetailPage />
            </main>
        </div>
    }
}

#[component]
fn ExchangeDetailView() -> impl IntoView {
    view! {
        <div class="app-layout">
            <Header />
            <main class="main-content">
                <ExchangeDetailPage />
            </main>
        </div>
    }
}
