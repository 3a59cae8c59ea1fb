use bourse_types::{ApiFailure, Page, PageQuery, Stock, StockExchange, StockExchangeRequest};
use leptos::prelude::*;
use leptos::server_fn::codec::Json;

#[server]
pub async fn list_exchanges(
    query: PageQuery,
) -> Result<Page<StockExchange>, ServerFnError<ApiFailure>> {
    use crate::api::backend::{browser_context, client, wrap};

    let ctx = browser_context().await?;
    bourse_client::exchanges::list(&client()?, &ctx, &query)
        .await
        .map_err(wrap)
}

/// Loads the exchange behind a detail page.
#[server]
pub async fn load_exchange(
    exchange_id: String,
) -> Result<StockExchange, ServerFnError<ApiFailure>> {
    use crate::api::backend::{client, server_context, wrap};

    let ctx = server_context().await?;
    bourse_client::exchanges::get(&client()?, &ctx, &exchange_id)
        .await
        .map_err(wrap)
}

#[server(input = Json)]
pub async fn create_exchange(
    request: StockExchangeRequest,
) -> Result<StockExchange, ServerFnError<ApiFailure>> {
    use crate::api::backend::{browser_context, client, wrap};

    let ctx = browser_context().await?;
    bourse_client::exchanges::create(&client()?, &ctx, &request)
        .await
        .map_err(wrap)
}

#[server(input = Json)]
pub async fn update_exchange(
    exchange_id: String,
    request: StockExchangeRequest,
) -> Result<StockExchange, ServerFnError<ApiFailure>> {
    use crate::api::backend::{browser_context, client, wrap};

    let ctx = browser_context().await?;
    bourse_client::exchanges::update(&client()?, &ctx, &exchange_id, &request)
        .await
        .map_err(wrap)
}

#[server]
pub async fn delete_exchange(exchange_id: String) -> Result<(), ServerFnError<ApiFailure>> {
    use crate::api::backend::{browser_context, client, wrap};

    let ctx = browser_context().await?;
    bourse_client::exchanges::delete(&client()?, &ctx, &exchange_id)
        .await
        .map_err(wrap)
}

#[server]
pub async fn stocks_in_exchange(
    exchange_id: String,
    query: PageQuery,
) -> Result<Page<Stock>, ServerFnError<ApiFailure>> {
    use crate::api::backend::{browser_context, client, wrap};

    let ctx = browser_context().await?;
    bourse_client::exchanges::stocks_in(&client()?, &ctx, &exchange_id, &query)
        .await
        .map_err(wrap)
}

#[server]
pub async fn stocks_not_in_exchange(
    exchange_id: String,
    query: PageQuery,
) -> Result<Page<Stock>, ServerFnError<ApiFailure>> {
    use crate::api::backend::{browser_context, client, wrap};

    let ctx = browser_context().await?;
    bourse_client::exchanges::stocks_not_in(&client()?, &ctx, &exchange_id, &query)
        .await
        .map_err(wrap)
}

#[server(input = Json)]
pub async fn add_stocks_to_exchange(
    exchange_id: String,
    stock_ids: Vec<String>,
) -> Result<(), ServerFnError<ApiFailure>> {
    use crate::api::backend::{browser_context, client, wrap};

    let ctx = browser_context().await?;
    bourse_client::exchanges::add_stocks(&client()?, &ctx, &exchange_id, stock_ids)
        .await
        .map_err(wrap)
}

#[server(input = Json)]
pub async fn remove_stocks_from_exchange(
    exchange_id: String,
    stock_ids: Vec<String>,
) -> Result<(), ServerFnError<ApiFailure>> {
    use crate::api::backend::{browser_context, client, wrap};

    let ctx = browser_context().await?;
    bourse_client::exchanges::remove_stocks(&client()?, &ctx, &exchange_id, stock_ids)
        .await
        .map_err(wrap)
}
