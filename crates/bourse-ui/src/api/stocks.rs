use bourse_types::{
    ApiFailure, CreateStockRequest, Page, PageQuery, Stock, StockExchange, UpdateStockPriceRequest,
};
use leptos::prelude::*;
use leptos::server_fn::codec::Json;

#[server]
pub async fn list_stocks(query: PageQuery) -> Result<Page<Stock>, ServerFnError<ApiFailure>> {
    use crate::api::backend::{browser_context, client, wrap};

    let ctx = browser_context().await?;
    bourse_client::stocks::list(&client()?, &ctx, &query)
        .await
        .map_err(wrap)
}

/// Loads the stock behind a detail page.
#[server]
pub async fn load_stock(stock_id: String) -> Result<Stock, ServerFnError<ApiFailure>> {
    use crate::api::backend::{client, server_context, wrap};

    let ctx = server_context().await?;
    bourse_client::stocks::get(&client()?, &ctx, &stock_id)
        .await
        .map_err(wrap)
}

#[server(input = Json)]
pub async fn create_stock(
    request: CreateStockRequest,
) -> Result<Stock, ServerFnError<ApiFailure>> {
    use crate::api::backend::{browser_context, client, wrap};

    let ctx = browser_context().await?;
    bourse_client::stocks::create(&client()?, &ctx, &request)
        .await
        .map_err(wrap)
}

#[server(input = Json)]
pub async fn update_stock_price(
    stock_id: String,
    request: UpdateStockPriceRequest,
) -> Result<Stock, ServerFnError<ApiFailure>> {
    use crate::api::backend::{browser_context, client, wrap};

    let ctx = browser_context().await?;
    bourse_client::stocks::update_price(&client()?, &ctx, &stock_id, &request)
        .await
        .map_err(wrap)
}

#[server]
pub async fn delete_stock(stock_id: String) -> Result<(), ServerFnError<ApiFailure>> {
    use crate::api::backend::{browser_context, client, wrap};

    let ctx = browser_context().await?;
    bourse_client::stocks::delete(&client()?, &ctx, &stock_id)
        .await
        .map_err(wrap)
}

#[server]
pub async fn exchanges_for_stock(
    stock_id: String,
    query: PageQuery,
) -> Result<Page<StockExchange>, ServerFnError<ApiFailure>> {
    use crate::api::backend::{browser_context, client, wrap};

    let ctx = browser_context().await?;
    bourse_client::stocks::exchanges_for(&client()?, &ctx, &stock_id, &query)
        .await
        .map_err(wrap)
}
