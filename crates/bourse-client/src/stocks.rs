use bourse_types::{
    CreateStockRequest, Page, PageQuery, Stock, StockExchange, UpdateStockPriceRequest,
};
use reqwest::Method;

use crate::client::{read_data, read_empty, BackendClient, RequestContext};
use crate::error::ClientError;

pub async fn list(
    client: &BackendClient,
    ctx: &RequestContext,
    query: &PageQuery,
) -> Result<Page<Stock>, ClientError> {
    let response = client
        .send::<()>(ctx, Method::GET, &["stock"], Some(query), None)
        .await?;
    read_data(response, "Failed to fetch stocks").await
}

pub async fn get(
    client: &BackendClient,
    ctx: &RequestContext,
    stockId: &str,
) -> Result<Stock, ClientError> {
    let response = client
        .send::<()>(ctx, Method::GET, &["stock", stockId], None, None)
        .await?;
    read_data(response, "Failed to fetch stock details").await
}

pub async fn create(
    client: &BackendClient,
    ctx: &RequestContext,
    request: &CreateStockRequest,
) -> Result<Stock, ClientError> {
    let response = client
        .send(ctx, Method::POST, &["stock"], None, Some(request))
        .await?;
    read_data(response, "Failed to create stock").await
}

pub async fn update_price(
    client: &BackendClient,
    ctx: &RequestContext,
    stockId: &str,
    request: &UpdateStockPriceRequest,
) -> Result<Stock, ClientError> {
    let response = client
        .send(ctx, Method::PUT, &["stock", stockId, "price"], None, Some(request))
        .await?;
    read_data(response, "Failed to update stock price").await
}

pub async fn delete(
    client: &BackendClient,
    ctx: &RequestContext,
    stockId: &str,
) -> Result<(), ClientError> {
    let response = client
        .send::<()>(ctx, Method::DELETE, &["stock", stockId], None, None)
        .await?;
    read_empty(response, "Failed to delete stock").await
}

/// Exchanges the stock is listed on.
pub async fn exchanges_for(
    client: &BackendClient,
    ctx: &RequestContext,
    stockId: &str,
    query: &PageQuery,
) -> Result<Page<StockExchange>, ClientError> {
    let response = client
        .send::<()>(ctx, Method::GET, &["stock", stockId, "exchanges"], Some(query), None)
        .await?;
    read_data(response, "Failed to fetch stock exchanges for this stock").await
}
