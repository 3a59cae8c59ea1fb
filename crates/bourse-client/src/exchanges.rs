use bourse_types::{Page, PageQuery, Stock, StockExchange, StockExchangeRequest, StockIdsRequest};
use reqwest::Method;
use tracing::info;

use crate::client::{read_data, read_empty, BackendClient, RequestContext};
use crate::error::ClientError;

const RESOURCE: &str = "stockExchange";

pub async fn list(
    client: &BackendClient,
    ctx: &RequestContext,
    query: &PageQuery,
) -> Result<Page<StockExchange>, ClientError> {
    let response = client
        .send::<()>(ctx, Method::GET, &[RESOURCE], Some(query), None)
        .await?;
    read_data(response, "Failed to fetch stock exchanges").await
}

pub async fn get(
    client: &BackendClient,
    ctx: &RequestContext,
    exchangeId: &str,
) -> Result<StockExchange, ClientError> {
    let response = client
        .send::<()>(ctx, Method::GET, &[RESOURCE, exchangeId], None, None)
        .await?;
    read_data(response, "Failed to fetch stock exchange").await
}

pub async fn create(
    client: &BackendClient,
    ctx: &RequestContext,
    request: &StockExchangeRequest,
) -> Result<StockExchange, ClientError> {
    let response = client
        .send(ctx, Method::POST, &[RESOURCE], None, Some(request))
        .await?;
    read_data(response, "Failed to create stock exchange").await
}

pub async fn update(
    client: &BackendClient,
    ctx: &RequestContext,
    exchangeId: &str,
    request: &StockExchangeRequest,
) -> Result<StockExchange, ClientError> {
    let response = client
        .send(ctx, Method::PUT, &[RESOURCE, exchangeId], None, Some(request))
        .await?;
    read_data(response, "Failed to update stock exchange").await
}

pub async fn delete(
    client: &BackendClient,
    ctx: &RequestContext,
    exchangeId: &str,
) -> Result<(), ClientError> {
    let response = client
        .send::<()>(ctx, Method::DELETE, &[RESOURCE, exchangeId], None, None)
        .await?;
    read_empty(response, "Failed to delete stock exchange").await
}

/// Stocks listed on the exchange.
pub async fn stocks_in(
    client: &BackendClient,
    ctx: &RequestContext,
    exchangeId: &str,
    query: &PageQuery,
) -> Result<Page<Stock>, ClientError> {
    let response = client
        .send::<()>(ctx, Method::GET, &[RESOURCE, exchangeId, "stocks"], Some(query), None)
        .await?;
    read_data(response, "Failed to fetch stocks in exchange").await
}

/// Stocks that could still be added to the exchange.
pub async fn stocks_not_in(
    client: &BackendClient,
    ctx: &RequestContext,
    exchangeId: &str,
    query: &PageQuery,
) -> Result<Page<Stock>, ClientError> {
    let response = client
        .send::<()>(
            ctx,
            Method::GET,
            &[RESOURCE, exchangeId, "stocks", "not-listed"],
            Some(query),
            None,
        )
        .await?;
    read_data(response, "Failed to fetch stocks not in exchange").await
}

pub async fn add_stocks(
    client: &BackendClient,
    ctx: &RequestContext,
    exchangeId: &str,
    stockIds: Vec<String>,
) -> Result<(), ClientError> {
    let count = stockIds.len();
    let body = StockIdsRequest { stock_ids: stockIds };
    let response = client
        .send(ctx, Method::POST, &[RESOURCE, exchangeId, "stocks"], None, Some(&body))
        .await?;
    read_empty(response, "Failed to add stocks to exchange").await?;
    info!("listed {count} stocks on exchange {exchangeId}");
    Ok(())
}

pub async fn remove_stocks(
    client: &BackendClient,
    ctx: &RequestContext,
    exchangeId: &str,
    stockIds: Vec<String>,
) -> Result<(), ClientError> {
    let count = stockIds.len();
    let body = StockIdsRequest { stock_ids: stockIds };
    let response = client
        .send(ctx, Method::DELETE, &[RESOURCE, exchangeId, "stocks"], None, Some(&body))
        .await?;
    read_empty(response, "Failed to remove stocks from exchange").await?;
    info!("delisted {count} stocks from exchange {exchangeId}");
    Ok(())
}
