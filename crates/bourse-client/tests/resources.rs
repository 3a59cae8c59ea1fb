#![allow(non_snake_case)]

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use bourse_client::{auth, exchanges, stocks, BackendClient, ClientError, LoginRedirect, RequestContext};
use bourse_types::{
    CreateStockRequest, FailureKind, LoginRequest, PageQuery, StockExchangeRequest,
    UpdateStockPriceRequest,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};

const SESSION: &str = "jwt=token-1";

#[derive(Clone)]
struct FakeStock {
    id: u64,
    name: String,
    description: String,
    price: f64,
}

#[derive(Clone)]
struct FakeExchange {
    id: u64,
    name: String,
    description: String,
}

#[derive(Default)]
struct Db {
    nextId: u64,
    stocks: Vec<FakeStock>,
    exchanges: Vec<FakeExchange>,
    listings: BTreeSet<(u64, u64)>,
    seenCookies: Vec<String>,
    seenSorts: Vec<Option<String>>,
    forced: Option<(StatusCode, Option<Value>)>,
}

type Shared = Arc<Mutex<Db>>;

#[derive(Deserialize)]
struct PageParams {
    page: u32,
    size: u32,
    #[serde(rename = "sortBy")]
    sort_by: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StockBody {
    name: String,
    description: String,
    current_price: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceBody {
    current_price: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdsBody {
    stock_ids: Vec<u64>,
}

#[derive(Deserialize)]
struct Credentials {
    email: String,
    password: String,
}

fn stock_json(s: &FakeStock) -> Value {
    json!({
        "stockId": s.id,
        "name": s.name,
        "description": s.description,
        "currentPrice": s.price,
        "updatedAt": "2024-05-01T09:30:00"
    })
}

fn exchange_json(e: &FakeExchange) -> Value {
    json!({
        "stockExchangeId": e.id,
        "name": e.name,
        "description": e.description,
        "liveInMarket": false
    })
}

fn wrap(status: StatusCode, data: Value) -> Response {
    (
        status,
        Json(json!({ "status": status.as_u16(), "message": "ok", "data": data, "timestamp": 0 })),
    )
        .into_response()
}

fn paged(items: Vec<Value>, params: &PageParams) -> Response {
    let size = params.size.max(1) as usize;
    let total = items.len();
    let totalPages = total.div_ceil(size);
    let content: Vec<Value> = items
        .into_iter()
        .skip(params.page as usize * size)
        .take(size)
        .collect();
    wrap(
        StatusCode::OK,
        json!({
            "content": content,
            "totalElements": total,
            "totalPages": totalPages,
            "size": params.size,
            "number": params.page,
            "last": params.page as usize + 1 >= totalPages
        }),
    )
}

fn authorize(db: &mut Db, headers: &HeaderMap) -> Result<(), Response> {
    let cookie = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    db.seenCookies.push(cookie.clone());

    if !cookie.split(';').any(|c| c.trim() == SESSION) {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "status": 401, "message": "Full authentication is required" })),
        )
            .into_response());
    }
    if let Some((status, body)) = db.forced.take() {
        return Err(match body {
            Some(body) => (status, Json(body)).into_response(),
            None => status.into_response(),
        });
    }
    Ok(())
}

async fn login(Json(body): Json<Credentials>) -> Response {
    if body.email.is_empty() || body.password != "secret" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "status": 401, "message": "Bad credentials" })),
        )
            .into_response();
    }
    let mut response = wrap(StatusCode::OK, Value::Null);
    response.headers_mut().insert(
        header::SET_COOKIE,
        "jwt=token-1; Path=/; HttpOnly; SameSite=Lax".parse().unwrap(),
    );
    response
}

async fn list_stocks(
    State(db): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<PageParams>,
) -> Response {
    let mut db = db.lock().unwrap();
    if let Err(r) = authorize(&mut db, &headers) {
        return r;
    }
    db.seenSorts.push(params.sort_by.clone());
    let items = db.stocks.iter().map(stock_json).collect();
    paged(items, &params)
}

async fn create_stock(
    State(db): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<StockBody>,
) -> Response {
    let mut db = db.lock().unwrap();
    if let Err(r) = authorize(&mut db, &headers) {
        return r;
    }
    if db.stocks.iter().any(|s| s.name == body.name) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "status": 400,
                "errors": [{ "field": "name", "message": "Stock name already exists" }]
            })),
        )
            .into_response();
    }
    db.nextId += 1;
    let stock = FakeStock {
        id: db.nextId,
        name: body.name,
        description: body.description,
        price: body.current_price,
    };
    db.stocks.push(stock.clone());
    wrap(StatusCode::CREATED, stock_json(&stock))
}

async fn get_stock(State(db): State<Shared>, headers: HeaderMap, Path(id): Path<u64>) -> Response {
    let mut db = db.lock().unwrap();
    if let Err(r) = authorize(&mut db, &headers) {
        return r;
    }
    match db.stocks.iter().find(|s| s.id == id) {
        Some(s) => wrap(StatusCode::OK, stock_json(s)),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "status": 404, "message": format!("Stock not found with id {id}") })),
        )
            .into_response(),
    }
}

async fn delete_stock(
    State(db): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    let mut db = db.lock().unwrap();
    if let Err(r) = authorize(&mut db, &headers) {
        return r;
    }
    let before = db.stocks.len();
    db.stocks.retain(|s| s.id != id);
    if db.stocks.len() == before {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "status": 404, "message": format!("Stock not found with id {id}") })),
        )
            .into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn update_price(
    State(db): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<PriceBody>,
) -> Response {
    let mut db = db.lock().unwrap();
    if let Err(r) = authorize(&mut db, &headers) {
        return r;
    }
    match db.stocks.iter_mut().find(|s| s.id == id) {
        Some(s) => {
            s.price = body.current_price;
            let updated = stock_json(s);
            wrap(StatusCode::OK, updated)
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn exchanges_for_stock(
    State(db): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Query(params): Query<PageParams>,
) -> Response {
    let mut db = db.lock().unwrap();
    if let Err(r) = authorize(&mut db, &headers) {
        return r;
    }
    let items = db
        .exchanges
        .iter()
        .filter(|e| db.listings.contains(&(e.id, id)))
        .map(exchange_json)
        .collect();
    paged(items, &params)
}

async fn list_exchanges(
    State(db): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<PageParams>,
) -> Response {
    let mut db = db.lock().unwrap();
    if let Err(r) = authorize(&mut db, &headers) {
        return r;
    }
    let items = db.exchanges.iter().map(exchange_json).collect();
    paged(items, &params)
}

async fn create_exchange(
    State(db): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<StockExchangeRequest>,
) -> Response {
    let mut db = db.lock().unwrap();
    if let Err(r) = authorize(&mut db, &headers) {
        return r;
    }
    db.nextId += 1;
    let exchange = FakeExchange {
        id: db.nextId,
        name: body.name,
        description: body.description,
    };
    db.exchanges.push(exchange.clone());
    wrap(StatusCode::CREATED, exchange_json(&exchange))
}

async fn stocks_in(
    State(db): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Query(params): Query<PageParams>,
) -> Response {
    let mut db = db.lock().unwrap();
    if let Err(r) = authorize(&mut db, &headers) {
        return r;
    }
    let items = db
        .stocks
        .iter()
        .filter(|s| db.listings.contains(&(id, s.id)))
        .map(stock_json)
        .collect();
    paged(items, &params)
}

async fn stocks_not_in(
    State(db): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Query(params): Query<PageParams>,
) -> Response {
    let mut db = db.lock().unwrap();
    if let Err(r) = authorize(&mut db, &headers) {
        return r;
    }
    let items = db
        .stocks
        .iter()
        .filter(|s| !db.listings.contains(&(id, s.id)))
        .map(stock_json)
        .collect();
    paged(items, &params)
}

async fn add_listing(
    State(db): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<IdsBody>,
) -> Response {
    let mut db = db.lock().unwrap();
    if let Err(r) = authorize(&mut db, &headers) {
        return r;
    }
    for stockId in body.stock_ids {
        db.listings.insert((id, stockId));
    }
    wrap(StatusCode::OK, Value::Null)
}

async fn remove_listing(
    State(db): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<IdsBody>,
) -> Response {
    let mut db = db.lock().unwrap();
    if let Err(r) = authorize(&mut db, &headers) {
        return r;
    }
    for stockId in body.stock_ids {
        db.listings.remove(&(id, stockId));
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn spawn_backend(db: Shared) -> BackendClient {
    let app = Router::new()
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/stock", get(list_stocks).post(create_stock))
        .route("/api/v1/stock/:id", get(get_stock).delete(delete_stock))
        .route("/api/v1/stock/:id/price", put(update_price))
        .route("/api/v1/stock/:id/exchanges", get(exchanges_for_stock))
        .route("/api/v1/stockExchange", get(list_exchanges).post(create_exchange))
        .route(
            "/api/v1/stockExchange/:id/stocks",
            get(stocks_in).post(add_listing).delete(remove_listing),
        )
        .route("/api/v1/stockExchange/:id/stocks/not-listed", get(stocks_not_in))
        .with_state(db);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service()).await.unwrap();
    });
    BackendClient::new(&format!("http://{addr}")).unwrap()
}

fn seeded(stockCount: u64) -> Shared {
    let mut db = Db::default();
    for i in 1..=stockCount {
        db.stocks.push(FakeStock {
            id: i,
            name: format!("Stock {i}"),
            description: format!("Description {i}"),
            price: 10.0 * i as f64,
        });
    }
    db.nextId = stockCount;
    Arc::new(Mutex::new(db))
}

#[derive(Default)]
struct RecordingRedirect(Mutex<Vec<String>>);

impl LoginRedirect for RecordingRedirect {
    fn redirect(&self, path: &str) {
        self.0.lock().unwrap().push(path.to_string());
    }
}

fn session() -> RequestContext {
    RequestContext::server(Some(format!("{SESSION}; theme=dark")))
}

#[tokio::test]
async fn list_unwraps_envelope_and_forwards_all_cookies() {
    let db = seeded(7);
    let client = spawn_backend(db.clone()).await;

    let query = PageQuery {
        sort_by: Some("name".into()),
        ..PageQuery::new(1, 5)
    };
    let page = stocks::list(&client, &session(), &query).await.unwrap();

    assert_eq!(page.content.len(), 2);
    assert_eq!(page.total_elements, 7);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.number, 1);
    assert_eq!(page.content[0].stock_id, "6");

    let db = db.lock().unwrap();
    assert_eq!(db.seenCookies, vec![format!("{SESSION}; theme=dark")]);
    assert_eq!(db.seenSorts, vec![Some("name".to_string())]);
}

#[tokio::test]
async fn pages_add_up_to_total_elements() {
    let client = spawn_backend(seeded(23)).await;

    for size in [5u32, 10, 20, 50] {
        let first = stocks::list(&client, &session(), &PageQuery::new(0, size))
            .await
            .unwrap();
        let mut seen = 0u64;
        for p in 0..first.total_pages {
            let page = stocks::list(&client, &session(), &PageQuery::new(p, size))
                .await
                .unwrap();
            assert!(page.content.len() as u32 <= size);
            seen += page.content.len() as u64;
        }
        assert_eq!(seen, first.total_elements);
    }
}

#[tokio::test]
async fn unauthorized_browser_call_redirects_to_login() {
    let client = spawn_backend(seeded(1)).await;
    let redirect = Arc::new(RecordingRedirect::default());
    let ctx = RequestContext::browser(Some("jwt=expired".into()), redirect.clone());

    let result = stocks::list(&client, &ctx, &PageQuery::new(0, 5)).await;

    assert!(matches!(result, Err(ClientError::Unauthorized)));
    assert_eq!(*redirect.0.lock().unwrap(), vec!["/login".to_string()]);
}

#[tokio::test]
async fn unauthorized_server_call_fails_without_navigating() {
    let client = spawn_backend(seeded(1)).await;

    let result = stocks::get(&client, &RequestContext::server(None), "1").await;

    let err = result.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
    let failure: bourse_types::ApiFailure = err.into();
    assert_eq!(failure.kind, FailureKind::Unauthorized);
}

#[tokio::test]
async fn backend_field_errors_are_keyed_by_field() {
    let client = spawn_backend(seeded(1)).await;
    let request = CreateStockRequest {
        name: "Stock 1".into(),
        description: "Duplicate".into(),
        current_price: Decimal::new(5, 0),
    };

    let err = stocks::create(&client, &session(), &request).await.unwrap_err();

    match err {
        ClientError::Api { status, failure } => {
            assert_eq!(status, 400);
            assert_eq!(failure.kind, FailureKind::Validation);
            assert_eq!(failure.message, "Validation failed");
            assert_eq!(failure.field_errors["name"], "Stock name already exists");
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[tokio::test]
async fn generic_failures_use_backend_message_or_fallback() {
    let db = seeded(1);
    let client = spawn_backend(db.clone()).await;

    db.lock().unwrap().forced = Some((StatusCode::INTERNAL_SERVER_ERROR, None));
    let failure: bourse_types::ApiFailure = stocks::list(&client, &session(), &PageQuery::new(0, 5))
        .await
        .unwrap_err()
        .into();
    assert_eq!(failure, bourse_types::ApiFailure::general("Failed to fetch stocks"));

    db.lock().unwrap().forced = Some((
        StatusCode::CONFLICT,
        Some(json!({ "status": 409, "message": "Record was updated by another user. Please refresh the page." })),
    ));
    let failure: bourse_types::ApiFailure = stocks::update_price(
        &client,
        &session(),
        "1",
        &UpdateStockPriceRequest {
            current_price: Decimal::new(1, 0),
        },
    )
    .await
    .unwrap_err()
    .into();
    assert_eq!(failure.kind, FailureKind::General);
    assert!(failure.message.starts_with("Record was updated"));
}

#[tokio::test]
async fn deleting_a_missing_stock_is_not_found() {
    let client = spawn_backend(seeded(2)).await;

    stocks::delete(&client, &session(), "2").await.unwrap();
    let failure: bourse_types::ApiFailure = stocks::delete(&client, &session(), "2")
        .await
        .unwrap_err()
        .into();

    assert_eq!(failure.kind, FailureKind::NotFound);
    assert_eq!(failure.message, "Stock not found with id 2");
}

#[tokio::test]
async fn login_relays_session_cookie_and_rejects_bad_password() {
    let client = spawn_backend(seeded(0)).await;

    let outcome = auth::login(
        &client,
        &LoginRequest {
            email: "ada@example.com".into(),
            password: "secret".into(),
        },
    )
    .await
    .unwrap();
    assert_eq!(outcome.set_cookies.len(), 1);
    assert!(outcome.set_cookies[0].starts_with("jwt=token-1"));

    let err = auth::login(
        &client,
        &LoginRequest {
            email: "ada@example.com".into(),
            password: "wrong".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(
        !matches!(err, ClientError::Unauthorized),
        "bad credentials are not a lost session"
    );
    let failure: bourse_types::ApiFailure = err.into();
    assert_eq!(failure.message, "Login failed");
}

#[tokio::test]
async fn exchange_membership_scenario() {
    let client = spawn_backend(seeded(5)).await;
    let ctx = session();

    let created = exchanges::create(
        &client,
        &ctx,
        &StockExchangeRequest {
            name: "NASDAQ".into(),
            description: "Electronic exchange".into(),
        },
    )
    .await
    .unwrap();
    assert!(!created.live_in_market);

    let listed = exchanges::list(&client, &ctx, &PageQuery::new(0, 10)).await.unwrap();
    assert_eq!(listed.total_elements, 1);
    assert_eq!(listed.content[0].name, "NASDAQ");

    let id = created.stock_exchange_id.clone();
    let notInBefore = exchanges::stocks_not_in(&client, &ctx, &id, &PageQuery::new(0, 10))
        .await
        .unwrap();
    assert_eq!(notInBefore.total_elements, 5);

    exchanges::add_stocks(&client, &ctx, &id, vec!["1".into(), "2".into()])
        .await
        .unwrap();

    let inAfter = exchanges::stocks_in(&client, &ctx, &id, &PageQuery::new(0, 10))
        .await
        .unwrap();
    let notInAfter = exchanges::stocks_not_in(&client, &ctx, &id, &PageQuery::new(0, 10))
        .await
        .unwrap();
    assert_eq!(inAfter.content.len(), 2);
    assert_eq!(notInAfter.total_elements, notInBefore.total_elements - 2);

    let listedOn = stocks::exchanges_for(&client, &ctx, "1", &PageQuery::new(0, 10))
        .await
        .unwrap();
    assert_eq!(listedOn.content[0].stock_exchange_id, id);

    exchanges::remove_stocks(&client, &ctx, &id, vec!["2".into()])
        .await
        .unwrap();
    let inFinal = exchanges::stocks_in(&client, &ctx, &id, &PageQuery::new(0, 10))
        .await
        .unwrap();
    assert_eq!(inFinal.total_elements, 1);
}
