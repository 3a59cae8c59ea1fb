use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use bourse_types::ApiFailure;
use leptos::server_fn::error::{ServerFnError, ServerFnErrorSerde};
use tracing::debug;

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const HOME_PATH: &str = "/dashboard";

#[derive(Clone, Debug)]
pub struct GuardState {
    pub cookie_name: String,
}

fn is_asset(path: &str) -> bool {
    path.starts_with("/pkg/") || path.starts_with("/assets/") || path.starts_with("/favicon.")
}

fn is_auth_page(path: &str) -> bool {
    path == LOGIN_PATH || path == REGISTER_PATH
}

/// The 401 body is encoded the way server functions encode their own errors,
/// so a hydrated caller reads it back as an unauthorized `ApiFailure`.
fn unauthorized_api() -> Response {
    let failure = ServerFnError::<ApiFailure>::WrappedServerError(ApiFailure::unauthorized());
    let body = failure
        .ser()
        .unwrap_or_else(|_| ApiFailure::unauthorized().to_string());
    let mut response = (StatusCode::UNAUTHORIZED, body).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}

fn login_redirect(from: &str) -> Response {
    let mut target = String::from(LOGIN_PATH);
    if from != "/" {
        target.push_str("?from=");
        target.push_str(&urlencoding::encode(from));
    }
    Redirect::to(&target).into_response()
}

/// Intercepts every request before it reaches a page or a server function.
///
/// Without a session cookie, pages redirect to the login screen remembering
/// where the user was going, and API calls get a 401. With one, the login
/// screen forwards to the dashboard. Whether the cookie is still valid is for
/// the backend to decide.
pub async fn route_guard(
    State(state): State<GuardState>,
    jar: CookieJar,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    if is_asset(&path) || path.starts_with("/api/auth/") {
        return next.run(request).await;
    }

    let hasSession = jar
        .get(&state.cookie_name)
        .is_some_and(|c| !c.value().is_empty());

    if hasSession {
        if path == LOGIN_PATH {
            debug!("session present, {path} -> {HOME_PATH}");
            return Redirect::to(HOME_PATH).into_response();
        }
        return next.run(request).await;
    }

    if is_auth_page(&path) {
        return next.run(request).await;
    }
    if path.starts_with("/api/") {
        debug!("no session for {path}");
        return unauthorized_api();
    }

    debug!("no session, {path} -> {LOGIN_PATH}");
    login_redirect(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware::from_fn_with_state, routing::get, Router};
    use tower::ServiceExt;

    fn app() -> Router {
        let state = GuardState {
            cookie_name: "jwt".into(),
        };
        Router::new()
            .route("/", get(|| async { "root" }))
            .route("/dashboard", get(|| async { "dashboard" }))
            .route("/dashboard/stocks/:id", get(|| async { "stock" }))
            .route("/login", get(|| async { "login" }))
            .route("/register", get(|| async { "register" }))
            .route("/api/list_stocks", axum::routing::post(|| async { "[]" }))
            .route("/api/auth/login", axum::routing::post(|| async { "ok" }))
            .route("/pkg/bourse-console.js", get(|| async { "js" }))
            .layer(from_fn_with_state(state, route_guard))
    }

    async fn call(method: &str, path: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        app().oneshot(builder.body(Body::empty()).unwrap()).await.unwrap()
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }

    #[tokio::test]
    async fn page_without_session_redirects_with_return_target() {
        let response = call("GET", "/dashboard/stocks/42", None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login?from=%2Fdashboard%2Fstocks%2F42");
    }

    #[tokio::test]
    async fn root_redirect_carries_no_return_target() {
        let response = call("GET", "/", None).await;
        assert_eq!(location(&response), "/login");
    }

    #[tokio::test]
    async fn login_with_session_goes_to_dashboard() {
        let response = call("GET", "/login", Some("jwt=abc")).await;
        assert_eq!(location(&response), "/dashboard");
    }

    #[tokio::test]
    async fn auth_pages_and_assets_are_public() {
        for (method, path) in [
            ("GET", "/login"),
            ("GET", "/register"),
            ("POST", "/api/auth/login"),
            ("GET", "/pkg/bourse-console.js"),
        ] {
            let response = call(method, path, None).await;
            assert_eq!(response.status(), StatusCode::OK, "{path}");
        }
    }

    #[tokio::test]
    async fn api_without_session_is_unauthorized() {
        let response = call("POST", "/api/list_stocks", None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = call("POST", "/api/list_stocks", Some("theme=dark")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn empty_session_cookie_counts_as_absent() {
        let response = call("GET", "/dashboard", Some("jwt=")).await;
        assert_eq!(location(&response), "/login?from=%2Fdashboard");
    }

    #[tokio::test]
    async fn session_lets_pages_and_api_through() {
        let response = call("GET", "/dashboard", Some("theme=dark; jwt=abc")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = call("POST", "/api/list_stocks", Some("jwt=abc")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn return_target_is_query_encoded() {
        let response = call("GET", "/dashboard/stocks/a%20b", None).await;
        assert_eq!(
            location(&response),
            "/login?from=%2Fdashboard%2Fstocks%2Fa%2520b"
        );
    }
}
