//! Server functions. Each one forwards the browser's cookies to the backend
//! through `bourse_client` and hands back typed data or an [`ApiFailure`].

pub mod auth;
pub mod exchanges;
pub mod stocks;

use bourse_types::ApiFailure;
use leptos::prelude::ServerFnError;

/// Collapses whatever a server function call produced into the failure the
/// views render.
pub fn failure_of(err: ServerFnError<ApiFailure>) -> ApiFailure {
    match err {
        ServerFnError::WrappedServerError(failure) => failure,
        other => ApiFailure::general(other.to_string()),
    }
}

#[cfg(feature = "ssr")]
pub(crate) mod backend {
    use std::sync::Arc;

    use axum_extra::extract::cookie::CookieJar;
    use bourse_client::{cookie_header, BackendClient, ClientError, LoginRedirect, RequestContext};
    use bourse_types::{ApiFailure, SessionCookieName};
    use http::header::{HeaderValue, SET_COOKIE};
    use leptos::prelude::*;
    use leptos_axum::ResponseOptions;

    /// Turns the client's login redirect into a redirect of the server
    /// function response, which the browser follows.
    struct ServerFnRedirect;

    impl LoginRedirect for ServerFnRedirect {
        fn redirect(&self, path: &str) {
            leptos_axum::redirect(path);
        }
    }

    pub fn fail(failure: ApiFailure) -> ServerFnError<ApiFailure> {
        ServerFnError::WrappedServerError(failure)
    }

    pub fn wrap(err: ClientError) -> ServerFnError<ApiFailure> {
        fail(err.into())
    }

    pub fn client() -> Result<BackendClient, ServerFnError<ApiFailure>> {
        use_context::<BackendClient>()
            .ok_or_else(|| fail(ApiFailure::general("Backend client unavailable")))
    }

    pub fn cookie_name() -> String {
        use_context::<SessionCookieName>().unwrap_or_default().0
    }

    async fn forwarded_cookies() -> Result<Option<String>, ServerFnError<ApiFailure>> {
        let jar = leptos_axum::extract::<CookieJar>()
            .await
            .map_err(|e| fail(ApiFailure::general(e.to_string())))?;
        Ok(cookie_header(jar.iter().map(|c| (c.name(), c.value()))))
    }

    /// For calls triggered by a control on the page: a 401 sends the browser
    /// to the login screen.
    pub async fn browser_context() -> Result<RequestContext, ServerFnError<ApiFailure>> {
        Ok(RequestContext::browser(
            forwarded_cookies().await?,
            Arc::new(ServerFnRedirect),
        ))
    }

    /// For page-level loads: the page decides what a 401 means.
    pub async fn server_context() -> Result<RequestContext, ServerFnError<ApiFailure>> {
        Ok(RequestContext::server(forwarded_cookies().await?))
    }

    pub fn relay_cookies(setCookies: &[String]) {
        let Some(response) = use_context::<ResponseOptions>() else {
            tracing::warn!("no response to relay {} cookies on", setCookies.len());
            return;
        };
        for cookie in setCookies {
            match HeaderValue::from_str(cookie) {
                Ok(value) => response.append_header(SET_COOKIE, value),
                Err(e) => tracing::warn!("dropping unrelayable cookie: {e}"),
            }
        }
    }

    pub fn clear_session_cookie() {
        let cleared = format!("{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax", cookie_name());
        relay_cookies(&[cleared]);
    }
}
