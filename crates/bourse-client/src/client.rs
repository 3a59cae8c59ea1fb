use std::fmt;
use std::sync::Arc;

use bourse_types::{ApiEnvelope, ApiFailure, ErrorBody, PageQuery};
use reqwest::header::{HeaderValue, CONTENT_TYPE, COOKIE, SET_COOKIE};
use reqwest::{Method, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::error::ClientError;

pub const LOGIN_PATH: &str = "/login";

const API_SEGMENTS: [&str; 2] = ["api", "v1"];

/// Sends the whole page to another location. Implemented by whatever can
/// reach the browser that made the request.
pub trait LoginRedirect: Send + Sync {
    fn redirect(&self, path: &str);
}

/// Who a backend call is made on behalf of.
///
/// Carries the browser's cookies to forward and, for interactive calls, the
/// hook that sends the browser to the login screen when the session is gone.
/// Page-level loads leave the hook out and decide for themselves what a 401
/// means.
#[derive(Clone, Default)]
pub struct RequestContext {
    cookies: Option<String>,
    redirect: Option<Arc<dyn LoginRedirect>>,
}

impl RequestContext {
    /// A call made while rendering a page: a 401 fails, nothing more.
    pub fn server(cookies: Option<String>) -> Self {
        Self {
            cookies,
            redirect: None,
        }
    }

    /// A call made from an interactive control: a 401 also navigates to login.
    pub fn browser(cookies: Option<String>, redirect: Arc<dyn LoginRedirect>) -> Self {
        Self {
            cookies,
            redirect: Some(redirect),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn cookies(&self) -> Option<&str> {
        self.cookies.as_deref()
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("cookies", &self.cookies.as_ref().map(|_| "<redacted>"))
            .field("redirect", &self.redirect.is_some())
            .finish()
    }
}

/// Serializes cookie pairs into one `Cookie` header value.
pub fn cookie_header<'a, I>(pairs: I) -> Option<String>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let joined = pairs
        .into_iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("; ");
    (!joined.is_empty()).then_some(joined)
}

#[derive(Clone, Debug)]
pub struct BackendClient {
    http: reqwest::Client,
    api_root: Url,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self, ClientError> {
        let mut apiRoot =
            Url::parse(base_url).map_err(|e| ClientError::BaseUrl(format!("{base_url}: {e}")))?;
        apiRoot
            .path_segments_mut()
            .map_err(|_| ClientError::BaseUrl(base_url.to_string()))?
            .pop_if_empty()
            .extend(API_SEGMENTS);
        Ok(Self { http, api_root: apiRoot })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.api_root.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::BaseUrl(self.api_root.to_string()))?
            .extend(segments);
        Ok(url)
    }

    /// Sends one request. Fails only on 401 and on transport errors; every
    /// other status is handed back for the caller to interpret.
    pub async fn send<B>(
        &self,
        ctx: &RequestContext,
        method: Method,
        segments: &[&str],
        query: Option<&PageQuery>,
        body: Option<&B>,
    ) -> Result<Response, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(cookies) = ctx.cookies() {
            request = request.header(COOKIE, cookies);
        }
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            error!("{method} {url} failed: {e}");
            ClientError::Transport(e)
        })?;

        let status = response.status();
        debug!("{method} {} -> {status}", url.path());

        if status == StatusCode::UNAUTHORIZED {
            match &ctx.redirect {
                Some(redirect) => {
                    warn!("{method} {} unauthorized, redirecting to {LOGIN_PATH}", url.path());
                    redirect.redirect(LOGIN_PATH);
                }
                None => warn!("{method} {} unauthorized", url.path()),
            }
            return Err(ClientError::Unauthorized);
        }

        Ok(response)
    }
}

/// Unwraps `{ data: ... }` from a 2xx response, or normalizes the error body.
pub(crate) async fn read_data<T>(response: Response, fallback: &str) -> Result<T, ClientError>
where
    T: DeserializeOwned,
{
    if !response.status().is_success() {
        return Err(read_failure(response, fallback).await);
    }
    let bytes = response.bytes().await?;
    let envelope: ApiEnvelope<T> = serde_json::from_slice(&bytes)?;
    Ok(envelope.data)
}

/// Like [`read_data`] for endpoints whose success carries nothing useful.
pub(crate) async fn read_empty(response: Response, fallback: &str) -> Result<(), ClientError> {
    if !response.status().is_success() {
        return Err(read_failure(response, fallback).await);
    }
    Ok(())
}

pub(crate) async fn read_failure(response: Response, fallback: &str) -> ClientError {
    let status = response.status().as_u16();
    let body = match response.bytes().await {
        Ok(bytes) => serde_json::from_slice::<ErrorBody>(&bytes).ok(),
        Err(e) => {
            warn!("could not read error body ({status}): {e}");
            None
        }
    };
    ClientError::Api {
        status,
        failure: ApiFailure::from_error_body(status, body, fallback),
    }
}

pub(crate) fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_root_appends_version_prefix() {
        let client = BackendClient::new("http://backend:8080").unwrap();
        assert_eq!(client.api_root.as_str(), "http://backend:8080/api/v1");

        let trailing = BackendClient::new("http://localhost:8080/").unwrap();
        assert_eq!(
            trailing.endpoint(&["stock", "12", "price"]).unwrap().as_str(),
            "http://localhost:8080/api/v1/stock/12/price"
        );
    }

    #[test]
    fn path_segments_are_escaped() {
        let client = BackendClient::new("http://localhost:8080").unwrap();
        let url = client.endpoint(&["stock", "7/price"]).unwrap();
        assert_eq!(url.path(), "/api/v1/stock/7%2Fprice");
    }

    #[test]
    fn rejects_unusable_base_url() {
        assert!(matches!(
            BackendClient::new("not a url"),
            Err(ClientError::BaseUrl(_))
        ));
    }

    #[test]
    fn cookie_header_joins_all_pairs() {
        assert_eq!(
            cookie_header([("jwt", "abc"), ("theme", "dark")]).as_deref(),
            Some("jwt=abc; theme=dark")
        );
        assert_eq!(cookie_header(std::iter::empty()), None);
    }

    #[test]
    fn context_debug_hides_cookie_values() {
        let ctx = RequestContext::server(Some("jwt=secret".into()));
        let printed = format!("{ctx:?}");
        assert!(!printed.contains("secret"));
        assert!(printed.contains("redirect: false"));
    }
}
