use bourse_types::{ApiFailure, LoginRequest, RegisterRequest};
use reqwest::Method;
use serde::Deserialize;
use tracing::info;

use crate::client::{read_failure, set_cookies, BackendClient, RequestContext};
use crate::error::ClientError;

/// What an auth endpoint answered, plus the cookies it wants the browser to
/// store. The session cookie is httpOnly and can only reach the browser by
/// being relayed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthOutcome {
    pub message: Option<String>,
    pub set_cookies: Vec<String>,
}

#[derive(Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: Option<String>,
}

async fn into_outcome(response: reqwest::Response) -> Result<AuthOutcome, ClientError> {
    let setCookies = set_cookies(&response);
    let bytes = response.bytes().await?;
    let message = serde_json::from_slice::<MessageBody>(&bytes)
        .ok()
        .and_then(|b| b.message);
    Ok(AuthOutcome {
        message,
        set_cookies: setCookies,
    })
}

/// A 401 from the login endpoint means bad credentials, not a lost session.
fn rejected(fallback: &str) -> ClientError {
    ClientError::Api {
        status: 401,
        failure: ApiFailure::general(fallback),
    }
}

pub async fn login(
    client: &BackendClient,
    request: &LoginRequest,
) -> Result<AuthOutcome, ClientError> {
    let response = client
        .send(
            &RequestContext::anonymous(),
            Method::POST,
            &["auth", "login"],
            None,
            Some(request),
        )
        .await
        .map_err(|e| match e {
            ClientError::Unauthorized => rejected("Login failed"),
            other => other,
        })?;

    if !response.status().is_success() {
        return Err(read_failure(response, "Login failed").await);
    }
    info!("login accepted for {}", request.email);
    into_outcome(response).await
}

pub async fn register(
    client: &BackendClient,
    request: &RegisterRequest,
) -> Result<AuthOutcome, ClientError> {
    let response = client
        .send(
            &RequestContext::anonymous(),
            Method::POST,
            &["auth", "register"],
            None,
            Some(request),
        )
        .await
        .map_err(|e| match e {
            ClientError::Unauthorized => rejected("Registration failed"),
            other => other,
        })?;

    if !response.status().is_success() {
        return Err(read_failure(response, "Registration failed").await);
    }
    info!("registered {}", request.email);
    into_outcome(response).await
}

pub async fn logout(
    client: &BackendClient,
    ctx: &RequestContext,
) -> Result<AuthOutcome, ClientError> {
    let response = client
        .send::<()>(ctx, Method::POST, &["auth", "logout"], None, None)
        .await?;

    if !response.status().is_success() {
        return Err(read_failure(response, "Logout failed").await);
    }
    into_outcome(response).await
}
