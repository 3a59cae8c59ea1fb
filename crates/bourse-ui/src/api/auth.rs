use bourse_types::{ApiFailure, LoginRequest, RegisterRequest};
use leptos::prelude::*;

use crate::session::HOME_PATH;

/// Where to go after logging in. Only same-site paths are honoured, and
/// never the auth screens themselves.
pub fn return_target(from: Option<&str>) -> String {
    match from.map(str::trim) {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.starts_with("/login")
                && !path.starts_with("/register") =>
        {
            path.to_string()
        }
        _ => HOME_PATH.to_string(),
    }
}

#[server(prefix = "/api/auth")]
pub async fn login(
    request: LoginRequest,
    from: Option<String>,
) -> Result<(), ServerFnError<ApiFailure>> {
    use crate::api::backend::{client, relay_cookies, wrap};

    let outcome = bourse_client::auth::login(&client()?, &request)
        .await
        .map_err(wrap)?;
    relay_cookies(&outcome.set_cookies);
    leptos_axum::redirect(&return_target(from.as_deref()));
    Ok(())
}

/// Returns the backend's confirmation message.
#[server(prefix = "/api/auth")]
pub async fn register(request: RegisterRequest) -> Result<String, ServerFnError<ApiFailure>> {
    use crate::api::backend::{client, wrap};

    let outcome = bourse_client::auth::register(&client()?, &request)
        .await
        .map_err(wrap)?;
    Ok(outcome
        .message
        .unwrap_or_else(|| "Registration successful".to_string()))
}

/// Ends the session on the backend, then drops the cookie here whatever the
/// backend said.
#[server(prefix = "/api/auth")]
pub async fn logout() -> Result<(), ServerFnError<ApiFailure>> {
    use crate::api::backend::{clear_session_cookie, client, relay_cookies, server_context};

    let ctx = server_context().await?;
    match bourse_client::auth::logout(&client()?, &ctx).await {
        Ok(outcome) => relay_cookies(&outcome.set_cookies),
        Err(e) => tracing::warn!("backend logout failed: {e}"),
    }
    clear_session_cookie();
    leptos_axum::redirect(crate::session::LOGIN_PATH);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, "/dashboard")]
    #[case(Some("/dashboard/stocks/4"), "/dashboard/stocks/4")]
    #[case(Some("https://evil.example"), "/dashboard")]
    #[case(Some("//evil.example/x"), "/dashboard")]
    #[case(Some("/\\evil.example"), "/dashboard")]
    #[case(Some("/login"), "/dashboard")]
    #[case(Some("/register?x=1"), "/dashboard")]
    fn only_local_targets_are_followed(#[case] from: Option<&str>, #[case] expected: &str) {
        assert_eq!(return_target(from), expected);
    }
}
