//! Authentication requests.
//!
//! Login, signup and logout share one shape: optional local validation,
//! a single request, then a branch on the HTTP status.

use gloo_net::http::Request;

use crate::config::{
    endpoint, LOGIN_ENDPOINT, LOGOUT_ENDPOINT, MIN_PASSWORD_LENGTH, SIGNUP_ENDPOINT, UPLOAD_PAGE,
};
use crate::types::{AppError, AppResult, Credentials, MessageResponse};

/// Message shown when a signup password is too short.
pub fn short_password_message() -> String {
    format!("Password must be at least {} characters long.", MIN_PASSWORD_LENGTH)
}

/// Check the signup password before any request is sent.
pub fn validate_password(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation(short_password_message()));
    }
    Ok(())
}

/// Log in. On success the session cookie is set by the server.
pub async fn login(credentials: &Credentials) -> AppResult<MessageResponse> {
    log::info!("🔑 Logging in as {}", credentials.username);
    post_credentials(LOGIN_ENDPOINT, credentials).await
}

/// Create an account after checking the password length locally.
pub async fn signup(credentials: &Credentials) -> AppResult<MessageResponse> {
    validate_password(&credentials.password)?;
    log::info!("📝 Signing up {}", credentials.username);
    post_credentials(SIGNUP_ENDPOINT, credentials).await
}

/// Page to open after login: the server's `redirect`, else the upload page.
pub fn login_destination(reply: &MessageResponse) -> &str {
    reply
        .redirect
        .as_deref()
        .filter(|path| !path.is_empty())
        .unwrap_or(UPLOAD_PAGE)
}

/// End the session. The reply body is ignored.
pub async fn logout() -> AppResult<()> {
    Request::post(&endpoint(LOGOUT_ENDPOINT)).send().await?;
    log::info!("👋 Logged out");
    Ok(())
}

async fn post_credentials(path: &str, credentials: &Credentials) -> AppResult<MessageResponse> {
    let response = Request::post(&endpoint(path))
        .json(credentials)?
        .send()
        .await?;

    let ok = response.ok();
    let status = response.status();
    let body = response.json::<MessageResponse>().await?;

    if ok {
        Ok(body)
    } else {
        log::warn!("{} rejected ({}): {:?}", path, status, body.message);
        Err(rejection(body))
    }
}

/// Turn a non-2xx reply into an [`AppError::Application`].
fn rejection(body: MessageResponse) -> AppError {
    AppError::Application(body.message.unwrap_or_default())
}
