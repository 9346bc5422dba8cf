//! Application configuration.
//!
//! Centralized configuration for the Fracture Detect frontend.
//! The client is served by the prediction server itself, so every
//! endpoint is resolved against the page origin.

/// Backend API base URL.
///
/// Empty means same origin as the page.
pub const API_BASE_URL: &str = "";

/// Prediction endpoint (multipart upload).
pub const UPLOAD_ENDPOINT: &str = "/upload";

/// Login endpoint (JSON credentials).
pub const LOGIN_ENDPOINT: &str = "/login";

/// Signup endpoint (JSON credentials).
pub const SIGNUP_ENDPOINT: &str = "/signup";

/// Logout endpoint (no body).
pub const LOGOUT_ENDPOINT: &str = "/logout";

/// Page shown to anonymous users.
pub const LOGIN_PAGE: &str = "/login";

/// Page shown after a successful login.
pub const UPLOAD_PAGE: &str = "/upload";

/// Multipart field carrying the image.
pub const UPLOAD_FIELD: &str = "file";

/// Minimum password length accepted at signup.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Result label for which the server supplies a heatmap.
pub const FRACTURED_LABEL: &str = "Fractured";

/// Query parameter used to defeat the browser image cache.
pub const CACHE_BUST_PARAM: &str = "t";

/// Application name, shown in the page title.
pub const APP_NAME: &str = "Fracture Detect";

/// Resolve an API path against [`API_BASE_URL`].
pub fn endpoint(path: &str) -> String {
    format!("{}{}", API_BASE_URL, path)
}
