//! Request and response bodies for the admin endpoints.
//!
//! Form fields all default to empty strings so a missing or truncated
//! body never rejects at deserialization; it walks the same validation
//! path as a wrong value and gets the same answer.

use crate::api::handlers::auth::flash::FlashMessage;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(rename = "_csrf", default)]
    pub csrf: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LogoutForm {
    #[serde(rename = "_csrf", default)]
    pub csrf: String,
}

/// Context for rendering the login form.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginPageResponse {
    /// Pre-login nonce to embed as the form's `_csrf` field.
    pub csrf_token: String,
    pub messages: Vec<FlashMessage>,
}

/// Context for rendering the admin landing page.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AdminHomeResponse {
    pub subject: String,
    pub issued_at: u64,
    /// Session CSRF secret to embed in mutating forms, the logout form
    /// included.
    pub csrf_token: String,
    pub messages: Vec<FlashMessage>,
}
