//! Admin landing endpoint, the redirect target after a successful login.
//!
//! The rest of the admin surface (tickets, machines) hangs off sibling
//! services; this endpoint proves the guard works and feeds the page
//! shell its session context.

use crate::api::handlers::auth::{
    csrf, flash, guard,
    state::AuthState,
    types::AdminHomeResponse,
};
use axum::{
    Json,
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/admin",
    responses(
        (status = 200, description = "Session context for the admin page shell", body = AdminHomeResponse),
        (status = 303, description = "No valid session; redirects to /admin/login")
    ),
    tag = "admin"
)]
pub async fn admin_home(
    headers: HeaderMap,
    auth_state: Extension<Arc<AuthState>>,
) -> Response {
    let config = auth_state.config();

    let payload = match guard::require_admin(config, &headers) {
        Ok(payload) => payload,
        Err(redirect) => return redirect,
    };

    let csrf_token = csrf::current_token(config, &headers);
    let mut response_headers = HeaderMap::new();
    let messages = flash::consume(config, &headers, &mut response_headers);

    (
        StatusCode::OK,
        response_headers,
        Json(AdminHomeResponse {
            subject: payload.subject,
            issued_at: payload.issued_at,
            csrf_token,
            messages,
        }),
    )
        .into_response()
}
