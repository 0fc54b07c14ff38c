//! Admin logout endpoint.

use crate::api::handlers::auth::{
    ADMIN_ROUTE, LOGIN_ROUTE,
    audit::{self, AuditEvent},
    csrf,
    flash::{self, FlashLevel},
    session,
    state::AuthState,
    types::LogoutForm,
};
use axum::{
    Form,
    extract::Extension,
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{LOCATION, SET_COOKIE},
    },
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::debug;

#[utoipa::path(
    post,
    path = "/admin/logout",
    request_body(content = LogoutForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirects to /admin/login after clearing the session, back to /admin when the CSRF check fails")
    ),
    tag = "admin"
)]
pub async fn logout(
    headers: HeaderMap,
    auth_state: Extension<Arc<AuthState>>,
    form: Option<Form<LogoutForm>>,
) -> impl IntoResponse {
    let config = auth_state.config();
    let submitted = form.map_or_else(String::new, |Form(form)| form.csrf);

    if let Err(err) = csrf::require(config, &headers, &submitted) {
        debug!("Rejecting logout: {err}");
        let mut response_headers = HeaderMap::new();
        response_headers.insert(LOCATION, HeaderValue::from_static(ADMIN_ROUTE));
        flash::add(
            &mut response_headers,
            config,
            FlashLevel::Error,
            "invalid_request",
        );
        return (StatusCode::SEE_OTHER, response_headers).into_response();
    }

    let mut response_headers = HeaderMap::new();
    response_headers.insert(LOCATION, HeaderValue::from_static(LOGIN_ROUTE));
    if let Ok(clear) = session::clear_session_cookie(config) {
        response_headers.append(SET_COOKIE, clear);
    }
    audit::record_best_effort(
        auth_state.audit(),
        AuditEvent::new(audit::LOGOUT, "admin"),
    );
    (StatusCode::SEE_OTHER, response_headers).into_response()
}
