//! Admin login endpoints.
//!
//! `GET /admin/login` hands out the form context (pre-login token plus
//! pending flash messages); `POST /admin/login` walks the gauntlet in a
//! fixed order: rate limit, pre-login CSRF, credentials. Earlier gates
//! are cheaper and reveal less.

use crate::api::handlers::auth::{
    ADMIN_ROUTE, LOGIN_ROUTE,
    audit::{self, AuditEvent},
    credentials::{self, CredentialOutcome},
    flash::{self, FlashLevel},
    prelogin, session,
    state::{AuthConfig, AuthState},
    types::{LoginForm, LoginPageResponse},
    utils,
};
use axum::{
    Form, Json,
    extract::Extension,
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{LOCATION, SET_COOKIE},
    },
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, error};

#[utoipa::path(
    get,
    path = "/admin/login",
    responses(
        (status = 200, description = "Login form context with a fresh pre-login token", body = LoginPageResponse)
    ),
    tag = "admin"
)]
pub async fn login_page(
    headers: HeaderMap,
    auth_state: Extension<Arc<AuthState>>,
) -> impl IntoResponse {
    let config = auth_state.config();

    let token = match prelogin::issue(config) {
        Ok(token) => token,
        Err(err) => {
            error!("Failed to issue pre-login token: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    let csrf_token = prelogin::nonce(&token).unwrap_or_default().to_string();

    let mut response_headers = HeaderMap::new();
    match prelogin::prelogin_cookie(config, &token) {
        Ok(cookie) => {
            response_headers.append(SET_COOKIE, cookie);
        }
        Err(err) => {
            error!("Failed to build pre-login cookie: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    }
    let messages = flash::consume(config, &headers, &mut response_headers);

    (
        StatusCode::OK,
        response_headers,
        Json(LoginPageResponse {
            csrf_token,
            messages,
        }),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/admin/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirects to /admin on success, back to /admin/login otherwise"),
        (status = 500, description = "Session could not be issued")
    ),
    tag = "admin"
)]
pub async fn login(
    headers: HeaderMap,
    auth_state: Extension<Arc<AuthState>>,
    form: Option<Form<LoginForm>>,
) -> impl IntoResponse {
    let config = auth_state.config();
    let form = form.map_or_else(LoginForm::default, |Form(form)| form);
    let client_ip = utils::extract_client_ip(&headers).unwrap_or_else(|| "unknown".to_string());
    // Audit entries fall back to the address when the form named nobody.
    let actor = if form.username.is_empty() {
        client_ip.clone()
    } else {
        form.username.clone()
    };

    let (allowed, retry_after) = auth_state.rate_limiter().check(&client_ip).await;
    if !allowed {
        debug!("Rate limited login attempt from {client_ip}");
        audit::record_best_effort(
            auth_state.audit(),
            AuditEvent::new(audit::LOGIN_LOCKOUT, actor.as_str())
                .with_note(format!("retry_after={retry_after}")),
        );
        return login_redirect(config, "too_many_attempts");
    }

    let prelogin_token = utils::extract_cookie(&headers, config.prelogin_cookie_name());
    if !prelogin::verify(config, prelogin_token.as_deref(), &form.csrf) {
        audit::record_best_effort(
            auth_state.audit(),
            AuditEvent::new(audit::LOGIN_FAILURE, actor.as_str()).with_note("csrf"),
        );
        return login_redirect(config, "invalid_session");
    }

    match credentials::verify_credentials(config, &form.username, &form.password) {
        CredentialOutcome::UnknownUser => {
            auth_state.rate_limiter().record_failure(&client_ip).await;
            audit::record_best_effort(
                auth_state.audit(),
                AuditEvent::new(audit::LOGIN_FAILURE, actor.as_str()).with_note("user"),
            );
            return login_redirect(config, "invalid_credentials");
        }
        CredentialOutcome::BadPassword => {
            auth_state.rate_limiter().record_failure(&client_ip).await;
            audit::record_best_effort(
                auth_state.audit(),
                AuditEvent::new(audit::LOGIN_FAILURE, actor.as_str()).with_note("password"),
            );
            return login_redirect(config, "invalid_credentials");
        }
        CredentialOutcome::Accepted => {}
    }

    auth_state.rate_limiter().record_success(&client_ip).await;

    let token = match session::issue(config, &form.username) {
        Ok(token) => token,
        Err(err) => {
            error!("Failed to issue session: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    let session_cookie = match session::session_cookie(config, &token) {
        Ok(cookie) => cookie,
        Err(err) => {
            error!("Failed to build session cookie: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let mut response_headers = HeaderMap::new();
    response_headers.insert(LOCATION, HeaderValue::from_static(ADMIN_ROUTE));
    response_headers.append(SET_COOKIE, session_cookie);
    if let Ok(clear) = prelogin::clear_prelogin_cookie(config) {
        response_headers.append(SET_COOKIE, clear);
    }
    audit::record_best_effort(
        auth_state.audit(),
        AuditEvent::new(audit::LOGIN_SUCCESS, actor.as_str()),
    );
    (StatusCode::SEE_OTHER, response_headers).into_response()
}

/// `303` back to the login form carrying one flash message.
fn login_redirect(config: &AuthConfig, text: &str) -> Response {
    let mut response_headers = HeaderMap::new();
    response_headers.insert(LOCATION, HeaderValue::from_static(LOGIN_ROUTE));
    flash::add(&mut response_headers, config, FlashLevel::Error, text);
    (StatusCode::SEE_OTHER, response_headers).into_response()
}
