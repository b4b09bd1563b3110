// SPDX-FileCopyrightText: 2026 Kaiwa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP handlers for the identity endpoints.
//!
//! GET /api/auth/google starts the authorization-code flow, the callback
//! finishes it and attaches the session cookie, /api/auth/me reports the
//! current identity (200 always), and /api/auth/logout clears the cookie.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use kaiwa_auth::{
    GoogleAuthError, SESSION_COOKIE, authenticate, clearing_cookie, session_cookie,
};
use kaiwa_core::{Identity, IdentityClaims, KaiwaError};

use crate::error::{ErrorResponse, error_response};
use crate::server::AppState;

/// Query parameters for GET /api/auth/google.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    /// Path to send the browser back to after login.
    #[serde(rename = "returnTo")]
    pub return_to: Option<String>,
}

/// Query parameters for the OAuth callback.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
}

/// Response body for GET /api/auth/me.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub authenticated: bool,
    pub user: Option<UserInfo>,
}

/// Public view of the session's identity claims.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl UserInfo {
    fn from_claims(claims: IdentityClaims) -> Self {
        Self {
            id: claims.subject,
            email: claims.email,
            name: claims.name,
            picture: claims.picture,
        }
    }
}

/// Response body for POST /api/auth/logout.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// GET /api/auth/google
///
/// Redirects to the provider's authorization URL, with the return path
/// riding along as opaque state.
pub async fn google_login(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
) -> Response {
    let Some(oauth) = state.oauth.as_ref() else {
        return error_response(&KaiwaError::Config(
            "Google OAuth is not configured".to_string(),
        ));
    };

    let url = oauth.authorization_url(query.return_to.as_deref().unwrap_or("/"));
    (StatusCode::FOUND, [(header::LOCATION, url)]).into_response()
}

/// GET /api/auth/google/callback
///
/// Exchanges the authorization code for verified claims, issues the
/// session credential, and redirects to the frontend with the cookie set.
pub async fn google_callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Response {
    let Some(oauth) = state.oauth.as_ref() else {
        return error_response(&KaiwaError::Config(
            "Google OAuth is not configured".to_string(),
        ));
    };

    let Some(code) = query.code.filter(|code| !code.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: GoogleAuthError::MissingCode.to_string(),
            }),
        )
            .into_response();
    };

    let claims = match oauth.exchange_code(&code).await {
        Ok(claims) => claims,
        Err(err) => {
            tracing::error!(error = %err, "identity exchange failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "authentication failed".to_string(),
                }),
            )
                .into_response();
        }
    };

    let credential = match state.codec.issue(&claims) {
        Ok(credential) => credential,
        Err(err) => return error_response(&err),
    };

    let cookie = session_cookie(&credential, state.session_max_age, state.secure_cookies);
    let return_to = query.state.unwrap_or_else(|| "/".to_string());
    let location = format!("{}{}", state.frontend_url, return_to);

    (
        StatusCode::FOUND,
        [(header::LOCATION, location), (header::SET_COOKIE, cookie)],
    )
        .into_response()
}

/// GET /api/auth/me
///
/// Always 200. Anonymous is a supported state, not an error; invalid or
/// expired cookies degrade to it.
pub async fn me(State(state): State<AppState>, jar: CookieJar) -> Json<MeResponse> {
    let cookie_value = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
    match authenticate(&state.codec, cookie_value.as_deref()) {
        Identity::Authenticated(claims) => Json(MeResponse {
            authenticated: true,
            user: Some(UserInfo::from_claims(claims)),
        }),
        Identity::Anonymous => Json(MeResponse {
            authenticated: false,
            user: None,
        }),
    }
}

/// POST /api/auth/logout
///
/// Clears the session cookie (same name and path scope as issuance,
/// expiry in the past) so the browser discards it.
pub async fn logout(State(state): State<AppState>) -> Response {
    (
        StatusCode::OK,
        [(header::SET_COOKIE, clearing_cookie(state.secure_cookies))],
        Json(LogoutResponse { success: true }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn me_response_serializes_null_user_when_anonymous() {
        let body = MeResponse {
            authenticated: false,
            user: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["authenticated"], false);
        assert!(json["user"].is_null());
    }

    #[test]
    fn me_response_serializes_user_fields() {
        let body = MeResponse {
            authenticated: true,
            user: Some(UserInfo::from_claims(IdentityClaims {
                subject: "sub-1".into(),
                email: "user@example.com".into(),
                name: Some("User".into()),
                picture: None,
            })),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["user"]["id"], "sub-1");
        assert_eq!(json["user"]["email"], "user@example.com");
        assert_eq!(json["user"]["name"], "User");
        assert!(json["user"].get("picture").is_none());
    }

    #[test]
    fn login_query_reads_camel_case_return_to() {
        let query: LoginQuery = serde_json::from_str(r#"{"returnTo": "/chat"}"#).unwrap();
        assert_eq!(query.return_to.as_deref(), Some("/chat"));
    }

    #[test]
    fn logout_response_serializes_success() {
        let json = serde_json::to_string(&LogoutResponse { success: true }).unwrap();
        assert_eq!(json, r#"{"success":true}"#);
    }
}
