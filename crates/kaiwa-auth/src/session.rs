// SPDX-FileCopyrightText: 2026 Kaiwa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session gate: resolves an inbound cookie value to an [`Identity`].
//!
//! Fails open to anonymous: a missing, invalid, or expired credential
//! degrades to `Identity::Anonymous` rather than erroring the request.
//! Expired sessions therefore never block the endpoint.

use kaiwa_core::Identity;

use crate::token::SessionCodec;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "auth_token";

/// Resolves an optional cookie value to an identity.
pub fn authenticate(codec: &SessionCodec, cookie_value: Option<&str>) -> Identity {
    match cookie_value.and_then(|value| codec.verify(value)) {
        Some(claims) => Identity::Authenticated(claims),
        None => Identity::Anonymous,
    }
}

/// Builds the `Set-Cookie` value attaching a session credential.
///
/// HttpOnly and SameSite=Lax always; Secure only in production so local
/// development over plain HTTP keeps working.
pub fn session_cookie(credential: &str, max_age_seconds: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={credential}; HttpOnly; SameSite=Lax; Max-Age={max_age_seconds}; Path=/"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Builds the `Set-Cookie` value that discards the session: same name and
/// path scope as issuance, empty value, immediate expiry.
pub fn clearing_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}
