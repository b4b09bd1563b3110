// SPDX-FileCopyrightText: 2026 Kaiwa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session credential codec.
//!
//! Issues and verifies compact, tamper-evident session credentials (HS256
//! JWTs) carrying identity claims and an absolute expiry. Verification is
//! total: malformed, tampered, or expired input yields `None`, never a
//! panic or an error surfaced to the request pipeline.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use kaiwa_core::{IdentityClaims, KaiwaError};

/// Wire claims of a session credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    picture: Option<String>,
    iat: i64,
    exp: i64,
}

/// Signs and verifies session credentials with a server-held secret.
///
/// Issuing the same claims twice yields two independently valid
/// credentials (the issue timestamp differs); there is no idempotence
/// requirement.
pub struct SessionCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SessionCodec {
    /// Creates a codec signing with `secret` and issuing credentials valid
    /// for `ttl` from issue time.
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Issues a signed credential embedding `claims` plus an expiry.
    pub fn issue(&self, claims: &IdentityClaims) -> Result<String, KaiwaError> {
        let now = Utc::now();
        let session = SessionClaims {
            sub: claims.subject.clone(),
            email: claims.email.clone(),
            name: claims.name.clone(),
            picture: claims.picture.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::default(), &session, &self.encoding)
            .map_err(|e| KaiwaError::Internal(format!("failed to sign session credential: {e}")))
    }

    /// Verifies a credential, returning its claims only when the signature
    /// is intact and the expiry has not passed.
    pub fn verify(&self, credential: &str) -> Option<IdentityClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<SessionClaims>(credential, &self.decoding, &validation).ok()?;
        let claims = data.claims;
        Some(IdentityClaims {
            subject: claims.sub,
            email: claims.email,
            name: claims.name,
            picture: claims.picture,
        })
    }
}
