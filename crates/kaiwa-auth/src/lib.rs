// SPDX-FileCopyrightText: 2026 Kaiwa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication for the Kaiwa chat backend.
//!
//! Three pieces, leaf-first: the session credential codec (signed,
//! tamper-evident tokens carrying identity claims and an expiry), the
//! Google identity exchange (authorization-code flow with id-token
//! verification), and the session gate (cookie value in, `Identity` out,
//! failing open to anonymous).

pub mod google;
pub mod session;
pub mod token;

pub use google::{GoogleAuthError, GoogleOAuth};
pub use session::{SESSION_COOKIE, authenticate, clearing_cookie, session_cookie};
pub use token::SessionCodec;
