//! Resolves the caller of a request to a user.
//!
//! Users are authenticated elsewhere. The service that logs users in shares the
//! cookie secret with this server and issues an encrypted identity cookie with
//! [set_identity_cookie]. Each request handler receives the resolved
//! [Identity] and passes it explicitly to the operation it calls.

mod cookie;

use std::{convert::Infallible, fmt::Display};

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use serde::{Deserialize, Serialize};

use crate::Error;

pub use cookie::{DEFAULT_COOKIE_DURATION, clear_identity_cookie, set_identity_cookie};

#[cfg(test)]
pub(crate) use cookie::COOKIE_IDENTITY;

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Who is making a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity {
    /// The request carried a valid identity cookie for this user.
    User(UserID),
    /// The request carried no identity cookie, or one that was invalid or expired.
    Anonymous,
}

impl Identity {
    /// The caller's user ID, if the caller is authenticated.
    pub fn user_id(self) -> Option<UserID> {
        match self {
            Identity::User(user_id) => Some(user_id),
            Identity::Anonymous => None,
        }
    }

    /// The caller's user ID.
    ///
    /// # Errors
    /// Returns [Error::Unauthenticated] for anonymous callers.
    pub fn require(self) -> Result<UserID, Error> {
        self.user_id().ok_or(Error::Unauthenticated)
    }
}

impl<S> FromRequestParts<S> for Identity
where
    Key: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state).await?;

        Ok(cookie::get_identity_from_cookie(&jar))
    }
}
