use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

pub const USER_HEADER: &str = "user";

/// Name sent in the `user` header, if any.
///
/// Non-UTF-8 or blank values count as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User(pub Option<String>);

impl User {
    pub fn name(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl<S> FromRequestParts<S> for User
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let name = parts
            .headers
            .get(USER_HEADER)
            .and_then(|value| std::str::from_utf8(value.as_bytes()).ok())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_owned);

        Ok(User(name))
    }
}
