//! Caller identity.
//!
//! An upstream collaborator authenticates the user and forwards the opaque
//! user id in a request header (configurable, `x-user-id` by default).

use crate::{api::AppState, errors::Error};
use axum::{extract::FromRequestParts, http::request::Parts};

/// The authenticated user making the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    /// Opaque user id every stored car is scoped to
    pub id: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = state.config.auth.user_header.as_str();
        let id = parts
            .headers
            .get(header)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(Error::Unauthenticated)?;

        tracing::trace!(user_id = id, "Resolved current user");
        Ok(Self { id: id.to_string() })
    }
}
