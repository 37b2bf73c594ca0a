//! Request identity resolution
//!
//! Provides the `CurrentUser` extractor: bearer token in, authenticated
//! user record out. The subject is re-resolved against the users table on
//! every request; identity is never cached across requests.
//!
//! Every failure mode maps to the same `ApiError::Unauthorized`, so a
//! caller cannot distinguish a missing header from a bad signature, an
//! expired token, a non-numeric subject, or a since-deleted user.

use crate::error::ApiError;
use crate::repositories::UserRepository;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts},
};
use taskboard_shared::models::User;

/// Authenticated user resolved from a bearer token
///
/// Carries the full user record so handlers can read `id` for ownership
/// checks without another lookup.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
}

impl CurrentUser {
    /// The authenticated user's id
    #[inline]
    pub fn id(&self) -> i64 {
        self.user.id
    }
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // Extract Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        // Check Bearer scheme
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthorized)?;

        // Uses pre-computed keys from state; signature checked before
        // any claim is trusted
        let claims = app_state
            .tokens()
            .decode(token)
            .map_err(|_| ApiError::Unauthorized)?;

        // Subject must be a positive integer user id; anything else is a
        // bad credential, not a server error
        let user_id: i64 = claims.sub.parse().map_err(|_| ApiError::Unauthorized)?;
        if user_id <= 0 {
            return Err(ApiError::Unauthorized);
        }

        // The subject must still map to a live identity record. A deleted
        // user is indistinguishable from an invalid token.
        let user = UserRepository::find_by_id(app_state.db(), user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or(ApiError::Unauthorized)?;

        Ok(CurrentUser { user: user.into() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_current_user_exposes_id() {
        let current = CurrentUser {
            user: User {
                id: 7,
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password_hash: String::new(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
        };
        assert_eq!(current.id(), 7);
    }
}
