//! Resource ownership guard
//!
//! The single authorization primitive: an authenticated user may act on a
//! resource only if they own it. Applied in every task handler after
//! identity resolution and before any store access, so a forbidden request
//! against a nonexistent resource still reports `Forbidden`, never
//! `NotFound`.

use crate::auth::CurrentUser;
use crate::error::ApiError;

/// Authorize `user` to act on a resource owned by `owner_id`
///
/// Pure equality check on user ids; failure is `Forbidden`.
#[inline]
pub fn ensure_owner(user: &CurrentUser, owner_id: i64) -> Result<(), ApiError> {
    if user.id() == owner_id {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use taskboard_shared::models::User;

    fn user_with_id(id: i64) -> CurrentUser {
        CurrentUser {
            user: User {
                id,
                username: format!("user{}", id),
                email: format!("user{}@example.com", id),
                password_hash: String::new(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
        }
    }

    #[test]
    fn test_owner_is_authorized() {
        let user = user_with_id(1);
        assert!(ensure_owner(&user, 1).is_ok());
    }

    #[test]
    fn test_non_owner_is_forbidden() {
        let user = user_with_id(1);
        let err = ensure_owner(&user, 2).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden));
    }

    #[test]
    fn test_forbidden_regardless_of_direction() {
        let a = user_with_id(10);
        let b = user_with_id(11);
        assert!(ensure_owner(&a, b.id()).is_err());
        assert!(ensure_owner(&b, a.id()).is_err());
    }
}
