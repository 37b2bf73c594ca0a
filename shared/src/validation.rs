//! Input validation functions
//!
//! This module provides validation utilities for user input shared by the
//! registration and task endpoints. Email format is checked at the service
//! layer with the `validator` crate rather than here.

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.trim().is_empty() {
        return Err("Username cannot be empty".to_string());
    }
    if username.len() > 64 {
        return Err("Username too long".to_string());
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate task title
pub fn validate_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title cannot be empty".to_string());
    }
    if title.len() > 255 {
        return Err("Title too long".to_string());
    }
    Ok(())
}
