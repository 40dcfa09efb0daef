use thiserror::Error;

/// Closed set of authentication failures surfaced to the UI.
///
/// Callers render the `Display` string; transport and response details are
/// already folded in and never need to be inspected again.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials. Please check your email and password.")]
    InvalidCredentials,

    #[error("User not found. Please check your email.")]
    UserNotFound,

    #[error("Email already exists. Please use a different email.")]
    Conflict,

    #[error("Invalid email format or password requirements not met.")]
    InvalidInput,

    #[error("{0}")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert!(AuthError::Conflict.to_string().starts_with("Email already exists"));
        assert!(AuthError::InvalidCredentials
            .to_string()
            .starts_with("Invalid credentials"));
        assert!(AuthError::UserNotFound.to_string().starts_with("User not found"));
        assert_eq!(
            AuthError::Unknown("Login failed".to_string()).to_string(),
            "Login failed"
        );
    }
}
