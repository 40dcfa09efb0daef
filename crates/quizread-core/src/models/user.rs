use serde::{Deserialize, Serialize};

/// Response from the register and login endpoints.
///
/// `userId` is optional because the backend has been observed returning 2xx
/// bodies without one; callers must treat that as a failed attempt rather
/// than trusting the status code.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// A user row as returned by the user lookup endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub email: String,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_without_user_id() {
        let resp: AuthResponse = serde_json::from_str("{}").expect("parse empty auth response");
        assert!(resp.user_id.is_none());

        let resp: AuthResponse =
            serde_json::from_str(r#"{"userId": "u42"}"#).expect("parse auth response");
        assert_eq!(resp.user_id.as_deref(), Some("u42"));
    }
}
