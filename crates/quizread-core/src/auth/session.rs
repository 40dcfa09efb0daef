//! Session state for the signed-in user.
//!
//! The store owns who is logged in and the bearer token derived for them,
//! hydrates itself from durable storage at construction, and writes every
//! mutation back through (set on login/register, delete on logout).
//!
//! The token is a plain base64 encoding of the user id, email, and a
//! timestamp. It is reversible and carries no server-verifiable signature;
//! the backend accepts it as an opaque bearer value. Do not mistake it for
//! a security credential.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::{error, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::models::UserProfile;
use crate::storage::Storage;

use super::AuthError;

/// Durable-storage key holding the bearer token
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Durable-storage key holding the signed-in user record (JSON)
pub const CURRENT_USER_KEY: &str = "currentUser";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub email: String,
}

/// Authenticated-session state. One per process; mutated only by
/// `register`, `login`, and `logout`.
///
/// Two overlapping login attempts are not serialized against each other:
/// whichever completes last overwrites the session (last write wins).
pub struct SessionStore {
    api: ApiClient,
    storage: Storage,
    current_user: Option<UserRecord>,
    auth_token: Option<String>,
}

impl SessionStore {
    /// Create the store and hydrate it from durable storage.
    pub fn new(api: ApiClient, storage: Storage) -> Self {
        let mut store = Self {
            api,
            storage,
            current_user: None,
            auth_token: None,
        };
        store.hydrate();
        store
    }

    /// Restore a persisted session. The token and the user record must both
    /// be present and parseable; half a session is cleared rather than kept.
    fn hydrate(&mut self) {
        let token = self.storage.get(AUTH_TOKEN_KEY).filter(|t| !t.is_empty());
        let raw_user = self.storage.get(CURRENT_USER_KEY);

        match (token, raw_user) {
            (Some(token), Some(raw)) => match serde_json::from_str::<UserRecord>(&raw) {
                Ok(user) => {
                    info!(user_id = %user.user_id, "Restored persisted session");
                    self.auth_token = Some(token);
                    self.current_user = Some(user);
                }
                Err(e) => {
                    warn!(error = %e, "Stored user record is corrupt, clearing session");
                    self.clear();
                }
            },
            (None, None) => {}
            _ => {
                warn!("Found a partial persisted session, clearing it");
                self.clear();
            }
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Register a new account and open a session for it.
    pub async fn register(&mut self, email: &str, password: &str) -> Result<(), AuthError> {
        let password_hash = hash_password(password);

        let response = self
            .api
            .register(email, &password_hash)
            .await
            .map_err(map_register_error)?;

        match response.user_id {
            Some(user_id) if !user_id.is_empty() => {
                self.establish(user_id, email);
                Ok(())
            }
            // A 2xx without a userId is still a failure; leave state untouched.
            _ => Err(AuthError::Unknown(
                "Registration failed. Please try again.".to_string(),
            )),
        }
    }

    /// Log in to an existing account.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), AuthError> {
        let password_hash = hash_password(password);

        let response = self
            .api
            .login(email, &password_hash)
            .await
            .map_err(map_login_error)?;

        match response.user_id {
            Some(user_id) if !user_id.is_empty() => {
                self.establish(user_id, email);
                Ok(())
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    /// Close the session: memory and both storage entries. Never fails.
    pub fn logout(&mut self) {
        info!("Logging out");
        self.clear();
    }

    fn clear(&mut self) {
        self.current_user = None;
        self.auth_token = None;
        self.storage.remove(AUTH_TOKEN_KEY);
        self.storage.remove(CURRENT_USER_KEY);
    }

    /// Record the user and derived token in memory and storage.
    fn establish(&mut self, user_id: String, email: &str) {
        let user = UserRecord {
            user_id,
            email: email.to_string(),
        };
        let token = derive_token(&user);

        if let Err(e) = self.storage.set(AUTH_TOKEN_KEY, &token) {
            warn!(error = %e, "Failed to persist auth token");
        }
        if let Err(e) = self.storage.set_json(CURRENT_USER_KEY, &user) {
            warn!(error = %e, "Failed to persist user record");
        }

        info!(user_id = %user.user_id, "Session established");
        self.auth_token = Some(token);
        self.current_user = Some(user);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Fetch the signed-in user's profile. Read-only enrichment: any remote
    /// failure is reported as "no data" rather than an error.
    pub async fn get_user_info(&self) -> Option<UserProfile> {
        let user = self.current_user.as_ref()?;
        match self.api.get_user(&user.user_id).await {
            Ok(rows) => rows.into_iter().next(),
            Err(e) => {
                error!(error = %e, "Failed to fetch user info");
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn current_user(&self) -> Option<&UserRecord> {
        self.current_user.as_ref()
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn user_email(&self) -> String {
        self.current_user
            .as_ref()
            .map(|u| u.email.clone())
            .unwrap_or_default()
    }

    pub fn user_id(&self) -> String {
        self.current_user
            .as_ref()
            .map(|u| u.user_id.clone())
            .unwrap_or_default()
    }
}

/// SHA-256 hex digest; the cleartext password never goes on the wire.
fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Encode `{userId, email, timestamp}` as the session's bearer token.
fn derive_token(user: &UserRecord) -> String {
    let payload = json!({
        "userId": user.user_id,
        "email": user.email,
        "timestamp": Utc::now().timestamp_millis(),
    });
    BASE64.encode(payload.to_string())
}

fn map_register_error(err: ApiError) -> AuthError {
    match err {
        ApiError::Conflict(_) => AuthError::Conflict,
        ApiError::InvalidRequest(_) => AuthError::InvalidInput,
        other => AuthError::Unknown(other.to_string()),
    }
}

fn map_login_error(err: ApiError) -> AuthError {
    match err {
        ApiError::Unauthorized => AuthError::InvalidCredentials,
        ApiError::NotFound(_) => AuthError::UserNotFound,
        other => AuthError::Unknown(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Store plus a second storage handle on the same directory for
    /// inspecting what was persisted.
    fn store_at(dir: &std::path::Path, server: &MockServer) -> (SessionStore, Storage) {
        let storage = Storage::open(dir.to_path_buf()).expect("open storage");
        let inspect = Storage::open(dir.to_path_buf()).expect("open storage");
        let api = ApiClient::new(&server.uri()).expect("build client");
        (SessionStore::new(api, storage), inspect)
    }

    async fn mock_login(server: &MockServer, email: &str, user_id: &str) {
        Mock::given(method("POST"))
            .and(path("/api/UserAuth/login"))
            .and(body_json(json!({
                "email": email,
                "passwordHash": hash_password("secret"),
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "userId": user_id })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_login_success_sets_state_and_storage() {
        let server = MockServer::start().await;
        mock_login(&server, "a@x.com", "u1").await;

        let dir = tempfile::tempdir().expect("tempdir");
        let (mut session, inspect) = store_at(dir.path(), &server);

        session.login("a@x.com", "secret").await.expect("login");

        assert!(session.is_authenticated());
        assert_eq!(
            session.current_user(),
            Some(&UserRecord {
                user_id: "u1".to_string(),
                email: "a@x.com".to_string(),
            })
        );
        assert_eq!(session.user_email(), "a@x.com");
        assert_eq!(session.user_id(), "u1");

        // Persisted state mirrors memory exactly
        let token = session.auth_token().expect("token").to_string();
        assert!(!token.is_empty());
        assert_eq!(inspect.get(AUTH_TOKEN_KEY).as_deref(), Some(token.as_str()));
        let stored_user: UserRecord =
            serde_json::from_str(&inspect.get(CURRENT_USER_KEY).expect("user entry"))
                .expect("parse stored user");
        assert_eq!(Some(&stored_user), session.current_user());
    }

    #[tokio::test]
    async fn test_token_payload_is_reversible() {
        let server = MockServer::start().await;
        mock_login(&server, "a@x.com", "u1").await;

        let dir = tempfile::tempdir().expect("tempdir");
        let (mut session, _) = store_at(dir.path(), &server);
        session.login("a@x.com", "secret").await.expect("login");

        let decoded = BASE64
            .decode(session.auth_token().expect("token"))
            .expect("base64 decode");
        let payload: serde_json::Value = serde_json::from_slice(&decoded).expect("json payload");
        assert_eq!(payload["userId"], "u1");
        assert_eq!(payload["email"], "a@x.com");
        assert!(payload["timestamp"].as_i64().expect("timestamp") > 0);
    }

    #[tokio::test]
    async fn test_register_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/UserAuth/register"))
            .and(body_json(json!({
                "email": "new@x.com",
                "passwordHash": hash_password("secret"),
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "userId": "u9" })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().expect("tempdir");
        let (mut session, _) = store_at(dir.path(), &server);

        session.register("new@x.com", "secret").await.expect("register");
        assert!(session.is_authenticated());
        assert_eq!(session.user_id(), "u9");
    }

    #[tokio::test]
    async fn test_register_conflict() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/UserAuth/register"))
            .respond_with(
                ResponseTemplate::new(409).set_body_json(json!({ "error": "email exists" })),
            )
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().expect("tempdir");
        let (mut session, _) = store_at(dir.path(), &server);

        let err = session
            .register("dup@x.com", "secret")
            .await
            .expect_err("must fail");
        assert!(matches!(err, AuthError::Conflict));
        assert!(err.to_string().starts_with("Email already exists"));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_register_missing_user_id_leaves_state_unchanged() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/UserAuth/register"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().expect("tempdir");
        let (mut session, inspect) = store_at(dir.path(), &server);

        let err = session
            .register("a@x.com", "pw")
            .await
            .expect_err("2xx without userId is a failure");
        assert!(matches!(err, AuthError::Unknown(_)));

        // No partial write anywhere
        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());
        assert!(inspect.get(AUTH_TOKEN_KEY).is_none());
        assert!(inspect.get(CURRENT_USER_KEY).is_none());
    }

    #[tokio::test]
    async fn test_login_401_maps_to_invalid_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/UserAuth/login"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().expect("tempdir");
        let (mut session, _) = store_at(dir.path(), &server);

        let err = session.login("a@x.com", "bad").await.expect_err("must fail");
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_404_maps_to_user_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/UserAuth/login"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().expect("tempdir");
        let (mut session, _) = store_at(dir.path(), &server);

        let err = session.login("who@x.com", "pw").await.expect_err("must fail");
        assert!(matches!(err, AuthError::UserNotFound));
    }

    #[tokio::test]
    async fn test_logout_clears_memory_and_storage() {
        let server = MockServer::start().await;
        mock_login(&server, "a@x.com", "u1").await;

        let dir = tempfile::tempdir().expect("tempdir");
        let (mut session, inspect) = store_at(dir.path(), &server);
        session.login("a@x.com", "secret").await.expect("login");

        session.logout();

        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());
        assert!(session.auth_token().is_none());
        assert_eq!(session.user_email(), "");
        assert_eq!(session.user_id(), "");
        assert!(inspect.get(AUTH_TOKEN_KEY).is_none());
        assert!(inspect.get(CURRENT_USER_KEY).is_none());
    }

    #[tokio::test]
    async fn test_hydrate_restores_persisted_session() {
        let server = MockServer::start().await;
        mock_login(&server, "a@x.com", "u1").await;

        let dir = tempfile::tempdir().expect("tempdir");
        {
            let (mut session, _) = store_at(dir.path(), &server);
            session.login("a@x.com", "secret").await.expect("login");
        }

        // A fresh store on the same directory picks the session back up
        let (session, _) = store_at(dir.path(), &server);
        assert!(session.is_authenticated());
        assert_eq!(session.user_id(), "u1");
        assert_eq!(session.user_email(), "a@x.com");
    }

    #[tokio::test]
    async fn test_hydrate_clears_corrupt_user_record() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().expect("tempdir");

        let seed = Storage::open(dir.path().to_path_buf()).expect("storage");
        seed.set(AUTH_TOKEN_KEY, "tok").expect("set token");
        seed.set(CURRENT_USER_KEY, "{ not json").expect("set user");

        let (session, inspect) = store_at(dir.path(), &server);
        assert!(!session.is_authenticated());
        assert!(inspect.get(AUTH_TOKEN_KEY).is_none());
        assert!(inspect.get(CURRENT_USER_KEY).is_none());
    }

    #[tokio::test]
    async fn test_hydrate_clears_token_without_user() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().expect("tempdir");

        let seed = Storage::open(dir.path().to_path_buf()).expect("storage");
        seed.set(AUTH_TOKEN_KEY, "tok").expect("set token");

        let (session, inspect) = store_at(dir.path(), &server);
        assert!(!session.is_authenticated());
        assert!(inspect.get(AUTH_TOKEN_KEY).is_none());
    }

    #[tokio::test]
    async fn test_second_login_overwrites_first() {
        // Two racing submissions resolve to whichever completed last.
        let server = MockServer::start().await;
        mock_login(&server, "a@x.com", "u1").await;
        mock_login(&server, "b@x.com", "u2").await;

        let dir = tempfile::tempdir().expect("tempdir");
        let (mut session, inspect) = store_at(dir.path(), &server);

        session.login("a@x.com", "secret").await.expect("first login");
        session.login("b@x.com", "secret").await.expect("second login");

        assert_eq!(session.user_id(), "u2");
        assert_eq!(session.user_email(), "b@x.com");
        let stored_user: UserRecord =
            serde_json::from_str(&inspect.get(CURRENT_USER_KEY).expect("user entry"))
                .expect("parse stored user");
        assert_eq!(stored_user.user_id, "u2");
    }

    #[tokio::test]
    async fn test_get_user_info_without_session_is_none() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().expect("tempdir");
        let (session, _) = store_at(dir.path(), &server);

        // No remote call is made; the mock server has no expectations.
        assert!(session.get_user_info().await.is_none());
    }

    #[tokio::test]
    async fn test_get_user_info_swallows_remote_errors() {
        let server = MockServer::start().await;
        mock_login(&server, "a@x.com", "u1").await;
        Mock::given(method("POST"))
            .and(path("/api/UserAuth/_getUser"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().expect("tempdir");
        let (mut session, _) = store_at(dir.path(), &server);
        session.login("a@x.com", "secret").await.expect("login");

        assert!(session.get_user_info().await.is_none());
    }

    #[tokio::test]
    async fn test_get_user_info_returns_first_row() {
        let server = MockServer::start().await;
        mock_login(&server, "a@x.com", "u1").await;
        Mock::given(method("POST"))
            .and(path("/api/UserAuth/_getUser"))
            .and(body_json(json!({ "userId": "u1" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "userId": "u1", "email": "a@x.com", "createdAt": "2025-10-01T00:00:00Z" }
            ])))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().expect("tempdir");
        let (mut session, _) = store_at(dir.path(), &server);
        session.login("a@x.com", "secret").await.expect("login");

        let profile = session.get_user_info().await.expect("profile");
        assert_eq!(profile.user_id, "u1");
        assert_eq!(profile.created_at.as_deref(), Some("2025-10-01T00:00:00Z"));
    }

    #[test]
    fn test_hash_password_is_sha256_hex() {
        // Well-known digest of the empty string
        assert_eq!(
            hash_password(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(hash_password("secret").len(), 64);
    }
}
