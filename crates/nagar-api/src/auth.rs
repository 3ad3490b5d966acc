use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use anyhow::{Result, anyhow};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};
use chrono::Local;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::info;

use nagar_store::reports::ReportStore;
use nagar_store::sessions::{self, SessionStore};
use nagar_store::users::UserStore;
use nagar_types::api::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest, SessionResponse};
use nagar_types::models::{Identity, Role, UserRecord};

use crate::error::ApiError;

/// The administrator is not a row in the user store. Its name and password
/// digest are fixed here and special-cased on every authentication path.
pub const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD_SHA256: &str =
    "b2fe8b46929bfa4c65fee9d5d43a2423799b18e360782e9abc27bd420877243e";

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub users: UserStore,
    pub sessions: SessionStore,
    pub reports: ReportStore,
    // Admin handles never reach the session file; they die with the server.
    admin_tokens: RwLock<HashSet<String>>,
}

impl AppStateInner {
    pub fn new(users: UserStore, sessions: SessionStore, reports: ReportStore) -> Self {
        Self {
            users,
            sessions,
            reports,
            admin_tokens: RwLock::new(HashSet::new()),
        }
    }

    fn issue_admin_token(&self) -> Result<String> {
        let token = sessions::generate_token();
        self.admin_tokens_mut()?.insert(token.clone());
        Ok(token)
    }

    fn is_admin_token(&self, token: &str) -> Result<bool> {
        Ok(self
            .admin_tokens
            .read()
            .map_err(|e| anyhow!("admin token lock poisoned: {}", e))?
            .contains(token))
    }

    fn revoke_admin_token(&self, token: &str) -> Result<bool> {
        Ok(self.admin_tokens_mut()?.remove(token))
    }

    fn admin_tokens_mut(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashSet<String>>> {
        self.admin_tokens
            .write()
            .map_err(|e| anyhow!("admin token lock poisoned: {}", e))
    }
}

/// Hex-encoded SHA-256 digest, the stored password format.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Map a token back to the identity it stands for: admin handles first,
/// then the persisted sessions. A session whose user record has since
/// disappeared resolves to nothing.
pub fn resolve_identity(state: &AppState, token: &str) -> Result<Option<Identity>> {
    if state.is_admin_token(token)? {
        return Ok(Some(Identity::Admin));
    }
    let Some(session) = state.sessions.lookup(token)? else {
        return Ok(None);
    };
    if session.username == ADMIN_USERNAME {
        return Ok(Some(Identity::Admin));
    }
    let Some(record) = state.users.get(&session.username)? else {
        return Ok(None);
    };
    Ok(Some(Identity::Registered {
        username: session.username,
        full_name: record.full_name,
        email: record.email,
        role: record.role,
    }))
}

/// POST /auth/register. Validation failures are reported one at a time,
/// in a fixed order, first failure wins.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.username.is_empty() || req.password.is_empty() || req.email.is_empty() {
        return Err(ApiError::MissingFields);
    }
    if req.username.chars().count() < 3 {
        return Err(ApiError::UsernameTooShort);
    }
    if req.password.chars().count() < 6 {
        return Err(ApiError::PasswordTooShort);
    }
    if req.username.to_lowercase() == ADMIN_USERNAME {
        return Err(ApiError::ReservedUsername);
    }
    if state.users.contains(&req.username)? {
        return Err(ApiError::UsernameTaken);
    }
    if state.users.email_taken(&req.email)? {
        return Err(ApiError::EmailTaken);
    }

    let record = UserRecord {
        password_hash: hash_password(&req.password),
        email: req.email,
        full_name: req.full_name,
        role: Role::User,
        created_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    };
    state.users.insert(&req.username, record)?;
    info!("Registered user {}", req.username);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Registration successful! Please login.".to_string(),
        }),
    ))
}

/// POST /auth/login. The admin branch checks the fixed digest and hands
/// out a process-local token; registered users get a persisted session.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(ApiError::MissingCredentials);
    }

    if req.username == ADMIN_USERNAME {
        if hash_password(&req.password) != ADMIN_PASSWORD_SHA256 {
            return Err(ApiError::InvalidCredentials);
        }
        let token = state.issue_admin_token()?;
        info!("Administrator logged in");
        return Ok(Json(LoginResponse {
            message: "Welcome, Administrator!".to_string(),
            token,
            identity: Identity::Admin,
        }));
    }

    let Some(record) = state.users.get(&req.username)? else {
        return Err(ApiError::InvalidUsernameOrPassword);
    };
    if record.password_hash != hash_password(&req.password) {
        return Err(ApiError::InvalidUsernameOrPassword);
    }

    let token = state.sessions.create(&req.username)?;
    let identity = Identity::Registered {
        username: req.username.clone(),
        full_name: record.full_name,
        email: record.email,
        role: record.role,
    };
    info!("User {} logged in", req.username);

    Ok(Json(LoginResponse {
        message: format!("Welcome, {}!", identity.display_name()),
        token,
        identity,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    token: Option<String>,
}

/// GET /auth/session. Restores an identity from a token carried either as
/// a bearer header or a `token` query parameter; the latter is what a
/// browser tab replays after a reload.
pub async fn session(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<SessionResponse>, ApiError> {
    let token = match (&bearer, query.token) {
        (Some(TypedHeader(Authorization(b))), _) => b.token().to_string(),
        (None, Some(token)) => token,
        (None, None) => return Err(ApiError::InvalidSession),
    };

    let identity = resolve_identity(&state, &token)?.ok_or(ApiError::InvalidSession)?;
    Ok(Json(SessionResponse { identity }))
}

/// POST /auth/logout. Dropping an unknown or absent token is fine; the
/// caller ends up logged out either way.
pub async fn logout(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<Json<MessageResponse>, ApiError> {
    if let Some(TypedHeader(Authorization(b))) = bearer {
        let token = b.token();
        if state.revoke_admin_token(token)? || state.sessions.remove(token)? {
            info!("Session revoked");
        }
    }
    Ok(Json(MessageResponse {
        message: "Logged out.".to_string(),
    }))
}
