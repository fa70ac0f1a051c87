use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use jsonwebtoken::{EncodingKey, Header, encode};
use tracing::{info, warn};
use uuid::Uuid;

use moodtunes_db::Database;
use moodtunes_types::api::{
    Claims, LoginRequest, LoginResponse, MeResponse, SignupRequest, SignupResponse,
};

use crate::error::{ApiError, AuthErrorCode, blocking};

pub type AppState = Arc<AppStateInner>;

const MIN_PASSWORD_LEN: usize = 6;

pub struct AppStateInner {
    pub db: Database,
    pub jwt_secret: String,
    pub token_ttl: chrono::Duration,
    pub throttle: LoginThrottle,
}

impl AppStateInner {
    pub fn new(db: Database, jwt_secret: String, token_ttl_days: i64) -> AppState {
        Arc::new(Self {
            db,
            jwt_secret,
            token_ttl: chrono::Duration::days(token_ttl_days),
            throttle: LoginThrottle::new(5, Duration::from_secs(15 * 60)),
        })
    }
}

/// Counts failed password attempts per email inside a sliding window.
pub struct LoginThrottle {
    failures: Mutex<HashMap<String, Vec<Instant>>>,
    max_failures: usize,
    window: Duration,
}

impl LoginThrottle {
    pub fn new(max_failures: usize, window: Duration) -> Self {
        Self {
            failures: Mutex::new(HashMap::new()),
            max_failures,
            window,
        }
    }

    pub fn is_locked(&self, email: &str) -> bool {
        let mut failures = self.failures.lock().unwrap_or_else(|e| e.into_inner());
        let Some(times) = failures.get_mut(email) else {
            return false;
        };
        times.retain(|t| t.elapsed() < self.window);
        if times.is_empty() {
            failures.remove(email);
            return false;
        }
        times.len() >= self.max_failures
    }

    pub fn record_failure(&self, email: &str) {
        let mut failures = self.failures.lock().unwrap_or_else(|e| e.into_inner());
        failures.entry(email.to_string()).or_default().push(Instant::now());
    }

    pub fn clear(&self, email: &str) {
        self.failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(email);
    }
}

pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = normalize_email(&req.email);
    if !is_valid_email(&email) {
        return Err(AuthErrorCode::InvalidEmail.into());
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthErrorCode::WeakPassword.into());
    }
    let display_name = req
        .display_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    let db = state.clone();
    let lookup = email.clone();
    if blocking(move || db.db.get_user_by_email(&lookup)).await?.is_some() {
        return Err(AuthErrorCode::EmailAlreadyInUse.into());
    }

    // Hash password with Argon2id
    let password = req.password;
    let password_hash = blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| anyhow::anyhow!("password hashing failed: {}", e))
    })
    .await?;

    let user_id = Uuid::new_v4();

    let db = state.clone();
    let uid = user_id.to_string();
    let em = email.clone();
    blocking(move || db.db.create_user(&uid, &em, display_name.as_deref(), &password_hash))
        .await
        .map_err(duplicate_email)?;

    let token = create_token(&state, user_id, &email)?;
    info!("Registered user {}", user_id);

    Ok((StatusCode::CREATED, Json(SignupResponse { user_id, token })))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email = normalize_email(&req.email);
    if !is_valid_email(&email) {
        return Err(AuthErrorCode::InvalidEmail.into());
    }
    if state.throttle.is_locked(&email) {
        warn!("Login throttled for {}", email);
        return Err(AuthErrorCode::TooManyRequests.into());
    }

    let db = state.clone();
    let lookup = email.clone();
    let user = blocking(move || db.db.get_user_by_email(&lookup))
        .await?
        .ok_or(ApiError::Auth(AuthErrorCode::UserNotFound))?;

    if user.disabled {
        return Err(AuthErrorCode::UserDisabled.into());
    }

    let stored = user.password.clone();
    let password = req.password;
    let verified = blocking(move || {
        let parsed = PasswordHash::new(&stored).map_err(|e| anyhow::anyhow!("{}", e))?;
        Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
    })
    .await
    .map_err(|e| match e {
        ApiError::Internal(inner) => {
            warn!("Unreadable password hash for user {}: {}", user.id, inner);
            ApiError::Auth(AuthErrorCode::InvalidCredential)
        }
        other => other,
    })?;

    if !verified {
        state.throttle.record_failure(&email);
        return Err(AuthErrorCode::WrongPassword.into());
    }
    state.throttle.clear(&email);

    let user_id: Uuid = user
        .id
        .parse()
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("corrupt user id '{}': {}", user.id, e)))?;
    let token = create_token(&state, user_id, &user.email)?;

    Ok(Json(LoginResponse {
        user_id,
        email: user.email,
        token,
    }))
}

/// Sessions are stateless tokens; signing out is the client dropping its token.
pub async fn logout(Extension(claims): Extension<Claims>) -> StatusCode {
    info!("User {} signed out", claims.sub);
    StatusCode::NO_CONTENT
}

pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<MeResponse>, ApiError> {
    let db = state.clone();
    let uid = claims.sub.to_string();
    let user = blocking(move || db.db.get_user_by_id(&uid))
        .await?
        .ok_or(ApiError::NotFound("user"))?;

    Ok(Json(MeResponse {
        user_id: claims.sub,
        email: user.email,
        display_name: user.display_name,
    }))
}

pub fn create_token(state: &AppStateInner, user_id: Uuid, email: &str) -> Result<String, ApiError> {
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        exp: (chrono::Utc::now() + state.token_ttl).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.jwt_secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(e.into()))?;

    Ok(token)
}

/// A concurrent signup can pass the lookup and lose the insert race on the UNIQUE email.
fn duplicate_email(err: ApiError) -> ApiError {
    match err {
        ApiError::Internal(e) if moodtunes_db::queries::is_unique_violation(&e) => {
            AuthErrorCode::EmailAlreadyInUse.into()
        }
        other => other,
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
