use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use moodtunes_types::api::{LoginRequest, LoginResponse, MeResponse, SignupRequest, SignupResponse};

use crate::error::ClientError;
use crate::http::CloudClient;
use crate::storage::{LocalStorage, SESSION_KEY};

pub const NETWORK_REQUEST_FAILED: &str = "auth/network-request-failed";

/// Signed-in identity, persisted under `auth:session`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub token: String,
}

/// Sign-in or sign-up failure, carrying the message to show the user.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AuthFailure {
    pub code: Option<String>,
    pub message: String,
}

pub struct AuthClient {
    cloud: CloudClient,
    storage: Arc<LocalStorage>,
}

impl AuthClient {
    pub fn new(cloud: CloudClient, storage: Arc<LocalStorage>) -> Self {
        Self { cloud, storage }
    }

    /// Picks up a stored session and authenticates the shared client with it.
    pub fn restore(&self) -> Option<Session> {
        let session = self.current()?;
        self.cloud.set_token(Some(session.token.clone()));
        Some(session)
    }

    pub fn current(&self) -> Option<Session> {
        match self.storage.get_json::<Session>(SESSION_KEY) {
            Ok(session) => session,
            Err(e) => {
                warn!("Discarding unreadable session: {}", e);
                None
            }
        }
    }

    /// Creates the account without signing in; the user logs in afterwards.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<String, AuthFailure> {
        validate_signup(email, password)?;

        let req = SignupRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
            display_name: display_name.map(str::to_string),
        };
        let resp: SignupResponse = self
            .cloud
            .post_json("/auth/signup", &req)
            .await
            .map_err(|e| failure(e, describe_signup_error))?;

        info!("Account {} created", resp.user_id);
        Ok(resp.user_id.to_string())
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthFailure> {
        validate_login(email, password)?;

        let req = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let resp: LoginResponse = self
            .cloud
            .post_json("/auth/login", &req)
            .await
            .map_err(|e| failure(e, describe_login_error))?;

        let session = Session {
            user_id: resp.user_id.to_string(),
            email: resp.email,
            token: resp.token,
        };
        if let Err(e) = self.storage.set_json(SESSION_KEY, &session) {
            warn!("Session not persisted: {}", e);
        }
        self.cloud.set_token(Some(session.token.clone()));
        info!("Signed in as {}", session.email);
        Ok(session)
    }

    /// Drops the local session even when the server cannot be reached.
    pub async fn sign_out(&self) -> anyhow::Result<()> {
        if self.cloud.token().is_some() {
            if let Err(e) = self.cloud.send::<()>(reqwest::Method::POST, "/auth/logout", None).await {
                warn!("Logout request failed: {}", e);
            }
        }
        self.cloud.set_token(None);
        self.storage.remove_item(SESSION_KEY)
    }

    pub async fn me(&self) -> Result<MeResponse, ClientError> {
        self.cloud.get_json("/auth/me").await
    }
}

fn failure(err: ClientError, describe: fn(Option<&str>, Option<&str>) -> String) -> AuthFailure {
    let (code, server_message) = match &err {
        ClientError::Network(_) => (Some(NETWORK_REQUEST_FAILED.to_string()), None),
        ClientError::Remote { code, message, .. } => {
            (Some(code.clone()), Some(message.as_str()).filter(|m| !m.is_empty()))
        }
        _ => (None, None),
    };
    AuthFailure {
        message: describe(code.as_deref(), server_message),
        code,
    }
}

fn invalid(message: &str) -> AuthFailure {
    AuthFailure {
        code: None,
        message: message.to_string(),
    }
}

fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let no_space = |s: &str| !s.is_empty() && !s.chars().any(char::is_whitespace);
    no_space(local)
        && no_space(domain)
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

/// Form checks run before any request is sent.
pub fn validate_login(email: &str, password: &str) -> Result<(), AuthFailure> {
    if email.is_empty() || password.is_empty() {
        return Err(invalid("Please fill in all fields"));
    }
    if !looks_like_email(email.trim()) {
        return Err(invalid("Please enter a valid email address"));
    }
    if password.chars().count() < 6 {
        return Err(invalid("Password must be at least 6 characters long"));
    }
    Ok(())
}

pub fn validate_signup(email: &str, password: &str) -> Result<(), AuthFailure> {
    if email.trim().is_empty() || password.trim().is_empty() {
        return Err(invalid("Please fill in all fields"));
    }
    if password.chars().count() < 6 {
        return Err(invalid("Password must be at least 6 characters long"));
    }
    Ok(())
}

pub fn describe_login_error(code: Option<&str>, server_message: Option<&str>) -> String {
    let known = match code {
        Some("auth/user-not-found") => {
            "No account found with this email address. Please check your email or sign up for a new account."
        }
        Some("auth/wrong-password") => "Incorrect password. Please check your password and try again.",
        Some("auth/invalid-email") => "Invalid email address format. Please enter a valid email.",
        Some("auth/user-disabled") => "This account has been disabled. Please contact support.",
        Some("auth/too-many-requests") => "Too many failed login attempts. Please try again later.",
        Some(NETWORK_REQUEST_FAILED) => {
            "Network error. Please check your internet connection and try again."
        }
        Some("auth/invalid-credential") => "Invalid credentials. Please check your email and password.",
        Some("auth/operation-not-allowed") => {
            "Email/password accounts are not enabled. Please contact support."
        }
        _ => return server_message.unwrap_or("Login failed. Please try again.").to_string(),
    };
    known.to_string()
}

pub fn describe_signup_error(code: Option<&str>, server_message: Option<&str>) -> String {
    let known = match code {
        Some("auth/email-already-in-use") => "An account with this email already exists",
        Some("auth/invalid-email") => "Invalid email address",
        Some("auth/weak-password") => "Password should be at least 6 characters",
        Some(NETWORK_REQUEST_FAILED) => "Network error. Please check your connection",
        _ => {
            return server_message
                .unwrap_or("An error occurred during sign up")
                .to_string();
        }
    };
    known.to_string()
}
