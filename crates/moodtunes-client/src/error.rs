use thiserror::Error;

/// Transport-level failure talking to the MoodTunes server.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced an HTTP response.
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status and an error body.
    #[error("{message}")]
    Remote {
        status: u16,
        code: String,
        message: String,
    },

    #[error("invalid response: {0}")]
    Decode(String),

    #[error("HTTP client setup failed: {0}")]
    Setup(String),
}

impl ClientError {
    /// Server-side error code, e.g. `permission-denied` or `auth/wrong-password`.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Remote { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// How a failed cloud call should be treated by the screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Access rules rejected the call.
    Permission,
    /// The store could not be reached.
    Network,
    Other,
}

impl FailureKind {
    /// Classifies by code and message text only.
    pub fn classify(err: &ClientError) -> Self {
        let message = err.to_string();
        if err.code() == Some("permission-denied") || message.contains("permissions") {
            return Self::Permission;
        }
        if matches!(err, ClientError::Network(_))
            || message.contains("fetch failed")
            || message.contains("network")
        {
            return Self::Network;
        }
        Self::Other
    }
}

/// Generic per-operation failure surfaced by the cloud services.
#[derive(Debug, Error)]
#[error("Failed to {operation}")]
pub struct ServiceError {
    pub operation: &'static str,
    pub kind: FailureKind,
    #[source]
    pub source: ClientError,
}

impl ServiceError {
    pub(crate) fn new(operation: &'static str, source: ClientError) -> Self {
        Self {
            operation,
            kind: FailureKind::classify(&source),
            source,
        }
    }

    pub fn is_permission(&self) -> bool {
        self.kind == FailureKind::Permission
    }

    /// Permission or network shaped: the cloud is unusable right now.
    pub fn is_unavailable(&self) -> bool {
        matches!(self.kind, FailureKind::Permission | FailureKind::Network)
    }
}
