use tracing::{error, info};

use moodtunes_types::api::HealthResponse;

use crate::error::ClientError;
use crate::http::CloudClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionReport {
    pub success: bool,
    pub error: Option<String>,
    pub details: Option<String>,
}

/// Round trip to `/health`, translated into something a settings screen can show.
pub async fn check_connection(cloud: &CloudClient) -> ConnectionReport {
    match cloud.get_json::<HealthResponse>("/health").await {
        Ok(health) if health.database => {
            info!("Connection to {} OK", cloud.base_url());
            ConnectionReport {
                success: true,
                error: None,
                details: None,
            }
        }
        Ok(health) => ConnectionReport {
            success: false,
            error: Some("Service unavailable - check network connection".into()),
            details: Some(format!("server status: {}", health.status)),
        },
        Err(e) => {
            error!("Connection check failed: {}", e);
            report_failure(&e)
        }
    }
}

fn report_failure(err: &ClientError) -> ConnectionReport {
    let error = match err {
        ClientError::Network(_) => "Service unavailable - check network connection",
        _ => match err.code() {
            Some("permission-denied") => "Permission denied - check access rules",
            Some("unavailable") => "Service unavailable - check network connection",
            Some("invalid-api-key") => "Invalid API key in configuration",
            _ => "Unknown error",
        },
    };
    ConnectionReport {
        success: false,
        error: Some(error.to_string()),
        details: Some(err.to_string()),
    }
}
