// src/server/response.rs
use crate::health::HealthStatus;
use hyper::StatusCode;

/// The single HTTP answer a probe connection receives.
///
/// Only a status line and the body are written, no headers; the body
/// ends when the connection is closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    status: StatusCode,
    body: String,
}

impl ProbeResponse {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn status_line(&self) -> String {
        let reason = self
            .status
            .canonical_reason()
            .unwrap_or_default()
            .to_ascii_uppercase();
        format!("HTTP/1.1 {} {}", self.status.as_u16(), reason)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        let mut bytes = self.status_line().into_bytes();
        bytes.extend_from_slice(b"\r\n\r\n");
        bytes.extend_from_slice(self.body.as_bytes());
        bytes
    }
}

impl From<HealthStatus> for ProbeResponse {
    fn from(status: HealthStatus) -> Self {
        let code = if status.healthy {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };

        Self {
            status: code,
            body: status.description,
        }
    }
}
