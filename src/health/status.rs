// src/health/status.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io;

/// Last report recorded for a single component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentHealth {
    Healthy { message: String },
    Unhealthy { message: String },
}

impl ComponentHealth {
    pub fn is_healthy(&self) -> bool {
        matches!(self, ComponentHealth::Healthy { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            ComponentHealth::Healthy { message } | ComponentHealth::Unhealthy { message } => message,
        }
    }
}

/// Aggregate status handed to the probe server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub healthy: bool,
    pub description: String,
}

impl HealthStatus {
    pub fn new(healthy: bool, description: impl Into<String>) -> Self {
        Self {
            healthy,
            description: description.into(),
        }
    }
}

impl From<(bool, String)> for HealthStatus {
    fn from((healthy, description): (bool, String)) -> Self {
        Self { healthy, description }
    }
}

/// Body of a report with no components.
pub(crate) const EMPTY_REPORT_JSON: &str = r#"{"healthy": {}, "not healthy": {}}"#;

/// Per-component breakdown, serialized as the probe response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub healthy: BTreeMap<String, String>,
    #[serde(rename = "not healthy")]
    pub not_healthy: BTreeMap<String, String>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.not_healthy.is_empty()
    }

    /// Render as JSON with `", "` and `": "` separators.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut buf = Vec::with_capacity(64);
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
        self.serialize(&mut ser)?;
        // serde_json only ever emits valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

struct SpacedFormatter;

impl serde_json::ser::Formatter for SpacedFormatter {
    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}
