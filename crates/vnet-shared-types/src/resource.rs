use serde::{Deserialize, Serialize};

use crate::error::{SharedResult, SharedTypeError};

/// A virtual network as reported by a listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkSummary {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl NetworkSummary {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PortSummary {
    pub id: String,
}

/// A port together with the remote interface plugged into it, if any.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PortDetail {
    pub id: String,
    #[serde(default)]
    pub attachment: Option<String>,
}

/// Reject identifiers that cannot be carried as a single path segment.
pub fn validate_identifier(field: &'static str, value: &str) -> SharedResult<()> {
    if value.trim().is_empty() || value.contains('/') {
        return Err(SharedTypeError::InvalidValue {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
