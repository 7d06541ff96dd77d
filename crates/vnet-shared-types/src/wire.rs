//! JSON bodies exchanged with the virtual network REST API (v0.1)
//!
//! Field names follow the wire format exactly, including the hyphenated
//! `network-name` and `attachment-id` keys.

use serde::{Deserialize, Serialize};

use crate::resource::{NetworkSummary, PortDetail, PortSummary};

/// `{"network": {"network-name": ...}}`, used by create and rename.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkRequest {
    pub network: NetworkFields,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkFields {
    #[serde(rename = "network-name")]
    pub name: String,
}

impl NetworkRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            network: NetworkFields { name: name.into() },
        }
    }
}

/// `{"port": {"attachment-id": ...}}`; an empty id detaches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttachmentRequest {
    pub port: AttachmentFields,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttachmentFields {
    #[serde(rename = "attachment-id")]
    pub attachment_id: String,
}

impl AttachmentRequest {
    pub fn plug(interface: impl Into<String>) -> Self {
        Self {
            port: AttachmentFields {
                attachment_id: interface.into(),
            },
        }
    }

    pub fn unplug() -> Self {
        Self::plug("")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceId {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkListResponse {
    pub networks: Vec<NetworkSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkCreatedResponse {
    pub networks: CreatedNetwork,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedNetwork {
    pub network: ResourceId,
}

impl NetworkCreatedResponse {
    pub fn id(&self) -> &str {
        &self.networks.network.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PortListResponse {
    pub ports: Vec<PortSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PortCreatedResponse {
    pub ports: CreatedPort,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedPort {
    pub port: ResourceId,
}

impl PortCreatedResponse {
    pub fn id(&self) -> &str {
        &self.ports.port.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PortDetailResponse {
    pub ports: PortDetailEnvelope,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PortDetailEnvelope {
    pub port: PortDetail,
}

impl PortDetailResponse {
    pub fn port(&self) -> &PortDetail {
        &self.ports.port
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttachmentResponse {
    #[serde(default)]
    pub attachment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_bodies_use_wire_names() {
        let body = serde_json::to_value(NetworkRequest::new("netA")).unwrap();
        assert_eq!(body, json!({"network": {"network-name": "netA"}}));

        let body = serde_json::to_value(AttachmentRequest::plug("vif-1")).unwrap();
        assert_eq!(body, json!({"port": {"attachment-id": "vif-1"}}));

        let body = serde_json::to_value(AttachmentRequest::unplug()).unwrap();
        assert_eq!(body, json!({"port": {"attachment-id": ""}}));
    }

    #[test]
    fn test_nested_response_extraction() {
        let created: NetworkCreatedResponse =
            serde_json::from_str(r#"{"networks":{"network":{"id":"n-42"}}}"#).unwrap();
        assert_eq!(created.id(), "n-42");

        let port: PortCreatedResponse =
            serde_json::from_str(r#"{"ports":{"port":{"id":"p-7"}}}"#).unwrap();
        assert_eq!(port.id(), "p-7");

        let detail: PortDetailResponse =
            serde_json::from_str(r#"{"ports":{"port":{"id":"p-7","attachment":"vifA"}}}"#)
                .unwrap();
        assert_eq!(detail.port().attachment.as_deref(), Some("vifA"));
    }

    #[test]
    fn test_missing_nested_field_is_an_error() {
        let result: Result<NetworkCreatedResponse, _> =
            serde_json::from_str(r#"{"networks":{}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_attachment() {
        let att: AttachmentResponse = serde_json::from_str(r#"{"attachment":null}"#).unwrap();
        assert!(att.attachment.is_none());
        let att: AttachmentResponse = serde_json::from_str("{}").unwrap();
        assert!(att.attachment.is_none());
    }
}
