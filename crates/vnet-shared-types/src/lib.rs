pub mod error;
pub mod resource;
pub mod wire;

pub use error::{SharedResult, SharedTypeError};
pub use resource::{validate_identifier, NetworkSummary, PortDetail, PortSummary};
pub use wire::{
    AttachmentFields, AttachmentRequest, AttachmentResponse, CreatedNetwork, CreatedPort,
    NetworkCreatedResponse, NetworkFields, NetworkListResponse, NetworkRequest, PortCreatedResponse,
    PortDetailEnvelope, PortDetailResponse, PortListResponse, ResourceId,
};
