//! Executor backed by the REST API
//!
//! Each operation builds its own request, checks the status it expects and
//! decodes the response body. A non-success status or an undecodable body
//! becomes [`CliError::Application`], which the router reports without
//! failing the process; a connection failure becomes
//! [`CliError::Transport`] and aborts the invocation.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use vnet_client::{routes, ApiRequest, ApiResponse, Method, Transport, TransportError};
use vnet_shared_types::{
    AttachmentRequest, AttachmentResponse, NetworkCreatedResponse, NetworkListResponse,
    NetworkRequest, PortCreatedResponse, PortDetailResponse, PortListResponse,
};

use super::{report, Backend, Executor};
use crate::commands::Command;
use crate::console::Console;
use crate::error::{CliError, ErrorKind};

pub struct RemoteExecutor {
    transport: Arc<dyn Transport>,
}

impl RemoteExecutor {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Send `request` and require one of `expected` as the status.
    async fn call(
        &self,
        request: ApiRequest,
        expected: &[u16],
        failure: &str,
    ) -> Result<ApiResponse, CliError> {
        let response = match self.transport.request(&request).await {
            Ok(response) => response,
            Err(TransportError::Status { status, body }) => {
                return Err(CliError::application(failure, Some(status), body))
            }
            Err(e) => return Err(CliError::Transport(e)),
        };

        if !expected.contains(&response.status) {
            return Err(CliError::application(
                format!("{} (unexpected status {})", failure, response.status),
                Some(response.status),
                response.body,
            ));
        }
        Ok(response)
    }

    fn decode<T: DeserializeOwned>(
        response: &ApiResponse,
        failure: &str,
        console: &Console,
    ) -> Result<T, CliError> {
        console.debug("response body", &response.body);
        response.json::<T>().map_err(|e| {
            CliError::application(
                format!("{}: invalid response ({})", failure, e),
                Some(response.status),
                response.body.clone(),
            )
        })
    }

    async fn network_interfaces(
        &self,
        tenant: &str,
        network: &str,
        console: &Console,
    ) -> Result<(), CliError> {
        let failure = "Failed to list ports";
        let response = self
            .call(ApiRequest::get(tenant, routes::ports(network)), &[200], failure)
            .await?;
        let ports: PortListResponse = Self::decode(&response, failure, console)?;

        report::network_interfaces_header(console, network);

        // Sequential fan-out: one attachment lookup per port, in port order.
        // A port whose lookup is rejected is reported and skipped; a
        // connection failure aborts the whole command.
        for port in &ports.ports {
            match self.port_attachment(tenant, network, &port.id, console).await {
                Ok(Some(interface)) => report::remote_interface(console, &interface),
                Ok(None) => console.debug("port without attachment", &port.id),
                Err(err) if err.kind() == ErrorKind::Application => {
                    console.failure(format!(
                        "\tFailed to get attachment for port {}: {}",
                        port.id, err
                    ));
                    if let CliError::Application {
                        body: Some(body), ..
                    } = &err
                    {
                        console.failure(format!("\t{}", body));
                    }
                }
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }

    async fn port_attachment(
        &self,
        tenant: &str,
        network: &str,
        port: &str,
        console: &Console,
    ) -> Result<Option<String>, CliError> {
        let failure = "Failed to get attachment";
        let response = self
            .call(
                ApiRequest::get(tenant, routes::attachment(network, port)),
                &[200],
                failure,
            )
            .await?;
        let attachment: AttachmentResponse = Self::decode(&response, failure, console)?;
        Ok(attachment.attachment.filter(|id| !id.is_empty()))
    }
}

fn json_request<T: serde::Serialize>(
    tenant: &str,
    method: Method,
    action: String,
    payload: &T,
) -> Result<ApiRequest, CliError> {
    ApiRequest::new(tenant, method, action)
        .with_json(payload)
        .map_err(CliError::Transport)
}

#[async_trait]
impl Executor for RemoteExecutor {
    fn backend(&self) -> Backend {
        Backend::Remote
    }

    async fn execute(&self, command: &Command, console: &Console) -> Result<(), CliError> {
        match command {
            Command::ListNetworks { tenant } => {
                let failure = "Failed to list networks";
                let response = self
                    .call(ApiRequest::get(tenant, routes::networks()), &[200], failure)
                    .await?;
                let listing: NetworkListResponse = Self::decode(&response, failure, console)?;
                report::networks_listed(console, tenant, &listing.networks);
            }
            Command::CreateNetwork { tenant, name } => {
                let failure = "Failed to create network";
                let request = json_request(
                    tenant,
                    Method::POST,
                    routes::networks(),
                    &NetworkRequest::new(name.as_str()),
                )?;
                let response = self.call(request, &[200, 201], failure).await?;
                let created: NetworkCreatedResponse = Self::decode(&response, failure, console)?;
                report::network_created(console, created.id());
            }
            Command::DeleteNetwork { tenant, network } => {
                let request = ApiRequest::new(tenant, Method::DELETE, routes::network(network));
                self.call(request, &[202], "Failed to delete network")
                    .await?;
                report::network_deleted(console, network);
            }
            Command::ShowNetwork { tenant, network } => {
                self.network_interfaces(tenant, network, console).await?;
            }
            Command::RenameNetwork {
                tenant,
                network,
                name,
            } => {
                let request = json_request(
                    tenant,
                    Method::PUT,
                    routes::network(network),
                    &NetworkRequest::new(name.as_str()),
                )?;
                let response = self
                    .call(request, &[200], "Failed to rename network")
                    .await?;
                console.debug("response body", &response.body);
                report::network_renamed(console, network);
            }
            Command::ListPorts { tenant, network } => {
                let failure = "Failed to list ports";
                let response = self
                    .call(ApiRequest::get(tenant, routes::ports(network)), &[200], failure)
                    .await?;
                let listing: PortListResponse = Self::decode(&response, failure, console)?;
                report::ports_listed(console, network, &listing.ports);
            }
            Command::CreatePort { tenant, network } => {
                let failure = "Failed to create port";
                let request = ApiRequest::new(tenant, Method::POST, routes::ports(network));
                let response = self.call(request, &[200], failure).await?;
                let created: PortCreatedResponse = Self::decode(&response, failure, console)?;
                report::port_created(console, network, created.id());
            }
            Command::DeletePort {
                tenant,
                network,
                port,
            } => {
                let request =
                    ApiRequest::new(tenant, Method::DELETE, routes::port(network, port));
                self.call(request, &[202], "Failed to delete port").await?;
                report::port_deleted(console, network, port);
            }
            Command::ShowPort {
                tenant,
                network,
                port,
            } => {
                let failure = "Failed to get port details";
                let response = self
                    .call(
                        ApiRequest::get(tenant, routes::port(network, port)),
                        &[200],
                        failure,
                    )
                    .await?;
                let detail: PortDetailResponse = Self::decode(&response, failure, console)?;
                let attachment = detail.port().attachment.as_deref().filter(|id| !id.is_empty());
                report::port_detail(console, network, port, attachment);
            }
            Command::PlugInterface {
                tenant,
                network,
                port,
                interface,
            } => {
                let request = json_request(
                    tenant,
                    Method::PUT,
                    routes::attachment(network, port),
                    &AttachmentRequest::plug(interface.as_str()),
                )?;
                let failure = format!(
                    "Failed to plug iface \"{}\" to port \"{}\"",
                    interface, port
                );
                self.call(request, &[202], &failure).await?;
                report::interface_plugged(console, network, port, interface);
            }
            Command::UnplugInterface {
                tenant,
                network,
                port,
            } => {
                let request = json_request(
                    tenant,
                    Method::DELETE,
                    routes::attachment(network, port),
                    &AttachmentRequest::unplug(),
                )?;
                let failure = format!("Failed to unplug iface from port \"{}\"", port);
                self.call(request, &[202], &failure).await?;
                report::interface_unplugged(console, network, port);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vnet_client::MockTransport;

    const NETS: &str = "/v0.1/tenants/t1/networks.json";

    fn executor(transport: MockTransport) -> (RemoteExecutor, Arc<MockTransport>) {
        let transport = Arc::new(transport);
        (RemoteExecutor::new(transport.clone()), transport)
    }

    #[tokio::test]
    async fn test_create_network_sends_wire_body() {
        let (executor, transport) = executor(MockTransport::new().with_response(
            Method::POST,
            NETS,
            201,
            r#"{"networks":{"network":{"id":"n-42"}}}"#,
        ));
        let (console, output) = Console::capture();
        let command = Command::CreateNetwork {
            tenant: "t1".to_string(),
            name: "netA".to_string(),
        };

        executor.execute(&command, &console).await.unwrap();
        assert!(output.contains("Created a new Virtual Network with ID:n-42"));

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].body,
            Some(json!({"network": {"network-name": "netA"}}))
        );
    }

    #[tokio::test]
    async fn test_server_error_is_application_failure() {
        let (executor, _) = executor(MockTransport::new().with_response(
            Method::POST,
            NETS,
            500,
            "internal error",
        ));
        let (console, _) = Console::capture();
        let command = Command::CreateNetwork {
            tenant: "t1".to_string(),
            name: "netA".to_string(),
        };

        let err = executor.execute(&command, &console).await.unwrap_err();
        match err {
            CliError::Application {
                message,
                status,
                body,
            } => {
                assert_eq!(message, "Failed to create network");
                assert_eq!(status, Some(500));
                assert_eq!(body.as_deref(), Some("internal error"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_result_field_is_application_failure() {
        let (executor, _) = executor(MockTransport::new().with_response(
            Method::POST,
            NETS,
            200,
            r#"{"networks":{}}"#,
        ));
        let (console, _) = Console::capture();
        let command = Command::CreateNetwork {
            tenant: "t1".to_string(),
            name: "netA".to_string(),
        };

        let err = executor.execute(&command, &console).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Application);
        assert!(err.to_string().starts_with("Failed to create network"));
    }

    #[tokio::test]
    async fn test_unexpected_success_status_is_failure() {
        // delete must answer 202 Accepted
        let (executor, _) = executor(MockTransport::new().with_response(
            Method::DELETE,
            "/v0.1/tenants/t1/networks/n1.json",
            200,
            "",
        ));
        let (console, output) = Console::capture();
        let command = Command::DeleteNetwork {
            tenant: "t1".to_string(),
            network: "n1".to_string(),
        };

        let err = executor.execute(&command, &console).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Application);
        assert!(!output.contains("Deleted Virtual Network"));
    }

    #[tokio::test]
    async fn test_connection_failure_is_fatal() {
        let (executor, _) = executor(MockTransport::new().with_connection_failure(
            Method::GET,
            NETS,
            "connection refused",
        ));
        let (console, _) = Console::capture();
        let command = Command::ListNetworks {
            tenant: "t1".to_string(),
        };

        let err = executor.execute(&command, &console).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[tokio::test]
    async fn test_unplug_sends_empty_attachment() {
        let path = "/v0.1/tenants/t1/networks/n1/ports/p1/attachment.json";
        let (executor, transport) =
            executor(MockTransport::new().with_response(Method::DELETE, path, 202, ""));
        let (console, output) = Console::capture();
        let command = Command::UnplugInterface {
            tenant: "t1".to_string(),
            network: "n1".to_string(),
            port: "p1".to_string(),
        };

        executor.execute(&command, &console).await.unwrap();
        assert!(output.contains("Unplugged remote interface from Virtual Port:p1"));
        assert_eq!(
            transport.requests()[0].body,
            Some(json!({"port": {"attachment-id": ""}}))
        );
    }

    #[tokio::test]
    async fn test_delete_network_accepted() {
        let path = "/v0.1/tenants/t1/networks/n1.json";
        let (executor, transport) =
            executor(MockTransport::new().with_response(Method::DELETE, path, 202, ""));
        let (console, output) = Console::capture();
        let command = Command::DeleteNetwork {
            tenant: "t1".to_string(),
            network: "n1".to_string(),
        };

        executor.execute(&command, &console).await.unwrap();
        assert!(output.contains("Deleted Virtual Network with ID:n1"));

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::DELETE);
        assert_eq!(requests[0].path(), path);
        assert_eq!(requests[0].body, None);
    }

    #[tokio::test]
    async fn test_create_port_extracts_id() {
        let path = "/v0.1/tenants/t1/networks/n1/ports.json";
        let (executor, transport) = executor(MockTransport::new().with_response(
            Method::POST,
            path,
            200,
            r#"{"ports":{"port":{"id":"p-7"}}}"#,
        ));
        let (console, output) = Console::capture();
        let command = Command::CreatePort {
            tenant: "t1".to_string(),
            network: "n1".to_string(),
        };

        executor.execute(&command, &console).await.unwrap();
        assert!(output.contains("Created Virtual Port:p-7 on Virtual Network:n1"));

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].path(), path);
        assert_eq!(requests[0].body, None);
    }

    #[tokio::test]
    async fn test_create_port_requires_ok_status() {
        let (executor, _) = executor(MockTransport::new().with_response(
            Method::POST,
            "/v0.1/tenants/t1/networks/n1/ports.json",
            201,
            r#"{"ports":{"port":{"id":"p-7"}}}"#,
        ));
        let (console, output) = Console::capture();
        let command = Command::CreatePort {
            tenant: "t1".to_string(),
            network: "n1".to_string(),
        };

        let err = executor.execute(&command, &console).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Application);
        assert!(err.to_string().starts_with("Failed to create port"));
        assert!(!output.contains("Created Virtual Port"));
    }

    #[tokio::test]
    async fn test_rename_network_sends_new_name() {
        let path = "/v0.1/tenants/t1/networks/n1.json";
        let (executor, transport) =
            executor(MockTransport::new().with_response(Method::PUT, path, 200, ""));
        let (console, output) = Console::capture();
        let command = Command::RenameNetwork {
            tenant: "t1".to_string(),
            network: "n1".to_string(),
            name: "netB".to_string(),
        };

        executor.execute(&command, &console).await.unwrap();
        assert!(output.contains("Renamed Virtual Network with ID:n1"));

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::PUT);
        assert_eq!(requests[0].path(), path);
        assert_eq!(
            requests[0].body,
            Some(json!({"network": {"network-name": "netB"}}))
        );
    }

    #[tokio::test]
    async fn test_plug_interface_sends_attachment() {
        let path = "/v0.1/tenants/t1/networks/n1/ports/p1/attachment.json";
        let (executor, transport) =
            executor(MockTransport::new().with_response(Method::PUT, path, 202, ""));
        let (console, output) = Console::capture();
        let command = Command::PlugInterface {
            tenant: "t1".to_string(),
            network: "n1".to_string(),
            port: "p1".to_string(),
            interface: "vif".to_string(),
        };

        executor.execute(&command, &console).await.unwrap();
        assert!(output
            .contains("Plugged remote interface:vif into Virtual Port:p1 on Virtual Network:n1"));

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::PUT);
        assert_eq!(requests[0].path(), path);
        assert_eq!(
            requests[0].body,
            Some(json!({"port": {"attachment-id": "vif"}}))
        );
    }

    #[tokio::test]
    async fn test_plug_interface_rejected_keeps_body() {
        let (executor, _) = executor(MockTransport::new().with_response(
            Method::PUT,
            "/v0.1/tenants/t1/networks/n1/ports/p1/attachment.json",
            404,
            r#"{"message":"port p1 not found"}"#,
        ));
        let (console, output) = Console::capture();
        let command = Command::PlugInterface {
            tenant: "t1".to_string(),
            network: "n1".to_string(),
            port: "p1".to_string(),
            interface: "vif".to_string(),
        };

        let err = executor.execute(&command, &console).await.unwrap_err();
        match err {
            CliError::Application {
                message,
                status,
                body,
            } => {
                assert_eq!(message, "Failed to plug iface \"vif\" to port \"p1\"");
                assert_eq!(status, Some(404));
                assert_eq!(body.as_deref(), Some(r#"{"message":"port p1 not found"}"#));
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(!output.contains("Plugged remote interface"));
    }

    #[tokio::test]
    async fn test_network_detail_continues_after_port_failure() {
        let (executor, transport) = executor(
            MockTransport::new()
                .with_response(
                    Method::GET,
                    "/v0.1/tenants/t1/networks/n1/ports.json",
                    200,
                    r#"{"ports":[{"id":"p1"},{"id":"p2"},{"id":"p3"}]}"#,
                )
                .with_response(
                    Method::GET,
                    "/v0.1/tenants/t1/networks/n1/ports/p1/attachment.json",
                    200,
                    r#"{"attachment":"vifA"}"#,
                )
                .with_response(
                    Method::GET,
                    "/v0.1/tenants/t1/networks/n1/ports/p2/attachment.json",
                    404,
                    "port not found",
                )
                .with_response(
                    Method::GET,
                    "/v0.1/tenants/t1/networks/n1/ports/p3/attachment.json",
                    200,
                    r#"{"attachment":"vifC"}"#,
                ),
        );
        let (console, output) = Console::capture();
        let command = Command::ShowNetwork {
            tenant: "t1".to_string(),
            network: "n1".to_string(),
        };

        executor.execute(&command, &console).await.unwrap();
        let text = output.text();
        assert!(text.contains("Remote interface:vifA"));
        assert!(text.contains("Failed to get attachment for port p2"));
        assert!(text.contains("port not found"));
        assert!(text.contains("Remote interface:vifC"));
        assert!(text.find("vifA").unwrap() < text.find("vifC").unwrap());
        assert_eq!(transport.requests().len(), 4);
    }

    #[tokio::test]
    async fn test_network_detail_aborts_on_connection_failure() {
        let (executor, transport) = executor(
            MockTransport::new()
                .with_response(
                    Method::GET,
                    "/v0.1/tenants/t1/networks/n1/ports.json",
                    200,
                    r#"{"ports":[{"id":"p1"},{"id":"p2"}]}"#,
                )
                .with_connection_failure(
                    Method::GET,
                    "/v0.1/tenants/t1/networks/n1/ports/p1/attachment.json",
                    "connection reset",
                ),
        );
        let (console, _) = Console::capture();
        let command = Command::ShowNetwork {
            tenant: "t1".to_string(),
            network: "n1".to_string(),
        };

        let err = executor.execute(&command, &console).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(transport.requests().len(), 2);
    }
}
