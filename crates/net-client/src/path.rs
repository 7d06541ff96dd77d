//! Resource path construction

pub const FORMAT: &str = "json";
pub const CONTENT_TYPE: &str = "application/json";

/// Tenant-scoped prefix every action path is appended to
pub const ACTION_PREFIX: &str = "/v0.1/tenants/{tenant_id}";

/// Build the full request path for `action` on behalf of `tenant`.
pub fn resource_path(tenant: &str, action: &str, query_params: &[(String, String)]) -> String {
    let mut path = ACTION_PREFIX.replace("{tenant_id}", &urlencoding::encode(tenant));
    path.push_str(action);

    if !query_params.is_empty() {
        path.push('?');
        let query_string: Vec<String> = query_params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        path.push_str(&query_string.join("&"));
    }

    path
}

/// Action paths of the v0.1 network API
pub mod routes {
    use super::FORMAT;

    fn segment(value: &str) -> std::borrow::Cow<'_, str> {
        urlencoding::encode(value)
    }

    pub fn networks() -> String {
        format!("/networks.{}", FORMAT)
    }

    pub fn network(network: &str) -> String {
        format!("/networks/{}.{}", segment(network), FORMAT)
    }

    pub fn ports(network: &str) -> String {
        format!("/networks/{}/ports.{}", segment(network), FORMAT)
    }

    pub fn port(network: &str, port: &str) -> String {
        format!(
            "/networks/{}/ports/{}.{}",
            segment(network),
            segment(port),
            FORMAT
        )
    }

    pub fn attachment(network: &str, port: &str) -> String {
        format!(
            "/networks/{}/ports/{}/attachment.{}",
            segment(network),
            segment(port),
            FORMAT
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_substitution() {
        assert_eq!(
            resource_path("t1", &routes::networks(), &[]),
            "/v0.1/tenants/t1/networks.json"
        );
    }

    #[test]
    fn test_query_parameters_are_encoded() {
        let params = vec![
            ("name".to_string(), "net A".to_string()),
            ("filter".to_string(), "a&b".to_string()),
        ];
        assert_eq!(
            resource_path("t1", "/networks.json", &params),
            "/v0.1/tenants/t1/networks.json?name=net%20A&filter=a%26b"
        );
    }

    #[test]
    fn test_routes() {
        assert_eq!(routes::network("n1"), "/networks/n1.json");
        assert_eq!(routes::ports("n1"), "/networks/n1/ports.json");
        assert_eq!(routes::port("n1", "p1"), "/networks/n1/ports/p1.json");
        assert_eq!(
            routes::attachment("n1", "p1"),
            "/networks/n1/ports/p1/attachment.json"
        );
    }

    #[test]
    fn test_identifiers_are_escaped() {
        assert_eq!(routes::network("a b"), "/networks/a%20b.json");
        assert_eq!(
            resource_path("acme corp", "", &[]),
            "/v0.1/tenants/acme%20corp"
        );
    }
}
