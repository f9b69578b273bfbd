use super::FIREWALL_TYPE;
use stackflow_core::{Context, CustomResource, Inputs, IntoPropertyValue, Output, Result};

/// One allow rule: a protocol and the ports it applies to
#[derive(Debug, Clone)]
pub struct FirewallAllowArgs {
    pub protocol: Output<String>,
    pub ports: Vec<Output<String>>,
}

impl FirewallAllowArgs {
    /// Allow TCP traffic to `ports`
    pub fn tcp<I, S>(ports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            protocol: "tcp".into(),
            ports: ports.into_iter().map(|p| Output::new(p.into())).collect(),
        }
    }
}

impl IntoPropertyValue for FirewallAllowArgs {
    fn into_property_value(self) -> Output<serde_json::Value> {
        Inputs::new()
            .set("protocol", self.protocol)
            .set("ports", self.ports)
            .into_property_value()
    }
}

#[derive(Debug, Clone)]
pub struct FirewallArgs {
    /// ID of the network the rule applies to
    pub network: Output<String>,
    pub allows: Vec<FirewallAllowArgs>,
    pub source_ranges: Option<Vec<Output<String>>>,
}

impl FirewallArgs {
    fn into_inputs(self) -> Inputs {
        Inputs::new()
            .set("network", self.network)
            .set("allows", self.allows)
            .set_optional("sourceRanges", self.source_ranges)
    }
}

/// A VPC firewall rule
#[derive(Debug, Clone)]
pub struct Firewall {
    resource: CustomResource,
}

impl Firewall {
    pub fn new(ctx: &Context, name: &str, args: FirewallArgs) -> Result<Self> {
        let resource = ctx.register_resource(FIREWALL_TYPE, name, args.into_inputs())?;
        Ok(Self { resource })
    }

    pub fn id(&self) -> Output<String> {
        self.resource.id()
    }

    pub fn urn(&self) -> &str {
        self.resource.urn()
    }

    pub fn resource(&self) -> &CustomResource {
        &self.resource
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stackflow_core::mock::MockMonitor;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_firewall_waits_for_network_id() {
        let mock = Arc::new(MockMonitor::new());
        let ctx = Context::new("demo", "dev", mock.clone());
        let (network_id, resolver) = Output::pending();

        let firewall = Firewall::new(
            &ctx,
            "firewall",
            FirewallArgs {
                network: network_id,
                allows: vec![FirewallAllowArgs::tcp(["22", "80"])],
                source_ranges: None,
            },
        )
        .unwrap();

        assert!(mock.created().is_empty());
        resolver.resolve("network_id".to_string());

        let state = firewall.resource().state().resolve().await.unwrap();
        assert_eq!(
            serde_json::Value::Object(state),
            json!({
                "network": "network_id",
                "allows": [{ "protocol": "tcp", "ports": ["22", "80"] }]
            })
        );
        assert_eq!(mock.created(), vec!["firewall"]);
    }

    #[tokio::test]
    async fn test_source_ranges_are_optional() {
        let ctx = Context::new("demo", "dev", Arc::new(MockMonitor::new()));
        let firewall = Firewall::new(
            &ctx,
            "ssh-only",
            FirewallArgs {
                network: "default".into(),
                allows: vec![FirewallAllowArgs::tcp(["22"])],
                source_ranges: Some(vec!["10.0.0.0/8".into()]),
            },
        )
        .unwrap();

        let state = firewall.resource().state().resolve().await.unwrap();
        assert_eq!(state["sourceRanges"], json!(["10.0.0.0/8"]));
        assert_eq!(firewall.id().resolve().await.unwrap(), "ssh-only_id");
    }
}
