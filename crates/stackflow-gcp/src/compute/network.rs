use super::NETWORK_TYPE;
use stackflow_core::{Context, CustomResource, Inputs, Output, Result};

/// Arguments for a VPC network; every field is optional
#[derive(Debug, Clone, Default)]
pub struct NetworkArgs {
    pub auto_create_subnetworks: Option<Output<bool>>,
    pub description: Option<Output<String>>,
}

impl NetworkArgs {
    fn into_inputs(self) -> Inputs {
        Inputs::new()
            .set_optional("autoCreateSubnetworks", self.auto_create_subnetworks)
            .set_optional("description", self.description)
    }
}

/// A VPC network
#[derive(Debug, Clone)]
pub struct Network {
    resource: CustomResource,
}

impl Network {
    pub fn new(ctx: &Context, name: &str, args: NetworkArgs) -> Result<Self> {
        let resource = ctx.register_resource(NETWORK_TYPE, name, args.into_inputs())?;
        Ok(Self { resource })
    }

    /// Provider ID; firewalls and network interfaces reference the network by it
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
