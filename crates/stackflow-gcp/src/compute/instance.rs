use super::INSTANCE_TYPE;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use stackflow_core::{
    CloudError, Context, CustomResource, Inputs, IntoPropertyValue, Output, Result,
};

#[derive(Debug, Clone)]
pub struct InstanceBootDiskInitializeParamsArgs {
    /// Image reference, e.g. "debian-cloud/debian-9"
    pub image: Output<String>,
}

#[derive(Debug, Clone)]
pub struct InstanceBootDiskArgs {
    pub initialize_params: InstanceBootDiskInitializeParamsArgs,
}

impl IntoPropertyValue for InstanceBootDiskArgs {
    fn into_property_value(self) -> Output<Value> {
        let params = Inputs::new().set("image", self.initialize_params.image);
        Inputs::new()
            .set("initializeParams", params)
            .into_property_value()
    }
}

/// An access config with no overrides requests an ephemeral external IP
#[derive(Debug, Clone, Default)]
pub struct InstanceNetworkInterfaceAccessConfigArgs {
    pub nat_ip: Option<Output<String>>,
}

impl IntoPropertyValue for InstanceNetworkInterfaceAccessConfigArgs {
    fn into_property_value(self) -> Output<Value> {
        Inputs::new()
            .set_optional("natIp", self.nat_ip)
            .into_property_value()
    }
}

#[derive(Debug, Clone)]
pub struct InstanceNetworkInterfaceArgs {
    /// ID of the network the interface attaches to
    pub network: Output<String>,
    pub access_configs: Vec<InstanceNetworkInterfaceAccessConfigArgs>,
}

impl IntoPropertyValue for InstanceNetworkInterfaceArgs {
    fn into_property_value(self) -> Output<Value> {
        Inputs::new()
            .set("network", self.network)
            .set("accessConfigs", self.access_configs)
            .into_property_value()
    }
}

#[derive(Debug, Clone)]
pub struct InstanceArgs {
    /// Physical name; defaults to the logical resource name
    pub name: Option<Output<String>>,
    pub machine_type: Output<String>,
    pub zone: Output<String>,
    pub metadata_startup_script: Option<Output<String>>,
    pub boot_disk: InstanceBootDiskArgs,
    pub network_interfaces: Vec<InstanceNetworkInterfaceArgs>,
}

impl InstanceArgs {
    fn into_inputs(self, default_name: &str) -> Inputs {
        let name = self.name.unwrap_or_else(|| default_name.into());
        Inputs::new()
            .set("name", name)
            .set("machineType", self.machine_type)
            .set("zone", self.zone)
            .set_optional("metadataStartupScript", self.metadata_startup_script)
            .set("bootDisk", self.boot_disk)
            .set("networkInterfaces", self.network_interfaces)
    }
}

/// Access config as reported back by the provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceNetworkInterfaceAccessConfig {
    /// External address allocated for the interface
    #[serde(default)]
    pub nat_ip: Option<String>,
}

/// Network interface as reported back by the provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceNetworkInterface {
    #[serde(default)]
    pub network: Option<String>,
    /// Missing and `null` both decode as empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub access_configs: Vec<InstanceNetworkInterfaceAccessConfig>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A Compute Engine VM instance
#[derive(Debug, Clone)]
pub struct Instance {
    resource: CustomResource,
}

impl Instance {
    /// Register an instance; at least one network interface is required
    pub fn new(ctx: &Context, name: &str, args: InstanceArgs) -> Result<Self> {
        if args.network_interfaces.is_empty() {
            return Err(CloudError::InvalidConfig(format!(
                "instance {} needs at least one network interface",
                name
            )));
        }
        tracing::debug!(
            "Declaring instance {} with {} network interface(s)",
            name,
            args.network_interfaces.len()
        );
        let resource = ctx.register_resource(INSTANCE_TYPE, name, args.into_inputs(name))?;
        Ok(Self { resource })
    }

    pub fn id(&self) -> Output<String> {
        self.resource.id()
    }

    /// Physical instance name
    pub fn name(&self) -> Output<String> {
        self.resource.property_as("name")
    }

    pub fn zone(&self) -> Output<String> {
        self.resource.property_as("zone")
    }

    /// Network interfaces exactly as resolved, without decoding
    pub fn network_interfaces(&self) -> Output<Value> {
        self.resource.property("networkInterfaces")
    }

    pub fn urn(&self) -> &str {
        self.resource.urn()
    }

    pub fn resource(&self) -> &CustomResource {
        &self.resource
    }
}
