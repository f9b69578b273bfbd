//! The stack's resource graph

use crate::derive::instance_ip_output;
use stackflow_core::{Context, Result, StackOutputs};
use stackflow_gcp::compute::{
    Firewall, FirewallAllowArgs, FirewallArgs, Instance, InstanceArgs, InstanceBootDiskArgs,
    InstanceBootDiskInitializeParamsArgs, InstanceNetworkInterfaceAccessConfigArgs,
    InstanceNetworkInterfaceArgs, Network, NetworkArgs,
};
use stackflow_gcp::startup_scripts;

pub const MACHINE_TYPE: &str = "f1-micro";
pub const ZONE: &str = "us-east1-d";
pub const BOOT_IMAGE: &str = "debian-cloud/debian-9";
pub const ALLOWED_TCP_PORTS: [&str; 2] = ["22", "80"];

pub const INSTANCE_NAME_OUTPUT: &str = "instanceName";
pub const INSTANCE_IP_OUTPUT: &str = "instanceIP";

/// Handles to everything [`declare`] registered
#[derive(Debug, Clone)]
pub struct StackResources {
    pub network: Network,
    pub firewall: Firewall,
    pub instance: Instance,
}

/// Register the network, firewall and instance, and export the instance's
/// name and external IP
///
/// Returns on the first registration error without declaring the rest.
pub fn declare(ctx: &Context) -> Result<StackResources> {
    let network = Network::new(ctx, "network", NetworkArgs::default())?;

    let firewall = Firewall::new(
        ctx,
        "firewall",
        FirewallArgs {
            network: network.id(),
            allows: vec![FirewallAllowArgs::tcp(ALLOWED_TCP_PORTS)],
            source_ranges: None,
        },
    )?;

    let instance = Instance::new(
        ctx,
        "instance",
        InstanceArgs {
            name: None,
            machine_type: MACHINE_TYPE.into(),
            zone: ZONE.into(),
            metadata_startup_script: Some(startup_scripts::HELLO_WORLD.into()),
            boot_disk: InstanceBootDiskArgs {
                initialize_params: InstanceBootDiskInitializeParamsArgs {
                    image: BOOT_IMAGE.into(),
                },
            },
            network_interfaces: vec![InstanceNetworkInterfaceArgs {
                network: network.id(),
                // a single empty access config requests an ephemeral external IP
                access_configs: vec![InstanceNetworkInterfaceAccessConfigArgs::default()],
            }],
        },
    )?;

    ctx.export(INSTANCE_NAME_OUTPUT, instance.name())?;
    ctx.export(
        INSTANCE_IP_OUTPUT,
        instance_ip_output(&instance.network_interfaces()),
    )?;

    Ok(StackResources {
        network,
        firewall,
        instance,
    })
}

/// Declare the stack on `ctx` and wait for it to settle
pub async fn run(ctx: Context) -> Result<StackOutputs> {
    ctx.run(|ctx| async move { declare(&ctx).map(|_| ()) })
        .await
}
