//! Compute Engine resources

mod firewall;
mod instance;
mod network;

pub use firewall::{Firewall, FirewallAllowArgs, FirewallArgs};
pub use instance::{
    Instance, InstanceArgs, InstanceBootDiskArgs, InstanceBootDiskInitializeParamsArgs,
    InstanceNetworkInterface, InstanceNetworkInterfaceAccessConfig,
    InstanceNetworkInterfaceAccessConfigArgs, InstanceNetworkInterfaceArgs,
};
pub use network::{Network, NetworkArgs};

pub const NETWORK_TYPE: &str = "gcp:compute/network:Network";
pub const FIREWALL_TYPE: &str = "gcp:compute/firewall:Firewall";
pub const INSTANCE_TYPE: &str = "gcp:compute/instance:Instance";
