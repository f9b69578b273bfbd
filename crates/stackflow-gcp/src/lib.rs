//! Google Cloud provider for StackFlow
//!
//! Typed declarations for the Compute Engine resources a StackFlow program
//! can register: networks, firewall rules and VM instances. Each constructor
//! turns its argument struct into deferred [`Inputs`](stackflow_core::Inputs)
//! and registers it with the [`Context`](stackflow_core::Context); references
//! between resources (such as a firewall's network) are plain `Output` values.
//!
//! # Example
//!
//! ```ignore
//! use stackflow_gcp::compute::{Network, NetworkArgs, Firewall, FirewallArgs, FirewallAllowArgs};
//!
//! let network = Network::new(&ctx, "network", NetworkArgs::default())?;
//! Firewall::new(&ctx, "firewall", FirewallArgs {
//!     network: network.id(),
//!     allows: vec![FirewallAllowArgs::tcp(["22", "80"])],
//!     source_ranges: None,
//! })?;
//! ```

pub mod compute;
pub mod startup_scripts;

pub use compute::{
    Firewall, FirewallAllowArgs, FirewallArgs, Instance, InstanceArgs, InstanceBootDiskArgs,
    InstanceBootDiskInitializeParamsArgs, InstanceNetworkInterface,
    InstanceNetworkInterfaceAccessConfig, InstanceNetworkInterfaceAccessConfigArgs,
    InstanceNetworkInterfaceArgs, Network, NetworkArgs,
};
