//! External IP derivation from resolved network interfaces

use serde::Deserialize;
use serde_json::Value;
use stackflow_core::Output;
use stackflow_gcp::{InstanceNetworkInterface, InstanceNetworkInterfaceAccessConfig};
use thiserror::Error;

/// Why an external IP could not be derived
///
/// The messages are kept verbatim; consumers may match on them.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeriveError {
    /// The value is not a list of network interface records
    #[error("not OK!")]
    ShapeMismatch,

    #[error("no instance network interfaces!")]
    NoInterfaces,

    #[error("no instance network interface access configs!")]
    NoAccessConfigs,
}

fn decode_interfaces(value: &Value) -> Result<Vec<InstanceNetworkInterface>, DeriveError> {
    Vec::<InstanceNetworkInterface>::deserialize(value).map_err(|_| DeriveError::ShapeMismatch)
}

fn first_interface(
    interfaces: &[InstanceNetworkInterface],
) -> Result<&InstanceNetworkInterface, DeriveError> {
    interfaces.first().ok_or(DeriveError::NoInterfaces)
}

fn first_access_config(
    interface: &InstanceNetworkInterface,
) -> Result<&InstanceNetworkInterfaceAccessConfig, DeriveError> {
    interface
        .access_configs
        .first()
        .ok_or(DeriveError::NoAccessConfigs)
}

/// External address of the first access config on the first interface
///
/// `Ok(None)` means the access config exists but carries no address yet.
pub fn instance_ip(interfaces: &Value) -> Result<Option<String>, DeriveError> {
    let interfaces = decode_interfaces(interfaces)?;
    let interface = first_interface(&interfaces)?;
    let access_config = first_access_config(interface)?;
    Ok(access_config.nat_ip.clone())
}

/// Attach [`instance_ip`] to a deferred interface list
pub fn instance_ip_output(interfaces: &Output<Value>) -> Output<Option<String>> {
    interfaces.apply(|value| instance_ip(&value))
}
