//! Resource monitor trait definition

use crate::error::Result;
use crate::property::PropertyMap;
use async_trait::async_trait;

/// Backend that turns resource registrations into provisioned state
///
/// The real provisioning engine, the CLI preview and the test harness all
/// implement this trait; the [`Context`](crate::Context) only ever talks to it
/// through these two operations.
#[async_trait]
pub trait ResourceMonitor: Send + Sync {
    /// Create a resource and return its provider ID with the resolved state
    ///
    /// `provider` names an explicit provider reference (empty for the
    /// default provider); `id` is set when an existing resource is adopted.
    async fn new_resource(
        &self,
        type_token: &str,
        name: &str,
        inputs: PropertyMap,
        provider: &str,
        id: &str,
    ) -> Result<(String, PropertyMap)>;

    /// Invoke a provider function
    async fn call(&self, token: &str, args: PropertyMap, provider: &str) -> Result<PropertyMap>;
}
