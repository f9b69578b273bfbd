//! Mock resource monitor for tests
//!
//! Synthesizes `"<name>_id"` identifiers and echoes every input back as the
//! resolved state. Nothing is validated and no call ever fails.

use crate::error::Result;
use crate::monitor::ResourceMonitor;
use crate::property::PropertyMap;
use async_trait::async_trait;
use std::sync::Mutex;

pub const ID_SUFFIX: &str = "_id";

#[derive(Debug, Default)]
pub struct MockMonitor {
    created: Mutex<Vec<String>>,
}

impl MockMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logical names passed to `new_resource`, in call order
    pub fn created(&self) -> Vec<String> {
        self.created
            .lock()
            .map(|names| names.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ResourceMonitor for MockMonitor {
    async fn new_resource(
        &self,
        _type_token: &str,
        name: &str,
        inputs: PropertyMap,
        _provider: &str,
        _id: &str,
    ) -> Result<(String, PropertyMap)> {
        if let Ok(mut created) = self.created.lock() {
            created.push(name.to_string());
        }
        Ok((format!("{}{}", name, ID_SUFFIX), inputs))
    }

    async fn call(&self, _token: &str, args: PropertyMap, _provider: &str) -> Result<PropertyMap> {
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_new_resource_echoes_inputs() {
        let mock = MockMonitor::new();
        let mut inputs = PropertyMap::new();
        inputs.insert("autoCreateSubnetworks".to_string(), json!(true));

        let (id, state) = mock
            .new_resource("gcp:compute/network:Network", "network", inputs.clone(), "", "")
            .await
            .unwrap();

        assert_eq!(id, "network_id");
        assert_eq!(state, inputs);
        assert_eq!(mock.created(), vec!["network"]);
    }

    #[tokio::test]
    async fn test_same_name_yields_same_id() {
        let mock = MockMonitor::new();
        let (first, _) = mock.new_resource("a", "x", PropertyMap::new(), "", "").await.unwrap();
        let (second, _) = mock.new_resource("b", "x", PropertyMap::new(), "", "").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_call_echoes_args() {
        let mock = MockMonitor::new();
        let mut args = PropertyMap::new();
        args.insert("family".to_string(), json!("debian-9"));

        let result = mock
            .call("gcp:compute/getImage:getImage", args.clone(), "")
            .await
            .unwrap();
        assert_eq!(result, args);
    }
}
