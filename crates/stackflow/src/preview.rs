//! Dry-run monitor backing `stackflow preview`
//!
//! Records what the engine would do instead of doing it. Provider IDs are not
//! known before provisioning, so every resource gets [`COMPUTED_ID`].

use crate::program;
use async_trait::async_trait;
use serde_json::{Value, json};
use stackflow_core::{
    Action, ActionType, CloudError, Context, Plan, PropertyMap, ResourceMonitor, Result,
    StackOutputs,
};
use std::sync::{Arc, Mutex};

pub const COMPUTED_ID: &str = "[computed]";

#[derive(Debug, Default)]
pub struct PreviewMonitor {
    plan: Mutex<Plan>,
}

impl PreviewMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Actions recorded so far
    pub fn plan(&self) -> Plan {
        self.plan
            .lock()
            .map(|plan| plan.clone())
            .unwrap_or_default()
    }

    fn record(&self, action: Action) -> Result<()> {
        let mut plan = self.plan.lock().map_err(|_| CloudError::Poisoned)?;
        plan.push(action);
        Ok(())
    }
}

#[async_trait]
impl ResourceMonitor for PreviewMonitor {
    async fn new_resource(
        &self,
        type_token: &str,
        name: &str,
        inputs: PropertyMap,
        _provider: &str,
        _id: &str,
    ) -> Result<(String, PropertyMap)> {
        tracing::debug!("Planning create of {} {}", type_token, name);
        self.record(Action {
            id: format!("create-{}", name),
            action_type: ActionType::Create,
            resource_type: type_token.to_string(),
            resource_id: name.to_string(),
            description: format!("create {} {}", type_token, name),
            details: inputs.clone(),
        })?;
        Ok((COMPUTED_ID.to_string(), inputs))
    }

    async fn call(&self, token: &str, args: PropertyMap, _provider: &str) -> Result<PropertyMap> {
        self.record(Action {
            id: format!("read-{}", token),
            action_type: ActionType::Read,
            resource_type: token.to_string(),
            resource_id: token.to_string(),
            description: format!("read {}", token),
            details: args.clone(),
        })?;
        Ok(args)
    }
}

/// Outcome of a preview run
#[derive(Debug, Clone)]
pub struct PreviewReport {
    pub project: String,
    pub stack: String,
    pub plan: Plan,
    pub outputs: StackOutputs,
}

impl PreviewReport {
    pub fn to_json(&self) -> Value {
        json!({
            "project": self.project,
            "stack": self.stack,
            "resources": self.plan.actions,
            "summary": self.plan.summary().to_string(),
            "outputs": self.outputs.to_json(),
        })
    }
}

/// Run the stack program against a [`PreviewMonitor`]
pub async fn preview(project: &str, stack: &str) -> Result<PreviewReport> {
    let monitor = Arc::new(PreviewMonitor::new());
    let ctx = Context::new(project, stack, monitor.clone());
    let outputs = program::run(ctx).await?;

    Ok(PreviewReport {
        project: project.to_string(),
        stack: stack.to_string(),
        plan: monitor.plan(),
        outputs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_preview_plans_three_creates() {
        let report = preview("gcp-instance", "dev").await.unwrap();

        assert_eq!(report.plan.summary().create, 3);
        assert_eq!(report.plan.actions[0].resource_id, "network");
        let firewall = report
            .plan
            .actions
            .iter()
            .find(|a| a.resource_id == "firewall")
            .unwrap();
        assert_eq!(firewall.details["network"], json!(COMPUTED_ID));

        assert_eq!(report.outputs.get("instanceName"), Some(&json!("instance")));
        assert_eq!(report.outputs.get("instanceIP"), Some(&Value::Null));
    }

    #[tokio::test]
    async fn test_call_is_recorded_as_read() {
        let monitor = PreviewMonitor::new();
        let mut args = PropertyMap::new();
        args.insert("family".to_string(), json!("debian-9"));

        let result = monitor.call("gcp:compute/getImage:getImage", args.clone(), "").await.unwrap();
        assert_eq!(result, args);
        assert_eq!(monitor.plan().summary().read, 1);
        assert!(!monitor.plan().has_changes());
    }

    #[test]
    fn test_report_json() {
        let report = PreviewReport {
            project: "gcp-instance".to_string(),
            stack: "dev".to_string(),
            plan: Plan::empty(),
            outputs: StackOutputs::default(),
        };
        assert_eq!(
            report.to_json(),
            json!({
                "project": "gcp-instance",
                "stack": "dev",
                "resources": [],
                "summary": "0 to create, 0 to read",
                "outputs": {}
            })
        );
    }
}
