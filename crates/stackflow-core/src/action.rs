//! Planned actions recorded while previewing a resource graph

use crate::property::PropertyMap;
use serde::{Deserialize, Serialize};

/// A single step the engine would take for a resource or provider call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    /// Unique identifier for the action
    pub id: String,

    /// Type of action to perform
    pub action_type: ActionType,

    /// Type token (e.g., "gcp:compute/network:Network")
    pub resource_type: String,

    /// Logical resource name, or the function token for reads
    pub resource_id: String,

    /// Description of the action
    pub description: String,

    /// Inputs the action was planned with
    pub details: PropertyMap,
}

/// Type of action to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Create a new resource
    Create,
    /// Invoke a provider function
    Read,
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionType::Create => write!(f, "create"),
            ActionType::Read => write!(f, "read"),
        }
    }
}

/// Plan containing all actions recorded so far
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Plan {
    /// Actions in the order they were recorded
    pub actions: Vec<Action>,
}

impl Plan {
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn has_changes(&self) -> bool {
        self.actions
            .iter()
            .any(|a| a.action_type == ActionType::Create)
    }

    /// Get actions by type
    pub fn actions_by_type(&self, action_type: ActionType) -> Vec<&Action> {
        self.actions
            .iter()
            .filter(|a| a.action_type == action_type)
            .collect()
    }

    /// Summary of the plan
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            create: self.actions_by_type(ActionType::Create).len(),
            read: self.actions_by_type(ActionType::Read).len(),
        }
    }
}

/// Summary of planned actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanSummary {
    pub create: usize,
    pub read: usize,
}

impl std::fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to create, {} to read", self.create, self.read)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(action_type: ActionType, name: &str) -> Action {
        Action {
            id: format!("{}-{}", action_type, name),
            action_type,
            resource_type: "test:index:Thing".to_string(),
            resource_id: name.to_string(),
            description: String::new(),
            details: PropertyMap::new(),
        }
    }

    #[test]
    fn test_summary_counts_by_type() {
        let plan = Plan::new(vec![
            action(ActionType::Create, "network"),
            action(ActionType::Create, "firewall"),
            action(ActionType::Read, "getImage"),
        ]);

        assert!(plan.has_changes());
        assert_eq!(plan.summary(), PlanSummary { create: 2, read: 1 });
        assert_eq!(plan.summary().to_string(), "2 to create, 1 to read");
        assert_eq!(plan.actions[0].id, "create-network");
    }

    #[test]
    fn test_empty_plan() {
        let mut plan = Plan::empty();
        assert!(!plan.has_changes());
        plan.push(action(ActionType::Read, "getImage"));
        assert!(!plan.has_changes());
    }
}
