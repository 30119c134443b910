use serde::{Deserialize, Serialize};

use crate::domain::{RuleId, RuleType};

/// Named channels on the rule-view event bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusChannel {
    /// Ask the view showing a rule to leave edit mode.
    Close,
    /// Tell the owning store to drop transient edit state for a rule.
    Unchanged,
}

impl BusChannel {
    pub fn as_str(self) -> &'static str {
        match self {
            BusChannel::Close => "rule_view.close",
            BusChannel::Unchanged => "rule_view.unchanged",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleNotification {
    pub id: RuleId,
}

impl RuleNotification {
    pub fn new(id: RuleId) -> Self {
        Self { id }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveRuleRequest {
    pub id: RuleId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_uri: Option<String>,
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<RuleId>,
}
