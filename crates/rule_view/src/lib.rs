//! Presentation logic for a single value-mapping rule card: formula
//! flattening, view-model derivation, the view/edit controller and the
//! event bus it listens on.

use anyhow::Result;
use shared::{
    domain::{RuleId, RuleType},
    protocol::RemoveRuleRequest,
};

pub mod bus;
pub mod controller;
pub mod links;
pub mod operators;
pub mod view_model;

pub use bus::{RuleEventBus, Subscription};
pub use controller::{ComplexEditOutcome, RuleViewController, ViewMode};
pub use links::{LinkError, TransformEditorLinks};
pub use operators::{flatten_operators, operator_functions};
pub use view_model::{derive_view_model, EditFormProps, RuleCard, RuleViewModel};

/// The store that owns the rules. The card never applies these intents itself.
pub trait RuleHost: Send + Sync {
    fn copy_rule(&self, id: &RuleId, rule_type: RuleType) -> Result<()>;
    fn clone_rule(&self, id: &RuleId, rule_type: RuleType) -> Result<()>;
    fn remove_rule(&self, request: RemoveRuleRequest) -> Result<()>;
}

/// Resolves the link to the advanced formula editor for a rule.
pub trait EditorLinkResolver: Send + Sync {
    fn editor_href(&self, id: &RuleId) -> Option<String>;
}

/// Resolver used when no editor is configured.
pub struct NoEditorLinks;

impl EditorLinkResolver for NoEditorLinks {
    fn editor_href(&self, _id: &RuleId) -> Option<String> {
        None
    }
}
