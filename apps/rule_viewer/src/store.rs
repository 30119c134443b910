//! In-memory owner of a mapping-rule document. Applies the intents a rule
//! card forwards and answers `unchanged` notifications.

use std::{
    collections::HashSet,
    fs,
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use anyhow::{Context, Result};
use rule_view::{RuleEventBus, RuleHost, Subscription};
use serde::Deserialize;
use shared::{
    domain::{MappingRule, RuleId, RuleType},
    error::MappingError,
    protocol::{BusChannel, RemoveRuleRequest, RuleNotification},
};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Deserialize)]
#[serde(untagged)]
enum RuleDocument {
    List(Vec<MappingRule>),
    Wrapped { rules: Vec<MappingRule> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardEntry {
    pub id: RuleId,
    pub rule_type: RuleType,
}

#[derive(Default)]
struct StoreState {
    rules: Vec<MappingRule>,
    clipboard: Option<ClipboardEntry>,
    editing: HashSet<RuleId>,
}

pub struct RuleStore {
    bus: RuleEventBus,
    state: Mutex<StoreState>,
}

impl RuleStore {
    pub fn new(rules: Vec<MappingRule>, bus: RuleEventBus) -> Result<Arc<Self>, MappingError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if rule.id.is_empty() {
                return Err(MappingError::invalid_document("rule without an id"));
            }
            if !seen.insert(rule.id.clone()) {
                return Err(MappingError::DuplicateRule(rule.id.clone()));
            }
        }

        Ok(Arc::new(Self {
            bus,
            state: Mutex::new(StoreState {
                rules,
                ..StoreState::default()
            }),
        }))
    }

    /// Accepts either a bare array of rules or `{ "rules": [...] }`.
    pub fn from_json(raw: &str, bus: RuleEventBus) -> Result<Arc<Self>, MappingError> {
        let rules = match serde_json::from_str(raw).map_err(MappingError::Parse)? {
            RuleDocument::List(rules) | RuleDocument::Wrapped { rules } => rules,
        };
        Self::new(rules, bus)
    }

    pub fn load(path: &Path, bus: RuleEventBus) -> Result<Arc<Self>> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read rule document '{}'", path.display()))?;
        let store = Self::from_json(&raw, bus)
            .with_context(|| format!("failed to load rule document '{}'", path.display()))?;
        info!(path = %path.display(), rules = store.len(), "loaded rule document");
        Ok(store)
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.state().rules.len()
    }

    pub fn rule(&self, id: &RuleId) -> Option<MappingRule> {
        self.state().rules.iter().find(|r| &r.id == id).cloned()
    }

    pub fn rule_ids(&self) -> Vec<RuleId> {
        self.state().rules.iter().map(|r| r.id.clone()).collect()
    }

    pub fn clipboard(&self) -> Option<ClipboardEntry> {
        self.state().clipboard.clone()
    }

    /// Tracks whether the card for `id` is currently showing its edit form.
    pub fn set_editing(&self, id: &RuleId, editing: bool) {
        let mut state = self.state();
        if editing {
            state.editing.insert(id.clone());
        } else {
            state.editing.remove(id);
        }
    }

    #[cfg(test)]
    pub fn is_editing(&self, id: &RuleId) -> bool {
        self.state().editing.contains(id)
    }

    /// Drops the edit marker of a rule reported unchanged and closes its view.
    pub fn watch_unchanged(self: &Arc<Self>) -> Subscription {
        let store = Arc::downgrade(self);
        self.bus.subscribe(BusChannel::Unchanged, move |notification| {
            let Some(store) = store.upgrade() else {
                return;
            };
            let was_editing = store.state().editing.remove(&notification.id);
            debug!(rule_id = %notification.id, was_editing, "discarding transient edit state");
            store
                .bus
                .publish(BusChannel::Close, &RuleNotification::new(notification.id.clone()));
        })
    }
}

impl RuleHost for RuleStore {
    fn copy_rule(&self, id: &RuleId, rule_type: RuleType) -> Result<()> {
        let mut state = self.state();
        if !state.rules.iter().any(|r| &r.id == id) {
            return Err(MappingError::UnknownRule(id.clone()).into());
        }
        state.clipboard = Some(ClipboardEntry {
            id: id.clone(),
            rule_type,
        });
        info!(rule_id = %id, %rule_type, "rule copied to clipboard");
        Ok(())
    }

    fn clone_rule(&self, id: &RuleId, rule_type: RuleType) -> Result<()> {
        let mut state = self.state();
        let position = state
            .rules
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| MappingError::UnknownRule(id.clone()))?;

        let mut duplicate = state.rules[position].clone();
        duplicate.id = RuleId::new(Uuid::new_v4().to_string());
        duplicate.rule_type = rule_type;
        info!(rule_id = %id, clone_id = %duplicate.id, "rule cloned");
        state.rules.insert(position + 1, duplicate);
        Ok(())
    }

    fn remove_rule(&self, request: RemoveRuleRequest) -> Result<()> {
        let mut state = self.state();
        let position = state
            .rules
            .iter()
            .position(|r| r.id == request.id)
            .ok_or_else(|| MappingError::UnknownRule(request.id.clone()))?;

        state.rules.remove(position);
        state.editing.remove(&request.id);
        if state
            .clipboard
            .as_ref()
            .is_some_and(|entry| entry.id == request.id)
        {
            state.clipboard = None;
        }
        info!(
            rule_id = %request.id,
            target = request.target_uri.as_deref().unwrap_or("-"),
            parent = ?request.parent_id,
            "rule removed"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
