//! View/edit state machine for one value-mapping rule card.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use serde::Serialize;
use shared::{
    domain::{MappingRule, RuleId},
    protocol::{BusChannel, RemoveRuleRequest, RuleNotification},
};
use tracing::{debug, info};

use crate::{
    bus::{RuleEventBus, Subscription},
    view_model::{derive_view_model, EditFormProps, RuleCard},
    EditorLinkResolver, RuleHost,
};

pub const COMPLEX_EDITOR_PLACEHOLDER: &str =
    "Normally this would open the complex editor (aka jsplumb view)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    Viewing,
    Editing,
}

impl ViewMode {
    pub fn from_edit_flag(edit: bool) -> Self {
        if edit {
            ViewMode::Editing
        } else {
            ViewMode::Viewing
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Viewing => ViewMode::Editing,
            ViewMode::Editing => ViewMode::Viewing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComplexEditOutcome {
    /// Development builds stop here instead of leaving the page.
    Placeholder(&'static str),
    Navigate(String),
    Unavailable,
}

fn lock_mode(mode: &Mutex<ViewMode>) -> MutexGuard<'_, ViewMode> {
    mode.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct RuleViewController {
    rule: MappingRule,
    mode: Arc<Mutex<ViewMode>>,
    editor_href: Option<String>,
    bus: RuleEventBus,
    host: Arc<dyn RuleHost>,
    close_subscription: Option<Subscription>,
}

impl RuleViewController {
    pub fn new(
        rule: MappingRule,
        edit: bool,
        bus: RuleEventBus,
        host: Arc<dyn RuleHost>,
        links: &dyn EditorLinkResolver,
    ) -> Self {
        let editor_href = links.editor_href(&rule.id);
        Self {
            rule,
            mode: Arc::new(Mutex::new(ViewMode::from_edit_flag(edit))),
            editor_href,
            bus,
            host,
            close_subscription: None,
        }
    }

    /// Starts listening for close notifications addressed to this rule.
    pub fn activate(&mut self) {
        if self.close_subscription.is_some() {
            return;
        }

        let mode = Arc::clone(&self.mode);
        let rule_id = self.rule.id.clone();
        let subscription = self.bus.subscribe(BusChannel::Close, move |notification| {
            if notification.id != rule_id {
                return;
            }
            let mut current = lock_mode(&mode);
            if *current == ViewMode::Editing {
                debug!(rule_id = %rule_id, "closing rule editor on request");
            }
            *current = ViewMode::Viewing;
        });
        self.close_subscription = Some(subscription);
        debug!(rule_id = %self.rule.id, "rule view activated");
    }

    pub fn deactivate(&mut self) {
        if self.close_subscription.take().is_some() {
            debug!(rule_id = %self.rule.id, "rule view deactivated");
        }
    }

    pub fn is_active(&self) -> bool {
        self.close_subscription.is_some()
    }

    pub fn rule(&self) -> &MappingRule {
        &self.rule
    }

    pub fn id(&self) -> &RuleId {
        &self.rule.id
    }

    pub fn editor_href(&self) -> Option<&str> {
        self.editor_href.as_deref()
    }

    pub fn mode(&self) -> ViewMode {
        *lock_mode(&self.mode)
    }

    pub fn is_editing(&self) -> bool {
        self.mode() == ViewMode::Editing
    }

    pub fn toggle_edit(&self) -> ViewMode {
        let mut mode = lock_mode(&self.mode);
        *mode = mode.toggled();
        debug!(rule_id = %self.rule.id, mode = ?*mode, "toggled rule edit mode");
        *mode
    }

    pub fn render(&self) -> RuleCard {
        match self.mode() {
            ViewMode::Editing => RuleCard::Editing(EditFormProps {
                id: self.rule.id.clone(),
                parent_id: self.rule.parent_id.clone(),
            }),
            ViewMode::Viewing => {
                RuleCard::Viewing(derive_view_model(&self.rule, self.editor_href()))
            }
        }
    }

    /// Tells the owning store to discard transient edit state for this rule.
    pub fn request_close(&self) -> usize {
        self.bus.publish(
            BusChannel::Unchanged,
            &RuleNotification::new(self.rule.id.clone()),
        )
    }

    pub fn request_copy(&self) -> Result<()> {
        info!(rule_id = %self.rule.id, rule_type = %self.rule.rule_type, "copy requested");
        self.host.copy_rule(&self.rule.id, self.rule.rule_type)
    }

    pub fn request_clone(&self) -> Result<()> {
        info!(rule_id = %self.rule.id, rule_type = %self.rule.rule_type, "clone requested");
        self.host.clone_rule(&self.rule.id, self.rule.rule_type)
    }

    pub fn request_remove(&self) -> Result<()> {
        info!(rule_id = %self.rule.id, "remove requested");
        self.host.remove_rule(RemoveRuleRequest {
            id: self.rule.id.clone(),
            target_uri: self.rule.target_uri().map(str::to_string),
            rule_type: self.rule.rule_type,
            parent_id: self.rule.parent_id.clone(),
        })
    }

    pub fn request_complex_edit(&self) -> ComplexEditOutcome {
        self.complex_edit_outcome(cfg!(debug_assertions))
    }

    fn complex_edit_outcome(&self, debug_build: bool) -> ComplexEditOutcome {
        if debug_build {
            return ComplexEditOutcome::Placeholder(COMPLEX_EDITOR_PLACEHOLDER);
        }
        match &self.editor_href {
            Some(href) => ComplexEditOutcome::Navigate(href.clone()),
            None => ComplexEditOutcome::Unavailable,
        }
    }
}

impl Drop for RuleViewController {
    fn drop(&mut self) {
        self.deactivate();
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
