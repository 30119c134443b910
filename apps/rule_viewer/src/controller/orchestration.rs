//! Dispatch of card commands onto the rule view controller.

use rule_view::{ComplexEditOutcome, RuleEventBus, RuleViewController};
use shared::protocol::{BusChannel, RuleNotification};

use crate::controller::events::{CardCommand, HELP};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Render the card again.
    Render,
    /// Keep going without rendering.
    Continue,
    Exit,
}

pub fn dispatch_card_command(
    view: &RuleViewController,
    bus: &RuleEventBus,
    cmd: CardCommand,
    status: &mut String,
) -> Flow {
    tracing::debug!(command = cmd.name(), rule_id = %view.id(), "dispatching card command");
    status.clear();

    match cmd {
        CardCommand::Show => Flow::Render,
        CardCommand::Edit => {
            view.toggle_edit();
            Flow::Render
        }
        CardCommand::Discard => {
            if view.request_close() == 0 {
                *status = "No store is listening for discarded edits".to_string();
            }
            Flow::Render
        }
        CardCommand::Close => {
            bus.publish(
                BusChannel::Close,
                &RuleNotification::new(view.id().clone()),
            );
            Flow::Render
        }
        CardCommand::Copy => {
            report(view.request_copy(), "Rule copied", status);
            Flow::Continue
        }
        CardCommand::Clone => {
            report(view.request_clone(), "Rule cloned", status);
            Flow::Continue
        }
        CardCommand::Remove => match view.request_remove() {
            Ok(()) => {
                *status = "Rule removed".to_string();
                Flow::Exit
            }
            Err(err) => {
                *status = format!("Remove failed: {err:#}");
                Flow::Continue
            }
        },
        CardCommand::ComplexEdit => {
            *status = match view.request_complex_edit() {
                ComplexEditOutcome::Placeholder(notice) => notice.to_string(),
                ComplexEditOutcome::Navigate(href) => format!("Open {href}"),
                ComplexEditOutcome::Unavailable => {
                    "No formula editor is configured for this rule".to_string()
                }
            };
            Flow::Continue
        }
        CardCommand::Help => {
            *status = HELP.to_string();
            Flow::Continue
        }
        CardCommand::Quit => Flow::Exit,
    }
}

fn report(result: anyhow::Result<()>, success: &str, status: &mut String) {
    match result {
        Ok(()) => *status = success.to_string(),
        Err(err) => {
            tracing::warn!(error = %format!("{err:#}"), "card command failed");
            *status = format!("{success} failed: {err:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rule_view::{NoEditorLinks, ViewMode};
    use shared::domain::RuleId;

    use super::*;
    use crate::store::RuleStore;

    fn setup() -> (RuleEventBus, Arc<RuleStore>, RuleViewController) {
        let bus = RuleEventBus::new();
        let store = RuleStore::from_json(
            r#"[{"id":"a","type":"direct","sourcePath":"/a"},{"id":"b"}]"#,
            bus.clone(),
        )
        .expect("store");
        let rule = store.rule(&RuleId::from("a")).expect("rule");
        let mut view = RuleViewController::new(rule, false, bus.clone(), store.clone(), &NoEditorLinks);
        view.activate();
        (bus, store, view)
    }

    #[test]
    fn edit_then_close_returns_to_viewing() {
        let (bus, _store, view) = setup();
        let mut status = String::new();

        assert_eq!(dispatch_card_command(&view, &bus, CardCommand::Edit, &mut status), Flow::Render);
        assert_eq!(view.mode(), ViewMode::Editing);

        dispatch_card_command(&view, &bus, CardCommand::Close, &mut status);
        assert_eq!(view.mode(), ViewMode::Viewing);
    }

    #[test]
    fn discard_without_store_listener_reports_status() {
        let (bus, _store, view) = setup();
        let mut status = String::new();

        dispatch_card_command(&view, &bus, CardCommand::Discard, &mut status);
        assert_eq!(status, "No store is listening for discarded edits");
    }

    #[test]
    fn remove_exits_and_second_remove_fails() {
        let (bus, store, view) = setup();
        let mut status = String::new();

        assert_eq!(dispatch_card_command(&view, &bus, CardCommand::Remove, &mut status), Flow::Exit);
        assert_eq!(store.rule_ids(), vec![RuleId::from("b")]);

        assert_eq!(
            dispatch_card_command(&view, &bus, CardCommand::Remove, &mut status),
            Flow::Continue
        );
        assert!(status.starts_with("Remove failed"));
    }

    #[test]
    fn clone_reports_success() {
        let (bus, store, view) = setup();
        let mut status = String::new();

        dispatch_card_command(&view, &bus, CardCommand::Clone, &mut status);
        assert_eq!(status, "Rule cloned");
        assert_eq!(store.len(), 3);
    }
}
