//! Plain-text rendering of a rule card.

use std::fmt::Write as _;

use rule_view::{
    view_model::{SourceView, TargetPropertyView},
    RuleCard, RuleViewModel,
};

pub fn render_card(card: &RuleCard) -> String {
    match card {
        RuleCard::Editing(form) => match &form.parent_id {
            Some(parent) => format!("Editing rule '{}' (in '{parent}')\n", form.id),
            None => format!("Editing rule '{}'\n", form.id),
        },
        RuleCard::Viewing(model) => render_view(model),
    }
}

fn render_view(model: &RuleViewModel) -> String {
    let mut out = String::new();

    if let Some(target) = &model.target {
        render_target(&mut out, target);
    }
    if let Some(data_type) = &model.data_type {
        let _ = writeln!(out, "Data type: {}{}", data_type.node_type, data_type.appended_text);
    }
    match &model.source {
        Some(SourceView::Path { path, edit_href, .. }) => {
            let _ = writeln!(out, "Value path: {path}");
            render_edit_link(&mut out, edit_href.as_deref());
        }
        Some(SourceView::Formula {
            formula, edit_href, ..
        }) => {
            let _ = writeln!(out, "Value formula: {}", formula.summary);
            render_edit_link(&mut out, edit_href.as_deref());
        }
        None => {}
    }
    if let Some(id) = &model.examples {
        let _ = writeln!(out, "Examples of target data: rule {id}");
    }
    if let Some(label) = &model.label {
        let _ = writeln!(out, "Label: {label}");
    }
    if let Some(description) = &model.description {
        let _ = writeln!(out, "Description: {description}");
    }

    out.push_str("[edit] [copy] [clone] [remove]\n");
    out
}

fn render_target(out: &mut String, target: &TargetPropertyView) {
    let _ = writeln!(out, "Target property: {}", target.uri);
    if let Some(notice) = target.attribute_notice() {
        let _ = writeln!(out, "  {notice}");
    }
}

fn render_edit_link(out: &mut String, href: Option<&str>) {
    if let Some(href) = href {
        let _ = writeln!(out, "  edit: {href}");
    }
}
