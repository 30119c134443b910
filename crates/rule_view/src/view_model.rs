//! Data shape of a rule card. Every section is optional and is simply left
//! out when the rule does not carry the backing field.

use serde::Serialize;
use shared::domain::{MappingRule, RuleId, ValueType};

use crate::operators::operator_functions;

pub const ATTRIBUTE_NOTICE: &str =
    "Values will be written as attributes if the target dataset supports it.";
pub const PATH_EDIT_TOOLTIP: &str = "Convert value path to value formula";
pub const FORMULA_EDIT_TOOLTIP: &str = "Edit value formula";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetPropertyView {
    pub uri: String,
    pub is_attribute: bool,
}

impl TargetPropertyView {
    pub fn attribute_notice(&self) -> Option<&'static str> {
        self.is_attribute.then_some(ATTRIBUTE_NOTICE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataTypeView {
    pub node_type: String,
    /// Optional qualifier shown after the type name, e.g. ` (en)`.
    pub appended_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormulaSummary {
    pub paths: Vec<String>,
    pub operators: Vec<String>,
    pub summary: String,
}

impl FormulaSummary {
    pub fn new(paths: Vec<String>, operators: Vec<String>) -> Self {
        let summary = format!(
            "Formula uses {}: {} and {}: {}.",
            counted(paths.len(), "value path"),
            paths.join(", "),
            counted(operators.len(), "operator function"),
            operators.join(", "),
        );
        Self {
            paths,
            operators,
            summary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceView {
    Path {
        path: String,
        edit_href: Option<String>,
        tooltip: &'static str,
    },
    Formula {
        formula: FormulaSummary,
        edit_href: Option<String>,
        tooltip: &'static str,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleViewModel {
    pub target: Option<TargetPropertyView>,
    pub data_type: Option<DataTypeView>,
    pub source: Option<SourceView>,
    /// Rule id the examples provider should render target values for.
    pub examples: Option<RuleId>,
    pub label: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditFormProps {
    pub id: RuleId,
    pub parent_id: Option<RuleId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RuleCard {
    Viewing(RuleViewModel),
    Editing(EditFormProps),
}

/// Language tag suffix for a value type, or an empty string.
pub fn language_suffix(value_type: &ValueType) -> String {
    match &value_type.lang {
        Some(lang) => format!(" ({lang})"),
        None => String::new(),
    }
}

fn counted(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

pub fn derive_view_model(rule: &MappingRule, editor_href: Option<&str>) -> RuleViewModel {
    let target = rule.target_uri().map(|uri| TargetPropertyView {
        uri: uri.to_string(),
        is_attribute: rule.is_attribute(),
    });

    let data_type = rule.node_type().map(|node_type| DataTypeView {
        node_type: node_type.to_string(),
        appended_text: rule.value_type().map(language_suffix).unwrap_or_default(),
    });

    let source = if let Some(path) = rule.direct_source_path() {
        Some(SourceView::Path {
            path: path.to_string(),
            edit_href: editor_href.map(str::to_string),
            tooltip: PATH_EDIT_TOOLTIP,
        })
    } else {
        rule.formula_source_paths().map(|paths| SourceView::Formula {
            formula: FormulaSummary::new(
                paths.to_vec(),
                operator_functions(rule.operator.as_ref()),
            ),
            edit_href: editor_href.map(str::to_string),
            tooltip: FORMULA_EDIT_TOOLTIP,
        })
    };

    RuleViewModel {
        target,
        data_type,
        source,
        examples: (!rule.id.is_empty()).then(|| rule.id.clone()),
        label: rule.label().map(str::to_string),
        description: rule.description().map(str::to_string),
    }
}

#[cfg(test)]
#[path = "tests/view_model_tests.rs"]
mod tests;
