use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::MappingError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(pub String);

impl RuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RuleId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Reads an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    Direct,
    Complex,
    Object,
    Uri,
    Root,
    #[default]
    #[serde(other)]
    Other,
}

impl RuleType {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleType::Direct => "direct",
            RuleType::Complex => "complex",
            RuleType::Object => "object",
            RuleType::Uri => "uri",
            RuleType::Root => "root",
            RuleType::Other => "other",
        }
    }

    pub fn is_direct(self) -> bool {
        self == RuleType::Direct
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingTarget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_attribute: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A node of a value formula. Nodes own their inputs, so a tree can never
/// contain cycles or shared sub-nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub inputs: Vec<Operator>,
}

impl Operator {
    pub fn function(name: impl Into<String>) -> Self {
        Self {
            function: Some(name.into()),
            inputs: Vec::new(),
        }
    }

    pub fn with_inputs(mut self, inputs: Vec<Operator>) -> Self {
        self.inputs = inputs;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingRule {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: RuleId,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub rule_type: RuleType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_paths: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping_target: Option<MappingTarget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RuleMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<RuleId>,
}

// Empty strings are treated as absent everywhere a value is displayed.
fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

impl MappingRule {
    pub fn from_json(raw: &str) -> Result<Self, MappingError> {
        serde_json::from_str(raw).map_err(MappingError::Parse)
    }

    pub fn target_uri(&self) -> Option<&str> {
        present(self.mapping_target.as_ref()?.uri.as_ref())
    }

    pub fn is_attribute(&self) -> bool {
        self.mapping_target
            .as_ref()
            .is_some_and(|target| target.is_attribute)
    }

    pub fn value_type(&self) -> Option<&ValueType> {
        self.mapping_target.as_ref()?.value_type.as_ref()
    }

    pub fn node_type(&self) -> Option<&str> {
        present(self.value_type()?.node_type.as_ref())
    }

    /// The single value path, only meaningful for direct rules.
    pub fn direct_source_path(&self) -> Option<&str> {
        if !self.rule_type.is_direct() {
            return None;
        }
        present(self.source_path.as_ref())
    }

    /// The value paths of a formula rule. Present-but-empty is still `Some`.
    pub fn formula_source_paths(&self) -> Option<&[String]> {
        if self.rule_type.is_direct() {
            return None;
        }
        self.source_paths.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        present(self.metadata.as_ref()?.label.as_ref())
    }

    pub fn description(&self) -> Option<&str> {
        present(self.metadata.as_ref()?.description.as_ref())
    }
}
