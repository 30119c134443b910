//! Flattening of value-formula operator trees.

use shared::domain::Operator;

/// Collects the function names of `node` and all of its descendants into
/// `accumulator`, children left to right before the node itself.
///
/// A node without a function contributes nothing of its own, but its inputs
/// are still visited. Names are not deduplicated. The tree is only borrowed.
pub fn flatten_operators(node: Option<&Operator>, mut accumulator: Vec<String>) -> Vec<String> {
    if let Some(node) = node {
        collect(node, &mut accumulator);
    }
    accumulator
}

pub fn operator_functions(node: Option<&Operator>) -> Vec<String> {
    flatten_operators(node, Vec::new())
}

fn collect(node: &Operator, out: &mut Vec<String>) {
    for input in &node.inputs {
        collect(input, out);
    }
    if let Some(function) = &node.function {
        out.push(function.clone());
    }
}

#[cfg(test)]
#[path = "tests/operators_tests.rs"]
mod tests;
