//! Controller layer: card commands and their dispatch onto the rule view.

pub mod events;
pub mod orchestration;
