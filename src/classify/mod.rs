//! File classification into conventional commit labels.

pub mod label;
pub mod rules;

pub use label::CommitLabel;
pub use rules::{DEFAULT_LABEL, RULES, Rule, classify, commit_message, commit_message_for, explain};
