use std::fmt;

use serde::Serialize;

/// Where a profile stands with one assistant, as derived from a fresh read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssistantStatus {
    NotConfigured,
    Active,
    /// Subscribed without fields, or fields without a subscription.
    /// Left behind by other clients; the next save or deactivate repairs it.
    Incomplete,
}

impl AssistantStatus {
    pub fn from_parts(subscribed: bool, fields_set: bool) -> Self {
        match (subscribed, fields_set) {
            (false, false) => AssistantStatus::NotConfigured,
            (true, true) => AssistantStatus::Active,
            _ => AssistantStatus::Incomplete,
        }
    }
}

impl fmt::Display for AssistantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssistantStatus::NotConfigured => write!(f, "not configured"),
            AssistantStatus::Active => write!(f, "active"),
            AssistantStatus::Incomplete => write!(f, "incomplete"),
        }
    }
}

/// The change a confirmed write carries a profile through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Configuring,
    Reconfiguring,
    Deactivating,
}

impl Transition {
    pub fn for_save(current: AssistantStatus) -> Self {
        match current {
            AssistantStatus::Active => Transition::Reconfiguring,
            AssistantStatus::NotConfigured | AssistantStatus::Incomplete => Transition::Configuring,
        }
    }

    /// Status once the write is confirmed
    pub fn target(&self) -> AssistantStatus {
        match self {
            Transition::Configuring | Transition::Reconfiguring => AssistantStatus::Active,
            Transition::Deactivating => AssistantStatus::NotConfigured,
        }
    }
}
