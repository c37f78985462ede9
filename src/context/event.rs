use super::session::SessionId;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Display;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum AttributeScope {
    Context,
    Session,
}

impl Display for AttributeScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeScope::Context => write!(f, "servletContext"),
            AttributeScope::Session => write!(f, "session"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum AttributeEventKind {
    Added,
    Replaced,
    Removed,
}

/// A change to one attribute.
///
/// `value` is the new value for `Added`, and the **old** value for `Replaced`
/// and `Removed`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AttributeEvent {
    pub scope: AttributeScope,
    pub kind: AttributeEventKind,
    pub name: String,
    pub value: Value,
    /// Session that changed; `None` for context attributes.
    pub session: Option<SessionId>,
}
