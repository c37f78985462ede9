use crate::context::{AttributeEvent, AttributeEventKind};
use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;

/// Pretty JSON for log lines; falls back to the `Debug` rendering when the
/// value can't be serialized.
pub fn format_for_log<T: Serialize + Debug + ?Sized>(value: &T) -> String {
    match serde_json::to_string_pretty(value) {
        Ok(s) => s,
        Err(e) => {
            log::trace!("can't format value as json: {}", e);
            format!("{:?}", value)
        }
    }
}

/// `name:[..],value:[..] added to [scope]` part shared by the attribute listeners.
pub(crate) fn describe_change(event: &AttributeEvent) -> String {
    let direction = match event.kind {
        AttributeEventKind::Added => "added to",
        AttributeEventKind::Removed => "removed from",
        AttributeEventKind::Replaced => "replaced to",
    };
    format!(
        "name:[{}],value:[{}] {} [{}]",
        event.name,
        value_for_log(&event.value),
        direction,
        event.scope
    )
}

/// Strings are logged bare, everything else as compact JSON.
fn value_for_log(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
