use super::format::{describe_change, format_for_log};
use super::AttributeListener;
use crate::context::{AttributeEvent, AttributeSource};
use log::Level;

/// Logs session attribute changes at `debug` level, followed by the session's
/// info map.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionAttributeLoggingListener;

impl SessionAttributeLoggingListener {
    pub fn new() -> Self {
        Self
    }

    pub fn message(event: &AttributeEvent, source: &dyn AttributeSource) -> String {
        format!(
            "{},now {} info:[{}]",
            describe_change(event),
            event.scope,
            format_for_log(&source.info_map_for_log())
        )
    }

    fn log(&self, event: &AttributeEvent, source: &dyn AttributeSource) {
        if log::log_enabled!(Level::Debug) {
            log::debug!("{}", Self::message(event, source));
        }
    }
}

impl AttributeListener for SessionAttributeLoggingListener {
    fn attribute_added(&self, event: &AttributeEvent, source: &dyn AttributeSource) {
        self.log(event, source)
    }

    fn attribute_removed(&self, event: &AttributeEvent, source: &dyn AttributeSource) {
        self.log(event, source)
    }

    fn attribute_replaced(&self, event: &AttributeEvent, source: &dyn AttributeSource) {
        self.log(event, source)
    }
}
