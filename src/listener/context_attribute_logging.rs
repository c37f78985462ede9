use super::format::{describe_change, format_for_log};
use super::AttributeListener;
use crate::config::LoggingConfig;
use crate::context::{snapshot_attributes, AttributeEvent, AttributeSource};
use log::Level;

/// Logs context attribute changes at `info` level, followed by the whole
/// attribute table.
///
/// Names listed in [`LoggingConfig::excluded_attribute_keys`] are neither
/// reported nor shown in the table. Containers bind bulky internals (class
/// loaders, resource sets) as context attributes, which is what the
/// exclusion list is for.
#[derive(Debug, Clone, Default)]
pub struct ContextAttributeLoggingListener {
    config: LoggingConfig,
}

impl ContextAttributeLoggingListener {
    pub fn new(config: LoggingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoggingConfig {
        &self.config
    }

    /// Log line for `event`, or `None` if the attribute is excluded.
    pub fn message(&self, event: &AttributeEvent, source: &dyn AttributeSource) -> Option<String> {
        if self.config.is_excluded(&event.name) {
            return None;
        }

        let mut attributes = snapshot_attributes(source.attribute_store());
        attributes.retain(|name, _| !self.config.is_excluded(name));

        Some(format!(
            "{},now {} attribute:[{}]",
            describe_change(event),
            event.scope,
            format_for_log(&attributes)
        ))
    }

    fn log(&self, event: &AttributeEvent, source: &dyn AttributeSource) {
        if !log::log_enabled!(Level::Info) {
            return;
        }
        if let Some(message) = self.message(event, source) {
            log::info!("{}", message);
        }
    }
}

impl AttributeListener for ContextAttributeLoggingListener {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{AttributeEventKind, AttributeScope, ServletContext};
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn event(kind: AttributeEventKind, name: &str, value: Value) -> AttributeEvent {
        AttributeEvent {
            scope: AttributeScope::Context,
            kind,
            name: name.to_string(),
            value,
            session: None,
        }
    }

    fn listener() -> ContextAttributeLoggingListener {
        let config = LoggingConfig::builder()
            .exclude_attribute("org.apache.catalina.resources")
            .build()
            .unwrap();
        ContextAttributeLoggingListener::new(config)
    }

    #[test]
    fn added_message_format() {
        let ctx = ServletContext::builder().build().unwrap();
        ctx.set_attribute("shopName", json!("feilong")).unwrap();

        let msg = listener()
            .message(&event(AttributeEventKind::Added, "shopName", json!("feilong")), &ctx)
            .unwrap();
        assert_eq!(
            msg,
            "name:[shopName],value:[feilong] added to [servletContext],now servletContext attribute:[{\n  \"shopName\": \"feilong\"\n}]"
        );
    }

    #[test]
    fn excluded_names_are_skipped() {
        let ctx = ServletContext::builder().build().unwrap();
        let ev = event(AttributeEventKind::Added, "org.apache.catalina.resources", json!("x"));
        assert_eq!(listener().message(&ev, &ctx), None);
    }

    #[test]
    fn excluded_names_are_hidden_from_table() {
        let ctx = ServletContext::builder().build().unwrap();
        ctx.set_attribute("org.apache.catalina.resources", json!("huge")).unwrap();
        ctx.set_attribute("shopName", json!("feilong")).unwrap();

        let msg = listener()
            .message(&event(AttributeEventKind::Removed, "shopName", json!("feilong")), &ctx)
            .unwrap();
        assert!(msg.contains("removed from [servletContext]"));
        assert!(!msg.contains("huge"));
    }

    #[test]
    fn registered_listener_leaves_attributes_intact() {
        let _ = env_logger::builder().is_test(true).try_init();

        let ctx = ServletContext::builder()
            .attribute_listener(Arc::new(listener()))
            .build()
            .unwrap();
        ctx.set_attribute("a", json!(1)).unwrap();
        ctx.set_attribute("a", json!(2)).unwrap();

        assert_eq!(ctx.get_attribute("a"), Some(json!(2)));
    }
}
