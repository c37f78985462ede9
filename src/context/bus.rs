use super::area::{AttributeSource, AttributeStore};
use super::event::{AttributeEvent, AttributeEventKind, AttributeScope};
use super::session::SessionId;
use crate::listener::AttributeListener;
use anyhow::Result;
use serde_json::Value;
use std::fmt::Debug;
use std::sync::Arc;

/// The listeners of one attribute scope.
///
/// The listener list is fixed when the bus is created. Listeners are called
/// synchronously, in registration order, on the thread that mutated the
/// attribute. They must return quickly.
pub struct AttributeBus {
    scope: AttributeScope,
    listeners: Vec<Arc<dyn AttributeListener>>,
}

impl Debug for AttributeBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributeBus")
            .field("scope", &self.scope)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl AttributeBus {
    pub fn new(scope: AttributeScope, listeners: Vec<Arc<dyn AttributeListener>>) -> Self {
        Self { scope, listeners }
    }

    pub fn scope(&self) -> AttributeScope {
        self.scope
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Reports `event` to every listener.
    pub fn publish(&self, event: &AttributeEvent, source: &dyn AttributeSource) {
        for listener in &self.listeners {
            match event.kind {
                AttributeEventKind::Added => listener.attribute_added(event, source),
                AttributeEventKind::Replaced => listener.attribute_replaced(event, source),
                AttributeEventKind::Removed => listener.attribute_removed(event, source),
            }
        }
    }

    /// Stores `value` under `name` in `store` and reports `Added` or `Replaced`.
    pub(crate) fn set(
        &self,
        store: &dyn AttributeStore,
        source: &dyn AttributeSource,
        session: Option<SessionId>,
        name: &str,
        value: Value,
    ) -> Result<()> {
        let old = store.set_attribute(name, value.clone())?;
        let (kind, value) = match old {
            Some(old) => (AttributeEventKind::Replaced, old),
            None => (AttributeEventKind::Added, value),
        };
        self.publish(
            &AttributeEvent {
                scope: self.scope,
                kind,
                name: name.to_string(),
                value,
                session,
            },
            source,
        );
        Ok(())
    }

    /// Removes `name` from `store` and reports `Removed` if it was bound.
    pub(crate) fn remove(
        &self,
        store: &dyn AttributeStore,
        source: &dyn AttributeSource,
        session: Option<SessionId>,
        name: &str,
    ) -> Result<Option<Value>> {
        let Some(old) = store.remove_attribute(name)? else {
            return Ok(None);
        };
        self.publish(
            &AttributeEvent {
                scope: self.scope,
                kind: AttributeEventKind::Removed,
                name: name.to_string(),
                value: old.clone(),
                session,
            },
            source,
        );
        Ok(Some(old))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::context::InMemoryAttributes;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    struct Source(InMemoryAttributes);

    impl AttributeSource for Source {
        fn scope(&self) -> AttributeScope {
            AttributeScope::Context
        }
        fn attribute_store(&self) -> &dyn AttributeStore {
            &self.0
        }
        fn info_map_for_log(&self) -> BTreeMap<String, Value> {
            BTreeMap::new()
        }
    }

    /// Records every event it sees, plus the store size at that moment.
    #[derive(Default)]
    pub(crate) struct Recorder {
        pub(crate) seen: Mutex<Vec<(AttributeEvent, usize)>>,
    }

    impl Recorder {
        fn record(&self, event: &AttributeEvent, source: &dyn AttributeSource) {
            self.seen
                .lock()
                .unwrap()
                .push((event.clone(), source.attribute_store().len()));
        }

        pub(crate) fn events(&self) -> Vec<AttributeEvent> {
            self.seen.lock().unwrap().iter().map(|(e, _)| e.clone()).collect()
        }
    }

    impl AttributeListener for Recorder {
        fn attribute_added(&self, event: &AttributeEvent, source: &dyn AttributeSource) {
            self.record(event, source)
        }
        fn attribute_removed(&self, event: &AttributeEvent, source: &dyn AttributeSource) {
            self.record(event, source)
        }
        fn attribute_replaced(&self, event: &AttributeEvent, source: &dyn AttributeSource) {
            self.record(event, source)
        }
    }

    #[test]
    fn add_replace_remove_reach_listener_in_order() {
        let recorder = Arc::new(Recorder::default());
        let bus = AttributeBus::new(AttributeScope::Context, vec![recorder.clone() as Arc<dyn AttributeListener>]);

        let source = Source(InMemoryAttributes::new());
        bus.set(&source.0, &source, None, "a", json!(1)).unwrap();
        bus.set(&source.0, &source, None, "a", json!(2)).unwrap();
        bus.remove(&source.0, &source, None, "a").unwrap();
        bus.remove(&source.0, &source, None, "a").unwrap();

        let seen: Vec<(AttributeEventKind, String, Value, usize)> = recorder
            .seen
            .lock()
            .unwrap()
            .iter()
            .map(|(e, len)| (e.kind, e.name.clone(), e.value.clone(), *len))
            .collect();
        assert_eq!(
            seen,
            vec![
                (AttributeEventKind::Added, "a".to_string(), json!(1), 1),
                (AttributeEventKind::Replaced, "a".to_string(), json!(1), 1),
                (AttributeEventKind::Removed, "a".to_string(), json!(2), 0),
            ]
        );
    }

    #[test]
    fn every_listener_sees_each_event() {
        let first = Arc::new(Recorder::default());
        let second = Arc::new(Recorder::default());
        let listeners: Vec<Arc<dyn AttributeListener>> = vec![
            first.clone() as Arc<dyn AttributeListener>,
            second.clone() as Arc<dyn AttributeListener>,
        ];
        let bus = AttributeBus::new(AttributeScope::Context, listeners);

        let source = Source(InMemoryAttributes::new());
        bus.set(&source.0, &source, None, "k", json!("v")).unwrap();

        assert_eq!(bus.listener_count(), 2);
        assert_eq!(first.events(), second.events());
        assert_eq!(first.events()[0].scope, AttributeScope::Context);
    }

    #[test]
    fn mutations_without_listeners_still_apply() {
        let bus = AttributeBus::new(AttributeScope::Session, Vec::new());
        let source = Source(InMemoryAttributes::new());
        bus.set(&source.0, &source, None, "k", json!(true)).unwrap();

        assert_eq!(bus.listener_count(), 0);
        assert_eq!(source.0.get_attribute("k"), Some(json!(true)));
    }
}
