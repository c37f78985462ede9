//! Per-client session.
//!
//! An [`HttpSession`] is a key/value store correlated with one client across
//! requests. Sessions are created with
//! [`ServletContext::create_session`](crate::context::ServletContext::create_session)
//! so attribute changes reach the context's session listeners.

use super::area::{AttributeSource, AttributeStore};
use super::bus::AttributeBus;
use super::event::AttributeScope;
use super::in_memory::InMemoryAttributes;
use super::snapshot_attributes;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Default max inactive interval, in seconds (30 minutes).
pub const DEFAULT_MAX_INACTIVE_INTERVAL: i64 = 30 * 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for SessionId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub struct HttpSession {
    id: SessionId,
    created: DateTime<Utc>,
    last_accessed: Mutex<DateTime<Utc>>,
    /// Seconds; negative means the session never times out.
    max_inactive_interval: AtomicI64,
    is_new: AtomicBool,
    attributes: InMemoryAttributes,
    bus: Arc<AttributeBus>,
}

impl std::fmt::Debug for HttpSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSession")
            .field("id", &self.id)
            .field("created", &self.created)
            .finish_non_exhaustive()
    }
}

impl HttpSession {
    pub(crate) fn new(bus: Arc<AttributeBus>) -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            created: now,
            last_accessed: Mutex::new(now),
            max_inactive_interval: AtomicI64::new(DEFAULT_MAX_INACTIVE_INTERVAL),
            is_new: AtomicBool::new(true),
            attributes: InMemoryAttributes::new(),
            bus,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn creation_time(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn last_accessed_time(&self) -> DateTime<Utc> {
        self.last_accessed.lock().map(|t| *t).unwrap_or(self.created)
    }

    /// `true` until the client has come back with this session once.
    pub fn is_new(&self) -> bool {
        self.is_new.load(Ordering::Relaxed)
    }

    pub fn max_inactive_interval(&self) -> i64 {
        self.max_inactive_interval.load(Ordering::Relaxed)
    }

    pub fn set_max_inactive_interval(&self, seconds: i64) {
        self.max_inactive_interval.store(seconds, Ordering::Relaxed);
    }

    /// Records a request made with this session.
    pub fn touch(&self) {
        if let Ok(mut t) = self.last_accessed.lock() {
            *t = Utc::now();
        }
        self.is_new.store(false, Ordering::Relaxed);
    }

    /// Returns `true` if the session was idle longer than its max inactive interval.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        let max = self.max_inactive_interval();
        max >= 0 && (now - self.last_accessed_time()).num_seconds() > max
    }

    pub fn attributes(&self) -> &dyn AttributeStore {
        &self.attributes
    }

    pub fn get_attribute(&self, name: &str) -> Option<Value> {
        self.attributes.get_attribute(name)
    }

    /// Binds `value` to `name`, firing `attribute_added` or `attribute_replaced`.
    pub fn set_attribute(&self, name: &str, value: Value) -> Result<()> {
        self.bus.set(&self.attributes, self, Some(self.id), name, value)
    }

    /// Unbinds `name`, firing `attribute_removed` if it was bound.
    pub fn remove_attribute(&self, name: &str) -> Result<Option<Value>> {
        self.bus.remove(&self.attributes, self, Some(self.id), name)
    }
}

impl AttributeSource for HttpSession {
    fn scope(&self) -> AttributeScope {
        AttributeScope::Session
    }

    fn attribute_store(&self) -> &dyn AttributeStore {
        &self.attributes
    }

    fn info_map_for_log(&self) -> BTreeMap<String, Value> {
        let mut map = BTreeMap::new();
        map.insert("id".to_string(), json!(self.id.to_string()));
        map.insert("creationTime".to_string(), json!(self.created.to_rfc3339()));
        map.insert("lastAccessedTime".to_string(), json!(self.last_accessed_time().to_rfc3339()));
        map.insert("maxInactiveInterval".to_string(), json!(self.max_inactive_interval()));
        map.insert("isNew".to_string(), json!(self.is_new()));
        map.insert("attributes".to_string(), json!(snapshot_attributes(&self.attributes)));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::bus::tests::Recorder;
    use crate::context::{AttributeEventKind, ServletContext};
    use chrono::Duration;

    #[test]
    fn new_session_defaults() {
        let ctx = ServletContext::builder().build().unwrap();
        let session = ctx.create_session();

        assert!(session.is_new());
        assert_eq!(session.max_inactive_interval(), 1800);
        assert_eq!(session.creation_time(), session.last_accessed_time());
        assert!(session.attributes().is_empty());
    }

    #[test]
    fn sessions_get_distinct_ids() {
        let ctx = ServletContext::builder().build().unwrap();
        assert_ne!(ctx.create_session().id(), ctx.create_session().id());
    }

    #[test]
    fn touch_clears_new_flag() {
        let ctx = ServletContext::builder().build().unwrap();
        let session = ctx.create_session();
        session.touch();
        assert!(!session.is_new());
        assert!(session.last_accessed_time() >= session.creation_time());
    }

    #[test]
    fn expiry_follows_max_inactive_interval() {
        let ctx = ServletContext::builder().build().unwrap();
        let session = ctx.create_session();
        session.set_max_inactive_interval(60);

        let last = session.last_accessed_time();
        assert!(!session.is_expired_at(last + Duration::seconds(60)));
        assert!(session.is_expired_at(last + Duration::seconds(61)));

        session.set_max_inactive_interval(-1);
        assert!(!session.is_expired_at(last + Duration::days(365)));
    }

    #[test]
    fn session_events_carry_session_id() {
        let recorder = Arc::new(Recorder::default());
        let ctx = ServletContext::builder()
            .session_attribute_listener(recorder.clone())
            .build()
            .unwrap();
        let session = ctx.create_session();

        session.set_attribute("cart", json!(["sku-1"])).unwrap();

        let ev = recorder.events().remove(0);
        assert_eq!(ev.scope, AttributeScope::Session);
        assert_eq!(ev.kind, AttributeEventKind::Added);
        assert_eq!(ev.session, Some(session.id()));
    }

    #[test]
    fn info_map_includes_attributes() {
        let ctx = ServletContext::builder().build().unwrap();
        let session = ctx.create_session();
        session.set_attribute("user", json!({"name": "feilong"})).unwrap();

        let info = session.info_map_for_log();
        assert_eq!(info["id"], json!(session.id().to_string()));
        assert_eq!(info["isNew"], json!(true));
        assert_eq!(info["attributes"], json!({"user": {"name": "feilong"}}));
    }
}
