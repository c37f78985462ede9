//! Application-wide context.
//!
//! A [`ServletContext`] is shared by every request of a deployment. It carries
//! identity metadata (server info, API version, context path, display name),
//! read-only init parameters and a mutable attribute table. Attribute changes
//! are reported to the context's attribute listeners; `initialize`/`destroy`
//! are reported to its lifecycle listeners.
//!
//! All listeners are registered on the builder; the listener lists of a
//! built context never change. Sessions are minted by the context so they
//! share its session listeners.

use super::area::{AttributeSource, AttributeStore};
use super::bus::AttributeBus;
use super::event::AttributeScope;
use super::in_memory::InMemoryAttributes;
use super::session::HttpSession;
use crate::config::ConfigError;
use crate::listener::{AttributeListener, ContextListener};
use anyhow::Result;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;

const DEFAULT_SERVER_INFO: &str = concat!("webglue/", env!("CARGO_PKG_VERSION"));

pub struct ServletContext {
    server_info: String,
    major_version: u32,
    minor_version: u32,
    context_path: String,
    context_name: Option<String>,
    init_parameters: BTreeMap<String, String>,
    attributes: Arc<dyn AttributeStore>,
    attribute_bus: AttributeBus,
    session_bus: Arc<AttributeBus>,
    context_listeners: Vec<Arc<dyn ContextListener>>,
}

impl Debug for ServletContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServletContext")
            .field("server_info", &self.server_info)
            .field("context_path", &self.context_path)
            .finish_non_exhaustive()
    }
}

impl ServletContext {
    pub fn builder() -> ServletContextBuilder {
        ServletContextBuilder::default()
    }

    pub fn server_info(&self) -> &str {
        &self.server_info
    }

    /// Supported API version as `(major, minor)`.
    pub fn version(&self) -> (u32, u32) {
        (self.major_version, self.minor_version)
    }

    /// Context path, `""` for the root context.
    pub fn context_path(&self) -> &str {
        &self.context_path
    }

    pub fn context_name(&self) -> Option<&str> {
        self.context_name.as_deref()
    }

    pub fn init_parameter(&self, name: &str) -> Option<&str> {
        self.init_parameters.get(name).map(String::as_str)
    }

    /// Init parameter names, sorted.
    pub fn init_parameter_names(&self) -> Vec<String> {
        self.init_parameters.keys().cloned().collect()
    }

    /// Read-only view of the attribute table. Mutate through
    /// [`set_attribute`](Self::set_attribute) so listeners are notified.
    pub fn attributes(&self) -> &dyn AttributeStore {
        self.attributes.as_ref()
    }

    pub fn get_attribute(&self, name: &str) -> Option<Value> {
        self.attributes.get_attribute(name)
    }

    /// Binds `value` to `name`, firing `attribute_added` or `attribute_replaced`.
    pub fn set_attribute(&self, name: &str, value: Value) -> Result<()> {
        self.attribute_bus.set(self.attributes.as_ref(), self, None, name, value)
    }

    /// Unbinds `name`, firing `attribute_removed` if it was bound.
    pub fn remove_attribute(&self, name: &str) -> Result<Option<Value>> {
        self.attribute_bus.remove(self.attributes.as_ref(), self, None, name)
    }

    /// Creates a new session wired to this context's session listeners.
    pub fn create_session(&self) -> HttpSession {
        HttpSession::new(self.session_bus.clone())
    }

    /// Notifies lifecycle listeners that the context is up, in registration order.
    pub fn initialize(&self) {
        for listener in &self.context_listeners {
            listener.context_initialized(self);
        }
    }

    /// Notifies lifecycle listeners that the context is going away, in
    /// reverse registration order.
    pub fn destroy(&self) {
        for listener in self.context_listeners.iter().rev() {
            listener.context_destroyed(self);
        }
    }
}

impl AttributeSource for ServletContext {
    fn scope(&self) -> AttributeScope {
        AttributeScope::Context
    }

    fn attribute_store(&self) -> &dyn AttributeStore {
        self.attributes.as_ref()
    }

    fn info_map_for_log(&self) -> BTreeMap<String, Value> {
        let mut map = BTreeMap::new();
        map.insert("serverInfo".to_string(), json!(self.server_info));
        map.insert(
            "servletVersion".to_string(),
            json!(format!("{}.{}", self.major_version, self.minor_version)),
        );
        map.insert("contextPath".to_string(), json!(self.context_path));
        map.insert("contextName".to_string(), json!(self.context_name));
        map
    }
}

/// Builder for [`ServletContext`].
pub struct ServletContextBuilder {
    server_info: String,
    major_version: u32,
    minor_version: u32,
    context_path: String,
    context_name: Option<String>,
    init_parameters: BTreeMap<String, String>,
    attributes: Option<Arc<dyn AttributeStore>>,
    attribute_listeners: Vec<Arc<dyn AttributeListener>>,
    session_attribute_listeners: Vec<Arc<dyn AttributeListener>>,
    context_listeners: Vec<Arc<dyn ContextListener>>,
}

impl Default for ServletContextBuilder {
    fn default() -> Self {
        Self {
            server_info: DEFAULT_SERVER_INFO.to_string(),
            major_version: 4,
            minor_version: 0,
            context_path: String::new(),
            context_name: None,
            init_parameters: BTreeMap::new(),
            attributes: None,
            attribute_listeners: Vec::new(),
            session_attribute_listeners: Vec::new(),
            context_listeners: Vec::new(),
        }
    }
}

impl ServletContextBuilder {
    pub fn server_info<S: Into<String>>(mut self, info: S) -> Self {
        self.server_info = info.into();
        self
    }

    pub fn version(mut self, major: u32, minor: u32) -> Self {
        self.major_version = major;
        self.minor_version = minor;
        self
    }

    pub fn context_path<S: Into<String>>(mut self, path: S) -> Self {
        self.context_path = path.into();
        self
    }

    pub fn context_name<S: Into<String>>(mut self, name: S) -> Self {
        self.context_name = Some(name.into());
        self
    }

    pub fn init_parameter<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.init_parameters.insert(name.into(), value.into());
        self
    }

    /// Uses `store` for attributes instead of a fresh [`InMemoryAttributes`].
    pub fn attributes(mut self, store: Arc<dyn AttributeStore>) -> Self {
        self.attributes = Some(store);
        self
    }

    /// Adds a listener for context attribute changes. Listeners run in the
    /// order they were added.
    pub fn attribute_listener(mut self, listener: Arc<dyn AttributeListener>) -> Self {
        self.attribute_listeners.push(listener);
        self
    }

    /// Adds a listener for attribute changes of every session of the context.
    pub fn session_attribute_listener(mut self, listener: Arc<dyn AttributeListener>) -> Self {
        self.session_attribute_listeners.push(listener);
        self
    }

    /// Adds a lifecycle listener.
    pub fn context_listener(mut self, listener: Arc<dyn ContextListener>) -> Self {
        self.context_listeners.push(listener);
        self
    }

    /// Validate and build the context.
    ///
    /// The context path must be empty or start with `/` and not end with `/`.
    pub fn build(self) -> Result<ServletContext, ConfigError> {
        let path = &self.context_path;
        if !path.is_empty() && (!path.starts_with('/') || path.ends_with('/')) {
            return Err(ConfigError::InvalidContextPath(path.clone()));
        }

        Ok(ServletContext {
            server_info: self.server_info,
            major_version: self.major_version,
            minor_version: self.minor_version,
            context_path: self.context_path,
            context_name: self.context_name,
            init_parameters: self.init_parameters,
            attributes: self
                .attributes
                .unwrap_or_else(|| Arc::new(InMemoryAttributes::new())),
            attribute_bus: AttributeBus::new(AttributeScope::Context, self.attribute_listeners),
            session_bus: Arc::new(AttributeBus::new(
                AttributeScope::Session,
                self.session_attribute_listeners,
            )),
            context_listeners: self.context_listeners,
        })
    }
}
