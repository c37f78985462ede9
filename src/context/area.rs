use super::event::AttributeScope;
use anyhow::Result;
use serde_json::Value;
use std::collections::BTreeMap;

/// Object-safe attribute store (a context's or session's attribute table).
pub trait AttributeStore: Send + Sync {
    /// Retrieves the value bound to `name`, or `None` if not found.
    fn get_attribute(&self, name: &str) -> Option<Value>;

    /// Binds `value` to `name` and returns the value it replaced, if any.
    fn set_attribute(&self, name: &str, value: Value) -> Result<Option<Value>>;

    /// Unbinds `name` and returns the removed value, if any.
    fn remove_attribute(&self, name: &str) -> Result<Option<Value>>;

    /// Returns all attribute names, sorted.
    fn attribute_names(&self) -> Vec<String>;

    /// Returns the number of attributes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The owner of an attribute store, as seen by listeners.
pub trait AttributeSource: Send + Sync {
    fn scope(&self) -> AttributeScope;

    /// The underlying attribute store. Listeners read from it, never write.
    fn attribute_store(&self) -> &dyn AttributeStore;

    /// Identity metadata of the owner, for log lines.
    fn info_map_for_log(&self) -> BTreeMap<String, Value>;
}
