use anyhow::{anyhow, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::context::area::AttributeStore;

/// In-memory attribute store (no persistence).
#[derive(Debug, Default)]
pub struct InMemoryAttributes {
    map: RwLock<BTreeMap<String, Value>>,
}

impl InMemoryAttributes {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttributeStore for InMemoryAttributes {
    fn get_attribute(&self, name: &str) -> Option<Value> {
        self.map.read().ok()?.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: Value) -> Result<Option<Value>> {
        let mut map = self.map.write().map_err(|_| anyhow!("attribute store lock poisoned"))?;
        Ok(map.insert(name.to_string(), value))
    }

    fn remove_attribute(&self, name: &str) -> Result<Option<Value>> {
        let mut map = self.map.write().map_err(|_| anyhow!("attribute store lock poisoned"))?;
        Ok(map.remove(name))
    }

    fn attribute_names(&self) -> Vec<String> {
        self.map
            .read()
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn len(&self) -> usize {
        self.map.read().map(|m| m.len()).unwrap_or(0)
    }
}
