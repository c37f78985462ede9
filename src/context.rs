//! Application and session attribute stores.
//!
//! This module defines the key/value stores that back the application-wide
//! [`ServletContext`] and the per-client [`HttpSession`], plus the event
//! plumbing that reports attribute changes to listeners.
//!
//! # Concepts
//!
//! - [`AttributeStore`]: object-safe key/value store with `serde_json::Value`
//!   values. [`InMemoryAttributes`] is the default backend.
//! - [`AttributeBus`]: the listeners of one scope, fixed when the context is
//!   built. Mutations made through a context or session are reported here
//!   synchronously, on the mutating thread.
//! - [`AttributeSource`]: what a listener sees of the context or session that
//!   fired an event (its store and its identity metadata).
//!
//! Stores are passed explicitly; there is no global attribute table.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use webglue::context::{snapshot_attributes, ServletContext};
//!
//! let context = ServletContext::builder()
//!     .context_path("/shop")
//!     .init_parameter("env", "dev")
//!     .build()
//!     .unwrap();
//!
//! context.set_attribute("shopName", json!("feilong")).unwrap();
//! let snapshot = snapshot_attributes(context.attributes());
//! assert_eq!(snapshot["shopName"], json!("feilong"));
//! ```

use serde_json::Value;
use std::collections::BTreeMap;

/// Attribute store trait and the source view handed to listeners.
pub mod area;
/// Attribute change events.
pub mod event;
/// In-memory attribute store.
pub mod in_memory;
/// Listener dispatch of a scope.
pub mod bus;
/// Application-wide context.
pub mod servlet_context;
/// Per-client session.
pub mod session;

pub use area::{AttributeSource, AttributeStore};
pub use bus::AttributeBus;
pub use event::{AttributeEvent, AttributeEventKind, AttributeScope};
pub use in_memory::InMemoryAttributes;
pub use servlet_context::{ServletContext, ServletContextBuilder};
pub use session::{HttpSession, SessionId};

/// Returns every attribute of `store`, ordered by name. Empty if there are none.
pub fn snapshot_attributes(store: &dyn AttributeStore) -> BTreeMap<String, Value> {
    store
        .attribute_names()
        .into_iter()
        .filter_map(|name| store.get_attribute(&name).map(|v| (name, v)))
        .collect()
}

/// Returns every init parameter of `context`, ordered by name.
pub fn snapshot_init_parameters(context: &ServletContext) -> BTreeMap<String, String> {
    context
        .init_parameter_names()
        .into_iter()
        .filter_map(|name| context.init_parameter(&name).map(|v| (name, v.to_string())))
        .collect()
}
