//! Lifecycle and attribute listeners.
//!
//! Listeners are registered when a [`ServletContext`] is built and called synchronously
//! on the thread that triggered the change. They must finish quickly and must
//! not panic: a listener runs inside the caller's attribute mutation.
//!
//! The logging listeners in this module only format and log. Formatting
//! failures degrade to a `Debug` rendering and are never propagated.
//!
//! ```rust
//! use std::sync::Arc;
//! use webglue::context::ServletContext;
//! use webglue::listener::{
//!     ContextAttributeLoggingListener, ContextLoggingListener, SessionAttributeLoggingListener,
//! };
//!
//! let context = ServletContext::builder()
//!     .context_path("/shop")
//!     .context_listener(Arc::new(ContextLoggingListener::new()))
//!     .attribute_listener(Arc::new(ContextAttributeLoggingListener::default()))
//!     .session_attribute_listener(Arc::new(SessionAttributeLoggingListener::new()))
//!     .build()
//!     .unwrap();
//! context.initialize();
//! ```

use crate::context::{AttributeEvent, AttributeSource, ServletContext};

mod format;
mod context_logging;
mod context_attribute_logging;
mod session_attribute_logging;

pub use format::format_for_log;
pub use context_logging::ContextLoggingListener;
pub use context_attribute_logging::ContextAttributeLoggingListener;
pub use session_attribute_logging::SessionAttributeLoggingListener;

/// Receives attribute changes of one scope (context or session).
///
/// For `attribute_replaced` the event carries the **old** value; the new one
/// is already in `source`.
pub trait AttributeListener: Send + Sync {
    fn attribute_added(&self, _event: &AttributeEvent, _source: &dyn AttributeSource) {}

    fn attribute_removed(&self, _event: &AttributeEvent, _source: &dyn AttributeSource) {}

    fn attribute_replaced(&self, _event: &AttributeEvent, _source: &dyn AttributeSource) {}
}

/// Receives context start-up and shut-down.
pub trait ContextListener: Send + Sync {
    fn context_initialized(&self, _context: &ServletContext) {}

    fn context_destroyed(&self, _context: &ServletContext) {}
}
