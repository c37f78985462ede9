use super::format::format_for_log;
use super::ContextListener;
use crate::context::{snapshot_attributes, snapshot_init_parameters, AttributeSource, ServletContext};
use log::Level;

/// Logs context start-up and shut-down at `info` level.
///
/// Start-up logs the identity metadata, the attribute table and the init
/// parameters; shut-down logs the identity metadata only.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextLoggingListener;

impl ContextLoggingListener {
    pub fn new() -> Self {
        Self
    }

    pub fn initialized_message(context: &ServletContext) -> String {
        format!(
            "servletContext [Initialized],base info:[{}],[attribute] info:[{}],[initParameter] info:[{}]",
            format_for_log(&context.info_map_for_log()),
            format_for_log(&snapshot_attributes(context.attributes())),
            format_for_log(&snapshot_init_parameters(context)),
        )
    }

    pub fn destroyed_message(context: &ServletContext) -> String {
        format!(
            "servletContext [Destroyed] info:[{}]",
            format_for_log(&context.info_map_for_log())
        )
    }
}

impl ContextListener for ContextLoggingListener {
    fn context_initialized(&self, context: &ServletContext) {
        if log::log_enabled!(Level::Info) {
            log::info!("{}", Self::initialized_message(context));
        }
    }

    fn context_destroyed(&self, context: &ServletContext) {
        if log::log_enabled!(Level::Info) {
            log::info!("{}", Self::destroyed_message(context));
        }
    }
}
