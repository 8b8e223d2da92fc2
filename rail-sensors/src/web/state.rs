//! Application state for the web layer.

use std::sync::Arc;

use crate::config_flow::ConfigFlow;
use crate::registry::EntryRegistry;

/// Shared application state.
pub struct AppState<P, B> {
    /// Loaded entries and their coordinators
    pub registry: Arc<EntryRegistry<P>>,

    /// Config flow, holding the shared probe client
    pub flow: Arc<ConfigFlow<B>>,
}

impl<P, B> AppState<P, B> {
    pub fn new(registry: Arc<EntryRegistry<P>>, flow: ConfigFlow<B>) -> Self {
        Self {
            registry,
            flow: Arc::new(flow),
        }
    }
}

impl<P, B> Clone for AppState<P, B> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            flow: self.flow.clone(),
        }
    }
}
