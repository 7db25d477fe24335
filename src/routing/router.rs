use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::DispatchError;
use crate::http::request::{route_key, Method};
use crate::http::response::Response;

/// A dynamic handler. Receives the raw request body.
pub type Handler = Arc<dyn Fn(&[u8]) -> Result<Response, DispatchError> + Send + Sync>;

/// Route table keyed by `"METHOD path"`.
///
/// Filled once at startup, then only read.
#[derive(Clone, Default)]
pub struct Router {
    routes: HashMap<String, Handler>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `method path`, replacing any earlier one.
    pub fn route<F>(mut self, method: Method, path: &str, handler: F) -> Self
    where
        F: Fn(&[u8]) -> Result<Response, DispatchError> + Send + Sync + 'static,
    {
        let key = route_key(method, path);
        if self.routes.insert(key.clone(), Arc::new(handler)).is_some() {
            tracing::warn!(route = %key, "handler replaced");
        }
        self
    }

    pub fn lookup(&self, key: &str) -> Option<&Handler> {
        self.routes.get(key)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.routes.keys().collect();
        keys.sort();
        f.debug_struct("Router").field("routes", &keys).finish()
    }
}
