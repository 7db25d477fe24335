//! Process wiring: store, routes, and dispatcher built from [`Config`].

pub mod listener;

use std::sync::Arc;

use crate::config::Config;
use crate::handlers;
use crate::routing::{DiskFiles, Dispatcher, StaticLoader};
use crate::store::MemoryStore;

/// Builds the shared dispatcher, seeding the store with configured users.
pub fn build_dispatcher(cfg: &Config) -> anyhow::Result<Arc<Dispatcher>> {
    let store = Arc::new(MemoryStore::with_users(cfg.users.iter().cloned())?);
    let router = handlers::routes(store.clone(), &cfg.pages);
    tracing::info!(routes = router.len(), root = %cfg.static_files.root.display(), "routes registered");

    Ok(Arc::new(Dispatcher::new(
        StaticLoader::new(DiskFiles::new(cfg.static_files.root.clone())),
        router,
        store.clone(),
        store,
        cfg.pages.clone(),
    )))
}
