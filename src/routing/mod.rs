//! Request routing.
//!
//! A GET whose path names an existing file with a known extension is served
//! from the resource root, with HTML pages rewritten for the logged-in user.
//! Anything else is looked up in the [`Router`] by `"METHOD path"`.

pub mod dispatcher;
pub mod rewrite;
pub mod router;
pub mod static_files;

pub use dispatcher::Dispatcher;
pub use router::{Handler, Router};
pub use static_files::{DiskFiles, FileSource, MemoryFiles, StaticLoader, StaticLookup};
