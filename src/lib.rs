//! LearnSwift - progress tracking for a bite-sized Swift course
//!
//! LearnSwift keeps a learner's completed lessons, quiz statistics, daily
//! streak and bookmarks in a local key-value store, alongside a read-only
//! catalog of lessons, glossary terms, daily challenges and tips.

pub mod app;
pub mod config;
pub mod content;
pub mod quiz;
pub mod store;
pub mod tracking;

pub use app::{App, Profile, ResetScope};
pub use config::Config;
pub use content::Catalog;
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, SharedStore, StoreError};
