//! The registry store
//!
//! One insertion-ordered collection per resource kind, each guarded by its
//! own `RwLock`, plus the shared version generator stamped onto every write.
//!
//! # Architecture
//!
//! ```text
//!                        Arc<Registry>
//!          ┌────────────────────────────────────┐
//!          │ nodes:     RwLock<Collection<..>>  │
//!          │ devices:   RwLock<Collection<..>>  │
//!          │ sources:   RwLock<Collection<..>>  │
//!          │ flows:     RwLock<Collection<..>>  │
//!          │ senders:   RwLock<Collection<..>>  │
//!          │ receivers: RwLock<Collection<..>>  │
//!          │ versions:  VersionGenerator        │
//!          └───────────────┬────────────────────┘
//!                          │
//!          ┌───────────────┼───────────────┐
//!          ▼               ▼               ▼
//!     put_<kind>()    get_<kind>()    get_<kind>s()
//!     validate,       UUID check,     query::select
//!     stamp, upsert   snapshot        filter + page
//! ```
//!
//! Cross-kind operations proceed concurrently (one lock per kind). Every
//! record returned is an independent clone: a snapshot the caller can keep
//! across later writes.

pub mod config;
pub mod error;
pub mod store;

pub use config::RegistryConfig;
pub use error::RegistryError;
pub use store::Registry;
