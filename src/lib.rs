//! In-memory discovery registry core for networked media devices
//!
//! A registry holds versioned records for six resource kinds — nodes,
//! devices, sources, flows, senders and receivers — and answers filterable,
//! paginated queries over them. This crate is the store and query engine
//! only: HTTP routing, service advertisement and process lifecycle are
//! collaborators that call into it and translate its structured results and
//! errors into transport responses.
//!
//! - [`model`] — the record kinds, validation, and strictly monotonic
//!   version stamps
//! - [`registry`] — the store: per-kind insertion-ordered collections with
//!   atomic put/get/remove
//! - [`query`] — the filter + pagination engine behind every listing
//!
//! # Example
//!
//! ```
//! use nmos_registry::{Device, Node, QueryParams, Registry};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let registry = Registry::new();
//!
//! let node = registry
//!     .put_node(Node::new("Main rack", "http://cam0.local:3000", "cam0"))
//!     .await
//!     .unwrap();
//! registry
//!     .put_device(Device::new("Capture card", node.id))
//!     .await
//!     .unwrap();
//!
//! let page = registry
//!     .get_devices(&QueryParams::new().with("node_id", node.id.to_string()))
//!     .await;
//! assert_eq!(page.total, 1);
//! assert_eq!(page.records[0].label, "Capture card");
//! # }
//! ```

pub mod model;
pub mod query;
pub mod registry;

pub use model::{
    Device, Flow, Format, Node, Receiver, Resource, ResourceKind, Sender, Source, Transport,
    Validate, Version, VersionGenerator,
};
pub use query::{QueryParams, ResultPage};
pub use registry::{Registry, RegistryConfig, RegistryError};
