//! Resource model: record kinds, validation, identity and versioning
//!
//! Six record kinds share a base shape (`id`, `version`, `label`,
//! `description`) plus kind-specific relational fields. The store stamps a
//! strictly increasing [`Version`] on every write; [`Validate`] gates
//! admission; the [`Resource`] trait is the seam the store and query engine
//! drive records through.

pub mod identity;
pub mod resource;
pub mod validate;
pub mod version;

pub use identity::{generate_id, generate_label, DEFAULT_LABEL};
pub use resource::{
    Device, FieldValue, Flow, Format, Node, Receiver, Resource, ResourceKind, Sender, Source,
    Transport,
};
pub use validate::{Validate, ValidationFault};
pub use version::{generate_version, ParseVersionError, Version, VersionGenerator};
