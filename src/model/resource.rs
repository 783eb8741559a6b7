//! The six registered resource kinds
//!
//! Nodes own devices, devices own sources, sources feed flows, flows feed
//! senders, and receivers consume from the network. Ownership is by
//! reference only: a foreign key is a copy of another record's id, and the
//! store never checks that it resolves — a dangling reference is the
//! writer's responsibility.
//!
//! Every record is a plain value. Clones handed out by the store are
//! point-in-time snapshots; later writes never reach them.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validate::Validate;
use super::version::Version;

/// The resource kinds a registry holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Node,
    Device,
    Source,
    Flow,
    Sender,
    Receiver,
}

impl ResourceKind {
    /// Lowercase singular name, as used in diagnostics and URLs
    pub const fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Node => "node",
            ResourceKind::Device => "device",
            ResourceKind::Source => "source",
            ResourceKind::Flow => "flow",
            ResourceKind::Sender => "sender",
            ResourceKind::Receiver => "receiver",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Media format of a source, flow or receiver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Audio,
    Video,
    Data,
    Mux,
}

impl Format {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Format::Audio => "audio",
            Format::Video => "video",
            Format::Data => "data",
            Format::Mux => "mux",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport used by a sender or receiver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transport {
    #[serde(rename = "rtp")]
    Rtp,
    #[serde(rename = "rtp.mcast")]
    RtpMulticast,
    #[serde(rename = "rtp.ucast")]
    RtpUnicast,
    #[serde(rename = "dash")]
    Dash,
}

impl Transport {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Transport::Rtp => "rtp",
            Transport::RtpMulticast => "rtp.mcast",
            Transport::RtpUnicast => "rtp.ucast",
            Transport::Dash => "dash",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a field participates in query matching
///
/// `Exact` fields (identifiers, enums, URLs, hostnames) must equal the
/// query value character for character. `Text` fields (label, description)
/// are searched with an unanchored pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Exact(Cow<'a, str>),
    Text(&'a str),
}

/// Common surface of all six record kinds
///
/// The store and query engine drive records entirely through this trait:
/// identity, version stamping, validation (via the [`Validate`] supertrait)
/// and named field access for filtering.
pub trait Resource: Validate + Clone + Send + Sync + 'static {
    /// The kind this record belongs to
    const KIND: ResourceKind;

    /// Record identifier, immutable after creation
    fn id(&self) -> Uuid;

    /// Current version stamp
    fn version(&self) -> Version;

    /// Replace the version stamp (the store does this on every put)
    fn stamp(&mut self, version: Version);

    /// Look up a field by its query-parameter name
    ///
    /// Returns `None` for names this kind does not carry, and for optional
    /// fields that are unset; either way the record cannot match a
    /// predicate on that name.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

// Field lookup shared by all kinds.
fn common_field<'a>(
    id: Uuid,
    version: Version,
    label: &'a str,
    description: &'a Option<String>,
    name: &str,
) -> Option<FieldValue<'a>> {
    match name {
        "id" => Some(FieldValue::Exact(Cow::Owned(id.to_string()))),
        "version" => Some(FieldValue::Exact(Cow::Owned(version.to_string()))),
        "label" => Some(FieldValue::Text(label)),
        "description" => description.as_deref().map(FieldValue::Text),
        _ => None,
    }
}

/// A processing host offering registered devices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: Uuid,
    pub version: Version,
    pub label: String,
    pub description: Option<String>,
    /// Base URL of the node's own API
    pub href: String,
    pub hostname: String,
}

impl Node {
    pub fn new(
        label: impl Into<String>,
        href: impl Into<String>,
        hostname: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            version: Version::default(),
            label: label.into(),
            description: None,
            href: href.into(),
            hostname: hostname.into(),
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Resource for Node {
    const KIND: ResourceKind = ResourceKind::Node;

    fn id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> Version {
        self.version
    }

    fn stamp(&mut self, version: Version) {
        self.version = version;
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "href" => Some(FieldValue::Exact(Cow::Borrowed(&self.href))),
            "hostname" => Some(FieldValue::Exact(Cow::Borrowed(&self.hostname))),
            _ => common_field(self.id, self.version, &self.label, &self.description, name),
        }
    }
}

/// A logical device hosted by a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: Uuid,
    pub version: Version,
    pub label: String,
    pub description: Option<String>,
    /// Owning node (by reference, may dangle)
    pub node_id: Uuid,
}

impl Device {
    pub fn new(label: impl Into<String>, node_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            version: Version::default(),
            label: label.into(),
            description: None,
            node_id,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Resource for Device {
    const KIND: ResourceKind = ResourceKind::Device;

    fn id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> Version {
        self.version
    }

    fn stamp(&mut self, version: Version) {
        self.version = version;
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "node_id" => Some(FieldValue::Exact(Cow::Owned(self.node_id.to_string()))),
            _ => common_field(self.id, self.version, &self.label, &self.description, name),
        }
    }
}

/// An origin of media, owned by a device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub id: Uuid,
    pub version: Version,
    pub label: String,
    pub description: Option<String>,
    pub format: Format,
    pub device_id: Uuid,
}

impl Source {
    pub fn new(label: impl Into<String>, format: Format, device_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            version: Version::default(),
            label: label.into(),
            description: None,
            format,
            device_id,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Resource for Source {
    const KIND: ResourceKind = ResourceKind::Source;

    fn id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> Version {
        self.version
    }

    fn stamp(&mut self, version: Version) {
        self.version = version;
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "format" => Some(FieldValue::Exact(Cow::Borrowed(self.format.as_str()))),
            "device_id" => Some(FieldValue::Exact(Cow::Owned(self.device_id.to_string()))),
            _ => common_field(self.id, self.version, &self.label, &self.description, name),
        }
    }
}

/// A sequence of media derived from a source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    pub id: Uuid,
    pub version: Version,
    pub label: String,
    pub description: Option<String>,
    pub format: Format,
    pub source_id: Uuid,
}

impl Flow {
    pub fn new(label: impl Into<String>, format: Format, source_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            version: Version::default(),
            label: label.into(),
            description: None,
            format,
            source_id,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Resource for Flow {
    const KIND: ResourceKind = ResourceKind::Flow;

    fn id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> Version {
        self.version
    }

    fn stamp(&mut self, version: Version) {
        self.version = version;
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "format" => Some(FieldValue::Exact(Cow::Borrowed(self.format.as_str()))),
            "source_id" => Some(FieldValue::Exact(Cow::Owned(self.source_id.to_string()))),
            _ => common_field(self.id, self.version, &self.label, &self.description, name),
        }
    }
}

/// A transmitter putting a flow onto the network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sender {
    pub id: Uuid,
    pub version: Version,
    pub label: String,
    pub description: Option<String>,
    pub flow_id: Uuid,
    pub transport: Transport,
    pub device_id: Uuid,
    /// URL of the transport manifest (e.g. an SDP file)
    pub manifest_href: String,
}

impl Sender {
    pub fn new(
        label: impl Into<String>,
        flow_id: Uuid,
        transport: Transport,
        device_id: Uuid,
        manifest_href: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            version: Version::default(),
            label: label.into(),
            description: None,
            flow_id,
            transport,
            device_id,
            manifest_href: manifest_href.into(),
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Resource for Sender {
    const KIND: ResourceKind = ResourceKind::Sender;

    fn id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> Version {
        self.version
    }

    fn stamp(&mut self, version: Version) {
        self.version = version;
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "flow_id" => Some(FieldValue::Exact(Cow::Owned(self.flow_id.to_string()))),
            "transport" => Some(FieldValue::Exact(Cow::Borrowed(self.transport.as_str()))),
            "device_id" => Some(FieldValue::Exact(Cow::Owned(self.device_id.to_string()))),
            "manifest_href" => Some(FieldValue::Exact(Cow::Borrowed(&self.manifest_href))),
            _ => common_field(self.id, self.version, &self.label, &self.description, name),
        }
    }
}

/// A receiver consuming media from the network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receiver {
    pub id: Uuid,
    pub version: Version,
    pub label: String,
    pub description: Option<String>,
    pub format: Format,
    pub transport: Transport,
    pub device_id: Uuid,
}

impl Receiver {
    pub fn new(
        label: impl Into<String>,
        format: Format,
        transport: Transport,
        device_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            version: Version::default(),
            label: label.into(),
            description: None,
            format,
            transport,
            device_id,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Resource for Receiver {
    const KIND: ResourceKind = ResourceKind::Receiver;

    fn id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> Version {
        self.version
    }

    fn stamp(&mut self, version: Version) {
        self.version = version;
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "format" => Some(FieldValue::Exact(Cow::Borrowed(self.format.as_str()))),
            "transport" => Some(FieldValue::Exact(Cow::Borrowed(self.transport.as_str()))),
            "device_id" => Some(FieldValue::Exact(Cow::Owned(self.device_id.to_string()))),
            _ => common_field(self.id, self.version, &self.label, &self.description, name),
        }
    }
}
