//! Registry store implementation
//!
//! The authoritative in-memory collection of records, one insertion-ordered
//! collection per resource kind, each behind its own `RwLock`. Writes to one
//! kind never block readers of another; readers of a kind see either the
//! pre- or post-write state, never a partial one.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::model::{
    Device, Flow, Node, Receiver, Resource, Sender, Source, Version, VersionGenerator,
};
use crate::query::{self, QueryParams, ResultPage};

use super::config::RegistryConfig;
use super::error::RegistryError;

/// An insertion-ordered record collection with id lookup
struct Collection<T: Resource> {
    records: Vec<T>,
    index: HashMap<Uuid, usize>,
}

impl<T: Resource> Collection<T> {
    fn new() -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert, or replace in place keeping the record's insertion slot
    fn upsert(&mut self, record: T) {
        match self.index.get(&record.id()) {
            Some(&slot) => self.records[slot] = record,
            None => {
                self.index.insert(record.id(), self.records.len());
                self.records.push(record);
            }
        }
    }

    fn get(&self, id: &Uuid) -> Option<&T> {
        self.index.get(id).map(|&slot| &self.records[slot])
    }

    fn remove(&mut self, id: &Uuid) -> Option<T> {
        let slot = self.index.remove(id)?;
        let record = self.records.remove(slot);
        for other in self.index.values_mut() {
            if *other > slot {
                *other -= 1;
            }
        }
        Some(record)
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

/// The discovery registry: six typed collections plus a shared version source
///
/// All mutation goes through `put_*`/`remove_*`; every value crossing the
/// store boundary is an independent snapshot, so callers can hold results
/// across later writes without further synchronization.
pub struct Registry {
    nodes: RwLock<Collection<Node>>,
    devices: RwLock<Collection<Device>>,
    sources: RwLock<Collection<Source>>,
    flows: RwLock<Collection<Flow>>,
    senders: RwLock<Collection<Sender>>,
    receivers: RwLock<Collection<Receiver>>,

    /// Strictly increasing version source shared by every kind
    versions: VersionGenerator,

    config: RegistryConfig,
}

impl Registry {
    /// Create an empty registry with default configuration
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry with custom configuration
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            nodes: RwLock::new(Collection::new()),
            devices: RwLock::new(Collection::new()),
            sources: RwLock::new(Collection::new()),
            flows: RwLock::new(Collection::new()),
            senders: RwLock::new(Collection::new()),
            receivers: RwLock::new(Collection::new()),
            versions: VersionGenerator::new(),
            config,
        }
    }

    /// Get the registry configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Issue a fresh version stamp from the registry's generator
    pub fn next_version(&self) -> Version {
        self.versions.next()
    }

    // Generic operations; the per-kind methods below are the public surface.

    async fn put_in<T: Resource>(
        &self,
        lock: &RwLock<Collection<T>>,
        mut record: T,
    ) -> Result<T, RegistryError> {
        record
            .validate()
            .map_err(|fault| RegistryError::Validation {
                kind: T::KIND,
                field: fault.field,
                reason: fault.reason,
            })?;

        let mut collection = lock.write().await;
        record.stamp(self.versions.next());
        let stored = record.clone();
        collection.upsert(record);

        tracing::info!(
            kind = %T::KIND,
            id = %stored.id(),
            version = %stored.version(),
            "record stored"
        );

        Ok(stored)
    }

    async fn get_in<T: Resource>(
        &self,
        lock: &RwLock<Collection<T>>,
        id: &str,
    ) -> Result<T, RegistryError> {
        let id = parse_id(id)?;
        let collection = lock.read().await;
        collection
            .get(&id)
            .cloned()
            .ok_or(RegistryError::NotFound { kind: T::KIND, id })
    }

    async fn list_in<T: Resource>(
        &self,
        lock: &RwLock<Collection<T>>,
        params: &QueryParams,
    ) -> ResultPage<T> {
        let collection = lock.read().await;
        query::select(&collection.records, params, &self.config)
    }

    async fn remove_in<T: Resource>(
        &self,
        lock: &RwLock<Collection<T>>,
        id: &str,
    ) -> Result<T, RegistryError> {
        let id = parse_id(id)?;
        let mut collection = lock.write().await;
        let removed = collection
            .remove(&id)
            .ok_or(RegistryError::NotFound { kind: T::KIND, id })?;

        tracing::info!(kind = %T::KIND, id = %id, "record removed");
        Ok(removed)
    }

    // Nodes

    pub async fn put_node(&self, node: Node) -> Result<Node, RegistryError> {
        self.put_in(&self.nodes, node).await
    }

    pub async fn get_node(&self, id: &str) -> Result<Node, RegistryError> {
        self.get_in(&self.nodes, id).await
    }

    pub async fn get_nodes(&self, params: &QueryParams) -> ResultPage<Node> {
        self.list_in(&self.nodes, params).await
    }

    pub async fn remove_node(&self, id: &str) -> Result<Node, RegistryError> {
        self.remove_in(&self.nodes, id).await
    }

    pub async fn node_count(&self) -> usize {
        self.nodes.read().await.len()
    }

    // Devices

    pub async fn put_device(&self, device: Device) -> Result<Device, RegistryError> {
        self.put_in(&self.devices, device).await
    }

    pub async fn get_device(&self, id: &str) -> Result<Device, RegistryError> {
        self.get_in(&self.devices, id).await
    }

    pub async fn get_devices(&self, params: &QueryParams) -> ResultPage<Device> {
        self.list_in(&self.devices, params).await
    }

    pub async fn remove_device(&self, id: &str) -> Result<Device, RegistryError> {
        self.remove_in(&self.devices, id).await
    }

    pub async fn device_count(&self) -> usize {
        self.devices.read().await.len()
    }

    // Sources

    pub async fn put_source(&self, source: Source) -> Result<Source, RegistryError> {
        self.put_in(&self.sources, source).await
    }

    pub async fn get_source(&self, id: &str) -> Result<Source, RegistryError> {
        self.get_in(&self.sources, id).await
    }

    pub async fn get_sources(&self, params: &QueryParams) -> ResultPage<Source> {
        self.list_in(&self.sources, params).await
    }

    pub async fn remove_source(&self, id: &str) -> Result<Source, RegistryError> {
        self.remove_in(&self.sources, id).await
    }

    pub async fn source_count(&self) -> usize {
        self.sources.read().await.len()
    }

    // Flows

    pub async fn put_flow(&self, flow: Flow) -> Result<Flow, RegistryError> {
        self.put_in(&self.flows, flow).await
    }

    pub async fn get_flow(&self, id: &str) -> Result<Flow, RegistryError> {
        self.get_in(&self.flows, id).await
    }

    pub async fn get_flows(&self, params: &QueryParams) -> ResultPage<Flow> {
        self.list_in(&self.flows, params).await
    }

    pub async fn remove_flow(&self, id: &str) -> Result<Flow, RegistryError> {
        self.remove_in(&self.flows, id).await
    }

    pub async fn flow_count(&self) -> usize {
        self.flows.read().await.len()
    }

    // Senders

    pub async fn put_sender(&self, sender: Sender) -> Result<Sender, RegistryError> {
        self.put_in(&self.senders, sender).await
    }

    pub async fn get_sender(&self, id: &str) -> Result<Sender, RegistryError> {
        self.get_in(&self.senders, id).await
    }

    pub async fn get_senders(&self, params: &QueryParams) -> ResultPage<Sender> {
        self.list_in(&self.senders, params).await
    }

    pub async fn remove_sender(&self, id: &str) -> Result<Sender, RegistryError> {
        self.remove_in(&self.senders, id).await
    }

    pub async fn sender_count(&self) -> usize {
        self.senders.read().await.len()
    }

    // Receivers

    pub async fn put_receiver(&self, receiver: Receiver) -> Result<Receiver, RegistryError> {
        self.put_in(&self.receivers, receiver).await
    }

    pub async fn get_receiver(&self, id: &str) -> Result<Receiver, RegistryError> {
        self.get_in(&self.receivers, id).await
    }

    pub async fn get_receivers(&self, params: &QueryParams) -> ResultPage<Receiver> {
        self.list_in(&self.receivers, params).await
    }

    pub async fn remove_receiver(&self, id: &str) -> Result<Receiver, RegistryError> {
        self.remove_in(&self.receivers, id).await
    }

    pub async fn receiver_count(&self) -> usize {
        self.receivers.read().await.len()
    }

    // Subscriptions

    /// Push subscriptions are not available in this registry
    pub fn subscriptions(&self) -> Result<(), RegistryError> {
        Err(RegistryError::NotImplemented {
            capability: "subscriptions",
        })
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_id(id: &str) -> Result<Uuid, RegistryError> {
    Uuid::parse_str(id).map_err(|_| RegistryError::InvalidIdentifier {
        value: id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use crate::model::{Format, Transport};

    use super::*;

    fn node(label: &str) -> Node {
        Node::new(label, "http://cam0.local:3000", "cam0")
    }

    #[tokio::test]
    async fn test_put_then_get_roundtrip() {
        let registry = Registry::new();
        let before = node("Main rack");

        let stored = registry.put_node(before.clone()).await.unwrap();
        let fetched = registry.get_node(&before.id.to_string()).await.unwrap();

        assert_eq!(fetched, stored);
        // Equal except for the regenerated version.
        assert_eq!(fetched.id, before.id);
        assert_eq!(fetched.label, before.label);
        assert_eq!(fetched.href, before.href);
        assert_eq!(fetched.hostname, before.hostname);
        assert!(fetched.version > before.version);
    }

    #[tokio::test]
    async fn test_replace_advances_version() {
        let registry = Registry::new();
        let first = registry.put_node(node("Main rack")).await.unwrap();

        let mut renamed = first.clone();
        renamed.label = "Main rack (moved)".to_string();
        let second = registry.put_node(renamed).await.unwrap();

        assert_eq!(second.id, first.id);
        assert!(second.version > first.version);
        assert_eq!(registry.node_count().await, 1);
    }

    #[tokio::test]
    async fn test_replace_keeps_insertion_slot() {
        let registry = Registry::new();
        let a = registry.put_node(node("Rack A")).await.unwrap();
        let b = registry.put_node(node("Rack B")).await.unwrap();
        let c = registry.put_node(node("Rack C")).await.unwrap();

        let mut replaced = b.clone();
        replaced.label = "Rack B2".to_string();
        registry.put_node(replaced).await.unwrap();

        let page = registry.get_nodes(&QueryParams::new()).await;
        let ids: Vec<Uuid> = page.records.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![a.id, b.id, c.id]);
        assert_eq!(page.records[1].label, "Rack B2");
    }

    #[tokio::test]
    async fn test_invalid_record_leaves_store_untouched() {
        let registry = Registry::new();
        let result = registry.put_node(node("")).await;

        match result {
            Err(RegistryError::Validation { kind, field, .. }) => {
                assert_eq!(kind, crate::model::ResourceKind::Node);
                assert_eq!(field, "label");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(registry.node_count().await, 0);
    }

    #[tokio::test]
    async fn test_get_with_malformed_identifier() {
        let registry = Registry::new();
        let err = registry.get_node("not-a-uuid").await.unwrap_err();
        assert_eq!(
            err,
            RegistryError::InvalidIdentifier {
                value: "not-a-uuid".to_string()
            }
        );
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_get_with_absent_identifier() {
        let registry = Registry::new();
        registry.put_node(node("Main rack")).await.unwrap();

        let absent = Uuid::new_v4();
        let err = registry.get_node(&absent.to_string()).await.unwrap_err();
        assert_eq!(
            err,
            RegistryError::NotFound {
                kind: crate::model::ResourceKind::Node,
                id: absent
            }
        );
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_remove_then_get_not_found() {
        let registry = Registry::new();
        let stored = registry.put_node(node("Main rack")).await.unwrap();
        let id = stored.id.to_string();

        let removed = registry.remove_node(&id).await.unwrap();
        assert_eq!(removed, stored);
        assert!(matches!(
            registry.get_node(&id).await,
            Err(RegistryError::NotFound { .. })
        ));
        assert!(matches!(
            registry.remove_node(&id).await,
            Err(RegistryError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_removal_preserves_remaining_order() {
        let registry = Registry::new();
        let a = registry.put_node(node("Rack A")).await.unwrap();
        let b = registry.put_node(node("Rack B")).await.unwrap();
        let c = registry.put_node(node("Rack C")).await.unwrap();

        registry.remove_node(&b.id.to_string()).await.unwrap();

        let page = registry.get_nodes(&QueryParams::new()).await;
        let ids: Vec<Uuid> = page.records.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![a.id, c.id]);
        // Lookup by id still resolves after the slot shuffle.
        assert_eq!(registry.get_node(&c.id.to_string()).await.unwrap(), c);
    }

    #[tokio::test]
    async fn test_empty_collection_listing_metadata() {
        let registry = Registry::new();
        let page = registry.get_nodes(&QueryParams::new()).await;

        assert!(page.records.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.page_of, 1);
        assert_eq!(page.pages, 1);
        assert_eq!(page.size, 0);
    }

    #[tokio::test]
    async fn test_two_nodes_listing_metadata() {
        let registry = Registry::new();
        let a = registry.put_node(node("Rack A")).await.unwrap();
        let b = registry.put_node(node("Rack B")).await.unwrap();

        let page = registry.get_nodes(&QueryParams::new()).await;
        assert_eq!(page.records, vec![a, b]);
        assert_eq!((page.total, page.page_of, page.pages, page.size), (2, 1, 1, 2));
    }

    #[tokio::test]
    async fn test_device_filtered_by_node_id() {
        let registry = Registry::new();
        let n = registry.put_node(node("Main rack")).await.unwrap();
        let d = registry
            .put_device(Device::new("Capture card", n.id))
            .await
            .unwrap();

        let hit = registry
            .get_devices(&QueryParams::new().with("node_id", n.id.to_string()))
            .await;
        assert_eq!(hit.records, vec![d]);
        assert_eq!(hit.total, 1);

        let miss = registry
            .get_devices(&QueryParams::new().with("node_id", Uuid::new_v4().to_string()))
            .await;
        assert!(miss.records.is_empty());
        assert_eq!(miss.total, 0);
    }

    #[tokio::test]
    async fn test_free_text_filters() {
        let registry = Registry::new();
        let device_id = Uuid::new_v4();
        let garish = registry
            .put_source(Source::new("Garish Punk", Format::Video, device_id))
            .await
            .unwrap();
        registry
            .put_source(Source::new("Noisy Punk", Format::Audio, device_id))
            .await
            .unwrap();
        let flow = registry
            .put_flow(
                Flow::new("Funk Punk", Format::Audio, garish.id)
                    .with_description("Blasting at you, punk!"),
            )
            .await
            .unwrap();

        let substring = registry
            .get_sources(&QueryParams::new().with("label", "Garish"))
            .await;
        assert_eq!(substring.records, vec![garish]);

        let anchored = registry
            .get_sources(&QueryParams::new().with("label", "^Garish$"))
            .await;
        assert_eq!(anchored.total, 0);

        let dotted = registry
            .get_flows(&QueryParams::new().with("description", "Blas.ing"))
            .await;
        assert_eq!(dotted.records, vec![flow]);
    }

    #[tokio::test]
    async fn test_receiver_filtered_by_device_and_format() {
        let registry = Registry::new();
        let device_id = Uuid::new_v4();
        let audio = registry
            .put_receiver(Receiver::new(
                "Talkback",
                Format::Audio,
                Transport::RtpMulticast,
                device_id,
            ))
            .await
            .unwrap();
        registry
            .put_receiver(Receiver::new(
                "Monitor wall",
                Format::Video,
                Transport::RtpMulticast,
                device_id,
            ))
            .await
            .unwrap();

        let page = registry
            .get_receivers(
                &QueryParams::new()
                    .with("device_id", device_id.to_string())
                    .with("format", "audio"),
            )
            .await;
        assert_eq!(page.records, vec![audio]);
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn test_pagination_over_filtered_nodes() {
        let registry = Registry::new();
        for i in 0..25 {
            registry.put_node(node(&format!("Rack {i}"))).await.unwrap();
        }

        let config = registry.config().clone();
        let first = registry.get_nodes(&QueryParams::new()).await;
        assert_eq!(first.size, config.default_page_size);
        assert_eq!(first.total, 25);
        assert_eq!(first.pages, 3);
        assert_eq!(first.page_of, 1);

        let last = registry
            .get_nodes(&QueryParams::new().with("page", "3"))
            .await;
        assert_eq!(last.size, 5);
        assert_eq!(last.records[0].label, "Rack 20");

        let clamped = registry
            .get_nodes(&QueryParams::new().with("page", "99"))
            .await;
        assert_eq!(clamped.page_of, 3);
        assert_eq!(clamped.records, last.records);
    }

    #[tokio::test]
    async fn test_unknown_filter_and_bad_pattern_return_empty_success() {
        let registry = Registry::new();
        registry.put_node(node("Main rack")).await.unwrap();

        let unknown = registry
            .get_nodes(&QueryParams::new().with("flavour", "salty"))
            .await;
        assert_eq!(unknown.total, 0);
        assert_eq!(unknown.pages, 1);

        let broken = registry
            .get_nodes(&QueryParams::new().with("label", "Main(rack"))
            .await;
        assert_eq!(broken.total, 0);
    }

    #[tokio::test]
    async fn test_snapshots_survive_later_writes() {
        let registry = Registry::new();
        let stored = registry.put_node(node("Main rack")).await.unwrap();
        let snapshot = registry.get_node(&stored.id.to_string()).await.unwrap();

        let mut renamed = stored.clone();
        renamed.label = "Renamed rack".to_string();
        registry.put_node(renamed).await.unwrap();

        assert_eq!(snapshot.label, "Main rack");
        let current = registry.get_node(&stored.id.to_string()).await.unwrap();
        assert_eq!(current.label, "Renamed rack");
    }

    #[tokio::test]
    async fn test_versions_increase_across_kinds() {
        let registry = Registry::new();
        let n = registry.put_node(node("Main rack")).await.unwrap();
        let d = registry
            .put_device(Device::new("Capture card", n.id))
            .await
            .unwrap();
        let s = registry
            .put_source(Source::new("Cam feed", Format::Video, d.id))
            .await
            .unwrap();

        assert!(d.version > n.version);
        assert!(s.version > d.version);
    }

    #[tokio::test]
    async fn test_dangling_references_are_admitted() {
        let registry = Registry::new();
        // No flow or device with these ids exists; the store does not care.
        let sender = Sender::new(
            "Program out",
            Uuid::new_v4(),
            Transport::RtpMulticast,
            Uuid::new_v4(),
            "http://cam0.local/program.sdp",
        );
        assert!(registry.put_sender(sender).await.is_ok());
    }

    #[test]
    fn test_subscriptions_are_not_implemented() {
        let registry = Registry::new();
        let err = registry.subscriptions().unwrap_err();
        assert_eq!(
            err,
            RegistryError::NotImplemented {
                capability: "subscriptions"
            }
        );
        assert_eq!(err.status_code(), 501);
    }
}
