//! Schema registry: domain name → descriptor, for discovery tooling.
//!
//! The registry is a plain value built during start-up and handed to
//! whoever needs it. Nothing registers itself implicitly, and the state
//! store never reads it.

use std::collections::BTreeMap;

use hubkit_domain::schema::{DeviceSchema, DomainDescriptor};
use hubkit_domain::store::DeviceType;

/// Descriptors keyed by domain, iterated in domain order.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    descriptors: BTreeMap<String, DomainDescriptor>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a descriptor. A later registration for the same domain
    /// replaces the earlier one, which is returned.
    pub fn register(&mut self, descriptor: DomainDescriptor) -> Option<DomainDescriptor> {
        let domain = descriptor.domain.clone();
        let previous = self.descriptors.insert(domain.clone(), descriptor);
        if previous.is_some() {
            tracing::debug!(%domain, "replaced schema descriptor");
        } else {
            tracing::debug!(%domain, "registered schema descriptor");
        }
        previous
    }

    /// Describe and register a schema.
    pub fn register_schema(&mut self, schema: &DeviceSchema) -> Option<DomainDescriptor> {
        self.register(schema.describe())
    }

    /// Describe and register a device type.
    pub fn register_device<D: DeviceType>(&mut self) -> Option<DomainDescriptor> {
        self.register_schema(D::SCHEMA)
    }

    #[must_use]
    pub fn get(&self, domain: &str) -> Option<&DomainDescriptor> {
        self.descriptors.get(domain)
    }

    #[must_use]
    pub fn contains(&self, domain: &str) -> bool {
        self.descriptors.contains_key(domain)
    }

    /// Registered domain names, sorted.
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.descriptors.keys().map(String::as_str)
    }

    /// Registered descriptors, sorted by domain.
    pub fn descriptors(&self) -> impl Iterator<Item = &DomainDescriptor> {
        self.descriptors.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
