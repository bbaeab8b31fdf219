//! Resource declarations

use crate::address::{Address, Reference, ResourceHandle};
use crate::value::Value;
use indexmap::IndexMap;

/// Named, typed description of a cloud object to be created
///
/// Built fluently and handed to [`crate::ResourceGraph::declare`]:
///
/// ```
/// use stackgraph_core::{Declaration, ResourceGraph};
///
/// let mut graph = ResourceGraph::new();
/// let vpc = graph
///     .declare(Declaration::new("aws_vpc", "vpc").with("cidr_block", "10.0.0.0/16"))
///     .unwrap();
/// let subnet = Declaration::new("aws_subnet", "subnet_a").with("vpc_id", vpc.id());
/// assert!(graph.declare(subnet).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    address: Address,
    properties: IndexMap<String, Value>,
    depends_on: Vec<Address>,
    section: Option<String>,
}

impl Declaration {
    /// New declaration with no properties
    #[must_use]
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: Address::new(kind, name),
            properties: IndexMap::new(),
            depends_on: Vec::new(),
            section: None,
        }
    }

    /// Set a property
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Set a property only when a value is present
    #[must_use]
    pub fn with_opt(self, key: impl Into<String>, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(v) => self.with(key, v),
            None => self,
        }
    }

    /// Explicit ordering dependency with no attribute consumed
    #[must_use]
    pub fn depends_on(mut self, handle: &ResourceHandle) -> Self {
        if !self.depends_on.contains(handle.address()) {
            self.depends_on.push(handle.address().clone());
        }
        self
    }

    /// Address
    #[inline]
    #[must_use]
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Resource type
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &str {
        self.address.kind()
    }

    /// Logical name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        self.address.name()
    }

    /// Property lookup
    #[inline]
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// All properties in insertion order
    #[inline]
    pub fn properties(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Explicit ordering dependencies
    #[inline]
    #[must_use]
    pub fn dependencies(&self) -> &[Address] {
        &self.depends_on
    }

    /// Conditional section the declaration belongs to
    #[inline]
    #[must_use]
    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    /// Every forward reference held in the properties
    #[must_use]
    pub fn references(&self) -> Vec<&Reference> {
        self.properties
            .values()
            .flat_map(Value::references)
            .collect()
    }

    pub(crate) fn set_section(&mut self, section: Option<String>) {
        self.section = section;
    }
}
