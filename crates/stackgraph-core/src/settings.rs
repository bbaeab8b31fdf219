//! Engine-level settings that are not resources: provider and state backend

use crate::value::Value;
use indexmap::IndexMap;

/// Provider configuration block (`provider.<name>`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderBlock {
    name: String,
    properties: IndexMap<String, Value>,
}

impl ProviderBlock {
    /// New provider block
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: IndexMap::new(),
        }
    }

    /// Set a property
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Set a property only when present
    #[must_use]
    pub fn with_opt(self, key: impl Into<String>, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(v) => self.with(key, v),
            None => self,
        }
    }

    /// Provider name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Property lookup
    #[inline]
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub(crate) fn properties(&self) -> &IndexMap<String, Value> {
        &self.properties
    }
}

/// Where the provisioning engine keeps its state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BackendBlock {
    /// Engine default, state on the local disk
    #[default]
    Local,
    /// Named remote backend with its settings
    Remote {
        /// Backend type, e.g. `s3`
        kind: String,
        /// Backend settings
        properties: IndexMap<String, Value>,
    },
}

impl BackendBlock {
    /// Remote backend of the given type
    #[must_use]
    pub fn remote(kind: impl Into<String>) -> Self {
        Self::Remote {
            kind: kind.into(),
            properties: IndexMap::new(),
        }
    }

    /// Set a property on a remote backend; no-op for [`BackendBlock::Local`]
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        if let Self::Remote { properties, .. } = &mut self {
            properties.insert(key.into(), value.into());
        }
        self
    }

    /// Set a property only when present
    #[must_use]
    pub fn with_opt(self, key: impl Into<String>, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(v) => self.with(key, v),
            None => self,
        }
    }

    /// True for remote backends
    #[inline]
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }

    /// Property lookup on a remote backend
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Local => None,
            Self::Remote { properties, .. } => properties.get(key),
        }
    }
}
