//! Addresses and forward references
//!
//! An [`Address`] names a declaration inside the graph. A [`Reference`] points
//! at an attribute the declaration will only receive once the provisioning
//! engine realizes it (an id, an ARN, a DNS name). Nothing here resolves a
//! reference; it is a symbolic handle that renders to an interpolation.

use std::fmt::{self, Display, Formatter};

/// Resource type plus logical name, e.g. `aws_vpc.vpc`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address {
    /// Resource type (`aws_vpc`, `aws_lb`, ...)
    kind: String,

    /// Logical name, unique within the graph
    name: String,
}

impl Address {
    /// Create an address
    #[inline]
    #[must_use]
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Resource type
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Logical name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reference to an attribute of this address
    #[inline]
    #[must_use]
    pub fn attr(&self, attribute: impl Into<String>) -> Reference {
        Reference::new(self.clone(), attribute)
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.kind, self.name)
    }
}

/// Symbolic handle to a not-yet-realized attribute of a declaration
///
/// # Example
/// ```
/// use stackgraph_core::{Address, Reference};
///
/// let vpc = Address::new("aws_vpc", "vpc");
/// let id = Reference::new(vpc, "id");
/// assert_eq!(id.expression(), "${aws_vpc.vpc.id}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Reference {
    address: Address,
    attribute: String,
}

impl Reference {
    /// Create a reference to `attribute` on `address`
    #[inline]
    #[must_use]
    pub fn new(address: Address, attribute: impl Into<String>) -> Self {
        Self {
            address,
            attribute: attribute.into(),
        }
    }

    /// Target declaration
    #[inline]
    #[must_use]
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Attribute name on the target
    #[inline]
    #[must_use]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Interpolation understood by the provisioning engine
    #[must_use]
    pub fn expression(&self) -> String {
        format!("${{{self}}}")
    }
}

impl Display for Reference {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.address, self.attribute)
    }
}

/// Handle to a declaration that the graph has accepted
///
/// Handles are only minted by [`crate::ResourceGraph::declare`], so every
/// reference produced from one targets a declaration that already exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceHandle {
    address: Address,
}

impl ResourceHandle {
    pub(crate) fn new(address: Address) -> Self {
        Self { address }
    }

    /// Address of the declaration
    #[inline]
    #[must_use]
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Logical name of the declaration
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        self.address.name()
    }

    /// Reference to an arbitrary attribute
    #[inline]
    #[must_use]
    pub fn attr(&self, attribute: &str) -> Reference {
        self.address.attr(attribute)
    }

    /// `id` attribute
    #[inline]
    #[must_use]
    pub fn id(&self) -> Reference {
        self.attr("id")
    }

    /// `arn` attribute
    #[inline]
    #[must_use]
    pub fn arn(&self) -> Reference {
        self.attr("arn")
    }

    /// `name` attribute
    #[inline]
    #[must_use]
    pub fn name_ref(&self) -> Reference {
        self.attr("name")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_display() {
        let address = Address::new("aws_subnet", "subnet_a");
        assert_eq!(address.to_string(), "aws_subnet.subnet_a");
    }

    #[test]
    fn test_reference_expression() {
        let reference = Address::new("aws_lb", "alb").attr("dns_name");
        assert_eq!(reference.to_string(), "aws_lb.alb.dns_name");
        assert_eq!(reference.expression(), "${aws_lb.alb.dns_name}");
    }

    #[test]
    fn test_handle_shortcuts() {
        let handle = ResourceHandle::new(Address::new("aws_ecs_service", "service"));
        assert_eq!(handle.id().attribute(), "id");
        assert_eq!(handle.arn().attribute(), "arn");
        assert_eq!(handle.name_ref().attribute(), "name");
        assert_eq!(handle.name(), "service");
    }
}
