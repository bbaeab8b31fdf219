//! Construction-time graph errors

use crate::address::Address;

/// Structural error raised while declaring resources or outputs
///
/// Every variant is detected while the graph is being built; none is deferred
/// to the provisioning engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Two declarations share a logical name
    #[error("duplicate resource name '{name}' (already declared as {existing})")]
    DuplicateName {
        /// Offending logical name
        name: String,
        /// Address already holding the name
        existing: Address,
    },

    /// Two outputs share a name
    #[error("duplicate output name '{name}'")]
    DuplicateOutput {
        /// Offending output name
        name: String,
    },

    /// A reference or ordering dependency targets something not declared yet
    #[error("{from} refers to {target}, which is not declared in the graph")]
    UnknownReference {
        /// Declaration or output holding the reference
        from: String,
        /// Unresolvable target as written
        target: String,
    },

    /// A declaration refers to itself
    #[error("{address} refers to itself")]
    SelfReference {
        /// Declaration holding the reference
        address: Address,
    },

    /// A declaration arrived after outputs were bound
    #[error("{address} declared after outputs were bound")]
    DeclarationAfterOutputs {
        /// The late declaration
        address: Address,
    },

    /// The dependency graph contains a cycle
    #[error("dependency cycle detected at {address}")]
    CycleDetected {
        /// A declaration on the cycle
        address: Address,
    },
}

impl GraphError {
    /// Reference errors: dangling targets, self references and cycles
    #[inline]
    #[must_use]
    pub fn is_reference_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownReference { .. } | Self::SelfReference { .. } | Self::CycleDetected { .. }
        )
    }

    /// Name collisions among declarations or outputs
    #[inline]
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateName { .. } | Self::DuplicateOutput { .. })
    }
}
