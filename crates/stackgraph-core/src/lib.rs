//! stackgraph core
//!
//! Resource declarations, forward references and the construction-time DAG
//! that every synthesis run builds.
//!
//! # Overview
//!
//! - **Declaration**: a typed, named description of a cloud object
//! - **Reference**: symbolic handle to an attribute that only exists after
//!   the provisioning engine realizes the target
//! - **ResourceGraph**: append-only builder that rejects dangling references
//!   and duplicate names as they happen
//! - **SynthesizedGraph**: the sealed result, renderable to Terraform JSON
//!
//! # Example
//!
//! ```rust
//! use stackgraph_core::prelude::*;
//!
//! let mut graph = ResourceGraph::new();
//! let vpc = graph.declare(Declaration::new("aws_vpc", "vpc").with("cidr_block", "10.0.0.0/16"))?;
//! let igw = graph.declare(Declaration::new("aws_internet_gateway", "igw").with("vpc_id", vpc.id()))?;
//! graph.add_output(OutputBinding::new("igw_id", igw.id()))?;
//!
//! let sealed = graph.finish()?;
//! assert_eq!(sealed.creation_order()[0].to_string(), "aws_vpc.vpc");
//! # Ok::<(), GraphError>(())
//! ```

pub mod address;
pub mod builder;
pub mod declaration;
pub mod error;
pub mod graph;
pub mod output;
pub mod render;
pub mod settings;
pub mod value;

// Re-exports
pub use address::{Address, Reference, ResourceHandle};
pub use builder::ResourceGraph;
pub use declaration::Declaration;
pub use error::GraphError;
pub use graph::{Edge, SynthesizedGraph};
pub use output::OutputBinding;
pub use settings::{BackendBlock, ProviderBlock};
pub use value::{Fragment, Value};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for graph construction
    pub use crate::{
        Address, BackendBlock, Declaration, Fragment, GraphError, OutputBinding, ProviderBlock,
        Reference, ResourceGraph, ResourceHandle, SynthesizedGraph, Value,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
