//! Synthesis pipeline
//!
//! Resolve configuration, then run every builder stage against one
//! [`ResourceGraph`] in dependency order and seal it. Configuration errors
//! surface before the graph exists.

use crate::access::build_access;
use crate::error::SynthError;
use crate::load_balancing::build_load_balancing;
use crate::network::build_network;
use crate::observability::build_alerting;
use crate::outputs::emit_outputs;
use crate::provider::{configure_backend, configure_provider};
use crate::registry::build_registry;
use crate::workload::build_workload;
use stackgraph_config::{Configuration, RawInput};
use stackgraph_core::{GraphError, ResourceGraph, SynthesizedGraph};

/// Result of a successful run
#[derive(Debug)]
pub struct SynthesizedStack {
    configuration: Configuration,
    graph: SynthesizedGraph,
}

impl SynthesizedStack {
    /// Configuration the graph was built from
    #[inline]
    #[must_use]
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// The sealed graph
    #[inline]
    #[must_use]
    pub fn graph(&self) -> &SynthesizedGraph {
        &self.graph
    }

    /// Split into parts
    #[must_use]
    pub fn into_parts(self) -> (Configuration, SynthesizedGraph) {
        (self.configuration, self.graph)
    }
}

/// Resolve `raw` and build the whole stack
///
/// # Errors
/// - [`SynthError::Config`] when the input does not resolve; nothing is declared
/// - [`SynthError::Graph`] when a builder stage is rejected
pub fn synthesize(raw: &RawInput) -> Result<SynthesizedStack, SynthError> {
    let configuration = Configuration::resolve(raw)?;
    let graph = build(&configuration)?;
    Ok(SynthesizedStack {
        configuration,
        graph,
    })
}

/// Build the stack for an already resolved configuration
///
/// # Errors
/// Any [`GraphError`] raised by a builder stage.
pub fn build(config: &Configuration) -> Result<SynthesizedGraph, GraphError> {
    let mut graph = ResourceGraph::new();
    configure_provider(&mut graph, config);
    configure_backend(&mut graph, config);

    let network = build_network(&mut graph, config)?;
    let access = build_access(&mut graph, config, &network)?;
    let balancer = build_load_balancing(&mut graph, config, &network, &access)?;
    let workload = build_workload(&mut graph, config, &network, &access, &balancer)?;
    build_alerting(&mut graph, config, &balancer)?;
    let registry = build_registry(&mut graph, config)?;
    emit_outputs(&mut graph, &balancer, &workload, registry.as_ref())?;

    graph.finish()
}
