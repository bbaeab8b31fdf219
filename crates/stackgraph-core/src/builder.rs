//! Resource Graph Builder
//!
//! The construction phase of a synthesis run. Declarations are appended in
//! dependency order; each one is checked against the graph as it stands, so a
//! dangling reference or a name collision is reported at the call that
//! introduced it. [`ResourceGraph::finish`] seals the result into an immutable
//! [`SynthesizedGraph`].

use crate::address::{Address, ResourceHandle};
use crate::declaration::Declaration;
use crate::error::GraphError;
use crate::graph::{Edge, SynthesizedGraph};
use crate::output::OutputBinding;
use crate::settings::{BackendBlock, ProviderBlock};
use indexmap::IndexMap;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Append-only builder for a resource graph
///
/// Usage:
/// ```
/// use stackgraph_core::{Declaration, OutputBinding, ResourceGraph};
///
/// let mut graph = ResourceGraph::new();
/// let vpc = graph.declare(Declaration::new("aws_vpc", "vpc"))?;
/// graph.declare(Declaration::new("aws_subnet", "subnet_a").with("vpc_id", vpc.id()))?;
/// graph.add_output(OutputBinding::new("vpc_id", vpc.id()))?;
///
/// let sealed = graph.finish()?;
/// assert_eq!(sealed.len(), 2);
/// # Ok::<(), stackgraph_core::GraphError>(())
/// ```
#[derive(Debug, Default)]
pub struct ResourceGraph {
    declarations: Vec<Declaration>,
    index: HashMap<String, NodeIndex>,
    // Edges run from a dependency to its dependent
    dag: DiGraph<Address, Edge>,
    outputs: IndexMap<String, OutputBinding>,
    provider: Option<ProviderBlock>,
    backend: BackendBlock,
    section: Option<String>,
}

impl ResourceGraph {
    /// Create an empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of declarations
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// True when nothing has been declared
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Number of dependency edges
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.dag.edge_count()
    }

    /// Number of bound outputs
    #[inline]
    #[must_use]
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Declaration by logical name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.index.get(name).map(|idx| &self.declarations[idx.index()])
    }

    /// Handle to an already accepted declaration
    #[must_use]
    pub fn handle(&self, name: &str) -> Option<ResourceHandle> {
        self.get(name)
            .map(|decl| ResourceHandle::new(decl.address().clone()))
    }

    /// Add a declaration
    ///
    /// Every reference in its properties and every explicit dependency must
    /// target a declaration that is already in the graph, with the same
    /// resource type as written.
    ///
    /// Outputs are projections of the finished graph, so nothing can be
    /// declared once the first output is bound.
    ///
    /// # Errors
    /// - [`GraphError::DeclarationAfterOutputs`] if an output is already bound
    /// - [`GraphError::DuplicateName`] if the logical name is taken
    /// - [`GraphError::SelfReference`] if it refers to itself
    /// - [`GraphError::UnknownReference`] if a target is not declared
    pub fn declare(&mut self, mut declaration: Declaration) -> Result<ResourceHandle, GraphError> {
        if !self.outputs.is_empty() {
            return Err(GraphError::DeclarationAfterOutputs {
                address: declaration.address().clone(),
            });
        }
        if let Some(&existing) = self.index.get(declaration.name()) {
            return Err(GraphError::DuplicateName {
                name: declaration.name().to_owned(),
                existing: self.dag[existing].clone(),
            });
        }

        let mut edges = Vec::new();
        for address in declaration.dependencies() {
            let target = self.resolve(declaration.address(), address, address.to_string())?;
            edges.push((target, Edge::Ordering));
        }
        for reference in declaration.references() {
            let target =
                self.resolve(declaration.address(), reference.address(), reference.to_string())?;
            edges.push((target, Edge::Reference));
        }

        declaration.set_section(self.section.clone());
        let address = declaration.address().clone();
        let node = self.dag.add_node(address.clone());
        for (dependency, edge) in edges {
            // a reference edge supersedes an ordering edge to the same target
            self.dag.update_edge(dependency, node, edge);
        }

        tracing::debug!(
            address = %address,
            dependencies = self.dag.neighbors_directed(node, petgraph::Direction::Incoming).count(),
            section = self.section.as_deref().unwrap_or("-"),
            "declared resource"
        );

        self.index.insert(address.name().to_owned(), node);
        self.declarations.push(declaration);
        Ok(ResourceHandle::new(address))
    }

    fn resolve(
        &self,
        from: &Address,
        target: &Address,
        written: String,
    ) -> Result<NodeIndex, GraphError> {
        if target.name() == from.name() {
            return Err(GraphError::SelfReference {
                address: from.clone(),
            });
        }
        match self.index.get(target.name()) {
            Some(&idx) if self.dag[idx] == *target => Ok(idx),
            _ => Err(GraphError::UnknownReference {
                from: from.to_string(),
                target: written,
            }),
        }
    }

    /// Run `build` with every declaration it adds tagged as part of `section`
    ///
    /// Sections model conditional subgraphs: the caller decides whether to
    /// enter one at all, and everything declared inside is grouped under the
    /// section name.
    ///
    /// # Errors
    /// Propagates whatever `build` returns.
    pub fn section<T, E>(
        &mut self,
        name: &str,
        build: impl FnOnce(&mut Self) -> Result<T, E>,
    ) -> Result<T, E> {
        let previous = self.section.replace(name.to_owned());
        let result = build(self);
        self.section = previous;
        result
    }

    /// Bind a named output
    ///
    /// # Errors
    /// - [`GraphError::DuplicateOutput`] if the name is taken
    /// - [`GraphError::UnknownReference`] if the value refers to an undeclared resource
    pub fn add_output(&mut self, output: OutputBinding) -> Result<(), GraphError> {
        if self.outputs.contains_key(output.name()) {
            return Err(GraphError::DuplicateOutput {
                name: output.name().to_owned(),
            });
        }
        for reference in output.value().references() {
            let known = self
                .index
                .get(reference.address().name())
                .is_some_and(|&idx| self.dag[idx] == *reference.address());
            if !known {
                return Err(GraphError::UnknownReference {
                    from: format!("output.{}", output.name()),
                    target: reference.to_string(),
                });
            }
        }
        self.outputs.insert(output.name().to_owned(), output);
        Ok(())
    }

    /// Set the provider block
    pub fn set_provider(&mut self, provider: ProviderBlock) {
        self.provider = Some(provider);
    }

    /// Set the state backend
    pub fn set_backend(&mut self, backend: BackendBlock) {
        self.backend = backend;
    }

    /// Seal the graph
    ///
    /// # Errors
    /// [`GraphError::CycleDetected`] if the dependency edges are not acyclic.
    pub fn finish(self) -> Result<SynthesizedGraph, GraphError> {
        let order = toposort(&self.dag, None).map_err(|cycle| GraphError::CycleDetected {
            address: self.dag[cycle.node_id()].clone(),
        })?;
        let creation_order = order.into_iter().map(|idx| self.dag[idx].clone()).collect();

        let graph = SynthesizedGraph::seal(
            self.declarations,
            self.index,
            self.dag,
            creation_order,
            self.outputs,
            self.provider,
            self.backend,
        );
        tracing::info!(
            declarations = graph.len(),
            outputs = graph.output_count(),
            fingerprint = graph.fingerprint(),
            "resource graph sealed"
        );
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn vpc() -> Declaration {
        Declaration::new("aws_vpc", "vpc").with("cidr_block", "10.0.0.0/16")
    }

    #[test]
    fn test_declare_returns_handle() {
        let mut graph = ResourceGraph::new();
        let handle = graph.declare(vpc()).unwrap();
        assert_eq!(handle.address(), &Address::new("aws_vpc", "vpc"));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_duplicate_name_rejected_across_types() {
        let mut graph = ResourceGraph::new();
        graph.declare(vpc()).unwrap();

        let err = graph
            .declare(Declaration::new("aws_subnet", "vpc"))
            .unwrap_err();
        assert!(matches!(err, GraphError::DuplicateName { ref name, .. } if name == "vpc"));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_reference_to_undeclared_rejected() {
        let mut graph = ResourceGraph::new();
        let dangling = Address::new("aws_vpc", "vpc").attr("id");

        let err = graph
            .declare(Declaration::new("aws_subnet", "subnet_a").with("vpc_id", dangling))
            .unwrap_err();
        assert_eq!(
            err,
            GraphError::UnknownReference {
                from: "aws_subnet.subnet_a".into(),
                target: "aws_vpc.vpc.id".into(),
            }
        );
        assert!(graph.is_empty());
    }

    #[test]
    fn test_reference_with_wrong_kind_rejected() {
        let mut graph = ResourceGraph::new();
        graph.declare(vpc()).unwrap();
        let wrong = Address::new("aws_subnet", "vpc").attr("id");

        let err = graph
            .declare(Declaration::new("aws_route_table", "rt").with("vpc_id", wrong))
            .unwrap_err();
        assert!(err.is_reference_error());
    }

    #[test]
    fn test_self_reference_rejected() {
        let mut graph = ResourceGraph::new();
        let own = Address::new("aws_security_group", "sg").attr("id");

        let err = graph
            .declare(Declaration::new("aws_security_group", "sg").with("source", own))
            .unwrap_err();
        assert!(matches!(err, GraphError::SelfReference { .. }));
    }

    #[test]
    fn test_nested_reference_creates_edge() {
        let mut graph = ResourceGraph::new();
        let vpc = graph.declare(vpc()).unwrap();
        graph
            .declare(Declaration::new("aws_security_group", "sg").with(
                "ingress",
                Value::list([Value::map([("vpc", Value::from(vpc.id()))])]),
            ))
            .unwrap();
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_ordering_and_reference_to_same_target_share_one_edge() {
        let mut graph = ResourceGraph::new();
        let vpc = graph.declare(vpc()).unwrap();
        graph
            .declare(
                Declaration::new("aws_subnet", "subnet_a")
                    .with("vpc_id", vpc.id())
                    .depends_on(&vpc),
            )
            .unwrap();
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_section_tags_declarations() {
        let mut graph = ResourceGraph::new();
        graph.declare(vpc()).unwrap();
        graph
            .section("alerting", |g| g.declare(Declaration::new("aws_sns_topic", "topic")))
            .unwrap();
        graph.declare(Declaration::new("aws_ecs_cluster", "cluster")).unwrap();

        assert_eq!(graph.get("vpc").unwrap().section(), None);
        assert_eq!(graph.get("topic").unwrap().section(), Some("alerting"));
        assert_eq!(graph.get("cluster").unwrap().section(), None);
    }

    #[test]
    fn test_duplicate_output_rejected() {
        let mut graph = ResourceGraph::new();
        let vpc = graph.declare(vpc()).unwrap();
        graph.add_output(OutputBinding::new("vpc_id", vpc.id())).unwrap();

        let err = graph
            .add_output(OutputBinding::new("vpc_id", vpc.arn()))
            .unwrap_err();
        assert_eq!(err, GraphError::DuplicateOutput { name: "vpc_id".into() });
    }

    #[test]
    fn test_declare_after_output_rejected() {
        let mut graph = ResourceGraph::new();
        let vpc = graph.declare(vpc()).unwrap();
        graph.add_output(OutputBinding::new("vpc_id", vpc.id())).unwrap();

        let err = graph
            .declare(Declaration::new("aws_subnet", "subnet_a").with("vpc_id", vpc.id()))
            .unwrap_err();
        assert_eq!(
            err,
            GraphError::DeclarationAfterOutputs {
                address: Address::new("aws_subnet", "subnet_a"),
            }
        );
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.output_count(), 1);
    }

    #[test]
    fn test_output_reference_must_exist() {
        let mut graph = ResourceGraph::new();
        let err = graph
            .add_output(OutputBinding::new(
                "alb_dns_name",
                Address::new("aws_lb", "alb").attr("dns_name"),
            ))
            .unwrap_err();
        assert!(err.is_reference_error());
    }

    #[test]
    fn test_finish_detects_cycle() {
        let mut graph = ResourceGraph::new();
        let vpc = graph.declare(vpc()).unwrap();
        graph
            .declare(Declaration::new("aws_subnet", "subnet_a").with("vpc_id", vpc.id()))
            .unwrap();

        // force a back edge the public API cannot produce
        let a = graph.index["vpc"];
        let b = graph.index["subnet_a"];
        graph.dag.add_edge(b, a, Edge::Reference);

        assert!(matches!(graph.finish(), Err(GraphError::CycleDetected { .. })));
    }
}
