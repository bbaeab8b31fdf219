//! Synthesized Graph
//!
//! The sealed result of a synthesis run. It has no public constructor: the
//! only way to obtain one is [`crate::ResourceGraph::finish`], so every
//! instance has passed the construction-time checks.

use crate::address::Address;
use crate::declaration::Declaration;
use crate::output::OutputBinding;
use crate::settings::{BackendBlock, ProviderBlock};
use indexmap::IndexMap;
use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::HashMap;
use std::fmt;

/// Kind of dependency edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// The dependent consumes an attribute of the dependency
    Reference,
    /// Explicit ordering with no attribute consumed
    Ordering,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Reference => write!(f, "ref"),
            Edge::Ordering => write!(f, "depends_on"),
        }
    }
}

/// Immutable, fully wired resource graph
#[derive(Debug, Clone)]
pub struct SynthesizedGraph {
    declarations: Vec<Declaration>,
    index: HashMap<String, NodeIndex>,
    dag: DiGraph<Address, Edge>,
    creation_order: Vec<Address>,
    outputs: IndexMap<String, OutputBinding>,
    provider: Option<ProviderBlock>,
    backend: BackendBlock,
    fingerprint: String,
}

impl SynthesizedGraph {
    pub(crate) fn seal(
        declarations: Vec<Declaration>,
        index: HashMap<String, NodeIndex>,
        dag: DiGraph<Address, Edge>,
        creation_order: Vec<Address>,
        outputs: IndexMap<String, OutputBinding>,
        provider: Option<ProviderBlock>,
        backend: BackendBlock,
    ) -> Self {
        let mut graph = Self {
            declarations,
            index,
            dag,
            creation_order,
            outputs,
            provider,
            backend,
            fingerprint: String::new(),
        };
        graph.fingerprint = crate::render::fingerprint(&graph.render());
        graph
    }

    /// Number of declarations
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// True when the graph holds no declarations
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Declarations in the order they were added
    #[inline]
    #[must_use]
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Declaration by logical name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.index.get(name).map(|idx| &self.declarations[idx.index()])
    }

    /// Declarations of a resource type
    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Declaration> + 'a {
        self.declarations.iter().filter(move |d| d.kind() == kind)
    }

    /// Declarations added inside a conditional section
    pub fn in_section<'a>(
        &'a self,
        section: &'a str,
    ) -> impl Iterator<Item = &'a Declaration> + 'a {
        self.declarations
            .iter()
            .filter(move |d| d.section() == Some(section))
    }

    /// Addresses in an order where every dependency precedes its dependents
    #[inline]
    #[must_use]
    pub fn creation_order(&self) -> &[Address] {
        &self.creation_order
    }

    /// Direct dependencies of a declaration
    #[must_use]
    pub fn dependencies_of(&self, name: &str) -> Vec<&Address> {
        let Some(&idx) = self.index.get(name) else {
            return Vec::new();
        };
        let mut deps: Vec<&Address> = self
            .dag
            .neighbors_directed(idx, Direction::Incoming)
            .map(|n| &self.dag[n])
            .collect();
        deps.sort();
        deps
    }

    /// Number of dependency edges
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.dag.edge_count()
    }

    /// Outputs in binding order
    pub fn outputs(&self) -> impl Iterator<Item = &OutputBinding> {
        self.outputs.values()
    }

    /// Output by name
    #[must_use]
    pub fn output(&self, name: &str) -> Option<&OutputBinding> {
        self.outputs.get(name)
    }

    /// Number of outputs
    #[inline]
    #[must_use]
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Provider block, if set
    #[inline]
    #[must_use]
    pub fn provider(&self) -> Option<&ProviderBlock> {
        self.provider.as_ref()
    }

    /// State backend
    #[inline]
    #[must_use]
    pub fn backend(&self) -> &BackendBlock {
        &self.backend
    }

    /// Hex SHA-256 of the compact rendered document
    #[inline]
    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Graphviz rendering of the dependency edges
    #[must_use]
    pub fn to_dot(&self) -> String {
        format!("{}", Dot::new(&self.dag))
    }
}
