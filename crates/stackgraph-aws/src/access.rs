//! Access Control Builder
//!
//! Two security groups: the public one in front of the load balancer, and the
//! workload one whose only ingress source is the public group.

use crate::network::NetworkHandles;
use crate::resources::{ANYWHERE, PUBLIC_PORT, SECURITY_GROUP};
use stackgraph_config::Configuration;
use stackgraph_core::{Declaration, GraphError, Reference, ResourceGraph, ResourceHandle, Value};

/// Handles produced by [`build_access`]
#[derive(Debug, Clone)]
pub struct AccessHandles {
    /// Group attached to the load balancer
    pub alb_sg: ResourceHandle,
    /// Group attached to the running tasks
    pub task_sg: ResourceHandle,
}

/// Where a rule admits traffic from
enum Source {
    Cidr(&'static str),
    Group(Reference),
}

// Inline rules are attribute blocks: every field has to be present.
fn rule(description: &str, protocol: &str, from: u16, to: u16, source: Source) -> Value {
    let (cidr_blocks, security_groups) = match source {
        Source::Cidr(cidr) => (Value::list([cidr]), Value::List(Vec::new())),
        Source::Group(group) => (Value::List(Vec::new()), Value::list([group])),
    };
    Value::map([
        ("description", Value::from(description)),
        ("protocol", Value::from(protocol)),
        ("from_port", Value::from(from)),
        ("to_port", Value::from(to)),
        ("cidr_blocks", cidr_blocks),
        ("ipv6_cidr_blocks", Value::List(Vec::new())),
        ("prefix_list_ids", Value::List(Vec::new())),
        ("security_groups", security_groups),
        ("self", Value::from(false)),
    ])
}

fn egress_all() -> Value {
    Value::list([rule("all outbound", "-1", 0, 0, Source::Cidr(ANYWHERE))])
}

/// Declare both security groups
///
/// # Errors
/// Any [`GraphError`] raised while declaring.
pub fn build_access(
    graph: &mut ResourceGraph,
    config: &Configuration,
    network: &NetworkHandles,
) -> Result<AccessHandles, GraphError> {
    let prefix = config.prefix();
    let port = config.container_port();

    let alb_sg = graph.declare(
        Declaration::new(SECURITY_GROUP, "alb_sg")
            .with("name", format!("{prefix}-alb-sg"))
            .with("description", "Public HTTP to the load balancer")
            .with("vpc_id", network.vpc.id())
            .with(
                "ingress",
                Value::list([rule(
                    "http from anywhere",
                    "tcp",
                    PUBLIC_PORT,
                    PUBLIC_PORT,
                    Source::Cidr(ANYWHERE),
                )]),
            )
            .with("egress", egress_all()),
    )?;

    let task_sg = graph.declare(
        Declaration::new(SECURITY_GROUP, "task_sg")
            .with("name", format!("{prefix}-task-sg"))
            .with("description", "Load balancer to the application port")
            .with("vpc_id", network.vpc.id())
            .with(
                "ingress",
                Value::list([rule(
                    "app port from load balancer",
                    "tcp",
                    port,
                    port,
                    Source::Group(alb_sg.id()),
                )]),
            )
            .with("egress", egress_all()),
    )?;

    tracing::info!(declarations = graph.len(), "access control declared");
    Ok(AccessHandles { alb_sg, task_sg })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::build_network;
    use stackgraph_config::RawInput;

    fn ingress_of(graph: &stackgraph_core::SynthesizedGraph, name: &str) -> Value {
        graph
            .get(name)
            .and_then(|d| d.property("ingress"))
            .and_then(Value::as_list)
            .and_then(<[Value]>::first)
            .cloned()
            .unwrap()
    }

    fn sealed(port: &str) -> stackgraph_core::SynthesizedGraph {
        let raw = RawInput::new().with("CONTAINER_PORT", port);
        let config = Configuration::resolve(&raw).unwrap();
        let mut graph = ResourceGraph::new();
        let network = build_network(&mut graph, &config).unwrap();
        build_access(&mut graph, &config, &network).unwrap();
        graph.finish().unwrap()
    }

    #[test]
    fn test_public_group_open_on_port_80() {
        let graph = sealed("3000");
        let ingress = ingress_of(&graph, "alb_sg");
        assert_eq!(ingress.get("from_port").and_then(Value::as_i64), Some(80));
        assert_eq!(
            ingress.get("cidr_blocks").and_then(Value::as_list),
            Some([Value::from(ANYWHERE)].as_slice())
        );
    }

    #[test]
    fn test_task_group_admits_only_public_group() {
        let graph = sealed("8080");
        let ingress = ingress_of(&graph, "task_sg");

        assert_eq!(ingress.get("to_port").and_then(Value::as_i64), Some(8080));
        assert_eq!(
            ingress.get("cidr_blocks").and_then(Value::as_list).map(<[Value]>::is_empty),
            Some(true)
        );

        let groups = ingress.get("security_groups").and_then(Value::as_list).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(
            groups[0].as_reference().map(ToString::to_string),
            Some("aws_security_group.alb_sg.id".to_owned())
        );
    }
}
