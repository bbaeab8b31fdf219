//! Load Balancing Builder

use crate::access::AccessHandles;
use crate::network::NetworkHandles;
use crate::resources::{HEALTHY_STATUS, HEALTH_PATH, LISTENER, LOAD_BALANCER, PUBLIC_PORT, TARGET_GROUP};
use stackgraph_config::Configuration;
use stackgraph_core::{Declaration, GraphError, ResourceGraph, ResourceHandle, Value};

/// Handles produced by [`build_load_balancing`]
#[derive(Debug, Clone)]
pub struct LoadBalancerHandles {
    /// Internet-facing application load balancer
    pub alb: ResourceHandle,
    /// Target group the service registers into
    pub target_group: ResourceHandle,
    /// HTTP listener forwarding to the target group
    pub listener: ResourceHandle,
}

/// Declare the load balancer, its target group and listener
///
/// # Errors
/// Any [`GraphError`] raised while declaring.
pub fn build_load_balancing(
    graph: &mut ResourceGraph,
    config: &Configuration,
    network: &NetworkHandles,
    access: &AccessHandles,
) -> Result<LoadBalancerHandles, GraphError> {
    let prefix = config.prefix();

    let alb = graph.declare(
        Declaration::new(LOAD_BALANCER, "alb")
            .with("name", format!("{prefix}-alb"))
            .with("load_balancer_type", "application")
            .with("internal", false)
            .with("subnets", network.subnet_ids())
            .with("security_groups", Value::list([access.alb_sg.id()])),
    )?;

    let target_group = graph.declare(
        Declaration::new(TARGET_GROUP, "tg")
            .with("name", format!("{prefix}-tg"))
            .with("port", config.container_port())
            .with("protocol", "HTTP")
            .with("target_type", "ip")
            .with("vpc_id", network.vpc.id())
            .with(
                "health_check",
                Value::map([
                    ("path", Value::from(HEALTH_PATH)),
                    ("protocol", Value::from("HTTP")),
                    ("matcher", Value::from(HEALTHY_STATUS)),
                ]),
            ),
    )?;

    let listener = graph.declare(
        Declaration::new(LISTENER, "listener")
            .with("load_balancer_arn", alb.arn())
            .with("port", PUBLIC_PORT)
            .with("protocol", "HTTP")
            .with(
                "default_action",
                Value::list([Value::map([
                    ("type", Value::from("forward")),
                    ("target_group_arn", Value::from(target_group.arn())),
                ])]),
            ),
    )?;

    tracing::info!(declarations = graph.len(), "load balancing declared");
    Ok(LoadBalancerHandles {
        alb,
        target_group,
        listener,
    })
}
