//! Workload Builder
//!
//! Cluster, log group, execution role, task definition and the Fargate
//! service registered behind the load balancer. The container definitions and
//! the trust policy are structured values rendered as JSON strings, so every
//! reference inside them is still tracked as an edge.

use crate::access::AccessHandles;
use crate::load_balancing::LoadBalancerHandles;
use crate::network::NetworkHandles;
use crate::resources::{
    CONTAINER_NAME, ECS_CLUSTER, ECS_SERVICE, ECS_TASK_DEFINITION, IAM_ROLE,
    IAM_ROLE_POLICY_ATTACHMENT, LOG_GROUP,
};
use stackgraph_config::Configuration;
use stackgraph_core::{Declaration, GraphError, ResourceGraph, ResourceHandle, Value};

const LOG_RETENTION_DAYS: u32 = 7;
const TASK_CPU: &str = "256";
const TASK_MEMORY: &str = "512";
const DESIRED_COUNT: u32 = 1;
const TASK_PRINCIPAL: &str = "ecs-tasks.amazonaws.com";
const EXECUTION_POLICY_ARN: &str =
    "arn:aws:iam::aws:policy/service-role/AmazonECSTaskExecutionRolePolicy";

/// Handles produced by [`build_workload`]
#[derive(Debug, Clone)]
pub struct WorkloadHandles {
    /// ECS cluster
    pub cluster: ResourceHandle,
    /// Log group receiving container output
    pub log_group: ResourceHandle,
    /// Role the agent assumes to pull images and ship logs
    pub exec_role: ResourceHandle,
    /// Task definition with the single `app` container
    pub task_definition: ResourceHandle,
    /// Long-running service
    pub service: ResourceHandle,
}

fn trust_policy() -> Value {
    Value::encoded(Value::map([
        ("Version", Value::from("2012-10-17")),
        (
            "Statement",
            Value::list([Value::map([
                ("Effect", Value::from("Allow")),
                ("Principal", Value::map([("Service", TASK_PRINCIPAL)])),
                ("Action", Value::from("sts:AssumeRole")),
            ])]),
        ),
    ]))
}

fn container_definitions(config: &Configuration, log_group: &ResourceHandle) -> Value {
    let port = config.container_port();
    Value::encoded(Value::list([Value::map([
        ("name", Value::from(CONTAINER_NAME)),
        ("image", Value::from(config.image_uri())),
        ("essential", Value::from(true)),
        (
            "portMappings",
            Value::list([Value::map([
                ("containerPort", Value::from(port)),
                ("hostPort", Value::from(port)),
                ("protocol", Value::from("tcp")),
            ])]),
        ),
        (
            "environment",
            Value::list([Value::map([("name", "PORT".to_owned()), ("value", port.to_string())])]),
        ),
        (
            "logConfiguration",
            Value::map([
                ("logDriver", Value::from("awslogs")),
                (
                    "options",
                    Value::map([
                        ("awslogs-group", Value::from(log_group.name_ref())),
                        ("awslogs-region", Value::from(config.region())),
                        ("awslogs-stream-prefix", Value::from("ecs")),
                    ]),
                ),
            ]),
        ),
    ])]))
}

/// Declare the workload
///
/// # Errors
/// Any [`GraphError`] raised while declaring.
pub fn build_workload(
    graph: &mut ResourceGraph,
    config: &Configuration,
    network: &NetworkHandles,
    access: &AccessHandles,
    balancer: &LoadBalancerHandles,
) -> Result<WorkloadHandles, GraphError> {
    let prefix = config.prefix();

    let cluster = graph.declare(
        Declaration::new(ECS_CLUSTER, "cluster").with("name", format!("{prefix}-cluster")),
    )?;

    let log_group = graph.declare(
        Declaration::new(LOG_GROUP, "log_group")
            .with("name", format!("/ecs/{prefix}"))
            .with("retention_in_days", LOG_RETENTION_DAYS),
    )?;

    let exec_role = graph.declare(
        Declaration::new(IAM_ROLE, "exec_role")
            .with("name", format!("{prefix}-ecs-exec-role"))
            .with("assume_role_policy", trust_policy()),
    )?;

    graph.declare(
        Declaration::new(IAM_ROLE_POLICY_ATTACHMENT, "exec_role_attach")
            .with("role", exec_role.name_ref())
            .with("policy_arn", EXECUTION_POLICY_ARN),
    )?;

    let task_definition = graph.declare(
        Declaration::new(ECS_TASK_DEFINITION, "task_def")
            .with("family", prefix.as_str())
            .with("cpu", TASK_CPU)
            .with("memory", TASK_MEMORY)
            .with("network_mode", "awsvpc")
            .with("requires_compatibilities", Value::list(["FARGATE"]))
            .with("execution_role_arn", exec_role.arn())
            .with("container_definitions", container_definitions(config, &log_group)),
    )?;

    let service = graph.declare(
        Declaration::new(ECS_SERVICE, "service")
            .with("name", format!("{prefix}-service"))
            .with("cluster", cluster.arn())
            .with("task_definition", task_definition.arn())
            .with("desired_count", DESIRED_COUNT)
            .with("launch_type", "FARGATE")
            .with(
                "network_configuration",
                Value::map([
                    ("subnets", network.subnet_ids()),
                    ("security_groups", Value::list([access.task_sg.id()])),
                    ("assign_public_ip", Value::from(true)),
                ]),
            )
            .with(
                "load_balancer",
                Value::list([Value::map([
                    ("target_group_arn", Value::from(balancer.target_group.arn())),
                    ("container_name", Value::from(CONTAINER_NAME)),
                    ("container_port", Value::from(config.container_port())),
                ])]),
            )
            .depends_on(&balancer.target_group)
            .depends_on(&balancer.listener),
    )?;

    tracing::info!(declarations = graph.len(), "workload declared");
    Ok(WorkloadHandles {
        cluster,
        log_group,
        exec_role,
        task_definition,
        service,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::build_access;
    use crate::load_balancing::build_load_balancing;
    use crate::network::build_network;
    use pretty_assertions::assert_eq;
    use stackgraph_config::RawInput;

    fn sealed(raw: &RawInput) -> stackgraph_core::SynthesizedGraph {
        let config = Configuration::resolve(raw).unwrap();
        let mut graph = ResourceGraph::new();
        let network = build_network(&mut graph, &config).unwrap();
        let access = build_access(&mut graph, &config, &network).unwrap();
        let balancer = build_load_balancing(&mut graph, &config, &network, &access).unwrap();
        build_workload(&mut graph, &config, &network, &access, &balancer).unwrap();
        graph.finish().unwrap()
    }

    #[test]
    fn test_container_environment_carries_port() {
        let graph = sealed(&RawInput::new().with("CONTAINER_PORT", "8080"));
        let definitions = graph
            .get("task_def")
            .and_then(|d| d.property("container_definitions"))
            .and_then(Value::decoded)
            .and_then(Value::as_list)
            .unwrap();
        let app = &definitions[0];

        assert_eq!(app.get("name").and_then(Value::as_str), Some("app"));
        let env = app.get("environment").and_then(Value::as_list).unwrap();
        assert_eq!(env[0].get("name").and_then(Value::as_str), Some("PORT"));
        assert_eq!(env[0].get("value").and_then(Value::as_str), Some("8080"));
    }

    #[test]
    fn test_trust_policy_renders_as_json_string() {
        let graph = sealed(&RawInput::new());
        let policy = graph
            .get("exec_role")
            .and_then(|d| d.property("assume_role_policy"))
            .unwrap()
            .to_json();
        let text = policy.as_str().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(text).unwrap();

        assert_eq!(
            parsed["Statement"][0]["Principal"]["Service"],
            serde_json::json!("ecs-tasks.amazonaws.com")
        );
    }

    #[test]
    fn test_service_waits_for_target_group_and_listener() {
        let graph = sealed(&RawInput::new());
        let service = graph.get("service").unwrap();
        let explicit: Vec<&str> = service.dependencies().iter().map(|a| a.name()).collect();
        assert_eq!(explicit, vec!["tg", "listener"]);
        assert_eq!(
            service.property("name").and_then(Value::as_str),
            Some("tv-devops-dev-service")
        );
    }

    #[test]
    fn test_task_definition_follows_log_group() {
        let graph = sealed(&RawInput::new());
        let order: Vec<&str> = graph.creation_order().iter().map(|a| a.name()).collect();
        let position = |name: &str| order.iter().position(|n| *n == name).unwrap();

        assert!(position("log_group") < position("task_def"));
        assert!(position("exec_role") < position("task_def"));
        assert!(position("listener") < position("service"));
    }
}
