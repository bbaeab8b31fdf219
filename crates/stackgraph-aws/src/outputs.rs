//! Output Emitter
//!
//! Binds the named values an operator reads back after apply. Adds no
//! declarations.

use crate::load_balancing::LoadBalancerHandles;
use crate::resources::HEALTH_PATH;
use crate::workload::WorkloadHandles;
use stackgraph_core::{Fragment, GraphError, OutputBinding, ResourceGraph, ResourceHandle, Value};

/// Load balancer DNS name
pub const ALB_DNS_NAME: &str = "alb_dns_name";
/// Health endpoint URL
pub const HEALTH_URL: &str = "health_url";
/// Service name
pub const ECS_SERVICE_NAME: &str = "ecs_service_name";
/// Registry URL, only with the registry section
pub const ECR_REPOSITORY_URL: &str = "ecr_repository_url";

/// Bind the stack outputs
///
/// # Errors
/// Any [`GraphError`] raised while binding.
pub fn emit_outputs(
    graph: &mut ResourceGraph,
    balancer: &LoadBalancerHandles,
    workload: &WorkloadHandles,
    registry: Option<&ResourceHandle>,
) -> Result<(), GraphError> {
    let dns_name = balancer.alb.attr("dns_name");

    graph.add_output(
        OutputBinding::new(ALB_DNS_NAME, dns_name.clone())
            .describe("Public DNS name of the load balancer"),
    )?;
    graph.add_output(
        OutputBinding::new(
            HEALTH_URL,
            Value::template([
                Fragment::from("http://"),
                Fragment::from(dns_name),
                Fragment::from(HEALTH_PATH),
            ]),
        )
        .describe("Health endpoint behind the load balancer"),
    )?;
    graph.add_output(
        OutputBinding::new(ECS_SERVICE_NAME, workload.service.name_ref())
            .describe("Name of the ECS service"),
    )?;
    if let Some(repository) = registry {
        graph.add_output(
            OutputBinding::new(ECR_REPOSITORY_URL, repository.attr("repository_url"))
                .describe("URL to push application images to"),
        )?;
    }

    tracing::info!(outputs = graph.output_count(), "outputs bound");
    Ok(())
}
