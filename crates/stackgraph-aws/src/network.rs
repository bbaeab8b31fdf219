//! Network Topology Builder
//!
//! One VPC, two public subnets in distinct availability zones, an internet
//! gateway and a single route table sending `0.0.0.0/0` through it. Both
//! subnets are associated with that table.

use crate::resources::{
    ANYWHERE, INTERNET_GATEWAY, ROUTE, ROUTE_TABLE, ROUTE_TABLE_ASSOCIATION, SUBNET, VPC,
};
use stackgraph_config::Configuration;
use stackgraph_core::{Declaration, GraphError, ResourceGraph, ResourceHandle, Value};

const VPC_CIDR: &str = "10.0.0.0/16";
const SUBNETS: [(&str, &str, &str, char); 2] = [
    ("subnet_a", "rta_a", "10.0.1.0/24", 'a'),
    ("subnet_b", "rta_b", "10.0.2.0/24", 'b'),
];

/// Handles produced by [`build_network`]
#[derive(Debug, Clone)]
pub struct NetworkHandles {
    /// The VPC
    pub vpc: ResourceHandle,
    /// Public subnets, always two, in zones `a` and `b`
    pub subnets: [ResourceHandle; 2],
    /// Internet gateway attached to the VPC
    pub internet_gateway: ResourceHandle,
    /// Route table shared by both subnets
    pub route_table: ResourceHandle,
}

impl NetworkHandles {
    /// Subnet ids as a list value
    #[must_use]
    pub fn subnet_ids(&self) -> Value {
        Value::list(self.subnets.iter().map(ResourceHandle::id))
    }
}

fn name_tag(value: String) -> Value {
    Value::map([("Name", value)])
}

/// Declare the network topology
///
/// # Errors
/// Any [`GraphError`] raised while declaring.
pub fn build_network(
    graph: &mut ResourceGraph,
    config: &Configuration,
) -> Result<NetworkHandles, GraphError> {
    let prefix = config.prefix();

    let vpc = graph.declare(
        Declaration::new(VPC, "vpc")
            .with("cidr_block", VPC_CIDR)
            .with("enable_dns_support", true)
            .with("enable_dns_hostnames", true)
            .with("tags", name_tag(format!("{prefix}-vpc"))),
    )?;

    let [a, b] = SUBNETS.map(|(name, _, cidr, zone)| {
        Declaration::new(SUBNET, name)
            .with("vpc_id", vpc.id())
            .with("cidr_block", cidr)
            .with("availability_zone", format!("{}{zone}", config.region()))
            .with("map_public_ip_on_launch", true)
            .with("tags", name_tag(format!("{prefix}-public-{zone}")))
    });
    let subnets = [graph.declare(a)?, graph.declare(b)?];

    let internet_gateway = graph.declare(
        Declaration::new(INTERNET_GATEWAY, "igw")
            .with("vpc_id", vpc.id())
            .with("tags", name_tag(format!("{prefix}-igw"))),
    )?;

    let route_table = graph.declare(
        Declaration::new(ROUTE_TABLE, "public_rt")
            .with("vpc_id", vpc.id())
            .with("tags", name_tag(format!("{prefix}-public-rt"))),
    )?;

    graph.declare(
        Declaration::new(ROUTE, "default_route")
            .with("route_table_id", route_table.id())
            .with("destination_cidr_block", ANYWHERE)
            .with("gateway_id", internet_gateway.id()),
    )?;

    for (subnet, (_, association, _, _)) in subnets.iter().zip(SUBNETS) {
        graph.declare(
            Declaration::new(ROUTE_TABLE_ASSOCIATION, association)
                .with("subnet_id", subnet.id())
                .with("route_table_id", route_table.id()),
        )?;
    }

    tracing::info!(declarations = graph.len(), "network topology declared");
    Ok(NetworkHandles {
        vpc,
        subnets,
        internet_gateway,
        route_table,
    })
}
