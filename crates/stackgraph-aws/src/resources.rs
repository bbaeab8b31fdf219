//! Resource types and fixed values of the stack

/// Provider name
pub const PROVIDER: &str = "aws";

/// VPC
pub const VPC: &str = "aws_vpc";
/// Subnet
pub const SUBNET: &str = "aws_subnet";
/// Internet gateway
pub const INTERNET_GATEWAY: &str = "aws_internet_gateway";
/// Route table
pub const ROUTE_TABLE: &str = "aws_route_table";
/// Route
pub const ROUTE: &str = "aws_route";
/// Route table association
pub const ROUTE_TABLE_ASSOCIATION: &str = "aws_route_table_association";
/// Security group
pub const SECURITY_GROUP: &str = "aws_security_group";
/// Load balancer
pub const LOAD_BALANCER: &str = "aws_lb";
/// Target group
pub const TARGET_GROUP: &str = "aws_lb_target_group";
/// Listener
pub const LISTENER: &str = "aws_lb_listener";
/// ECS cluster
pub const ECS_CLUSTER: &str = "aws_ecs_cluster";
/// Log group
pub const LOG_GROUP: &str = "aws_cloudwatch_log_group";
/// IAM role
pub const IAM_ROLE: &str = "aws_iam_role";
/// IAM role policy attachment
pub const IAM_ROLE_POLICY_ATTACHMENT: &str = "aws_iam_role_policy_attachment";
/// ECS task definition
pub const ECS_TASK_DEFINITION: &str = "aws_ecs_task_definition";
/// ECS service
pub const ECS_SERVICE: &str = "aws_ecs_service";
/// SNS topic
pub const SNS_TOPIC: &str = "aws_sns_topic";
/// SNS subscription
pub const SNS_SUBSCRIPTION: &str = "aws_sns_topic_subscription";
/// CloudWatch alarm
pub const METRIC_ALARM: &str = "aws_cloudwatch_metric_alarm";
/// ECR repository
pub const ECR_REPOSITORY: &str = "aws_ecr_repository";

/// Port the load balancer listens on
pub const PUBLIC_PORT: u16 = 80;
/// Health check path served by the workload
pub const HEALTH_PATH: &str = "/health";
/// Only status accepted as healthy
pub const HEALTHY_STATUS: &str = "200";
/// Every IPv4 address
pub const ANYWHERE: &str = "0.0.0.0/0";
/// Container name inside the task definition
pub const CONTAINER_NAME: &str = "app";

/// Section holding the alerting subgraph
pub const SECTION_ALERTING: &str = "alerting";
/// Section holding the container registry
pub const SECTION_REGISTRY: &str = "registry";
