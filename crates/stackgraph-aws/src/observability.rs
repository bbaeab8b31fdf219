//! Observability Builder
//!
//! Optional alerting: a notification topic, an e-mail subscription when a
//! recipient is configured, and an alarm on unhealthy targets behind the load
//! balancer. Everything lands in the `alerting` section.

use crate::load_balancing::LoadBalancerHandles;
use crate::resources::{METRIC_ALARM, SECTION_ALERTING, SNS_SUBSCRIPTION, SNS_TOPIC};
use stackgraph_config::Configuration;
use stackgraph_core::{Declaration, GraphError, ResourceGraph, ResourceHandle, Value};

/// Handles produced by [`build_alerting`]
#[derive(Debug, Clone)]
pub struct AlertingHandles {
    /// Notification topic
    pub topic: ResourceHandle,
    /// E-mail subscription, only with a recipient
    pub subscription: Option<ResourceHandle>,
    /// Unhealthy host alarm
    pub alarm: ResourceHandle,
}

/// Declare the alerting subgraph when enabled
///
/// Returns `Ok(None)` and declares nothing when alerts are off.
///
/// # Errors
/// Any [`GraphError`] raised while declaring.
pub fn build_alerting(
    graph: &mut ResourceGraph,
    config: &Configuration,
    balancer: &LoadBalancerHandles,
) -> Result<Option<AlertingHandles>, GraphError> {
    let alerts = config.alerts();
    if !alerts.enabled() {
        tracing::debug!("alerting disabled");
        return Ok(None);
    }
    if alerts.recipient().is_none() {
        tracing::warn!("alerting enabled without ALERT_EMAIL, topic has no subscribers");
    }

    let prefix = config.prefix();
    let handles = graph.section(SECTION_ALERTING, |graph| {
        let topic = graph.declare(
            Declaration::new(SNS_TOPIC, "alerts_topic").with("name", format!("{prefix}-alerts")),
        )?;

        let subscription = alerts
            .recipient()
            .map(|email| {
                graph.declare(
                    Declaration::new(SNS_SUBSCRIPTION, "alerts_email")
                        .with("topic_arn", topic.arn())
                        .with("protocol", "email")
                        .with("endpoint", email),
                )
            })
            .transpose()?;

        let alarm = graph.declare(
            Declaration::new(METRIC_ALARM, "unhealthy_hosts_alarm")
                .with("alarm_name", format!("{prefix}-unhealthy-hosts"))
                .with("alarm_description", "Targets behind the load balancer failing health checks")
                .with("namespace", "AWS/ApplicationELB")
                .with("metric_name", "UnHealthyHostCount")
                .with("statistic", "Maximum")
                .with("period", 60u32)
                .with("evaluation_periods", 1u32)
                .with("threshold", 1u32)
                .with("comparison_operator", "GreaterThanOrEqualToThreshold")
                .with(
                    "dimensions",
                    Value::map([
                        ("LoadBalancer", balancer.alb.attr("arn_suffix")),
                        ("TargetGroup", balancer.target_group.attr("arn_suffix")),
                    ]),
                )
                .with("alarm_actions", Value::list([topic.arn()]))
                .with("ok_actions", Value::list([topic.arn()]))
                .with("treat_missing_data", "notBreaching"),
        )?;

        Ok::<_, GraphError>(AlertingHandles {
            topic,
            subscription,
            alarm,
        })
    })?;

    tracing::info!(
        declarations = graph.len(),
        subscribed = handles.subscription.is_some(),
        "alerting declared"
    );
    Ok(Some(handles))
}
